//! Export run results.
//!
//! - JSON: the 16 display tables plus the fitted model and diagnostics
//! - CSV: one row per projected team, easy to consume in spreadsheets

use std::fs::File;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::app::pipeline::RunOutput;
use crate::domain::{ClampPolicy, DisplayTable, DroppedRecord, LinearFit, UnknownPolicy};
use crate::error::{AppError, EXIT_DATA, EXIT_USAGE};

#[derive(Debug, Serialize)]
struct ExportFile<'a> {
    tool: &'static str,
    generated_at: DateTime<Utc>,
    source: &'a str,
    season: u16,
    unknown_policy: UnknownPolicy,
    clamp_policy: ClampPolicy,
    rows_read: usize,
    rows_used: usize,
    skipped: Vec<SkippedRow<'a>>,
    dropped: &'a [DroppedRecord],
    #[serde(skip_serializing_if = "Option::is_none")]
    fit: Option<LinearFit>,
    #[serde(skip_serializing_if = "Option::is_none")]
    fit_error: Option<String>,
    tables: Vec<DisplayTable>,
}

#[derive(Debug, Serialize)]
struct SkippedRow<'a> {
    index: usize,
    name: Option<&'a str>,
    message: &'a str,
}

/// Write the display tables, model and diagnostics to a JSON file.
pub fn write_results_json(path: &Path, run: &RunOutput) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::new(EXIT_USAGE, format!("Failed to create export JSON '{}': {e}", path.display())))?;

    let export = ExportFile {
        tool: "standings",
        generated_at: Utc::now(),
        source: &run.source,
        season: run.season,
        unknown_policy: run.pipeline.unknown,
        clamp_policy: run.pipeline.clamp,
        rows_read: run.ingest.rows_read,
        rows_used: run.ingest.rows_used,
        skipped: run
            .ingest
            .row_errors
            .iter()
            .map(|e| SkippedRow {
                index: e.index,
                name: e.name.as_deref(),
                message: &e.message,
            })
            .collect(),
        dropped: &run.output.dropped,
        fit: run.output.predicted.as_ref().ok().map(|p| p.fit),
        fit_error: run.output.prediction_error().map(|e| e.to_string()),
        tables: run.output.display_tables(),
    };

    serde_json::to_writer_pretty(file, &export)
        .map_err(|e| AppError::new(EXIT_USAGE, format!("Failed to write export JSON: {e}")))
}

/// One CSV row per projected team; the header comes from the field names.
#[derive(Debug, Serialize)]
struct PredictionRow<'a> {
    name: &'a str,
    conference: &'a str,
    division: &'a str,
    touchdowns: f64,
    wins: u32,
    losses: u32,
    fitted_wins: String,
    predicted_wins: i64,
    predicted_losses: i64,
}

/// Write per-team projections to a CSV file.
///
/// Fails when the regression could not be fit: there is nothing to project.
pub fn write_predictions_csv(path: &Path, run: &RunOutput) -> Result<(), AppError> {
    let predicted = run.output.predicted.as_ref().map_err(|e| {
        AppError::new(EXIT_DATA, format!("Cannot export predictions: {e}"))
    })?;

    let mut writer = csv::Writer::from_path(path)
        .map_err(|e| AppError::new(EXIT_USAGE, format!("Failed to create export CSV '{}': {e}", path.display())))?;

    for p in &predicted.predictions {
        writer
            .serialize(PredictionRow {
                name: &p.name,
                conference: &p.conference,
                division: &p.division,
                touchdowns: p.touchdowns,
                wins: p.actual_wins,
                losses: p.actual_losses,
                fitted_wins: format!("{:.4}", p.fitted_wins),
                predicted_wins: p.predicted_wins,
                predicted_losses: p.predicted_losses,
            })
            .map_err(|e| AppError::new(EXIT_USAGE, format!("Failed to write export CSV row: {e}")))?;
    }

    writer
        .flush()
        .map_err(|e| AppError::new(EXIT_USAGE, format!("Failed to write export CSV: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::pipeline::run_with_raw;
    use crate::domain::{PipelineConfig, RawTeamRecord};

    fn sample_run() -> RunOutput {
        let raw: Vec<RawTeamRecord> = serde_json::from_str(
            r#"[
                {"Name":"A","Conference":"AFC","Division":"East","Wins":10,"Losses":5,"Touchdowns":40,"DivisionRank":1},
                {"Name":"B, Jr.","Conference":"AFC","Division":"East","Wins":5,"Losses":10,"Touchdowns":10,"DivisionRank":2}
            ]"#,
        )
        .unwrap();
        run_with_raw(raw, "test".to_string(), 2025, PipelineConfig::default()).unwrap()
    }

    #[test]
    fn json_export_contains_all_tables() {
        let run = sample_run();
        let path = std::env::temp_dir().join(format!("standings_export_{}.json", std::process::id()));
        write_results_json(&path, &run).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let _ = std::fs::remove_file(&path);
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();

        let tables = value["tables"].as_array().unwrap();
        assert_eq!(tables.len(), 16);
        assert_eq!(tables[0]["id"], "AFC_East");
        assert_eq!(tables[8]["id"], "AFC_East_Predictions");
        assert_eq!(tables[8]["rows"][0]["team"], "A");
        assert_eq!(value["clamp_policy"], "none");
        assert!(value["fit"]["model"]["slope"].as_f64().unwrap() > 0.0);
    }

    #[test]
    fn csv_export_has_one_row_per_team() {
        let run = sample_run();
        let path = std::env::temp_dir().join(format!("standings_export_{}.csv", std::process::id()));
        write_predictions_csv(&path, &run).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let _ = std::fs::remove_file(&path);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(
            lines[0],
            "name,conference,division,touchdowns,wins,losses,fitted_wins,predicted_wins,predicted_losses"
        );
        assert_eq!(lines[1], "A,AFC,East,40.0,10,5,10.0000,10,5");

        // Names with delimiters are quoted and read back intact.
        let mut reader = csv::Reader::from_reader(text.as_bytes());
        let names: Vec<String> = reader
            .records()
            .map(|r| r.unwrap()[0].to_string())
            .collect();
        assert_eq!(names, ["A", "B, Jr."]);
    }
}
