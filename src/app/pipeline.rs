//! Shared standings pipeline used by both CLI and TUI front-ends.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! load -> ingest -> group (current) and fit -> project -> group -> rank (predicted)
//!
//! Every stage takes its inputs by reference and returns fresh values, so
//! running the pipeline twice over the same records yields identical output.

use tracing::{info, warn};

use crate::data::{self, SourceData};
use crate::domain::{
    DisplayRow, DisplayTable, DroppedRecord, GroupKey, GroupSet, LinearFit, PipelineConfig, PredictionEntry,
    RawTeamRecord, RunConfig, StandingEntry, TableKind, TeamRecord,
};
use crate::error::{AppError, StandingsError};
use crate::io::ingest::{IngestedData, ingest_records};
use crate::math::fit_line;
use crate::models::{feature_pairs, predict_all};
use crate::standings::{current_standings, prediction_groups, rank_groups};

/// Regression-derived standings.
#[derive(Debug, Clone, PartialEq)]
pub struct PredictedStandings {
    pub fit: LinearFit,
    /// One projection per input record, in input order.
    pub predictions: Vec<PredictionEntry>,
    /// Projections grouped by division and ranked by projected wins.
    pub groups: GroupSet<PredictionEntry>,
}

/// Output of the core pipeline for one set of records.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineOutput {
    /// Current standings, entries in input order.
    pub current: GroupSet<StandingEntry>,
    /// Records excluded from grouping (unrecognized conference/division).
    pub dropped: Vec<DroppedRecord>,
    /// Predicted standings, or the reason they are unavailable.
    pub predicted: Result<PredictedStandings, StandingsError>,
}

/// Run grouping, fitting, projection and ranking over validated records.
///
/// Fails only for an empty record set or (under `UnknownPolicy::Reject`) an
/// unrecognized group tag. A regression failure is reported through
/// `PipelineOutput::predicted` so the current standings can still be shown.
pub fn run_pipeline(records: &[TeamRecord], config: &PipelineConfig) -> Result<PipelineOutput, StandingsError> {
    if records.is_empty() {
        return Err(StandingsError::EmptyInput);
    }

    let current = current_standings(records, config.unknown)?;
    let predicted = predict_standings(records, config);
    if let Err(err) = &predicted {
        warn!(error = %err, "predicted standings unavailable");
    }

    Ok(PipelineOutput {
        current: current.groups,
        dropped: current.dropped,
        predicted,
    })
}

/// Fit the league-wide line and build ranked predicted groups.
pub fn predict_standings(
    records: &[TeamRecord],
    config: &PipelineConfig,
) -> Result<PredictedStandings, StandingsError> {
    let (xs, ys) = feature_pairs(records);
    let fit = fit_line(&xs, &ys)?;
    info!(
        slope = fit.model.slope,
        intercept = fit.model.intercept,
        r_squared = fit.quality.r_squared,
        n = fit.quality.n,
        "fitted touchdowns-to-wins line"
    );

    let predictions = predict_all(&fit.model, records, config.clamp);
    let grouped = prediction_groups(&predictions, config.unknown)?;
    let groups = rank_groups(&grouped.groups);

    Ok(PredictedStandings {
        fit,
        predictions,
        groups,
    })
}

impl PipelineOutput {
    pub fn prediction_error(&self) -> Option<&StandingsError> {
        self.predicted.as_ref().err()
    }

    /// The 16 tables handed to a display sink: 8 current, then 8 predicted.
    ///
    /// If the fit failed, every predicted table is empty and marked unavailable.
    pub fn display_tables(&self) -> Vec<DisplayTable> {
        let mut tables = Vec::with_capacity(16);

        for (key, group) in self.current.iter() {
            tables.push(DisplayTable {
                id: key.id().to_string(),
                kind: TableKind::Current,
                rows: group
                    .iter()
                    .map(|e| DisplayRow {
                        team: e.team.clone(),
                        rank: Some(e.rank),
                        wins: i64::from(e.wins),
                        losses: i64::from(e.losses),
                    })
                    .collect(),
                unavailable: None,
            });
        }

        for key in GroupKey::ALL {
            let (rows, unavailable) = match &self.predicted {
                Ok(predicted) => (
                    predicted
                        .groups
                        .get(key)
                        .iter()
                        .map(|p| DisplayRow {
                            team: p.name.clone(),
                            rank: None,
                            wins: p.predicted_wins,
                            losses: p.predicted_losses,
                        })
                        .collect(),
                    None,
                ),
                Err(err) => (Vec::new(), Some(err.to_string())),
            };
            tables.push(DisplayTable {
                id: key.predicted_id(),
                kind: TableKind::Predicted,
                rows,
                unavailable,
            });
        }

        tables
    }
}

/// All computed outputs of a single run, plus the inputs they came from.
#[derive(Debug, Clone)]
pub struct RunOutput {
    pub source: String,
    pub season: u16,
    pub pipeline: PipelineConfig,
    pub raw: Vec<RawTeamRecord>,
    pub ingest: IngestedData,
    pub output: PipelineOutput,
}

/// Load records from the configured source and run the full pipeline.
pub fn run_standings(config: &RunConfig) -> Result<RunOutput, AppError> {
    let SourceData { label, records } = data::load_raw(config)?;
    info!(source = %label, rows = records.len(), "loaded standings payload");

    if let Some(path) = &config.save_raw {
        crate::io::ingest::write_raw_json(path, &records)?;
        info!(path = %path.display(), "saved raw payload");
    }

    run_with_raw(records, label, config.season, config.pipeline)
}

/// Run the pipeline over an already-loaded payload.
///
/// This is useful for the TUI where we want to re-run with different policies without re-fetching.
pub fn run_with_raw(
    raw: Vec<RawTeamRecord>,
    source: String,
    season: u16,
    pipeline: PipelineConfig,
) -> Result<RunOutput, AppError> {
    let ingest = ingest_records(&raw);
    if !ingest.row_errors.is_empty() {
        warn!(skipped = ingest.row_errors.len(), "some records were skipped during ingest");
    }

    let output = run_pipeline(&ingest.records, &pipeline)?;

    Ok(RunOutput {
        source,
        season,
        pipeline,
        raw,
        ingest,
        output,
    })
}
