//! Text rendering of the current and predicted standings.

use crate::app::pipeline::RunOutput;
use crate::domain::{ClampPolicy, DisplayTable, GroupKey, LinearFit, TableKind};
use crate::error::StandingsError;

const TEAM_WIDTH: usize = 26;

/// Format the run header: where the data came from and what was skipped.
pub fn format_run_summary(run: &RunOutput) -> String {
    let mut out = String::new();

    out.push_str("=== standings - Division Standings & Touchdown Model ===\n");
    out.push_str(&format!("Source: {}\n", run.source));
    out.push_str(&format!("Season: {}\n", run.season));
    out.push_str(&format!(
        "Records: read={} used={} skipped={} dropped={}\n",
        run.ingest.rows_read,
        run.ingest.rows_used,
        run.ingest.row_errors.len(),
        run.output.dropped.len(),
    ));

    for e in &run.ingest.row_errors {
        out.push_str(&format!(
            "  (skipped #{} {}) {}\n",
            e.index,
            e.name.as_deref().unwrap_or("<unnamed>"),
            e.message
        ));
    }
    for d in &run.output.dropped {
        out.push_str(&format!(
            "  (dropped #{} {}) unrecognized group '{}'/'{}'\n",
            d.index, d.name, d.conference, d.division
        ));
    }
    out.push('\n');

    out
}

/// Format the 8 current-standings tables.
pub fn format_current(tables: &[DisplayTable]) -> String {
    let mut out = String::new();
    out.push_str("Current Standings:\n\n");

    for table in tables.iter().filter(|t| t.kind == TableKind::Current) {
        out.push_str(&format_table(table));
        out.push('\n');
    }

    out
}

/// Format the 8 predicted tables, or an explicit notice when no model could be fit.
pub fn format_predicted(
    tables: &[DisplayTable],
    fit: Result<&LinearFit, &StandingsError>,
    clamp: ClampPolicy,
) -> String {
    let mut out = String::new();
    out.push_str("Predicted Standings (touchdowns vs. league regression):\n");

    let fit = match fit {
        Ok(fit) => fit,
        Err(err) => {
            out.push_str(&format!("Predicted standings unavailable: {err}\n"));
            return out;
        }
    };

    out.push_str(&format_model_line(fit, clamp));
    out.push_str("\n\n");

    for table in tables.iter().filter(|t| t.kind == TableKind::Predicted) {
        out.push_str(&format_table(table));
        out.push('\n');
    }

    out
}

/// One-line model description.
pub fn format_model_line(fit: &LinearFit, clamp: ClampPolicy) -> String {
    format!(
        "Model: wins = {:.4} * touchdowns {} {:.4} | r2={:.3} rmse={:.3} | n={} | clamp={}",
        fit.model.slope,
        if fit.model.intercept < 0.0 { "-" } else { "+" },
        fit.model.intercept.abs(),
        fit.quality.r_squared,
        fit.quality.rmse,
        fit.quality.n,
        match clamp {
            ClampPolicy::None => "none",
            ClampPolicy::Season => "season",
        }
    )
}

fn table_title(table: &DisplayTable) -> String {
    let base = table.id.trim_end_matches("_Predictions");
    let label = GroupKey::ALL
        .iter()
        .find(|k| k.id() == base)
        .map(|k| k.display_name())
        .unwrap_or_else(|| base.to_string());
    match table.kind {
        TableKind::Current => label,
        TableKind::Predicted => format!("{label} (predicted)"),
    }
}

fn format_table(table: &DisplayTable) -> String {
    let mut out = String::new();
    let with_rank = table.kind == TableKind::Current;

    out.push_str(&table_title(table));
    out.push('\n');

    if with_rank {
        out.push_str(format!("{:<TEAM_WIDTH$} {:>4} {:>5} {:>6}", "team", "rank", "wins", "losses").trim_end());
        out.push('\n');
        out.push_str(&format!("{:-<TEAM_WIDTH$} {:-<4} {:-<5} {:-<6}", "", "", "", ""));
    } else {
        out.push_str(format!("{:<TEAM_WIDTH$} {:>5} {:>6}", "team", "wins", "losses").trim_end());
        out.push('\n');
        out.push_str(&format!("{:-<TEAM_WIDTH$} {:-<5} {:-<6}", "", "", ""));
    }
    out.push('\n');

    if let Some(reason) = &table.unavailable {
        out.push_str(&format!("(unavailable: {reason})\n"));
        return out;
    }
    if table.rows.is_empty() {
        out.push_str("(no teams)\n");
        return out;
    }

    for row in &table.rows {
        let team = truncate(&row.team, TEAM_WIDTH);
        let line = if with_rank {
            format!(
                "{team:<TEAM_WIDTH$} {:>4} {:>5} {:>6}",
                row.rank.map(|r| r.to_string()).unwrap_or_default(),
                row.wins,
                row.losses
            )
        } else {
            format!("{team:<TEAM_WIDTH$} {:>5} {:>6}", row.wins, row.losses)
        };
        out.push_str(line.trim_end());
        out.push('\n');
    }

    out
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut out = String::new();
    for (i, ch) in s.chars().enumerate() {
        if i + 1 >= max {
            break;
        }
        out.push(ch);
    }
    out.push('.');
    out
}
