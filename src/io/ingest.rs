//! Payload ingest and validation.
//!
//! This module is responsible for turning a standings payload (a JSON array of
//! team objects) into a clean set of `TeamRecord`s that are safe to group and fit.
//!
//! Design goals:
//! - **Row-level validation** (skip bad rows, but report what happened)
//! - **Deterministic behavior** (records keep payload order)
//! - **Separation of concerns**: no grouping or fitting logic here
//!
//! Unrecognized conference/division tags are *not* an ingest problem: the
//! record is numerically valid and still feeds the league-wide regression.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use tracing::{debug, warn};

use crate::domain::{RawTeamRecord, TeamRecord};
use crate::error::{AppError, EXIT_DATA, EXIT_USAGE};

/// A row-level error encountered during ingest.
#[derive(Debug, Clone, PartialEq)]
pub struct RowError {
    /// Position in the payload (0-based).
    pub index: usize,
    pub name: Option<String>,
    pub message: String,
}

/// Ingest output: validated records + row errors.
#[derive(Debug, Clone, PartialEq)]
pub struct IngestedData {
    pub records: Vec<TeamRecord>,
    pub row_errors: Vec<RowError>,
    pub rows_read: usize,
    pub rows_used: usize,
}

/// Parse a standings payload (JSON array of team objects).
pub fn parse_payload(text: &str) -> Result<Vec<RawTeamRecord>, AppError> {
    serde_json::from_str(text)
        .map_err(|e| AppError::new(EXIT_DATA, format!("Invalid standings payload: {e}")))
}

/// Read a standings payload from disk.
pub fn read_payload_file(path: &Path) -> Result<Vec<RawTeamRecord>, AppError> {
    let file = File::open(path).map_err(|e| {
        AppError::new(
            EXIT_USAGE,
            format!("Failed to open standings file '{}': {e}", path.display()),
        )
    })?;
    serde_json::from_reader(BufReader::new(file)).map_err(|e| {
        AppError::new(
            EXIT_DATA,
            format!("Invalid standings file '{}': {e}", path.display()),
        )
    })
}

/// Write raw records back out so a fetched payload can be replayed with `--source file`.
pub fn write_raw_json(path: &Path, records: &[RawTeamRecord]) -> Result<(), AppError> {
    let file = File::create(path).map_err(|e| {
        AppError::new(
            EXIT_USAGE,
            format!("Failed to create raw payload '{}': {e}", path.display()),
        )
    })?;
    serde_json::to_writer_pretty(file, records)
        .map_err(|e| AppError::new(EXIT_USAGE, format!("Failed to write raw payload: {e}")))
}

/// Validate raw records, skipping (and reporting) any that cannot be used.
pub fn ingest_records(raw: &[RawTeamRecord]) -> IngestedData {
    let mut records = Vec::with_capacity(raw.len());
    let mut row_errors = Vec::new();

    for (index, row) in raw.iter().enumerate() {
        match validate_row(row) {
            Ok(record) => records.push(record),
            Err(message) => {
                warn!(index, team = row.name.as_deref().unwrap_or("?"), %message, "skipping record");
                row_errors.push(RowError {
                    index,
                    name: row.name.clone(),
                    message,
                });
            }
        }
    }

    debug!(rows_read = raw.len(), rows_used = records.len(), "ingest complete");
    IngestedData {
        rows_read: raw.len(),
        rows_used: records.len(),
        records,
        row_errors,
    }
}

fn validate_row(row: &RawTeamRecord) -> Result<TeamRecord, String> {
    let name = required(&row.name, "Name")?.trim();
    if name.is_empty() {
        return Err("empty Name".to_string());
    }
    let conference = required(&row.conference, "Conference")?;
    let division = required(&row.division, "Division")?;
    let wins = count(row.wins, "Wins")?;
    let losses = count(row.losses, "Losses")?;
    let division_rank = count(row.division_rank, "DivisionRank")?;

    let touchdowns = *required(&row.touchdowns, "Touchdowns")?;
    if !(touchdowns.is_finite() && touchdowns >= 0.0) {
        return Err(format!("invalid Touchdowns value {touchdowns}"));
    }

    wins.checked_add(losses)
        .ok_or_else(|| "Wins + Losses overflows".to_string())?;

    Ok(TeamRecord {
        name: name.to_string(),
        conference: conference.clone(),
        division: division.clone(),
        wins,
        losses,
        touchdowns,
        division_rank,
    })
}

fn required<'a, T>(value: &'a Option<T>, field: &str) -> Result<&'a T, String> {
    value.as_ref().ok_or_else(|| format!("missing {field}"))
}

fn count(value: Option<i64>, field: &str) -> Result<u32, String> {
    let v = value.ok_or_else(|| format!("missing {field}"))?;
    u32::try_from(v).map_err(|_| format!("invalid {field} value {v}"))
}
