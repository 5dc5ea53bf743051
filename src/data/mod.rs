//! Data sources: the SportsData standings API, local payload files, and a synthetic league.

pub mod sample;
pub mod sportsdata;

pub use sample::{SampleConfig, generate_sample};
pub use sportsdata::SportsDataClient;

use crate::domain::{RawTeamRecord, RunConfig, SourceKind};
use crate::error::{AppError, EXIT_USAGE};

/// A loaded payload and a short description of where it came from.
#[derive(Debug, Clone)]
pub struct SourceData {
    pub label: String,
    pub records: Vec<RawTeamRecord>,
}

/// Load the raw payload for the configured source.
pub fn load_raw(config: &RunConfig) -> Result<SourceData, AppError> {
    match config.source {
        SourceKind::Api => {
            let client = SportsDataClient::from_env()?;
            Ok(SourceData {
                label: format!("sportsdata.io season {}", config.season),
                records: client.fetch_standings(config.season)?,
            })
        }
        SourceKind::File => {
            let path = config
                .input
                .as_ref()
                .ok_or_else(|| AppError::new(EXIT_USAGE, "`--source file` requires `--input <json>`."))?;
            Ok(SourceData {
                label: format!("file {}", path.display()),
                records: crate::io::ingest::read_payload_file(path)?,
            })
        }
        SourceKind::Sample => {
            let sample = SampleConfig {
                season: config.season,
                games: config.games,
                seed: config.seed,
            };
            Ok(SourceData {
                label: format!("sample season {} (seed {})", config.season, config.seed),
                records: generate_sample(&sample)?,
            })
        }
    }
}
