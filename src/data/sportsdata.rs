//! SportsData.io standings API integration.

use reqwest::blocking::Client;
use tracing::debug;

use crate::domain::RawTeamRecord;
use crate::error::{AppError, EXIT_UPSTREAM, EXIT_USAGE};

const BASE_URL: &str = "https://api.sportsdata.io/v3/nfl/scores/json/Standings";
const API_KEY_VAR: &str = "SPORTSDATA_API_KEY";

pub struct SportsDataClient {
    client: Client,
    api_key: String,
}

impl SportsDataClient {
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();
        let api_key = std::env::var(API_KEY_VAR)
            .map_err(|_| AppError::new(EXIT_USAGE, format!("Missing {API_KEY_VAR} in environment (.env).")))?;
        Ok(Self {
            client: Client::new(),
            api_key,
        })
    }

    /// Fetch the standings payload for a season (one object per team).
    pub fn fetch_standings(&self, season: u16) -> Result<Vec<RawTeamRecord>, AppError> {
        let url = standings_url(season);
        debug!(%url, "requesting standings");

        let resp = self
            .client
            .get(&url)
            .query(&[("key", self.api_key.as_str())])
            .send()
            .map_err(|e| AppError::new(EXIT_UPSTREAM, format!("Standings request failed: {e}")))?;

        if !resp.status().is_success() {
            return Err(AppError::new(
                EXIT_UPSTREAM,
                format!("Standings request failed with status {}.", resp.status()),
            ));
        }

        let body = resp
            .text()
            .map_err(|e| AppError::new(EXIT_UPSTREAM, format!("Failed to read standings response: {e}")))?;

        crate::io::ingest::parse_payload(&body)
    }
}

fn standings_url(season: u16) -> String {
    format!("{BASE_URL}/{season}")
}
