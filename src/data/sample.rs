//! Synthetic league generation.
//!
//! Produces a full 32-team payload without network access. Touchdowns are drawn
//! per team and wins follow them linearly with Gaussian noise, so the fitted
//! line has a realistic, positive slope.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use rand::prelude::*;
use rand::rngs::StdRng;
use rand_distr::Normal;

use crate::domain::{GroupKey, RawTeamRecord};
use crate::error::{AppError, EXIT_USAGE};

/// League average touchdowns per game.
const TD_PER_GAME: f64 = 2.4;
/// Spread of season touchdown totals, per game played.
const TD_SD_PER_GAME: f64 = 0.45;
/// Marginal wins per touchdown above the league mean.
const WINS_PER_TD: f64 = 0.28;
/// Standard deviation of the win noise (in wins).
const WIN_NOISE_SD: f64 = 1.5;

/// Team names by group, in `GroupKey::ALL` order.
const LEAGUE: [[&str; 4]; 8] = [
    ["Buffalo Bills", "Miami Dolphins", "New England Patriots", "New York Jets"],
    ["Baltimore Ravens", "Cincinnati Bengals", "Cleveland Browns", "Pittsburgh Steelers"],
    ["Houston Texans", "Indianapolis Colts", "Jacksonville Jaguars", "Tennessee Titans"],
    ["Denver Broncos", "Kansas City Chiefs", "Las Vegas Raiders", "Los Angeles Chargers"],
    ["Dallas Cowboys", "New York Giants", "Philadelphia Eagles", "Washington Commanders"],
    ["Chicago Bears", "Detroit Lions", "Green Bay Packers", "Minnesota Vikings"],
    ["Atlanta Falcons", "Carolina Panthers", "New Orleans Saints", "Tampa Bay Buccaneers"],
    ["Arizona Cardinals", "Los Angeles Rams", "San Francisco 49ers", "Seattle Seahawks"],
];

/// Inputs that fully determine a generated league.
#[derive(Debug, Clone, Copy)]
pub struct SampleConfig {
    pub season: u16,
    pub games: u32,
    pub seed: u64,
}

/// Generate one payload record per team, grouped in `GroupKey::ALL` order.
pub fn generate_sample(config: &SampleConfig) -> Result<Vec<RawTeamRecord>, AppError> {
    if config.games == 0 {
        return Err(AppError::new(EXIT_USAGE, "Games per season must be > 0."));
    }

    let mut rng = StdRng::seed_from_u64(sample_seed(config));
    let games = f64::from(config.games);
    let td_mean = TD_PER_GAME * games;
    let td_dist = Normal::new(td_mean, TD_SD_PER_GAME * games)
        .map_err(|e| AppError::new(EXIT_USAGE, format!("Touchdown distribution error: {e}")))?;
    let noise = Normal::new(0.0, WIN_NOISE_SD)
        .map_err(|e| AppError::new(EXIT_USAGE, format!("Noise distribution error: {e}")))?;

    let mut out = Vec::with_capacity(32);
    for (key, names) in GroupKey::ALL.iter().zip(LEAGUE) {
        let division: Vec<(&str, i64, i64)> = names
            .iter()
            .map(|&name| {
                let touchdowns = td_dist.sample(&mut rng).max(0.0).round();
                let expected = games / 2.0 + WINS_PER_TD * (touchdowns - td_mean);
                let wins = (expected + noise.sample(&mut rng)).round().clamp(0.0, games) as i64;
                (name, wins, touchdowns as i64)
            })
            .collect();

        // Division rank: wins descending, ties keep listing order.
        let mut order: Vec<usize> = (0..division.len()).collect();
        order.sort_by_key(|&i| std::cmp::Reverse(division[i].1));
        let mut ranks = vec![0i64; division.len()];
        for (rank, &i) in order.iter().enumerate() {
            ranks[i] = rank as i64 + 1;
        }

        for (i, (name, wins, touchdowns)) in division.into_iter().enumerate() {
            out.push(RawTeamRecord {
                name: Some(name.to_string()),
                conference: Some(key.conference.as_str().to_string()),
                division: Some(key.division.as_str().to_string()),
                wins: Some(wins),
                losses: Some(i64::from(config.games) - wins),
                touchdowns: Some(touchdowns as f64),
                division_rank: Some(ranks[i]),
            });
        }
    }

    Ok(out)
}

fn sample_seed(config: &SampleConfig) -> u64 {
    let mut hasher = DefaultHasher::new();
    config.season.hash(&mut hasher);
    config.games.hash(&mut hasher);
    config.seed.hash(&mut hasher);
    hasher.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::ingest::ingest_records;
    use crate::standings::current_standings;
    use crate::domain::UnknownPolicy;

    fn config(seed: u64) -> SampleConfig {
        SampleConfig {
            season: 2025,
            games: 17,
            seed,
        }
    }

    #[test]
    fn deterministic_per_seed() {
        let a = generate_sample(&config(7)).unwrap();
        let b = generate_sample(&config(7)).unwrap();
        let c = generate_sample(&config(8)).unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn full_league_with_valid_records() {
        let raw = generate_sample(&config(42)).unwrap();
        assert_eq!(raw.len(), 32);

        let data = ingest_records(&raw);
        assert!(data.row_errors.is_empty());
        for r in &data.records {
            assert_eq!(r.games_played(), 17);
            assert!((1..=4).contains(&r.division_rank));
        }

        let part = current_standings(&data.records, UnknownPolicy::Reject).unwrap();
        for (_, group) in part.groups.iter() {
            assert_eq!(group.len(), 4);
            let mut ranks: Vec<u32> = group.iter().map(|e| e.rank).collect();
            ranks.sort();
            assert_eq!(ranks, [1, 2, 3, 4]);
            for a in group {
                for b in group {
                    if a.rank < b.rank {
                        assert!(a.wins >= b.wins);
                    }
                }
            }
        }
    }

    #[test]
    fn zero_games_is_rejected() {
        let err = generate_sample(&SampleConfig {
            season: 2025,
            games: 0,
            seed: 1,
        })
        .unwrap_err();
        assert_eq!(err.exit_code(), EXIT_USAGE);
    }
}
