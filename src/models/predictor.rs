//! Feature extraction and win projection.
//!
//! Conventions:
//! - x is the team's touchdown total, y its actual win count
//! - projected wins are `round(slope * x + intercept)`, rounding half away from zero
//! - projected losses preserve games played: `(wins + losses) - projected wins`

use crate::domain::{ClampPolicy, PredictionEntry, RegressionModel, TeamRecord};

/// Extract `(x = touchdowns, y = wins)` across every record, in input order.
pub fn feature_pairs(records: &[TeamRecord]) -> (Vec<f64>, Vec<f64>) {
    records
        .iter()
        .map(|r| (r.touchdowns, f64::from(r.wins)))
        .unzip()
}

/// Project one team's record.
pub fn predict_team(model: &RegressionModel, record: &TeamRecord, clamp: ClampPolicy) -> PredictionEntry {
    let games = i64::from(record.games_played());
    let fitted_wins = model.evaluate(record.touchdowns);

    // `as` saturates for out-of-range floats; the model is finite by construction.
    let mut predicted_wins = fitted_wins.round() as i64;
    if clamp == ClampPolicy::Season {
        predicted_wins = predicted_wins.clamp(0, games);
    }

    PredictionEntry {
        name: record.name.clone(),
        conference: record.conference.clone(),
        division: record.division.clone(),
        touchdowns: record.touchdowns,
        actual_wins: record.wins,
        actual_losses: record.losses,
        fitted_wins,
        predicted_wins,
        predicted_losses: games - predicted_wins,
    }
}

/// Project every record; output order matches input order.
pub fn predict_all(model: &RegressionModel, records: &[TeamRecord], clamp: ClampPolicy) -> Vec<PredictionEntry> {
    records.iter().map(|r| predict_team(model, r, clamp)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str, wins: u32, losses: u32, touchdowns: f64) -> TeamRecord {
        TeamRecord {
            name: name.to_string(),
            conference: "AFC".to_string(),
            division: "East".to_string(),
            wins,
            losses,
            touchdowns,
            division_rank: 1,
        }
    }

    #[test]
    fn feature_pairs_follow_input_order() {
        let (xs, ys) = feature_pairs(&[record("A", 10, 5, 40.0), record("B", 5, 10, 10.0)]);
        assert_eq!(xs, [40.0, 10.0]);
        assert_eq!(ys, [10.0, 5.0]);
    }

    #[test]
    fn totals_are_preserved_for_any_model() {
        let records = [
            record("A", 10, 5, 40.0),
            record("B", 0, 17, 3.0),
            record("C", 16, 1, 70.0),
            record("D", 8, 8, 28.5),
        ];
        let models = [
            RegressionModel { slope: 0.25, intercept: -1.5 },
            RegressionModel { slope: -2.0, intercept: 40.0 },
            RegressionModel { slope: 10.0, intercept: 0.0 },
        ];
        for model in &models {
            for clamp in [ClampPolicy::None, ClampPolicy::Season] {
                for p in predict_all(model, &records, clamp) {
                    assert_eq!(
                        p.predicted_wins + p.predicted_losses,
                        i64::from(p.actual_wins + p.actual_losses),
                        "{} under {model:?}/{clamp:?}",
                        p.name
                    );
                }
            }
        }
    }

    #[test]
    fn rounds_half_away_from_zero() {
        let model = RegressionModel { slope: 1.0, intercept: 0.0 };
        assert_eq!(predict_team(&model, &record("A", 5, 5, 6.5), ClampPolicy::None).predicted_wins, 7);
        assert_eq!(predict_team(&model, &record("B", 5, 5, 2.5), ClampPolicy::None).predicted_wins, 3);
        assert_eq!(predict_team(&model, &record("C", 5, 5, 2.49), ClampPolicy::None).predicted_wins, 2);
    }

    #[test]
    fn unclamped_projection_can_leave_the_season() {
        let model = RegressionModel { slope: 1.0, intercept: -5.0 };
        let low = predict_team(&model, &record("Low", 1, 15, 2.0), ClampPolicy::None);
        assert_eq!(low.predicted_wins, -3);
        assert_eq!(low.predicted_losses, 19);

        let high = predict_team(&model, &record("High", 12, 4, 30.0), ClampPolicy::None);
        assert_eq!(high.predicted_wins, 25);
        assert_eq!(high.predicted_losses, -9);
    }

    #[test]
    fn season_clamp_bounds_projection() {
        let model = RegressionModel { slope: 1.0, intercept: -5.0 };
        let low = predict_team(&model, &record("Low", 1, 15, 2.0), ClampPolicy::Season);
        assert_eq!((low.predicted_wins, low.predicted_losses), (0, 16));

        let high = predict_team(&model, &record("High", 12, 4, 30.0), ClampPolicy::Season);
        assert_eq!((high.predicted_wins, high.predicted_losses), (16, 0));
        assert!((high.fitted_wins - 25.0).abs() < 1e-12);
    }
}
