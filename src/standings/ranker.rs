//! Order a group by wins, descending.
//!
//! Ties keep their relative input order: among equal win counts, the entry
//! that appeared first in the group is ranked first.

use std::cmp::Reverse;

use crate::domain::{GroupSet, PredictionEntry, StandingEntry};

/// Anything with a win count the ranker can order by.
pub trait WinCount {
    fn win_count(&self) -> i64;
}

impl WinCount for StandingEntry {
    fn win_count(&self) -> i64 {
        i64::from(self.wins)
    }
}

impl WinCount for PredictionEntry {
    fn win_count(&self) -> i64 {
        self.predicted_wins
    }
}

/// Return a new sequence sorted by `(-wins, input index)`.
pub fn rank_by_wins<E: WinCount + Clone>(entries: &[E]) -> Vec<E> {
    let mut order: Vec<usize> = (0..entries.len()).collect();
    order.sort_unstable_by_key(|&i| (Reverse(entries[i].win_count()), i));
    order.into_iter().map(|i| entries[i].clone()).collect()
}

/// Rank every group independently.
pub fn rank_groups<E: WinCount + Clone>(groups: &GroupSet<E>) -> GroupSet<E> {
    groups.map(|_, group| rank_by_wins(group))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(team: &str, wins: u32) -> StandingEntry {
        StandingEntry {
            team: team.to_string(),
            rank: 0,
            wins,
            losses: 0,
        }
    }

    fn names(entries: &[StandingEntry]) -> Vec<&str> {
        entries.iter().map(|e| e.team.as_str()).collect()
    }

    #[test]
    fn sorts_descending() {
        let ranked = rank_by_wins(&[entry("A", 3), entry("B", 11), entry("C", 7), entry("D", 9)]);
        assert_eq!(names(&ranked), ["B", "D", "C", "A"]);
    }

    #[test]
    fn ties_keep_earliest_first() {
        let ranked = rank_by_wins(&[entry("A", 5), entry("B", 9), entry("C", 5), entry("D", 9)]);
        assert_eq!(names(&ranked), ["B", "D", "A", "C"]);
    }

    #[test]
    fn all_zero_wins_is_identity() {
        let input = [entry("A", 0), entry("B", 0), entry("C", 0)];
        let ranked = rank_by_wins(&input);
        assert_eq!(names(&ranked), ["A", "B", "C"]);
    }

    #[test]
    fn output_is_a_permutation() {
        let input = [entry("A", 2), entry("B", 2), entry("C", 14), entry("D", 1)];
        let ranked = rank_by_wins(&input);
        assert_eq!(ranked.len(), input.len());
        for e in &input {
            assert_eq!(ranked.iter().filter(|r| *r == e).count(), 1);
        }
        assert!(ranked.windows(2).all(|w| w[0].wins >= w[1].wins));
    }

    #[test]
    fn negative_projections_rank_last() {
        let mk = |name: &str, wins: i64| PredictionEntry {
            name: name.to_string(),
            conference: "NFC".to_string(),
            division: "West".to_string(),
            touchdowns: 0.0,
            actual_wins: 0,
            actual_losses: 0,
            fitted_wins: wins as f64,
            predicted_wins: wins,
            predicted_losses: 0,
        };
        let ranked = rank_by_wins(&[mk("A", -1), mk("B", 0), mk("C", -3)]);
        let order: Vec<&str> = ranked.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(order, ["B", "A", "C"]);
    }

    #[test]
    fn empty_group_is_noop() {
        let ranked: Vec<StandingEntry> = rank_by_wins(&[]);
        assert!(ranked.is_empty());
    }
}
