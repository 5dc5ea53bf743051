//! Partition team records into the 8 conference/division groups.
//!
//! The grouper is generic over the record type: anything that exposes its raw
//! conference/division tags can be grouped, and the caller decides which
//! simplified entry to build for each record. The same code therefore serves
//! both the current table (`TeamRecord -> StandingEntry`) and the predicted
//! table (`PredictionEntry -> PredictionEntry`).

use tracing::{debug, warn};

use crate::domain::{
    DroppedRecord, GroupKey, GroupSet, PredictionEntry, StandingEntry, TeamRecord, UnknownPolicy,
};
use crate::error::StandingsError;

/// Field access the grouper needs from a record.
pub trait GroupTags {
    fn team_name(&self) -> &str;
    fn conference_tag(&self) -> &str;
    fn division_tag(&self) -> &str;
}

impl GroupTags for TeamRecord {
    fn team_name(&self) -> &str {
        &self.name
    }
    fn conference_tag(&self) -> &str {
        &self.conference
    }
    fn division_tag(&self) -> &str {
        &self.division
    }
}

impl GroupTags for PredictionEntry {
    fn team_name(&self) -> &str {
        &self.name
    }
    fn conference_tag(&self) -> &str {
        &self.conference
    }
    fn division_tag(&self) -> &str {
        &self.division
    }
}

/// Grouping output: the 8 groups plus any records that matched none of them.
#[derive(Debug, Clone, PartialEq)]
pub struct Partition<E> {
    pub groups: GroupSet<E>,
    pub dropped: Vec<DroppedRecord>,
}

/// Partition `records` by `(conference, division)`, preserving input order within each group.
///
/// Records whose tags do not exactly match a `GroupKey` are dropped and reported
/// under `UnknownPolicy::Drop`, or fail the call under `UnknownPolicy::Reject`.
pub fn partition<R, E>(
    records: &[R],
    policy: UnknownPolicy,
    mut to_entry: impl FnMut(&R) -> E,
) -> Result<Partition<E>, StandingsError>
where
    R: GroupTags,
{
    let mut groups = GroupSet::default();
    let mut dropped = Vec::new();

    for (index, record) in records.iter().enumerate() {
        match GroupKey::from_tags(record.conference_tag(), record.division_tag()) {
            Some(key) => groups.push(key, to_entry(record)),
            None => {
                let rejected = DroppedRecord {
                    index,
                    name: record.team_name().to_string(),
                    conference: record.conference_tag().to_string(),
                    division: record.division_tag().to_string(),
                };
                if policy == UnknownPolicy::Reject {
                    return Err(StandingsError::MalformedRecord {
                        index,
                        name: rejected.name,
                        reason: format!(
                            "unrecognized conference/division '{}'/'{}'",
                            rejected.conference, rejected.division
                        ),
                    });
                }
                warn!(
                    index,
                    team = %rejected.name,
                    conference = %rejected.conference,
                    division = %rejected.division,
                    "dropping record with unrecognized conference/division"
                );
                dropped.push(rejected);
            }
        }
    }

    debug!(grouped = groups.total_len(), dropped = dropped.len(), "partitioned records");
    Ok(Partition { groups, dropped })
}

/// Group validated records into the current-standings view.
pub fn current_standings(
    records: &[TeamRecord],
    policy: UnknownPolicy,
) -> Result<Partition<StandingEntry>, StandingsError> {
    partition(records, policy, |r| StandingEntry {
        team: r.name.clone(),
        rank: r.division_rank,
        wins: r.wins,
        losses: r.losses,
    })
}

/// Group projections by their conference/division (entries in input order, not yet ranked).
pub fn prediction_groups(
    predictions: &[PredictionEntry],
    policy: UnknownPolicy,
) -> Result<Partition<PredictionEntry>, StandingsError> {
    partition(predictions, policy, PredictionEntry::clone)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Conference, Division};

    fn record(name: &str, conference: &str, division: &str, wins: u32) -> TeamRecord {
        TeamRecord {
            name: name.to_string(),
            conference: conference.to_string(),
            division: division.to_string(),
            wins,
            losses: 17 - wins,
            touchdowns: 30.0,
            division_rank: 1,
        }
    }

    #[test]
    fn every_well_formed_record_lands_in_exactly_one_group() {
        let mut records = Vec::new();
        for (i, key) in GroupKey::ALL.iter().enumerate() {
            for j in 0..4 {
                records.push(record(
                    &format!("T{i}{j}"),
                    key.conference.as_str(),
                    key.division.as_str(),
                    j,
                ));
            }
        }

        let part = current_standings(&records, UnknownPolicy::Drop).unwrap();
        assert!(part.dropped.is_empty());
        assert_eq!(part.groups.total_len(), records.len());

        let mut seen: Vec<String> = part
            .groups
            .iter()
            .flat_map(|(_, g)| g.iter().map(|e| e.team.clone()))
            .collect();
        seen.sort();
        let mut expected: Vec<String> = records.iter().map(|r| r.name.clone()).collect();
        expected.sort();
        assert_eq!(seen, expected);

        for (key, group) in part.groups.iter() {
            assert_eq!(group.len(), 4, "group {}", key.id());
        }
    }

    #[test]
    fn preserves_input_order_and_passes_rank_through() {
        let mut a = record("A", "NFC", "North", 3);
        a.division_rank = 4;
        let b = record("B", "AFC", "East", 9);
        let mut c = record("C", "NFC", "North", 12);
        c.division_rank = 1;

        let part = current_standings(&[a, b, c], UnknownPolicy::Drop).unwrap();
        let north = part.groups.get(GroupKey::new(Conference::Nfc, Division::North));
        let names: Vec<&str> = north.iter().map(|e| e.team.as_str()).collect();
        assert_eq!(names, ["A", "C"]);
        assert_eq!(north[0].rank, 4);
        assert_eq!(north[1].rank, 1);
        assert_eq!(part.groups.afc_east.len(), 1);
        assert!(part.groups.afc_west.is_empty());
    }

    #[test]
    fn unknown_tags_are_dropped_and_reported() {
        let records = vec![
            record("Good", "AFC", "South", 8),
            record("Typo", "AFC", "south", 8),
            record("Other", "XFL", "East", 5),
        ];
        let part = current_standings(&records, UnknownPolicy::Drop).unwrap();
        assert_eq!(part.groups.total_len(), 1);
        assert_eq!(part.dropped.len(), 2);
        assert_eq!(part.dropped[0].index, 1);
        assert_eq!(part.dropped[0].division, "south");
        assert_eq!(part.dropped[1].name, "Other");
    }

    #[test]
    fn unknown_tags_fail_under_reject() {
        let records = vec![record("Good", "AFC", "South", 8), record("Bad", "NFC", "Central", 8)];
        let err = current_standings(&records, UnknownPolicy::Reject).unwrap_err();
        match err {
            StandingsError::MalformedRecord { index, name, .. } => {
                assert_eq!(index, 1);
                assert_eq!(name, "Bad");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn empty_input_yields_eight_empty_groups() {
        let part = current_standings(&[], UnknownPolicy::Reject).unwrap();
        assert_eq!(part.groups.total_len(), 0);
        assert_eq!(part.groups.iter().count(), 8);
    }
}
