//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - used in-memory during grouping, fitting and ranking
//! - exported to JSON/CSV
//! - handed to a display sink (terminal tables, TUI) without further conversion

use std::path::PathBuf;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// League conference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Conference {
    #[serde(rename = "AFC")]
    Afc,
    #[serde(rename = "NFC")]
    Nfc,
}

impl Conference {
    pub const ALL: [Conference; 2] = [Conference::Afc, Conference::Nfc];

    pub fn as_str(self) -> &'static str {
        match self {
            Conference::Afc => "AFC",
            Conference::Nfc => "NFC",
        }
    }

    /// Exact, case-sensitive match against the wire tag.
    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_str() == tag)
    }
}

/// Division within a conference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Division {
    East,
    North,
    South,
    West,
}

impl Division {
    pub const ALL: [Division; 4] = [Division::East, Division::North, Division::South, Division::West];

    pub fn as_str(self) -> &'static str {
        match self {
            Division::East => "East",
            Division::North => "North",
            Division::South => "South",
            Division::West => "West",
        }
    }

    /// Exact, case-sensitive match against the wire tag.
    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|d| d.as_str() == tag)
    }
}

/// One of the 8 fixed `(conference, division)` partitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GroupKey {
    pub conference: Conference,
    pub division: Division,
}

impl GroupKey {
    /// All group keys in display order (AFC first, then East/North/South/West).
    pub const ALL: [GroupKey; 8] = [
        GroupKey::new(Conference::Afc, Division::East),
        GroupKey::new(Conference::Afc, Division::North),
        GroupKey::new(Conference::Afc, Division::South),
        GroupKey::new(Conference::Afc, Division::West),
        GroupKey::new(Conference::Nfc, Division::East),
        GroupKey::new(Conference::Nfc, Division::North),
        GroupKey::new(Conference::Nfc, Division::South),
        GroupKey::new(Conference::Nfc, Division::West),
    ];

    pub const fn new(conference: Conference, division: Division) -> Self {
        Self { conference, division }
    }

    /// Resolve raw conference/division tags. Returns `None` unless both match exactly.
    pub fn from_tags(conference: &str, division: &str) -> Option<Self> {
        Some(Self::new(Conference::from_tag(conference)?, Division::from_tag(division)?))
    }

    /// Stable identifier of the current-standings table (e.g. `AFC_East`).
    pub fn id(self) -> &'static str {
        match (self.conference, self.division) {
            (Conference::Afc, Division::East) => "AFC_East",
            (Conference::Afc, Division::North) => "AFC_North",
            (Conference::Afc, Division::South) => "AFC_South",
            (Conference::Afc, Division::West) => "AFC_West",
            (Conference::Nfc, Division::East) => "NFC_East",
            (Conference::Nfc, Division::North) => "NFC_North",
            (Conference::Nfc, Division::South) => "NFC_South",
            (Conference::Nfc, Division::West) => "NFC_West",
        }
    }

    /// Stable identifier of the predicted-standings table (e.g. `AFC_East_Predictions`).
    pub fn predicted_id(self) -> String {
        format!("{}_Predictions", self.id())
    }

    /// Human-readable label (e.g. `AFC East`).
    pub fn display_name(self) -> String {
        format!("{} {}", self.conference.as_str(), self.division.as_str())
    }

    pub fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|k| *k == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Self {
        let idx = Self::ALL.iter().position(|k| *k == self).unwrap_or(0);
        Self::ALL[(idx + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

/// A raw team standing as delivered by a data source.
///
/// Every field is optional so ingest can report exactly what is missing instead
/// of failing the whole payload on the first bad object.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RawTeamRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conference: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub division: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wins: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub losses: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub touchdowns: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub division_rank: Option<i64>,
}

/// A validated team record.
///
/// Conference and division stay as the raw tags: an unrecognized tag is not an
/// ingest error, the team still counts toward the league-wide regression.
#[derive(Debug, Clone, PartialEq)]
pub struct TeamRecord {
    pub name: String,
    pub conference: String,
    pub division: String,
    pub wins: u32,
    pub losses: u32,
    pub touchdowns: f64,
    pub division_rank: u32,
}

impl TeamRecord {
    /// Games decided so far (`wins + losses`).
    pub fn games_played(&self) -> u32 {
        self.wins + self.losses
    }
}

/// Per-team row of the current standings (rank is passed through from the source).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StandingEntry {
    pub team: String,
    pub rank: u32,
    pub wins: u32,
    pub losses: u32,
}

/// Per-team projected record derived from the fitted line.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PredictionEntry {
    pub name: String,
    pub conference: String,
    pub division: String,
    pub touchdowns: f64,
    pub actual_wins: u32,
    pub actual_losses: u32,
    /// Unrounded `slope * touchdowns + intercept`.
    pub fitted_wins: f64,
    pub predicted_wins: i64,
    pub predicted_losses: i64,
}

/// Least-squares line `wins = slope * touchdowns + intercept`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RegressionModel {
    pub slope: f64,
    pub intercept: f64,
}

impl RegressionModel {
    pub fn evaluate(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }
}

/// Fit quality diagnostics (computed on unrounded fitted values).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FitQuality {
    pub n: usize,
    pub sse: f64,
    pub rmse: f64,
    pub r_squared: f64,
}

/// Fit output: line parameters plus diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearFit {
    pub model: RegressionModel,
    pub quality: FitQuality,
}

/// One sequence per `GroupKey`, addressed by name rather than position.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupSet<T> {
    pub afc_east: Vec<T>,
    pub afc_north: Vec<T>,
    pub afc_south: Vec<T>,
    pub afc_west: Vec<T>,
    pub nfc_east: Vec<T>,
    pub nfc_north: Vec<T>,
    pub nfc_south: Vec<T>,
    pub nfc_west: Vec<T>,
}

impl<T> Default for GroupSet<T> {
    fn default() -> Self {
        Self {
            afc_east: Vec::new(),
            afc_north: Vec::new(),
            afc_south: Vec::new(),
            afc_west: Vec::new(),
            nfc_east: Vec::new(),
            nfc_north: Vec::new(),
            nfc_south: Vec::new(),
            nfc_west: Vec::new(),
        }
    }
}

impl<T> GroupSet<T> {
    pub fn get(&self, key: GroupKey) -> &[T] {
        match (key.conference, key.division) {
            (Conference::Afc, Division::East) => &self.afc_east,
            (Conference::Afc, Division::North) => &self.afc_north,
            (Conference::Afc, Division::South) => &self.afc_south,
            (Conference::Afc, Division::West) => &self.afc_west,
            (Conference::Nfc, Division::East) => &self.nfc_east,
            (Conference::Nfc, Division::North) => &self.nfc_north,
            (Conference::Nfc, Division::South) => &self.nfc_south,
            (Conference::Nfc, Division::West) => &self.nfc_west,
        }
    }

    fn get_mut(&mut self, key: GroupKey) -> &mut Vec<T> {
        match (key.conference, key.division) {
            (Conference::Afc, Division::East) => &mut self.afc_east,
            (Conference::Afc, Division::North) => &mut self.afc_north,
            (Conference::Afc, Division::South) => &mut self.afc_south,
            (Conference::Afc, Division::West) => &mut self.afc_west,
            (Conference::Nfc, Division::East) => &mut self.nfc_east,
            (Conference::Nfc, Division::North) => &mut self.nfc_north,
            (Conference::Nfc, Division::South) => &mut self.nfc_south,
            (Conference::Nfc, Division::West) => &mut self.nfc_west,
        }
    }

    /// Append `item` to the group for `key`.
    pub fn push(&mut self, key: GroupKey, item: T) {
        self.get_mut(key).push(item);
    }

    /// Build a set by producing each group from its key.
    pub fn from_fn(mut f: impl FnMut(GroupKey) -> Vec<T>) -> Self {
        let mut set = Self::default();
        for key in GroupKey::ALL {
            *set.get_mut(key) = f(key);
        }
        set
    }

    /// Iterate groups in `GroupKey::ALL` order.
    pub fn iter(&self) -> impl Iterator<Item = (GroupKey, &[T])> + '_ {
        GroupKey::ALL.into_iter().map(move |key| (key, self.get(key)))
    }

    /// Transform every group into a new set.
    pub fn map<U>(&self, mut f: impl FnMut(GroupKey, &[T]) -> Vec<U>) -> GroupSet<U> {
        GroupSet::from_fn(|key| f(key, self.get(key)))
    }

    /// Total number of entries across all groups.
    pub fn total_len(&self) -> usize {
        self.iter().map(|(_, g)| g.len()).sum()
    }
}

/// A record excluded from grouping because its tags matched no `GroupKey`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DroppedRecord {
    pub index: usize,
    pub name: String,
    pub conference: String,
    pub division: String,
}

/// What to do with records whose conference/division pair is not recognized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum UnknownPolicy {
    /// Exclude the record from every group and report it.
    Drop,
    /// Fail the run with `MalformedRecord`.
    Reject,
}

/// Whether projected wins are bounded by games played.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ClampPolicy {
    /// Keep the raw rounded projection (may be negative or exceed games played).
    None,
    /// Clamp projected wins into `[0, wins + losses]`.
    Season,
}

impl ClampPolicy {
    pub fn toggle(self) -> Self {
        match self {
            ClampPolicy::None => ClampPolicy::Season,
            ClampPolicy::Season => ClampPolicy::None,
        }
    }
}

/// Where team records come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    /// SportsData standings endpoint (needs `SPORTSDATA_API_KEY`).
    Api,
    /// A JSON payload saved to disk.
    File,
    /// Seeded synthetic league.
    Sample,
}

/// Options the core pipeline itself depends on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PipelineConfig {
    pub unknown: UnknownPolicy,
    pub clamp: ClampPolicy,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            unknown: UnknownPolicy::Drop,
            clamp: ClampPolicy::None,
        }
    }
}

/// A full run's configuration as understood by the application.
///
/// This is derived from CLI flags (plus defaults).
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub source: SourceKind,
    pub input: Option<PathBuf>,
    pub season: u16,
    pub seed: u64,
    pub games: u32,
    pub pipeline: PipelineConfig,

    pub plot: bool,
    pub plot_width: usize,
    pub plot_height: usize,

    pub export_json: Option<PathBuf>,
    pub export_csv: Option<PathBuf>,
    pub save_raw: Option<PathBuf>,
}

/// Which half of the output a display table belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TableKind {
    Current,
    Predicted,
}

/// One row handed to a display sink.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisplayRow {
    pub team: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rank: Option<u32>,
    pub wins: i64,
    pub losses: i64,
}

/// A named, ordered table for a display sink.
///
/// `unavailable` is set (and `rows` empty) when predictions could not be produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisplayTable {
    pub id: String,
    pub kind: TableKind,
    pub rows: Vec<DisplayRow>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unavailable: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn group_key_tags_are_exact() {
        assert_eq!(
            GroupKey::from_tags("AFC", "East"),
            Some(GroupKey::new(Conference::Afc, Division::East))
        );
        assert_eq!(GroupKey::from_tags("afc", "East"), None);
        assert_eq!(GroupKey::from_tags("NFC", "Central"), None);
        assert_eq!(GroupKey::from_tags("NFC ", "West"), None);
    }

    #[test]
    fn group_ids_are_unique_and_ordered() {
        let ids: Vec<&str> = GroupKey::ALL.iter().map(|k| k.id()).collect();
        assert_eq!(
            ids,
            [
                "AFC_East", "AFC_North", "AFC_South", "AFC_West", "NFC_East", "NFC_North", "NFC_South",
                "NFC_West"
            ]
        );
        assert_eq!(GroupKey::ALL[0].predicted_id(), "AFC_East_Predictions");
    }

    #[test]
    fn group_key_cycles() {
        let first = GroupKey::ALL[0];
        let last = GroupKey::ALL[7];
        assert_eq!(last.next(), first);
        assert_eq!(first.prev(), last);
    }

    #[test]
    fn group_set_from_fn_routes_by_key() {
        let set = GroupSet::from_fn(|key| vec![key.id().to_string()]);
        assert_eq!(set.nfc_south, vec!["NFC_South".to_string()]);
        assert_eq!(set.total_len(), 8);
        for (key, group) in set.iter() {
            assert_eq!(group, [key.id().to_string()]);
        }
    }

    #[test]
    fn raw_record_reads_pascal_case() {
        let raw: RawTeamRecord = serde_json::from_str(
            r#"{"Name":"Buffalo Bills","Conference":"AFC","Division":"East","Wins":10,"Losses":5,"Touchdowns":48,"DivisionRank":1,"Ties":0}"#,
        )
        .unwrap();
        assert_eq!(raw.name.as_deref(), Some("Buffalo Bills"));
        assert_eq!(raw.touchdowns, Some(48.0));
        assert_eq!(raw.division_rank, Some(1));
    }
}
