use serde::{Serialize, Serializer};

use super::league::League;

/// Sentinel written wherever a schedule field could not be read.
pub const TBD: &str = "TBD";

/// A value that is either known or still "to be determined".
///
/// `Tbd` serializes as the literal string `"TBD"`, `Known` as the inner value.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Scheduled<T> {
    #[default]
    Tbd,
    Known(T),
}

impl<T> Scheduled<T> {
    pub fn known(&self) -> Option<&T> {
        match self {
            Scheduled::Known(value) => Some(value),
            Scheduled::Tbd => None,
        }
    }

    pub fn is_tbd(&self) -> bool {
        matches!(self, Scheduled::Tbd)
    }
}

impl<T: Serialize> Serialize for Scheduled<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Scheduled::Known(value) => value.serialize(serializer),
            Scheduled::Tbd => serializer.serialize_str(TBD),
        }
    }
}

/// The raw per-period cells of one side of a gamestrip box score.
///
/// A cell is `None` when it was not present on the page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RawBoxScore {
    pub quarters: [Option<String>; 4],
    pub overtime: Option<String>,
    pub total: Option<String>,
}

/// A game exactly as scraped, before any normalization.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RawGame {
    pub game_id: String,
    pub league: League,
    pub away_team_id: Option<String>,
    pub home_team_id: Option<String>,
    /// `None` for leagues that have no quarters.
    pub away_box_score: Option<RawBoxScore>,
    pub home_box_score: Option<RawBoxScore>,
    pub stadium: String,
    pub location: String,
    pub game_timestamp: String,
    pub tv_coverage: String,
    pub betting_line: String,
    pub betting_over_under: String,
    pub stadium_capacity: String,
    pub attendance: String,
    pub away_win_pct: Option<String>,
    pub home_win_pct: Option<String>,
}

/// Normalized per-period scores for one side.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LineScore {
    pub quarters: [u32; 4],
    pub overtime: u32,
    pub total: u32,
}

/// The date parts of a game timestamp.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GameDate {
    pub date: Scheduled<String>,
    pub month: Scheduled<u32>,
    pub day: Scheduled<u32>,
    pub year: Scheduled<i32>,
}

/// A normalized game row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Game {
    pub game_id: String,
    pub league: League,
    pub away_team_id: Option<String>,
    pub home_team_id: Option<String>,
    pub away_quarter1: Option<u32>,
    pub away_quarter2: Option<u32>,
    pub away_quarter3: Option<u32>,
    pub away_quarter4: Option<u32>,
    pub away_overtime: Option<u32>,
    pub away_total: Option<u32>,
    pub home_quarter1: Option<u32>,
    pub home_quarter2: Option<u32>,
    pub home_quarter3: Option<u32>,
    pub home_quarter4: Option<u32>,
    pub home_overtime: Option<u32>,
    pub home_total: Option<u32>,
    pub location_id: Option<u32>,
    pub game_time: Scheduled<String>,
    pub game_date: Scheduled<String>,
    pub game_month: Scheduled<u32>,
    pub game_day: Scheduled<u32>,
    pub game_year: Scheduled<i32>,
    pub tv_coverage: String,
    pub betting_line: String,
    pub betting_over_under: String,
    pub attendance: u32,
    pub away_win_pct: Option<String>,
    pub home_win_pct: Option<String>,
}
