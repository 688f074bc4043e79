use serde::{Deserialize, Serialize};
use strum_macros::EnumString;

/// A league whose ESPN pages can be scraped.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    EnumString,
    strum_macros::Display,
    strum_macros::EnumIter,
)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE", ascii_case_insensitive)]
pub enum League {
    Cfb,
    Nfl,
    Mlb,
    Nba,
}

impl League {
    /// Lower-case prefix used for output table names (`cfb_games`).
    pub fn table_prefix(self) -> String {
        self.to_string().to_lowercase()
    }
}
