//! Pure conversions from scraped text to typed records.
//!
//! Every function falls back to a documented sentinel instead of failing:
//! `0` for counts, `"TBD"` for schedule and conference text, all-zero line
//! scores for unreadable box scores.

mod game;
mod location;
mod team;

pub use game::*;
pub use location::*;
pub use team::*;

/// Digits of a `"Label: 12,345"` style count with the label and thousands
/// separators removed.
fn parse_count(raw: &str) -> Option<u32> {
    let value = raw.rsplit_once(':').map_or(raw, |(_, value)| value);
    value.trim().replace(',', "").parse().ok()
}
