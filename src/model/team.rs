use serde::Serialize;

use super::league::League;

/// A team exactly as scraped from its clubhouse page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RawTeam {
    pub team_id: String,
    pub league: League,
    pub name: String,
    pub mascot: String,
    pub logo_url: String,
    pub primary_color: String,
    pub secondary_color: String,
    pub accent_color: String,
    /// Standings card title, e.g. `"2024 SEC Standings"`.
    pub conference_header: String,
    pub conference_record: Option<String>,
    pub overall_record: Option<String>,
}

/// Wins, losses and ties parsed from a `W-L` or `W-L-T` record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct WinLossTie {
    pub wins: u32,
    pub losses: u32,
    pub ties: u32,
}

/// A normalized team row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Team {
    pub team_id: String,
    pub league: League,
    pub name: String,
    pub mascot: String,
    pub logo_url: String,
    pub primary_color: String,
    pub secondary_color: String,
    pub accent_color: String,
    pub conference_name: String,
    pub conference_wins: u32,
    pub conference_losses: u32,
    pub conference_ties: u32,
    pub overall_wins: u32,
    pub overall_losses: u32,
    pub overall_ties: u32,
}
