//! Per-league strategy table.
//!
//! Everything that differs between leagues lives in one [`LeagueStrategy`]
//! record, chosen once per job through [`League::strategy`].

use crate::config::{BASE_URL, LOGO_BASE_URL};
use crate::model::League;

/// How a league's team standings row lays out its record cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StandingsColumns {
    /// Records already rendered as `W-L` cells.
    Combined {
        conference: Option<usize>,
        overall: usize,
    },
    /// Separate win and loss cells that are joined into `W-L`.
    Split { wins: usize, losses: usize },
}

impl StandingsColumns {
    /// Conference and overall record strings read from a row's cell texts.
    pub fn records(&self, cells: &[String]) -> (Option<String>, Option<String>) {
        let cell = |i: usize| cells.get(i).filter(|c| !c.is_empty()).cloned();
        match *self {
            StandingsColumns::Combined {
                conference,
                overall,
            } => (conference.and_then(cell), cell(overall)),
            StandingsColumns::Split { wins, losses } => {
                let overall = cell(wins)
                    .zip(cell(losses))
                    .map(|(w, l)| format!("{w}-{l}"));
                (None, overall)
            }
        }
    }
}

/// The URL segment ESPN uses in front of a team identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TeamPath {
    Id,
    Name,
}

/// League-specific rules for URLs, identifiers and page layout.
#[derive(Debug)]
pub struct LeagueStrategy {
    pub league: League,
    pub site_path: &'static str,
    pub logo_path: &'static str,
    pub team_path: TeamPath,
    pub team_id_from_href: fn(&str) -> Option<String>,
    pub has_box_score: bool,
    pub standings: StandingsColumns,
    pub has_weekly_schedule: bool,
}

static CFB: LeagueStrategy = LeagueStrategy {
    league: League::Cfb,
    site_path: "college-football",
    logo_path: "ncaa",
    team_path: TeamPath::Id,
    team_id_from_href: numeric_team_id,
    has_box_score: true,
    standings: StandingsColumns::Combined {
        conference: Some(1),
        overall: 2,
    },
    has_weekly_schedule: true,
};

static NFL: LeagueStrategy = LeagueStrategy {
    league: League::Nfl,
    site_path: "nfl",
    logo_path: "nfl",
    team_path: TeamPath::Name,
    team_id_from_href: slug_team_id,
    has_box_score: true,
    standings: StandingsColumns::Split { wins: 1, losses: 2 },
    has_weekly_schedule: true,
};

static MLB: LeagueStrategy = LeagueStrategy {
    league: League::Mlb,
    site_path: "mlb",
    logo_path: "mlb",
    team_path: TeamPath::Name,
    team_id_from_href: slug_team_id,
    has_box_score: false,
    standings: StandingsColumns::Split { wins: 1, losses: 2 },
    has_weekly_schedule: false,
};

static NBA: LeagueStrategy = LeagueStrategy {
    league: League::Nba,
    site_path: "nba",
    logo_path: "nba",
    team_path: TeamPath::Name,
    team_id_from_href: slug_team_id,
    has_box_score: false,
    standings: StandingsColumns::Split { wins: 1, losses: 2 },
    has_weekly_schedule: false,
};

impl League {
    pub fn strategy(self) -> &'static LeagueStrategy {
        match self {
            League::Cfb => &CFB,
            League::Nfl => &NFL,
            League::Mlb => &MLB,
            League::Nba => &NBA,
        }
    }
}

impl LeagueStrategy {
    pub fn game_url(&self, game_id: &str) -> String {
        format!("{BASE_URL}/{}/game/_/gameId/{game_id}", self.site_path)
    }

    pub fn team_url(&self, team_id: &str) -> String {
        let segment = match self.team_path {
            TeamPath::Id => "id",
            TeamPath::Name => "name",
        };
        format!("{BASE_URL}/{}/team/_/{segment}/{team_id}", self.site_path)
    }

    /// Logo location derived from the identifier; logos are never scraped.
    pub fn logo_url(&self, team_id: &str) -> String {
        format!("{LOGO_BASE_URL}/{}/500/{team_id}.png", self.logo_path)
    }

    pub fn schedule_url(&self, week: u32, year: i32) -> Option<String> {
        self.has_weekly_schedule.then(|| {
            format!(
                "{BASE_URL}/{}/schedule/_/week/{week}/year/{year}/",
                self.site_path
            )
        })
    }

    pub fn team_id(&self, href: &str) -> Option<String> {
        (self.team_id_from_href)(href)
    }
}

/// `.../team/_/id/333/alabama-crimson-tide` gives `333`.
fn numeric_team_id(href: &str) -> Option<String> {
    let (_, rest) = href.split_once("/id/")?;
    let id = rest.split('/').next()?;
    (!id.is_empty() && id.chars().all(|c| c.is_ascii_digit())).then(|| id.to_string())
}

/// `.../team/_/name/kc/kansas-city-chiefs` gives `kc`; without the marker the
/// trailing path segment is the identifier.
fn slug_team_id(href: &str) -> Option<String> {
    let slug = match href.split_once("/name/") {
        Some((_, rest)) => rest.split('/').next(),
        None => href.trim_end_matches('/').rsplit('/').next(),
    }?;
    (!slug.is_empty()).then(|| slug.to_string())
}
