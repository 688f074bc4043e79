use scraper::{ElementRef, Html, Selector};
use tracing::{debug, instrument};

use crate::client::Fetch;
use crate::config::SeasonWindow;
use crate::error::Result;
use crate::espn_scraper::extract::{self, Extracted, Locator};
use crate::espn_scraper::get_document;
use crate::espn_scraper::league::LeagueStrategy;
use crate::model::{League, RawTeam};

/// Record reported for every team until the season has started.
pub const EMPTY_RECORD: &str = "0-0";

/// Class ESPN puts on the standings link of the team whose page is shown.
const CURRENT_TEAM_CLASS: &str = "fw-bold";

#[instrument(skip(fetch, season))]
pub async fn get_team<F: Fetch + ?Sized>(
    fetch: &F,
    league: League,
    team_id: &str,
    season: &SeasonWindow,
) -> Result<RawTeam> {
    let strategy = league.strategy();
    let url = strategy.team_url(team_id);
    let document = get_document(fetch, &url).await?;
    let team = parse_team(strategy, team_id, season, &document)?;
    debug!(team_id, name = %team.name, "parsed team page");
    Ok(team)
}

/// Extract a [`RawTeam`] from a parsed clubhouse page.
pub fn parse_team(
    strategy: &LeagueStrategy,
    team_id: &str,
    season: &SeasonWindow,
    document: &Html,
) -> Result<RawTeam> {
    let root = document.root_element();

    let header_locator = Locator::parse(
        "clubhouse header",
        &["div.ClubhouseHeader", "div.ClubhouseHeader__Main"],
    )?;
    let title_locator = Locator::parse(
        "clubhouse title",
        &["h1.ClubhouseHeader__Name", "span.flex", "span"],
    )?;
    let header = extract::find(root, &header_locator);
    if !header.is_found() {
        debug!(team_id, "clubhouse header not found");
    }
    let name = header
        .and_then(|h| extract::nth_text(h, &title_locator, 0))
        .or_default();
    let mascot = header
        .and_then(|h| extract::nth_text(h, &title_locator, 1))
        .or_default();

    let standings_locator = Locator::parse("standings", &["section.TeamStandings"])?;
    let conference_locator = Locator::parse(
        "conference header",
        &["div.Card__Header__Title__Wrapper", "h3"],
    )?;
    let standings = extract::find(root, &standings_locator);
    let conference_header = standings
        .and_then(|s| extract::text(s, &conference_locator))
        .or_default();

    let (conference_record, overall_record) = if !season.has_started() {
        debug!(team_id, season_start = %season.season_start, "season not started");
        (
            Some(EMPTY_RECORD.to_string()),
            Some(EMPTY_RECORD.to_string()),
        )
    } else {
        match standings {
            Extracted::Found(standings) => standing_records(strategy, standings, &name)?,
            Extracted::NotFound => {
                debug!(team_id, "standings section not found");
                (None, None)
            }
        }
    };

    Ok(RawTeam {
        team_id: team_id.to_string(),
        league: strategy.league,
        name,
        mascot,
        logo_url: strategy.logo_url(team_id),
        primary_color: String::new(),
        secondary_color: String::new(),
        accent_color: String::new(),
        conference_header,
        conference_record,
        overall_record,
    })
}

fn standing_records(
    strategy: &LeagueStrategy,
    standings: ElementRef,
    team_name: &str,
) -> Result<(Option<String>, Option<String>)> {
    let tables_locator = Locator::parse(
        "standings tables",
        &["div.Card__Content", "div.ResponsiveTable"],
    )?;
    let rows_locator = Locator::parse("standings rows", &["tbody", "tr"])?;
    let link_locator = Locator::parse("standings team link", &["td", "a"])?;
    let cell_selector = Selector::parse("td")?;

    let row = extract::find_all(standings, &tables_locator)
        .into_iter()
        .find_map(|table| {
            let rows = extract::find_all(table, &rows_locator);
            select_standing_row(&rows, team_name, &link_locator).into_option()
        });

    let Some(row) = row else {
        debug!(team_name, "no standings row for team");
        return Ok((None, None));
    };
    let cells: Vec<String> = row
        .select(&cell_selector)
        .map(extract::element_text)
        .collect();
    let records = strategy.standings.records(&cells);
    debug!(team_name, ?records, "standings records");
    Ok(records)
}

/// The last row whose team link either reads `team_name` or carries the
/// current-team marker class.
pub fn select_standing_row<'a>(
    rows: &[ElementRef<'a>],
    team_name: &str,
    link_locator: &Locator,
) -> Extracted<ElementRef<'a>> {
    rows.iter()
        .rev()
        .copied()
        .find(|row| match extract::find(*row, link_locator) {
            Extracted::Found(link) => {
                (!team_name.is_empty() && extract::element_text(link) == team_name)
                    || extract::has_class(link, CURRENT_TEAM_CLASS)
            }
            Extracted::NotFound => false,
        })
        .into()
}
