use scraper::{ElementRef, Html, Selector};
use tracing::{debug, instrument};

use crate::client::Fetch;
use crate::error::Result;
use crate::espn_scraper::extract::{self, Extracted, Locator};
use crate::espn_scraper::get_document;
use crate::espn_scraper::league::LeagueStrategy;
use crate::model::{League, RawBoxScore, RawGame};

/// The two symmetric halves of a game page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    Away,
    Home,
}

impl Side {
    fn team_container(self) -> &'static str {
        match self {
            Side::Away => "div.Gamestrip__Team--left",
            Side::Home => "div.Gamestrip__Team--right",
        }
    }

    fn box_score_row(self) -> usize {
        match self {
            Side::Away => 0,
            Side::Home => 1,
        }
    }

    fn predictor_value(self) -> &'static str {
        match self {
            Side::Away => "div.matchupPredictor__teamValue--b",
            Side::Home => "div.matchupPredictor__teamValue--a",
        }
    }
}

#[instrument(skip(fetch))]
pub async fn get_game<F: Fetch + ?Sized>(
    fetch: &F,
    league: League,
    game_id: &str,
) -> Result<RawGame> {
    let strategy = league.strategy();
    let url = strategy.game_url(game_id);
    let document = get_document(fetch, &url).await?;
    let game = parse_game(strategy, game_id, &document)?;
    debug!(
        game_id,
        away = ?game.away_team_id,
        home = ?game.home_team_id,
        "parsed game page"
    );
    Ok(game)
}

/// Extract a [`RawGame`] from a parsed game page.
///
/// The gamestrip, information and matchup sections are read independently; a
/// missing section only defaults its own fields.
pub fn parse_game(strategy: &LeagueStrategy, game_id: &str, document: &Html) -> Result<RawGame> {
    let root = document.root_element();

    let gamestrip = extract::find(root, &Locator::parse("gamestrip", &["div.Gamestrip"])?);
    if !gamestrip.is_found() {
        debug!(game_id, "gamestrip not found");
    }
    let away_team_id = parse_team_id(strategy, gamestrip, Side::Away)?;
    let home_team_id = parse_team_id(strategy, gamestrip, Side::Home)?;
    let (away_box_score, home_box_score) = if strategy.has_box_score {
        (
            Some(parse_box_score(gamestrip, Side::Away)?),
            Some(parse_box_score(gamestrip, Side::Home)?),
        )
    } else {
        (None, None)
    };

    let info = extract::find(root, &Locator::parse("game info", &["section.GameInfo"])?);
    if !info.is_found() {
        debug!(game_id, "game information section not found");
    }
    let stadium_locator = Locator::parse("stadium", &["div.GameInfo__Location"])?;
    let location_locator = Locator::parse("location", &["span.Location__Text"])?;
    let meta_locator = Locator::parse("meta", &["div.GameInfo__Meta", "span"])?;
    let line_locator = Locator::parse("betting line", &["div.GameInfo__BettingItem.line"])?;
    let over_under_locator = Locator::parse("over/under", &["div.GameInfo__BettingItem.ou"])?;
    let capacity_locator = Locator::parse("capacity", &["div.Attendance__Capacity"])?;
    let attendance_locator = Locator::parse("attendance", &["div.Attendance__Numbers"])?;

    let text = |locator: &Locator| info.and_then(|i| extract::text(i, locator)).or_default();
    let meta = |n: usize| {
        info.and_then(|i| extract::nth_text(i, &meta_locator, n))
            .or_default()
    };

    let stadium = info
        .and_then(|i| extract::first_text(i, &stadium_locator))
        .or_default();
    let location = text(&location_locator);
    let game_timestamp = meta(0);
    let tv_coverage = meta(1);
    let betting_line = text(&line_locator);
    let betting_over_under = text(&over_under_locator);
    let stadium_capacity = text(&capacity_locator);
    let attendance = text(&attendance_locator);

    let matchup = extract::find(root, &Locator::parse("matchup", &["div.matchupPredictor"])?);
    let (away_win_pct, home_win_pct) = match matchup {
        Extracted::Found(matchup) => (
            parse_win_pct(matchup, Side::Away)?,
            parse_win_pct(matchup, Side::Home)?,
        ),
        Extracted::NotFound => {
            debug!(game_id, "matchup predictor not found");
            (None, None)
        }
    };

    Ok(RawGame {
        game_id: game_id.to_string(),
        league: strategy.league,
        away_team_id,
        home_team_id,
        away_box_score,
        home_box_score,
        stadium,
        location,
        game_timestamp,
        tv_coverage,
        betting_line,
        betting_over_under,
        stadium_capacity,
        attendance,
        away_win_pct,
        home_win_pct,
    })
}

fn parse_team_id(
    strategy: &LeagueStrategy,
    gamestrip: Extracted<ElementRef>,
    side: Side,
) -> Result<Option<String>> {
    let link_locator = Locator::parse(
        "team link",
        &[side.team_container(), "div.Gamestrip__TeamContainer", "a[href]"],
    )?;
    let team_id = gamestrip
        .and_then(|g| extract::attr(g, &link_locator, "href"))
        .into_option()
        .and_then(|href| strategy.team_id(&href));
    if team_id.is_none() {
        debug!(?side, "could not extract team id");
    }
    Ok(team_id)
}

fn parse_box_score(gamestrip: Extracted<ElementRef>, side: Side) -> Result<RawBoxScore> {
    let rows_locator = Locator::parse(
        "box score rows",
        &[
            "div.Gamestrip__Overview",
            "div.Gamestrip__Table",
            "table",
            "tbody",
            "tr",
        ],
    )?;
    let cell_selector = Selector::parse("td")?;

    let cells: Vec<String> = gamestrip
        .map(|g| extract::find_all(g, &rows_locator))
        .or_default()
        .get(side.box_score_row())
        .map(|row| row.select(&cell_selector).map(extract::element_text).collect())
        .unwrap_or_default();
    let box_score = box_score_from_cells(&cells);
    debug!(?side, ?box_score, "box score");
    Ok(box_score)
}

/// Cells are `[team, q1, q2, q3, q4, total]` or, after overtime,
/// `[team, q1, q2, q3, q4, ot, total]`.
fn box_score_from_cells(cells: &[String]) -> RawBoxScore {
    if cells.len() < 6 {
        return RawBoxScore::default();
    }
    let cell = |i: usize| cells.get(i).cloned();
    RawBoxScore {
        quarters: [cell(1), cell(2), cell(3), cell(4)],
        overtime: if cells.len() == 7 { cell(5) } else { None },
        total: cells.last().cloned(),
    }
}

fn parse_win_pct(matchup: ElementRef, side: Side) -> Result<Option<String>> {
    let locator = Locator::parse("win probability", &[side.predictor_value()])?;
    Ok(extract::text(matchup, &locator).into_option())
}
