use std::time::Duration;

use scraper::Html;
use tracing::{debug, info, instrument, warn};

use crate::client::Fetch;
use crate::error::{PickemError, Result};
use crate::espn_scraper::extract::{self, Locator};
use crate::espn_scraper::get_document;
use crate::model::League;

/// Every game id listed on weeks `1..=weeks` of a season's schedule.
///
/// A week that cannot be fetched is logged and skipped.
#[instrument(skip(fetch, delay))]
pub async fn get_game_ids<F: Fetch + ?Sized>(
    fetch: &F,
    league: League,
    year: i32,
    weeks: u32,
    delay: Duration,
) -> Result<Vec<String>> {
    let strategy = league.strategy();
    let mut game_ids = Vec::new();

    for week in 1..=weeks {
        let url = strategy
            .schedule_url(week, year)
            .ok_or(PickemError::ScheduleUnsupported(league))?;
        info!(week, "scraping schedule week");

        match get_document(fetch, &url).await {
            Ok(document) => {
                let ids = parse_schedule(&document)?;
                debug!(week, count = ids.len(), "parsed schedule week");
                game_ids.extend(ids);
            }
            Err(e) => warn!(week, error = %e, "failed to fetch schedule week"),
        }
        tokio::time::sleep(delay).await;
    }

    Ok(game_ids)
}

/// Game ids in page order from one weekly schedule page.
pub fn parse_schedule(document: &Html) -> Result<Vec<String>> {
    let containers_locator = Locator::parse("schedule containers", &["div.mt3"])?;
    let days_locator = Locator::parse("schedule days", &["div.Table__Scroller"])?;
    let rows_locator = Locator::parse(
        "schedule rows",
        &["table.Table", "tbody.Table__TBODY", "tr"],
    )?;
    let cells_locator = Locator::parse("schedule cells", &["td"])?;
    let link_locator = Locator::parse("game link", &["a[href]"])?;

    // The first `mt3` block is page navigation; games live in the second.
    let Some(schedule) = extract::find_all(document.root_element(), &containers_locator)
        .get(1)
        .copied()
    else {
        warn!("schedule container not found");
        return Ok(Vec::new());
    };

    let game_ids = extract::find_all(schedule, &days_locator)
        .into_iter()
        .flat_map(|day| extract::find_all(day, &rows_locator))
        .filter_map(|row| {
            // Third cell holds the result or kickoff link.
            let id = extract::find_all(row, &cells_locator)
                .get(2)
                .and_then(|cell| extract::attr(*cell, &link_locator, "href").into_option())
                .and_then(|href| game_id_from_href(&href));
            if id.is_none() {
                debug!(row = %extract::element_text(row), "schedule row without game id");
            }
            id
        })
        .collect();

    Ok(game_ids)
}

/// Digits following `gameId=` or `gameId/` in a game link.
pub fn game_id_from_href(href: &str) -> Option<String> {
    let (_, rest) = href
        .split_once("gameId=")
        .or_else(|| href.split_once("gameId/"))?;
    let id: String = rest.chars().take_while(|c| c.is_ascii_digit()).collect();
    (!id.is_empty()).then_some(id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{StaticFetch, CFB_SCHEDULE_PAGE};

    #[test]
    fn test_game_id_from_href() {
        assert_eq!(
            game_id_from_href("/college-football/game/_/gameId/401628319/auburn-alabama"),
            Some("401628319".to_string())
        );
        assert_eq!(
            game_id_from_href("https://www.espn.com/college-football/game?gameId=401628320"),
            Some("401628320".to_string())
        );
        assert_eq!(game_id_from_href("/college-football/team/_/id/333"), None);
        assert_eq!(game_id_from_href("/game/_/gameId/"), None);
    }

    #[test]
    fn test_parse_schedule() {
        let document = Html::parse_document(CFB_SCHEDULE_PAGE);
        assert_eq!(
            parse_schedule(&document).unwrap(),
            vec!["401628319", "401628320", "401628321"]
        );
    }

    #[test]
    fn test_parse_schedule_without_container() {
        let document = Html::parse_document(r#"<div class="mt3">only navigation</div>"#);
        assert!(parse_schedule(&document).unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_get_game_ids_skips_failed_weeks() {
        let fetch = StaticFetch::new().page(
            "https://www.espn.com/college-football/schedule/_/week/2/year/2024/",
            CFB_SCHEDULE_PAGE,
        );
        let ids = get_game_ids(&fetch, League::Cfb, 2024, 2, Duration::ZERO)
            .await
            .unwrap();

        assert_eq!(ids.len(), 3);
        assert_eq!(fetch.requests().len(), 2);
    }

    #[tokio::test]
    async fn test_get_game_ids_unsupported_league() {
        let fetch = StaticFetch::new();
        let result = get_game_ids(&fetch, League::Nba, 2024, 1, Duration::ZERO).await;
        assert!(matches!(
            result,
            Err(PickemError::ScheduleUnsupported(League::Nba))
        ));
        assert!(fetch.requests().is_empty());
    }
}
