//! Page scrapers for ESPN game, team and schedule pages.

pub mod extract;
pub mod game;
pub mod league;
pub mod schedule;
pub mod team;

use ::scraper::Html;

use crate::client::Fetch;
use crate::error::Result;

/// Fetch a URL through `fetch` and parse the body as an HTML document.
pub(crate) async fn get_document<F: Fetch + ?Sized>(fetch: &F, url: &str) -> Result<Html> {
    let body = fetch.fetch(url).await?;
    Ok(Html::parse_document(&body))
}
