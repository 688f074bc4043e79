use async_trait::async_trait;
use tracing::{debug, instrument};

use crate::config::{ExtractConfig, USER_AGENT};
use crate::error::{PickemError, Result};
use crate::espn_scraper;
use crate::model::{League, RawGame, RawTeam};

/// Source of raw page bodies.
///
/// Retry, backoff and timeouts are the implementor's business; extraction only
/// sees the final body or the error.
#[async_trait]
pub trait Fetch: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<String>;
}

/// The main entry point for fetching ESPN pages.
///
/// `PickemClient` wraps a [`reqwest::Client`], sends a browser user agent with
/// every request and exposes the per-page scrapers directly.
///
/// # Examples
///
/// ```no_run
/// # async fn example() -> pickem_scraper::Result<()> {
/// use pickem_scraper::{League, PickemClient};
///
/// let client = PickemClient::new();
/// let game = client.get_game(League::Cfb, "401628319").await?;
/// println!("{} at {}", game.game_id, game.stadium);
/// # Ok(())
/// # }
/// ```
pub struct PickemClient {
    http: reqwest::Client,
}

impl PickemClient {
    /// Create a new client with default settings.
    pub fn new() -> Self {
        Self {
            http: reqwest::Client::new(),
        }
    }

    /// Create a new client using the provided [`reqwest::Client`].
    ///
    /// Use this when you need to configure timeouts, proxies, headers, etc.
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { http: client }
    }

    /// Fetch and parse one game page.
    #[instrument(skip(self))]
    pub async fn get_game(&self, league: League, game_id: &str) -> Result<RawGame> {
        espn_scraper::game::get_game(self, league, game_id).await
    }

    /// Fetch and parse one team clubhouse page.
    #[instrument(skip(self, config))]
    pub async fn get_team(
        &self,
        config: &ExtractConfig,
        team_id: &str,
    ) -> Result<RawTeam> {
        espn_scraper::team::get_team(self, config.league, team_id, &config.season).await
    }

    /// Collect every game id on the league's weekly schedule pages.
    #[instrument(skip(self, config))]
    pub async fn get_game_ids(&self, config: &ExtractConfig) -> Result<Vec<String>> {
        espn_scraper::schedule::get_game_ids(
            self,
            config.league,
            config.year,
            config.weeks,
            config.request_delay,
        )
        .await
    }
}

impl Default for PickemClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Fetch for PickemClient {
    async fn fetch(&self, url: &str) -> Result<String> {
        debug!(url, "fetching page");

        let response = self
            .http
            .get(url)
            .header(reqwest::header::USER_AGENT, USER_AGENT)
            .send()
            .await
            .map_err(|e| PickemError::Http {
                url: url.to_owned(),
                source: e,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(PickemError::UnexpectedStatus {
                url: url.to_owned(),
                status,
            });
        }

        response.text().await.map_err(|e| PickemError::ResponseBody {
            url: url.to_owned(),
            source: e,
        })
    }
}
