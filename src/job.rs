//! The extract, transform and load pipeline for one league season.

use itertools::Itertools;
use serde::Serialize;
use tracing::{debug, info, instrument, warn};

use crate::client::Fetch;
use crate::config::ExtractConfig;
use crate::error::Result;
use crate::espn_scraper::{game, schedule, team};
use crate::geocode::Geocode;
use crate::model::{Coordinates, Game, League, Location, RawGame, RawLocation, RawTeam, Team};
use crate::normalize::{
    normalize_game, normalize_location, normalize_team, split_location, stadium_lookup,
    LocationRegistry, Registered,
};
use crate::sink::Sink;

/// Everything scraped for one league before normalization.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RawDataset {
    pub league: League,
    pub games: Vec<RawGame>,
    pub teams: Vec<RawTeam>,
    pub locations: Vec<RawLocation>,
}

/// The normalized tables of one league.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dataset {
    pub league: League,
    pub games: Vec<Game>,
    pub teams: Vec<Team>,
    pub locations: Vec<Location>,
}

impl Dataset {
    pub fn games_table(&self) -> String {
        format!("{}_games", self.league.table_prefix())
    }

    pub fn teams_table(&self) -> String {
        format!("{}_teams", self.league.table_prefix())
    }

    pub fn locations_table(&self) -> String {
        format!("{}_locations", self.league.table_prefix())
    }
}

/// Drives a full extraction for the league and season in its [`ExtractConfig`].
///
/// A page that cannot be fetched is logged and its identifier skipped, so a
/// run always produces whatever could be scraped.
///
/// # Examples
///
/// ```no_run
/// # async fn example() -> pickem_scraper::Result<()> {
/// use chrono::NaiveDate;
/// use pickem_scraper::{ExtractConfig, ExtractJob, JsonSink, League, NoGeocoding, PickemClient};
///
/// let today = NaiveDate::from_ymd_opt(2024, 12, 1).unwrap();
/// let config = ExtractConfig::new(League::Cfb, 2024, today).with_weeks(2);
/// let job = ExtractJob::new(PickemClient::new(), NoGeocoding, config);
/// let dataset = job.run(&mut JsonSink::new("out")).await?;
/// println!("{} games", dataset.games.len());
/// # Ok(())
/// # }
/// ```
pub struct ExtractJob<F, G> {
    fetch: F,
    geocode: G,
    config: ExtractConfig,
}

impl<F: Fetch, G: Geocode> ExtractJob<F, G> {
    pub fn new(fetch: F, geocode: G, config: ExtractConfig) -> Self {
        Self {
            fetch,
            geocode,
            config,
        }
    }

    pub fn config(&self) -> &ExtractConfig {
        &self.config
    }

    #[instrument(skip(self), fields(league = %self.config.league, year = self.config.year))]
    pub async fn extract_game_ids(&self) -> Result<Vec<String>> {
        info!(weeks = self.config.weeks, "retrieving game ids");
        schedule::get_game_ids(
            &self.fetch,
            self.config.league,
            self.config.year,
            self.config.weeks,
            self.config.request_delay,
        )
        .await
    }

    #[instrument(skip_all, fields(league = %self.config.league, count = game_ids.len()))]
    pub async fn extract_games(&self, game_ids: &[String]) -> Vec<RawGame> {
        info!("retrieving game data");
        let mut games = Vec::with_capacity(game_ids.len());
        for game_id in game_ids {
            match game::get_game(&self.fetch, self.config.league, game_id).await {
                Ok(game) => games.push(game),
                Err(e) => warn!(game_id = %game_id, error = %e, "skipping game"),
            }
            self.pause().await;
        }
        games
    }

    #[instrument(skip_all, fields(league = %self.config.league))]
    pub async fn extract_teams(&self, games: &[RawGame]) -> Vec<RawTeam> {
        let team_ids = unique_team_ids(games);
        info!(count = team_ids.len(), "retrieving team data");

        let mut teams = Vec::with_capacity(team_ids.len());
        for team_id in &team_ids {
            match team::get_team(&self.fetch, self.config.league, team_id, &self.config.season)
                .await
            {
                Ok(team) => teams.push(team),
                Err(e) => warn!(team_id = %team_id, error = %e, "skipping team"),
            }
            self.pause().await;
        }
        teams
    }

    /// One location per distinct venue in `games`, geocoded on first sight.
    #[instrument(skip_all, fields(league = %self.config.league))]
    pub async fn extract_locations(&self, games: &[RawGame]) -> Vec<RawLocation> {
        info!("retrieving location data");
        let mut registry = LocationRegistry::new();
        let mut locations = Vec::new();

        for game in games {
            let (city, state) = split_location(&game.location);
            let location_id = match registry.register(&game.stadium, &city, &state) {
                Some(Registered::New(id)) => id,
                Some(Registered::Existing(_)) => continue,
                None => {
                    debug!(game_id = %game.game_id, "game has no stadium");
                    continue;
                }
            };

            let coordinates = self.locate(&game.stadium, &game.location).await;
            locations.push(RawLocation {
                location_id,
                stadium: game.stadium.clone(),
                city,
                state,
                stadium_capacity: game.stadium_capacity.clone(),
                coordinates,
            });
        }
        locations
    }

    async fn locate(&self, stadium: &str, location: &str) -> Option<Coordinates> {
        let query = format!("{}, {}", stadium.trim(), location.trim());
        let coordinates = match self.geocode.geocode(&query).await {
            Ok(coordinates) => coordinates,
            Err(e) => {
                warn!(query = %query, error = %e, "geocoding failed");
                None
            }
        };
        self.pause().await;
        if coordinates.is_none() {
            debug!(query = %query, "no coordinates for location");
        }
        coordinates
    }

    /// Scrape ids from the weekly schedule, then games, teams and locations.
    #[instrument(skip(self), fields(league = %self.config.league, year = self.config.year))]
    pub async fn extract(&self) -> Result<RawDataset> {
        let game_ids = self.extract_game_ids().await?;
        Ok(self.extract_from_ids(&game_ids).await)
    }

    /// Scrape the given games and their teams and locations. Leagues without a
    /// weekly schedule are extracted this way.
    #[instrument(skip_all, fields(league = %self.config.league, count = game_ids.len()))]
    pub async fn extract_from_ids(&self, game_ids: &[String]) -> RawDataset {
        let games = self.extract_games(game_ids).await;
        let teams = self.extract_teams(&games).await;
        let locations = self.extract_locations(&games).await;
        info!(
            games = games.len(),
            teams = teams.len(),
            locations = locations.len(),
            "finished extract"
        );
        RawDataset {
            league: self.config.league,
            games,
            teams,
            locations,
        }
    }

    /// Extract, normalize and write every table to `sink`.
    pub async fn run<S: Sink>(&self, sink: &mut S) -> Result<Dataset> {
        let raw = self.extract().await?;
        finish(raw, sink)
    }

    /// [`run`](Self::run) over known game ids instead of the weekly schedule.
    pub async fn run_from_ids<S: Sink>(
        &self,
        game_ids: &[String],
        sink: &mut S,
    ) -> Result<Dataset> {
        let raw = self.extract_from_ids(game_ids).await;
        finish(raw, sink)
    }

    async fn pause(&self) {
        tokio::time::sleep(self.config.request_delay).await;
    }
}

fn finish<S: Sink>(raw: RawDataset, sink: &mut S) -> Result<Dataset> {
    let dataset = transform(raw);
    load(&dataset, sink)?;
    Ok(dataset)
}

/// Away and home team ids of `games`, each once, in first-seen order.
pub fn unique_team_ids(games: &[RawGame]) -> Vec<String> {
    games
        .iter()
        .flat_map(|game| [game.away_team_id.as_ref(), game.home_team_id.as_ref()])
        .flatten()
        .unique()
        .cloned()
        .collect()
}

/// Normalize a scraped dataset; games are joined to locations by stadium name.
#[instrument(skip_all, fields(league = %raw.league))]
pub fn transform(raw: RawDataset) -> Dataset {
    info!("transforming dataset");
    let lookup = stadium_lookup(&raw.locations);
    Dataset {
        league: raw.league,
        games: raw
            .games
            .iter()
            .map(|game| normalize_game(game, &lookup))
            .collect(),
        teams: raw.teams.iter().map(normalize_team).collect(),
        locations: raw.locations.iter().map(normalize_location).collect(),
    }
}

/// Write the games, teams and locations tables of `dataset`.
#[instrument(skip_all, fields(league = %dataset.league))]
pub fn load<S: Sink>(dataset: &Dataset, sink: &mut S) -> Result<()> {
    info!("loading dataset");
    sink.write(&dataset.games_table(), &dataset.games)?;
    sink.write(&dataset.teams_table(), &dataset.teams)?;
    sink.write(&dataset.locations_table(), &dataset.locations)?;
    Ok(())
}
