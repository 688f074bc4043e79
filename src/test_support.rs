//! In-memory collaborators and page fixtures shared by unit tests.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use serde::Serialize;

use crate::client::Fetch;
use crate::error::{PickemError, Result};
use crate::geocode::Geocode;
use crate::model::Coordinates;
use crate::sink::Sink;

/// Serves canned page bodies keyed by URL; unknown URLs answer 404.
#[derive(Default)]
pub(crate) struct StaticFetch {
    pages: HashMap<String, String>,
    requests: Mutex<Vec<String>>,
}

impl StaticFetch {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn page(mut self, url: &str, body: &str) -> Self {
        self.pages.insert(url.to_string(), body.to_string());
        self
    }

    pub(crate) fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl Fetch for StaticFetch {
    async fn fetch(&self, url: &str) -> Result<String> {
        self.requests.lock().unwrap().push(url.to_string());
        self.pages
            .get(url)
            .cloned()
            .ok_or_else(|| PickemError::UnexpectedStatus {
                url: url.to_string(),
                status: reqwest::StatusCode::NOT_FOUND,
            })
    }
}

/// Answers every query with the same coordinates and records the queries.
#[derive(Default)]
pub(crate) struct StaticGeocode {
    queries: Mutex<Vec<String>>,
}

impl StaticGeocode {
    pub(crate) fn queries(&self) -> Vec<String> {
        self.queries.lock().unwrap().clone()
    }
}

#[async_trait]
impl Geocode for StaticGeocode {
    async fn geocode(&self, query: &str) -> Result<Option<Coordinates>> {
        self.queries.lock().unwrap().push(query.to_string());
        Ok(Some(Coordinates {
            latitude: 33.2083,
            longitude: -87.5504,
        }))
    }
}

/// Keeps every written table as JSON, in write order.
#[derive(Default)]
pub(crate) struct MemorySink {
    tables: Vec<(String, serde_json::Value)>,
}

impl MemorySink {
    pub(crate) fn tables(&self) -> Vec<String> {
        self.tables.iter().map(|(name, _)| name.clone()).collect()
    }

    pub(crate) fn rows(&self, table: &str) -> usize {
        self.tables
            .iter()
            .find(|(name, _)| name == table)
            .and_then(|(_, rows)| rows.as_array())
            .map_or(0, Vec::len)
    }
}

impl Sink for MemorySink {
    fn write<T: Serialize>(&mut self, table: &str, rows: &[T]) -> Result<()> {
        self.tables
            .push((table.to_string(), serde_json::to_value(rows)?));
        Ok(())
    }
}

pub(crate) const CFB_GAME_PAGE: &str = r#"
    <html><body>
    <div class="Gamestrip relative overflow-hidden college-football Gamestrip--xl">
        <div class="Gamestrip__Team Gamestrip__Team--left">
            <div class="Gamestrip__TeamContainer">
                <div class="Gamestrip__InfoLogo">
                    <a href="https://www.espn.com/college-football/team/_/id/2/auburn-tigers">AUB</a>
                </div>
            </div>
        </div>
        <div class="Gamestrip__Team Gamestrip__Team--right">
            <div class="Gamestrip__TeamContainer">
                <div class="Gamestrip__InfoLogo">
                    <a href="https://www.espn.com/college-football/team/_/id/333/alabama-crimson-tide">ALA</a>
                </div>
            </div>
        </div>
        <div class="Gamestrip__Overview">
            <div class="Gamestrip__Table">
                <div class="Table__Scroller">
                    <table>
                        <thead><tr><th></th><th>1</th><th>2</th><th>3</th><th>4</th><th>OT</th><th>T</th></tr></thead>
                        <tbody class="Table__TBODY">
                            <tr><td>AUB</td><td>7</td><td>3</td><td>0</td><td>14</td><td>3</td><td>27</td></tr>
                            <tr><td>ALA</td><td>10</td><td>0</td><td>7</td><td>7</td><td>6</td><td>30</td></tr>
                        </tbody>
                    </table>
                </div>
            </div>
        </div>
    </div>
    <section class="Card GameInfo">
        <div class="GameInfo__Location">
            Bryant-Denny Stadium
            <span class="Location__Text">Tuscaloosa, AL</span>
        </div>
        <div class="GameInfo__Meta">
            <span>3:30 PM, November 30, 2024</span>
            <span>Coverage: CBS</span>
        </div>
        <div class="GameInfo__BettingItem line">Line: ALA -11.5</div>
        <div class="GameInfo__BettingItem ou">Over/Under: 53.5</div>
        <div class="Attendance__Numbers">Attendance: 100,077</div>
        <div class="Attendance__Capacity">Capacity: 100,077</div>
    </section>
    <div class="matchupPredictor">
        <div class="matchupPredictor__teamValue--a">81.2%</div>
        <div class="matchupPredictor__teamValue--b">18.8%</div>
    </div>
    </body></html>
"#;

pub(crate) const CFB_TEAM_PAGE: &str = r#"
    <html><body>
    <div class="ClubhouseHeader">
        <div class="ClubhouseHeader__Main">
            <h1 class="ClubhouseHeader__Name">
                <span class="flex flex-wrap">
                    <span class="db pr3 nowrap fw-bold">Alabama</span>
                    <span class="db fw-light">Crimson Tide</span>
                </span>
            </h1>
        </div>
    </div>
    <section class="Card TeamStandings">
        <div class="Card__Header__Title__Wrapper"><h3>2024 SEC Standings</h3></div>
        <div class="Wrapper Card__Content">
            <div class="ResponsiveTable">
                <table><tbody>
                    <tr><td class="Table__TD"><a class="AnchorLink" href="/college-football/team/_/id/61">Georgia</a></td><td>6-2</td><td>10-2</td></tr>
                    <tr><td class="Table__TD"><a class="AnchorLink" href="/college-football/team/_/id/333">Alabama</a></td><td>5-3</td><td>9-3</td></tr>
                    <tr><td class="Table__TD"><a class="AnchorLink" href="/college-football/team/_/id/2">Auburn</a></td><td>2-6</td><td>5-7</td></tr>
                </tbody></table>
            </div>
        </div>
    </section>
    </body></html>
"#;

pub(crate) const NFL_TEAM_PAGE: &str = r#"
    <html><body>
    <div class="ClubhouseHeader">
        <div class="ClubhouseHeader__Main">
            <h1 class="ClubhouseHeader__Name">
                <span class="flex">
                    <span>Kansas City</span>
                    <span>Chiefs</span>
                </span>
            </h1>
        </div>
    </div>
    <section class="Card TeamStandings">
        <div class="Card__Header__Title__Wrapper"><h3>2024 AFC West Standings</h3></div>
        <div class="Wrapper Card__Content">
            <div class="ResponsiveTable">
                <table><tbody>
                    <tr><td><a class="AnchorLink fw-bold" href="/nfl/team/_/name/kc">KC</a></td><td>15</td><td>2</td><td>.882</td></tr>
                    <tr><td><a class="AnchorLink" href="/nfl/team/_/name/lac">LAC</a></td><td>11</td><td>6</td><td>.647</td></tr>
                </tbody></table>
            </div>
        </div>
    </section>
    </body></html>
"#;

pub(crate) const CFB_SCHEDULE_PAGE: &str = r#"
    <html><body>
    <div class="mt3">navigation</div>
    <div class="mt3">
        <div class="ScheduleTables">
            <div class="Table__Title">Saturday, August 31, 2024</div>
            <div class="Table__Scroller">
                <table class="Table"><tbody class="Table__TBODY">
                    <tr><td>Auburn</td><td>Alabama</td><td><a href="/college-football/game/_/gameId/401628319/auburn-alabama">27-30</a></td></tr>
                    <tr><td>Georgia</td><td>Texas</td><td><a href="/college-football/game?gameId=401628320">TBD</a></td></tr>
                    <tr><td>Bye</td><td></td><td>Canceled</td></tr>
                </tbody></table>
            </div>
        </div>
        <div class="ScheduleTables">
            <div class="Table__Scroller">
                <table class="Table"><tbody class="Table__TBODY">
                    <tr><td>Ole Miss</td><td>LSU</td><td><a href="/college-football/game/_/gameId/401628321">10-24</a></td></tr>
                </tbody></table>
            </div>
        </div>
    </div>
    </body></html>
"#;
