//! Scrape ESPN schedules, games and teams for college football, the NFL, MLB
//! and the NBA, and normalize them into flat tables.
//!
//! [`ExtractJob`] runs the whole pipeline; [`PickemClient`] and the
//! [`espn_scraper`] functions fetch single pages.

pub mod client;
pub mod config;
pub mod error;
pub mod espn_scraper;
pub mod geocode;
pub mod job;
pub mod model;
pub mod normalize;
pub mod sink;

#[cfg(test)]
mod test_support;

pub use client::{Fetch, PickemClient};
pub use config::{ExtractConfig, SeasonWindow, DEFAULT_REQUEST_DELAY, DEFAULT_WEEKS, USER_AGENT};
pub use error::{PickemError, Result};
pub use geocode::{Geocode, GeocodeMapsClient, NoGeocoding};
pub use job::{Dataset, ExtractJob, RawDataset};
pub use model::*;
pub use sink::{CsvSink, JsonSink, Sink};
