use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, instrument};

use crate::config::{GEOCODE_URL, USER_AGENT};
use crate::error::{PickemError, Result};
use crate::model::Coordinates;

const API_KEY_PARAM: &str = "api_key";
const REDACTED: &str = "REDACTED";

/// Resolves a free-text venue query to coordinates.
#[async_trait]
pub trait Geocode: Send + Sync {
    /// `Ok(None)` when the service knows no match for `query`.
    async fn geocode(&self, query: &str) -> Result<Option<Coordinates>>;
}

/// Client for the geocode.maps.co search API.
pub struct GeocodeMapsClient {
    http: reqwest::Client,
    api_key: String,
}

/// One search hit; the service reports coordinates as strings.
#[derive(Debug, Deserialize)]
struct SearchHit {
    lat: String,
    lon: String,
}

impl GeocodeMapsClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), api_key)
    }

    pub fn with_client(client: reqwest::Client, api_key: impl Into<String>) -> Self {
        Self {
            http: client,
            api_key: api_key.into(),
        }
    }

    fn search_url(&self, query: &str) -> Result<url::Url> {
        Ok(url::Url::parse_with_params(
            GEOCODE_URL,
            [("q", query), (API_KEY_PARAM, self.api_key.as_str())],
        )?)
    }
}

#[async_trait]
impl Geocode for GeocodeMapsClient {
    #[instrument(skip(self))]
    async fn geocode(&self, query: &str) -> Result<Option<Coordinates>> {
        let url = self.search_url(query)?;
        let shown_url = redact_api_key(&url);
        let response = self
            .http
            .get(url)
            .header(reqwest::header::USER_AGENT, USER_AGENT)
            .send()
            .await
            .map_err(|e| PickemError::Http {
                url: shown_url.clone(),
                source: e.without_url(),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(PickemError::UnexpectedStatus {
                url: shown_url,
                status,
            });
        }

        let body = response.text().await.map_err(|e| PickemError::ResponseBody {
            url: shown_url,
            source: e.without_url(),
        })?;
        let coordinates = parse_search_response(&body)?;
        debug!(?coordinates, "geocoded");
        Ok(coordinates)
    }
}

/// `url` with its `api_key` value masked, for errors and logs.
fn redact_api_key(url: &url::Url) -> String {
    let pairs: Vec<(String, String)> = url
        .query_pairs()
        .map(|(key, value)| {
            let value = if key == API_KEY_PARAM {
                REDACTED.to_string()
            } else {
                value.into_owned()
            };
            (key.into_owned(), value)
        })
        .collect();
    let mut redacted = url.clone();
    redacted.query_pairs_mut().clear().extend_pairs(pairs);
    redacted.to_string()
}

/// Coordinates of the first hit in a search response.
fn parse_search_response(body: &str) -> Result<Option<Coordinates>> {
    let hits: Vec<SearchHit> = serde_json::from_str(body)?;
    let Some(hit) = hits.first() else {
        return Ok(None);
    };
    // Unparseable numbers count as no match rather than a failed request.
    let coordinates = hit
        .lat
        .trim()
        .parse::<f64>()
        .ok()
        .zip(hit.lon.trim().parse::<f64>().ok())
        .map(|(latitude, longitude)| Coordinates {
            latitude,
            longitude,
        });
    Ok(coordinates)
}

/// Geocoder for runs without an API key; every venue stays unlocated.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoGeocoding;

#[async_trait]
impl Geocode for NoGeocoding {
    async fn geocode(&self, _query: &str) -> Result<Option<Coordinates>> {
        Ok(None)
    }
}
