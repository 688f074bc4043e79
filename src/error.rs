use ::scraper::error::SelectorErrorKind;

use crate::model::League;

/// All errors that can occur while extracting, normalizing or loading pickem data.
///
/// Missing page elements are not errors: field extraction falls back to a
/// per-field default instead. Only collaborator failures and programming
/// mistakes (bad selectors) surface here.
#[derive(thiserror::Error, Debug)]
pub enum PickemError {
    /// HTTP request failed (network, DNS, TLS, timeout, etc.).
    #[error("http request failed for {url}: {source}")]
    Http {
        url: String,
        source: reqwest::Error,
    },

    /// Server returned a non-success HTTP status code.
    #[error("unexpected status {status} for {url}")]
    UnexpectedStatus {
        url: String,
        status: reqwest::StatusCode,
    },

    /// Failed to read the response body as text.
    #[error("failed to read response body from {url}: {source}")]
    ResponseBody {
        url: String,
        source: reqwest::Error,
    },

    /// A CSS selector string could not be parsed.
    #[error("invalid CSS selector: {0}")]
    Selector(String),

    /// A request URL could not be built.
    #[error("invalid url: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// A JSON payload could not be encoded or decoded.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// A CSV table could not be written.
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    /// Filesystem access failed while writing output.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// The league publishes no weekly schedule pages.
    #[error("no weekly schedule available for {0}")]
    ScheduleUnsupported(League),
}

impl<'a> From<SelectorErrorKind<'a>> for PickemError {
    fn from(err: SelectorErrorKind<'a>) -> Self {
        PickemError::Selector(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, PickemError>;
