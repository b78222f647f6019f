//! Error types for the character API client.
//!
//! Every failure while walking the pagination chain is a [`NetworkError`].
//! The variants exist for logging; the UI collapses all of them into the
//! same status message.

use thiserror::Error;

/// Result type alias for API operations.
pub type Result<T> = std::result::Result<T, NetworkError>;

/// Errors that can occur while fetching character pages.
#[derive(Debug, Error)]
pub enum NetworkError {
    /// The request never produced a response.
    #[error("Request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The server answered with a non-success status.
    #[error("Request to {url} returned HTTP {status}")]
    Status { url: String, status: u16 },

    /// The response body was not valid JSON.
    #[error("Invalid JSON from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    /// A cursor (endpoint or `next` link) could not be parsed as a URL.
    #[error("Invalid page URL {url:?}: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    /// The pagination chain did not terminate within the configured bound.
    #[error("Pagination exceeded {limit} pages")]
    PageLimit { limit: u32 },
}

impl NetworkError {
    /// HTTP status code, when the failure was a non-success response.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}
