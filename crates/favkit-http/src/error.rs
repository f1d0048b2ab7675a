//! Internal error types for HTTP fetches.
//!
//! These errors are internal to `favkit-http` and are mapped to
//! [`FetchError`] at the boundary.

use favkit_core::FetchError;
use thiserror::Error;

/// Result type alias for HTTP operations.
pub type HttpResult<T> = Result<T, HttpError>;

/// Errors raised while fetching a record.
#[derive(Debug, Error)]
pub enum HttpError {
    /// Request answered with a non-success status.
    #[error("Request failed with status {status}: {url}")]
    Status {
        /// HTTP status code
        status: u16,
        /// The URL that was requested
        url: String,
    },

    /// The body parsed as JSON but is not a record.
    #[error("Invalid record: {message}")]
    InvalidRecord {
        /// Description of what was invalid
        message: String,
    },

    /// The id is relative and no base URL is configured.
    #[error("'{id}' is not an absolute URL and no base URL is configured")]
    RelativeId {
        /// The offending id
        id: String,
    },

    /// Network or HTTP client error.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

impl HttpError {
    /// Map to the port error for `url`.
    pub fn into_fetch_error(self, url: &str) -> FetchError {
        let url = url.to_string();
        match self {
            Self::Status { status, .. } => FetchError::Status { url, status },
            Self::Network(e) if e.is_decode() => FetchError::Parse {
                url,
                message: e.to_string(),
            },
            Self::Network(e) => FetchError::Network {
                url,
                message: e.to_string(),
            },
            Self::InvalidRecord { message } => FetchError::Parse { url, message },
            e @ Self::RelativeId { .. } => FetchError::InvalidUrl {
                url,
                message: e.to_string(),
            },
            Self::InvalidUrl(e) => FetchError::InvalidUrl {
                url,
                message: e.to_string(),
            },
        }
    }
}
