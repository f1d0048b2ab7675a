//! Port definitions (trait abstractions) for external systems.
//!
//! Ports define the interfaces that the favorites engine expects from
//! infrastructure. They contain no implementation details and use only
//! domain types.
//!
//! # Design Rules
//!
//! - No `sqlx` or `reqwest` types in any signature
//! - Store values are opaque strings; only the core interprets the marker
//! - Errors are mapped to the port error types at the adapter boundary

pub mod event_emitter;
pub mod kv_store;
pub mod record_fetcher;

use thiserror::Error;

pub use event_emitter::{BroadcastEmitter, FavoritesEventEmitter, NoopEmitter};
pub use kv_store::{KeyValueStore, MemoryKeyValueStore};
#[cfg(test)]
pub use kv_store::MockKeyValueStore;
pub use record_fetcher::RecordFetcher;

/// Errors raised by a [`KeyValueStore`] implementation.
///
/// Every storage failure surfaces as "unavailable": the engine does not
/// distinguish between a locked file, a missing table or an I/O error.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoreError {
    /// The store could not be read or written.
    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

/// Errors raised by a [`RecordFetcher`] implementation.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FetchError {
    /// The request could not be sent or the connection failed.
    #[error("Network error fetching {url}: {message}")]
    Network {
        /// The URL that was requested
        url: String,
        /// Underlying error description
        message: String,
    },

    /// The server answered with a non-success status.
    #[error("Request to {url} failed with status {status}")]
    Status {
        /// The URL that was requested
        url: String,
        /// HTTP status code
        status: u16,
    },

    /// The response body could not be turned into a record.
    #[error("Could not parse record from {url}: {message}")]
    Parse {
        /// The URL that was requested
        url: String,
        /// What was wrong with the body
        message: String,
    },

    /// The favorite id could not be resolved to a URL.
    #[error("Invalid URL '{url}': {message}")]
    InvalidUrl {
        /// The offending id
        url: String,
        /// Parser error description
        message: String,
    },
}

/// Core error type for semantic domain errors.
///
/// Adapters map this to their own error types (CLI exit codes, UI
/// affordances).
#[derive(Debug, Error)]
pub enum CoreError {
    /// The key-value store failed. Loads degrade to an empty set and
    /// mutations degrade to no-ops when this is returned.
    #[error(transparent)]
    StoreUnavailable(#[from] StoreError),

    /// Hydration of a single favorite failed.
    #[error("Fetch failed for {id}: {reason}")]
    FetchFailed {
        /// The favorite whose fetch failed
        id: String,
        /// Failure description
        reason: String,
    },

    /// The id is not part of the favorite set.
    #[error("Not a favorite: {0}")]
    NotFavorite(String),

    /// Invalid input.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Invalid configuration.
    #[error(transparent)]
    Config(#[from] crate::config::ConfigError),

    /// An internal consistency check failed.
    #[error("Invariant violation: {0}")]
    InvariantViolation(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_error_converts_to_core_error() {
        let err: CoreError = StoreError::Unavailable("database is locked".to_string()).into();
        assert!(matches!(err, CoreError::StoreUnavailable(_)));
        assert!(err.to_string().contains("database is locked"));
    }

    #[test]
    fn test_fetch_error_messages() {
        let err = FetchError::Status {
            url: "https://api.jikan.moe/v4/anime/0".to_string(),
            status: 404,
        };
        let msg = err.to_string();
        assert!(msg.contains("404"));
        assert!(msg.contains("api.jikan.moe"));
    }
}
