//! CLI-specific error types and mappings.
//!
//! Maps `CoreError` to exit codes and user-facing messages.

use favkit_core::{CoreError, FetchError};
use thiserror::Error;

/// CLI-specific error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Core domain error.
    #[error("{0}")]
    Core(String),

    /// Argument error.
    #[error("Invalid arguments: {0}")]
    Arguments(String),

    /// IO error (file not found, permission denied, etc.).
    #[error("IO error: {0}")]
    Io(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Database error.
    #[error("Database error: {0}")]
    Database(String),

    /// Remote service error.
    #[error("Network error: {0}")]
    Network(String),
}

impl CliError {
    /// Map error to appropriate exit code.
    ///
    /// Exit codes follow Unix conventions (see sysexits.h).
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Core(_) => 1,
            CliError::Arguments(_) => 2, // EX_USAGE
            CliError::Io(_) => 74,       // EX_IOERR
            CliError::Config(_) => 78,   // EX_CONFIG
            CliError::Database(_) => 73, // EX_CANTCREAT (closest fit)
            CliError::Network(_) => 69,  // EX_UNAVAILABLE
        }
    }
}

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::StoreUnavailable(store_err) => CliError::Database(store_err.to_string()),
            CoreError::FetchFailed { id, reason } => CliError::Network(format!("{id}: {reason}")),
            CoreError::NotFavorite(id) => CliError::Arguments(format!("not a favorite: {id}")),
            CoreError::Validation(msg) => CliError::Arguments(msg),
            CoreError::Config(config_err) => CliError::Config(config_err.to_string()),
            CoreError::InvariantViolation(msg) => CliError::Core(msg),
        }
    }
}

impl From<FetchError> for CliError {
    fn from(err: FetchError) -> Self {
        match err {
            FetchError::InvalidUrl { .. } => CliError::Arguments(err.to_string()),
            _ => CliError::Network(err.to_string()),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        CliError::Io(err.to_string())
    }
}
