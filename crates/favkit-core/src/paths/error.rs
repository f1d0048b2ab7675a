//! Errors raised while locating the favkit data directory.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PathError {
    /// Neither `FAVKIT_DATA_DIR` nor a platform data directory is available.
    #[error("No data directory available; set FAVKIT_DATA_DIR")]
    NoDataDir,

    #[error("Could not create data directory {path}: {reason}")]
    CreateFailed { path: PathBuf, reason: String },

    /// The data root exists as a file.
    #[error("Data root {0} is not a directory")]
    NotADirectory(PathBuf),
}
