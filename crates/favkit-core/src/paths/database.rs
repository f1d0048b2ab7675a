//! Database path resolution.

use std::path::{Path, PathBuf};

use super::error::PathError;
use super::platform::{data_root, ensure_dir};

/// File name of the key-value database.
pub const DATABASE_FILE_NAME: &str = "favkit.db";

/// Get the path to the favkit database file inside the data root.
pub fn database_path() -> Result<PathBuf, PathError> {
    database_path_in(&data_root()?)
}

/// Get the path to the database file inside an explicit root.
///
/// The root is created if it doesn't exist.
pub fn database_path_in(root: &Path) -> Result<PathBuf, PathError> {
    Ok(ensure_dir(root.to_path_buf())?.join(DATABASE_FILE_NAME))
}
