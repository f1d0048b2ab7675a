//! Platform-specific data root resolution.

use std::env;
use std::fs;
use std::path::PathBuf;

use super::error::PathError;

/// Environment variable overriding the data root.
pub const DATA_DIR_ENV: &str = "FAVKIT_DATA_DIR";

/// Get the root directory for application data.
///
/// Resolution order:
/// 1. `FAVKIT_DATA_DIR` environment variable (highest priority)
/// 2. System data directory (e.g., `~/.local/share/favkit`)
///
/// The directory is created if it does not exist.
pub fn data_root() -> Result<PathBuf, PathError> {
    let root = match env::var(DATA_DIR_ENV) {
        Ok(path) if !path.trim().is_empty() => PathBuf::from(path),
        _ => dirs::data_local_dir()
            .ok_or(PathError::NoDataDir)?
            .join("favkit"),
    };

    ensure_dir(root)
}

pub(super) fn ensure_dir(path: PathBuf) -> Result<PathBuf, PathError> {
    if path.exists() {
        if !path.is_dir() {
            return Err(PathError::NotADirectory(path));
        }
        return Ok(path);
    }

    fs::create_dir_all(&path).map_err(|e| PathError::CreateFailed {
        path: path.clone(),
        reason: e.to_string(),
    })?;
    Ok(path)
}
