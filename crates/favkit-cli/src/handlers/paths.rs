//! Paths command handler.
//!
//! Displays resolved paths for diagnostics.

use std::path::Path;

use anyhow::Result;
use favkit_core::paths::{DATA_DIR_ENV, data_root, database_path};

/// Execute the paths command.
///
/// `db_override` is the `--db` value, which wins over the default location.
pub fn execute(db_override: Option<&Path>) -> Result<()> {
    let data_dir = data_root()?;
    let db = match db_override {
        Some(path) => path.to_path_buf(),
        None => database_path()?,
    };

    println!("data_dir = {}", data_dir.display());
    println!("database = {}", db.display());
    println!(
        "{DATA_DIR_ENV} = {}",
        std::env::var(DATA_DIR_ENV).unwrap_or_else(|_| "(unset)".to_string())
    );
    Ok(())
}
