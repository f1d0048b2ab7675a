//! Command handlers that delegate to `FavoritesCore`.
//!
//! Handlers follow the canonical pattern:
//! - Signature: `pub async fn execute(ctx: &CliContext, ...) -> Result<()>`
//! - Thin wrappers that:
//!   1. Parse/validate CLI-specific input
//!   2. Call `FavoritesCore` methods
//!   3. Format output for the terminal
//!
//! Handlers should NOT touch the store or the fetcher's backend directly.

pub mod add;
pub mod clear;
pub mod list;
pub mod paths;
pub mod remove;
pub mod show;
pub mod status;
pub mod toggle;

use anyhow::Result;
use favkit_core::FavoriteId;

use crate::error::CliError;

/// Parse a user-supplied favorite URL.
pub(crate) fn parse_id(raw: &str) -> Result<FavoriteId> {
    Ok(FavoriteId::new(raw).map_err(CliError::from)?)
}
