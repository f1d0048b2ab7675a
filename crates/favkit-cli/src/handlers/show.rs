//! Show command handler.
//!
//! Fetches one record directly, favorite or not, and prints it with its
//! favorite status.

use anyhow::Result;

use super::parse_id;
use crate::bootstrap::CliContext;
use crate::error::CliError;
use crate::presentation::display_record;

/// Execute the show command.
pub async fn execute(ctx: &CliContext, url: &str) -> Result<()> {
    let id = parse_id(url)?;
    let favorite = ctx
        .core()
        .is_favorite_durable(&id)
        .await
        .map_err(CliError::from)?;
    let record = ctx
        .fetcher()
        .fetch(id.as_str())
        .await
        .map_err(CliError::from)?;

    display_record(&record);
    println!();
    println!("Favorite:  {}", if favorite { "yes" } else { "no" });
    Ok(())
}
