//! Remove command handler.

use anyhow::Result;

use super::parse_id;
use crate::bootstrap::CliContext;
use crate::error::CliError;

/// Execute the remove command.
pub async fn execute(ctx: &CliContext, url: &str) -> Result<()> {
    let id = parse_id(url)?;

    // The in-memory set starts empty, so ask the store
    if !ctx.core().is_favorite_durable(&id).await.map_err(CliError::from)? {
        println!("{id} is not a favorite.");
        println!("Use 'favkit list' to see your favorites.");
        return Ok(());
    }

    ctx.core().remove(&id).await.map_err(CliError::from)?;
    println!("Removed {id} from favorites.");
    Ok(())
}
