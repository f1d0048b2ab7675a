//! Toggle command handler.

use anyhow::Result;

use super::parse_id;
use crate::bootstrap::CliContext;
use crate::error::CliError;

/// Execute the toggle command.
pub async fn execute(ctx: &CliContext, url: &str) -> Result<()> {
    let id = parse_id(url)?;

    if ctx.core().toggle(&id).await.map_err(CliError::from)? {
        println!("Added {id} to favorites.");
    } else {
        println!("Removed {id} from favorites.");
    }
    Ok(())
}
