//! Add command handler.

use anyhow::Result;

use super::parse_id;
use crate::bootstrap::CliContext;
use crate::error::CliError;

/// Execute the add command.
///
/// Stores the favorite, then waits for its record so the user sees what
/// was added. A failed fetch is reported but keeps the favorite.
pub async fn execute(ctx: &CliContext, url: &str) -> Result<()> {
    let id = parse_id(url)?;
    let added = ctx.core().add(&id).await.map_err(CliError::from)?;

    match ctx.core().record(&id).await {
        Ok(record) if added => println!("Added '{}' to favorites.", record.title),
        Ok(record) => println!("'{}' is already a favorite.", record.title),
        Err(e) => {
            println!("Added {id} to favorites.");
            println!("Warning: could not load its record: {e}");
        }
    }
    Ok(())
}
