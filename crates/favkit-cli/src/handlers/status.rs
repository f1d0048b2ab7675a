//! Status command handler.

use anyhow::Result;

use crate::bootstrap::CliContext;
use crate::error::CliError;

/// Execute the status command.
///
/// Loads and hydrates every favorite, then prints the counts.
pub async fn execute(ctx: &CliContext) -> Result<()> {
    let summary = ctx.core().activate().await.map_err(CliError::from)?;

    if summary.imported > 0 {
        println!("Imported:  {}", summary.imported);
    }
    println!("Favorites: {}", summary.favorites);
    println!("Ready:     {}", summary.ready);
    println!("Failed:    {}", summary.failed);
    Ok(())
}
