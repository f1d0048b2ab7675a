//! Clear command handler.
//!
//! Removes every favorite. Other data in the same database is untouched.

use anyhow::Result;

use crate::bootstrap::CliContext;
use crate::error::CliError;
use crate::utils::input;

/// Execute the clear command, asking first unless `force` is set.
pub async fn execute(ctx: &CliContext, force: bool) -> Result<()> {
    if !force {
        let confirm = input::prompt_confirmation("Remove all favorites?")?;
        if !confirm {
            println!("Clear operation cancelled.");
            return Ok(());
        }
    }

    let removed = ctx.core().clear().await.map_err(CliError::from)?;
    println!("Removed {removed} favorite(s).");
    Ok(())
}
