//! List command handler.
//!
//! Loads the favorites, waits for every record and prints them as a table.

use anyhow::Result;

use crate::bootstrap::CliContext;
use crate::error::CliError;
use crate::presentation::{format_optional, print_separator, status_label, truncate_string};

/// Execute the list command.
///
/// With `search`, only favorites whose title contains it (ignoring case) are
/// shown; favorites that failed to load never match a search.
pub async fn execute(ctx: &CliContext, search: Option<&str>) -> Result<()> {
    let summary = ctx.core().activate().await.map_err(CliError::from)?;

    if summary.favorites == 0 {
        println!("No favorites yet.");
        println!("Use 'favkit add <url>' to add your first favorite.");
        return Ok(());
    }

    if let Some(term) = search {
        ctx.core().set_search_term(term);
    }
    let rows = ctx.core().view();

    if rows.is_empty() {
        println!(
            "No favorites match '{}'.",
            search.unwrap_or_default()
        );
        return Ok(());
    }

    println!("{:<32} {:<7} {:<8} URL", "Title", "Score", "Status");
    print_separator(100);

    for row in &rows {
        let record = row.state.record();
        let title = record.map_or("--", |r| r.title.as_str());
        let score = format_optional(record.and_then(|r| r.score).map(|s| format!("{s:.2}")), "--");

        println!(
            "{:<32} {:<7} {:<8} {}",
            truncate_string(title, 31),
            score,
            status_label(&row.state),
            row.id
        );
        if let Some(reason) = row.state.failure() {
            println!("  ! {reason}");
        }
    }

    println!();
    println!("{} of {} favorite(s) shown.", rows.len(), summary.favorites);
    Ok(())
}
