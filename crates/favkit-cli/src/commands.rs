//! Available subcommands.

use clap::Subcommand;

/// Available commands.
///
/// Favorites are identified by the URL their record is fetched from.
#[derive(Subcommand)]
pub enum Commands {
    /// List favorites, optionally filtered by title
    List {
        /// Only show favorites whose title contains this text
        #[arg(short, long)]
        search: Option<String>,
    },

    /// Add a favorite
    Add {
        /// URL of the record (or a path relative to --base-url)
        url: String,
    },

    /// Remove a favorite
    Remove {
        /// URL of the favorite to remove
        url: String,
    },

    /// Add the favorite if missing, remove it otherwise
    Toggle {
        /// URL of the favorite to toggle
        url: String,
    },

    /// Fetch and display a single record
    Show {
        /// URL of the record
        url: String,
    },

    /// Summarize favorites and their fetch status
    Status,

    /// Remove every favorite
    Clear {
        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },

    /// Show resolved paths for favkit data
    Paths,
}
