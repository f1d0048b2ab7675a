//! Main CLI parser and top-level argument handling.

use clap::Parser;
use std::path::PathBuf;

use crate::commands::Commands;

/// Keep a list of favorite anime and products, resolved from their URLs.
#[derive(Parser)]
#[command(name = "favkit")]
#[command(about = "Manage favorites stored by URL")]
#[command(version)]
pub struct Cli {
    /// Database file to use instead of the default location
    #[arg(long = "db", env = "FAVKIT_DB", global = true)]
    pub db: Option<PathBuf>,

    /// Base URL for favorites that are not absolute URLs
    #[arg(long = "base-url", env = "FAVKIT_BASE_URL", global = true)]
    pub base_url: Option<String>,

    /// Move un-namespaced favorites written by older installs
    #[arg(long = "import-legacy", global = true)]
    pub import_legacy: bool,

    /// Enable verbose/debug output
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_parser_builds() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_global_args() {
        let cli = Cli::parse_from([
            "favkit",
            "--verbose",
            "--db",
            "/tmp/favkit.db",
            "list",
            "--search",
            "dragon",
        ]);
        assert!(cli.verbose);
        assert_eq!(cli.db, Some(PathBuf::from("/tmp/favkit.db")));
        assert!(matches!(
            cli.command,
            Some(Commands::List { search: Some(ref s) }) if s == "dragon"
        ));
    }

    #[test]
    fn test_clear_flags() {
        let cli = Cli::parse_from(["favkit", "clear", "--force"]);
        assert!(matches!(cli.command, Some(Commands::Clear { force: true })));
    }
}
