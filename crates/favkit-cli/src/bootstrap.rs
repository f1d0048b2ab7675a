//! CLI bootstrap - the composition root.
//!
//! This module is the ONLY place where infrastructure is wired together
//! for the CLI adapter:
//! - Database pool and key-value store (via favkit-db)
//! - HTTP record fetcher (via favkit-http)
//! - The favorites engine (via favkit-core)
//!
//! Command handlers receive the composed `CliContext` and delegate to it.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use favkit_core::paths::database_path;
use favkit_core::{
    FavoritesConfig, FavoritesCore, KeyValueStore, NoopEmitter, RecordFetcher,
};
use favkit_db::{SqliteKeyValueStore, setup_database};
use favkit_http::{DefaultRecordFetcher, FetcherConfig};

use crate::error::CliError;
use crate::parser::Cli;

/// Bootstrap configuration for the CLI.
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    /// Database file. `None` uses the platform default.
    pub db_path: Option<PathBuf>,
    /// Base URL for relative favorite ids.
    pub base_url: Option<String>,
    /// Import un-namespaced favorites on activation.
    pub import_legacy: bool,
}

impl CliConfig {
    /// Take the global options from the parsed command line.
    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            db_path: cli.db.clone(),
            base_url: cli.base_url.clone(),
            import_legacy: cli.import_legacy,
        }
    }

    fn favorites_config(&self) -> FavoritesConfig {
        FavoritesConfig::new().with_legacy_import(self.import_legacy)
    }
}

/// Fully composed application context for CLI commands.
pub struct CliContext {
    /// The favorites engine.
    pub core: FavoritesCore,
    /// Fetcher used for one-off lookups that bypass the favorite set.
    pub fetcher: Arc<dyn RecordFetcher>,
}

impl CliContext {
    /// Access the favorites engine.
    pub fn core(&self) -> &FavoritesCore {
        &self.core
    }

    /// Access the record fetcher.
    pub fn fetcher(&self) -> &Arc<dyn RecordFetcher> {
        &self.fetcher
    }
}

/// Bootstrap the CLI application.
///
/// Opens the database, builds the HTTP fetcher and assembles the engine.
/// The CLI has no live subscribers, so events go to a `NoopEmitter`.
pub async fn bootstrap(config: CliConfig) -> Result<CliContext> {
    // 1. Create database pool with schema
    let db_path = match &config.db_path {
        Some(path) => path.clone(),
        None => database_path()?,
    };
    let pool = setup_database(&db_path).await?;
    let store: Arc<dyn KeyValueStore> = Arc::new(SqliteKeyValueStore::new(pool));

    // 2. Create the HTTP fetcher
    let fetcher_config = FetcherConfig::new().with_optional_base_url(config.base_url.clone());
    let fetcher: Arc<dyn RecordFetcher> =
        Arc::new(DefaultRecordFetcher::new(&fetcher_config).map_err(CliError::from)?);

    // 3. Assemble the engine
    bootstrap_with(store, fetcher, &config)
}

/// Bootstrap with a custom store and fetcher (for testing).
pub fn bootstrap_with(
    store: Arc<dyn KeyValueStore>,
    fetcher: Arc<dyn RecordFetcher>,
    config: &CliConfig,
) -> Result<CliContext> {
    let core = FavoritesCore::new(
        store,
        Arc::clone(&fetcher),
        Arc::new(NoopEmitter::new()),
        config.favorites_config(),
    )
    .map_err(CliError::from)?;

    Ok(CliContext { core, fetcher })
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use favkit_core::FavoriteId;

    #[test]
    fn test_config_from_cli() {
        let cli = Cli::parse_from([
            "favkit",
            "--db",
            "/tmp/favkit.db",
            "--base-url",
            "http://localhost:3000/",
            "--import-legacy",
            "status",
        ]);
        let config = CliConfig::from_cli(&cli);

        assert_eq!(config.db_path, Some(PathBuf::from("/tmp/favkit.db")));
        assert_eq!(config.base_url.as_deref(), Some("http://localhost:3000/"));
        assert!(config.import_legacy);
        assert!(config.favorites_config().import_legacy_markers);
    }

    #[tokio::test]
    async fn test_bootstrap_creates_database_file() {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("favkit.db");
        let config = CliConfig {
            db_path: Some(db_path.clone()),
            ..CliConfig::default()
        };

        let ctx = bootstrap(config).await.unwrap();
        assert!(db_path.exists());
        assert!(ctx.core().favorites().is_empty());
    }

    #[tokio::test]
    async fn test_bootstrap_rejects_invalid_base_url() {
        let dir = tempfile::tempdir().unwrap();
        let config = CliConfig {
            db_path: Some(dir.path().join("favkit.db")),
            base_url: Some("not a url".to_string()),
            import_legacy: false,
        };

        let err = bootstrap(config).await.err().unwrap();
        let cli_err = err.downcast_ref::<CliError>().unwrap();
        assert_eq!(cli_err.exit_code(), 2);
    }

    #[tokio::test]
    async fn test_favorites_persist_across_contexts() {
        let dir = tempfile::tempdir().unwrap();
        let config = CliConfig {
            db_path: Some(dir.path().join("favkit.db")),
            ..CliConfig::default()
        };
        let id = FavoriteId::new("https://api.jikan.moe/v4/anime/21").unwrap();

        let first = bootstrap(config.clone()).await.unwrap();
        first.core().add(&id).await.unwrap();
        drop(first);

        let second = bootstrap(config).await.unwrap();
        assert!(second.core().is_favorite_durable(&id).await.unwrap());
    }
}
