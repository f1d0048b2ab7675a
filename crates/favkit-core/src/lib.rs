//! Core of the favkit favorites engine.
//!
//! Tracks a user's set of favorited resource URLs in a key-value store,
//! resolves each URL into a [`Record`] through a shared hydration cache and
//! projects the result into a searchable, ordered view.
//!
//! # Layout
//!
//! - [`domain`] - ids, records and hydration state
//! - [`ports`] - store, fetcher and event emitter traits plus their errors
//! - [`services`] - the favorite set manager, hydration cache, projector and
//!   the [`FavoritesCore`] facade
//! - [`config`], [`paths`], [`events`] - ambient configuration and
//!   notifications
//!
//! Adapters live in sibling crates: `favkit-db` (SQLite store) and
//! `favkit-http` (HTTP fetcher).

pub mod config;
pub mod domain;
pub mod events;
pub mod paths;
pub mod ports;
pub mod services;

#[cfg(test)]
mod testing;

// Re-export commonly used types for convenience
pub use config::{ConfigError, DEFAULT_KEY_PREFIX, DEFAULT_MARKER, FavoritesConfig};
pub use domain::{FavoriteId, FavoriteSet, HydrationEntry, HydrationState, Record};
pub use events::FavoritesEvent;
pub use ports::{
    BroadcastEmitter, CoreError, FavoritesEventEmitter, FetchError, KeyValueStore,
    MemoryKeyValueStore, NoopEmitter, RecordFetcher, StoreError,
};
pub use services::{
    ActivationSummary, FavoriteSetManager, FavoritesCore, HydrationCache, HydrationSnapshot,
    ViewRow, project, project_rows,
};

// Re-export path utilities
pub use paths::{DATA_DIR_ENV, DATABASE_FILE_NAME, PathError, data_root, database_path};
