//! SQLite persistence for favkit.
//!
//! Provides [`SqliteKeyValueStore`], the durable implementation of the
//! `favkit_core::KeyValueStore` port, and the pool setup used by entry points.

#![deny(unsafe_code)]

pub mod repositories;
pub mod setup;

// libsqlite3-sys is only here to bundle SQLite into the binary
use libsqlite3_sys as _;

pub use repositories::SqliteKeyValueStore;

// Re-export setup functions for convenient access
pub use setup::setup_database;
#[cfg(any(test, feature = "test-utils"))]
pub use setup::setup_test_database;
