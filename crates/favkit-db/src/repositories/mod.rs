//! Store implementations backed by `SQLite`.

mod sqlite_kv_store;

pub use sqlite_kv_store::SqliteKeyValueStore;
