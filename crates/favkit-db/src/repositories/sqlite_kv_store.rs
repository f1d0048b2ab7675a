//! `SQLite` implementation of the `KeyValueStore` trait.

use std::collections::HashMap;

use async_trait::async_trait;
use sqlx::{QueryBuilder, Row, Sqlite, SqlitePool};

use favkit_core::{KeyValueStore, StoreError};

/// Keys per `IN (...)` query, below SQLite's bound-parameter limit.
const MULTI_GET_CHUNK: usize = 500;

/// `SQLite` implementation of the `KeyValueStore` trait.
///
/// Keys are listed in insertion order (rowid). Overwriting a key keeps its
/// position.
pub struct SqliteKeyValueStore {
    pool: SqlitePool,
}

fn unavailable(e: sqlx::Error) -> StoreError {
    tracing::warn!(error = %e, "SQLite key-value store error");
    StoreError::Unavailable(e.to_string())
}

impl SqliteKeyValueStore {
    /// Create a new `SQLite` key-value store.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Ensure the `kv_store` table exists.
    pub async fn ensure_table(&self) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS kv_store (
                key TEXT PRIMARY KEY NOT NULL,
                value TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await
        .map_err(unavailable)?;

        Ok(())
    }
}

#[async_trait]
impl KeyValueStore for SqliteKeyValueStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let row = sqlx::query("SELECT value FROM kv_store WHERE key = ?")
            .bind(key)
            .fetch_optional(&self.pool)
            .await
            .map_err(unavailable)?;

        Ok(row.map(|r| r.get("value")))
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let updated_at = chrono::Utc::now().format("%Y-%m-%d %H:%M:%S").to_string();

        // Upsert instead of INSERT OR REPLACE so the row keeps its rowid
        sqlx::query(
            r#"
            INSERT INTO kv_store (key, value, updated_at) VALUES (?, ?, ?)
            ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at
            "#,
        )
        .bind(key)
        .bind(value)
        .bind(&updated_at)
        .execute(&self.pool)
        .await
        .map_err(unavailable)?;

        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), StoreError> {
        sqlx::query("DELETE FROM kv_store WHERE key = ?")
            .bind(key)
            .execute(&self.pool)
            .await
            .map_err(unavailable)?;

        Ok(())
    }

    async fn list_all_keys(&self) -> Result<Vec<String>, StoreError> {
        let rows = sqlx::query("SELECT key FROM kv_store ORDER BY rowid")
            .fetch_all(&self.pool)
            .await
            .map_err(unavailable)?;

        Ok(rows.iter().map(|r| r.get("key")).collect())
    }

    async fn multi_get(&self, keys: &[String]) -> Result<Vec<(String, Option<String>)>, StoreError> {
        let mut found: HashMap<String, String> = HashMap::with_capacity(keys.len());

        for chunk in keys.chunks(MULTI_GET_CHUNK) {
            let mut query: QueryBuilder<'_, Sqlite> =
                QueryBuilder::new("SELECT key, value FROM kv_store WHERE key IN (");
            let mut separated = query.separated(", ");
            for key in chunk {
                separated.push_bind(key.clone());
            }
            separated.push_unseparated(")");

            let rows = query
                .build()
                .fetch_all(&self.pool)
                .await
                .map_err(unavailable)?;
            found.extend(rows.iter().map(|r| (r.get("key"), r.get("value"))));
        }

        Ok(keys
            .iter()
            .map(|key| (key.clone(), found.get(key).cloned()))
            .collect())
    }

    async fn clear_all(&self) -> Result<(), StoreError> {
        sqlx::query("DELETE FROM kv_store")
            .execute(&self.pool)
            .await
            .map_err(unavailable)?;

        Ok(())
    }
}
