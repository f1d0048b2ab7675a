//! Durable key-value store port.
//!
//! This port mirrors the small surface mobile async-storage APIs offer:
//! string keys, opaque string values, bulk reads and a global clear. The
//! favorites engine never calls [`KeyValueStore::clear_all`]; it only owns
//! the keys under its own prefix.

use async_trait::async_trait;
use indexmap::IndexMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use super::StoreError;

/// Durable mapping from string key to string value.
///
/// # Design Rules
///
/// - `list_all_keys` returns keys in insertion order
/// - Overwriting an existing key keeps its position
/// - `remove` of an absent key is not an error
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Read a single value.
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Write a value, replacing any previous one.
    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Delete a key.
    async fn remove(&self, key: &str) -> Result<(), StoreError>;

    /// All keys currently stored, in insertion order.
    async fn list_all_keys(&self) -> Result<Vec<String>, StoreError>;

    /// Read several values at once. The result has one pair per requested key,
    /// in request order.
    async fn multi_get(&self, keys: &[String]) -> Result<Vec<(String, Option<String>)>, StoreError>;

    /// Delete every key in the store, including keys owned by other subsystems.
    async fn clear_all(&self) -> Result<(), StoreError>;
}

/// In-process store backed by an ordered map.
///
/// Suitable for tests and ephemeral sessions. Nothing survives the process.
#[derive(Debug, Default)]
pub struct MemoryKeyValueStore {
    entries: Mutex<IndexMap<String, String>>,
}

impl MemoryKeyValueStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with entries, in iteration order.
    pub fn with_entries<K, V>(entries: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            entries: Mutex::new(
                entries
                    .into_iter()
                    .map(|(k, v)| (k.into(), v.into()))
                    .collect(),
            ),
        }
    }

    /// Copy of the current contents, in insertion order.
    pub fn snapshot(&self) -> Vec<(String, String)> {
        self.lock()
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    fn lock(&self) -> MutexGuard<'_, IndexMap<String, String>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl KeyValueStore for MemoryKeyValueStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.lock().get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.lock().insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.lock().shift_remove(key);
        Ok(())
    }

    async fn list_all_keys(&self) -> Result<Vec<String>, StoreError> {
        Ok(self.lock().keys().cloned().collect())
    }

    async fn multi_get(&self, keys: &[String]) -> Result<Vec<(String, Option<String>)>, StoreError> {
        let entries = self.lock();
        Ok(keys
            .iter()
            .map(|key| (key.clone(), entries.get(key).cloned()))
            .collect())
    }

    async fn clear_all(&self) -> Result<(), StoreError> {
        self.lock().clear();
        Ok(())
    }
}
