//! Favorite set manager - owns the durable set of favorited ids.
//!
//! # Consistency Model
//!
//! - Every mutation is written through to the store and awaited before the
//!   in-memory set changes. A failed write leaves the in-memory set untouched.
//! - Mutations on the same id serialize through a per-id lock, so an `add`
//!   can never land after a `remove` that was issued later.
//! - `load`, `clear` and the legacy import take the gate exclusively; single-id
//!   mutations take it shared. A reload therefore never interleaves with a
//!   toggle in flight.
//! - Only keys under the configured prefix belong to this manager.
//! - The `*_with` variants run a commit hook after the in-memory set changes
//!   and before the locks are released. Anything the hook does is ordered
//!   with the mutation itself.
//!
//! Lock order: gate → id lock (consistent everywhere).

use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use tokio::sync::RwLock as AsyncRwLock;
use tracing::{debug, warn};

use super::keyed_lock::KeyedLocks;
use crate::config::FavoritesConfig;
use crate::domain::{FavoriteId, FavoriteSet};
use crate::ports::{CoreError, KeyValueStore, StoreError};

/// Owns the set of favorited ids, backed by a [`KeyValueStore`].
pub struct FavoriteSetManager {
    store: Arc<dyn KeyValueStore>,
    config: FavoritesConfig,
    favorites: RwLock<FavoriteSet>,
    id_locks: KeyedLocks,
    gate: AsyncRwLock<()>,
}

impl FavoriteSetManager {
    /// Create a manager with an empty in-memory set.
    ///
    /// Call [`load`](Self::load) to read the durable set.
    pub fn new(store: Arc<dyn KeyValueStore>, config: FavoritesConfig) -> Result<Self, CoreError> {
        config.validate()?;
        Ok(Self {
            store,
            config,
            favorites: RwLock::new(FavoriteSet::new()),
            id_locks: KeyedLocks::new(),
            gate: AsyncRwLock::new(()),
        })
    }

    /// Read every namespaced key holding the marker.
    ///
    /// On failure the in-memory set degrades to empty and the error is
    /// returned so the caller can show an error indicator.
    pub async fn load(&self) -> Result<FavoriteSet, CoreError> {
        self.load_with(|_| {}).await
    }

    /// [`load`](Self::load), then `on_commit` with the set now in memory.
    ///
    /// The hook also runs on failure, with the empty set.
    pub async fn load_with<F>(&self, on_commit: F) -> Result<FavoriteSet, CoreError>
    where
        F: FnOnce(&FavoriteSet),
    {
        let _gate = self.gate.write().await;

        match self.read_durable_set().await {
            Ok(set) => {
                debug!(count = set.len(), "Loaded favorites");
                self.write_set().clone_from(&set);
                self.id_locks.prune();
                on_commit(&set);
                Ok(set)
            }
            Err(e) => {
                warn!(error = %e, "Failed to load favorites, showing none");
                self.write_set().clear();
                on_commit(&FavoriteSet::new());
                Err(e.into())
            }
        }
    }

    /// Mark `id` as a favorite.
    ///
    /// Returns `true` if the id was not in the in-memory set before.
    pub async fn add(&self, id: &FavoriteId) -> Result<bool, CoreError> {
        self.add_with(id, |_| {}).await
    }

    /// [`add`](Self::add), running `on_commit` once the marker is stored.
    pub async fn add_with<F>(&self, id: &FavoriteId, on_commit: F) -> Result<bool, CoreError>
    where
        F: FnOnce(bool),
    {
        let _gate = self.gate.read().await;
        let _guard = self.id_locks.lock(id.as_str()).await;

        self.write_marker(id).await?;
        let added = self.write_set().insert(id.clone());
        debug!(id = %id, added, "Favorite stored");
        on_commit(added);
        Ok(added)
    }

    /// Unmark `id`.
    ///
    /// Returns `true` if the id was in the in-memory set before.
    pub async fn remove(&self, id: &FavoriteId) -> Result<bool, CoreError> {
        self.remove_with(id, |_| {}).await
    }

    /// [`remove`](Self::remove), running `on_commit` once the marker is gone.
    pub async fn remove_with<F>(&self, id: &FavoriteId, on_commit: F) -> Result<bool, CoreError>
    where
        F: FnOnce(bool),
    {
        let _gate = self.gate.read().await;
        let _guard = self.id_locks.lock(id.as_str()).await;

        self.delete_marker(id).await?;
        let removed = self.write_set().remove(id);
        debug!(id = %id, removed, "Favorite deleted");
        on_commit(removed);
        Ok(removed)
    }

    /// Flip membership of `id` based on the durable state.
    ///
    /// Returns the new membership.
    pub async fn toggle(&self, id: &FavoriteId) -> Result<bool, CoreError> {
        self.toggle_with(id, |_| {}).await
    }

    /// [`toggle`](Self::toggle), running `on_commit` with the new membership.
    pub async fn toggle_with<F>(&self, id: &FavoriteId, on_commit: F) -> Result<bool, CoreError>
    where
        F: FnOnce(bool),
    {
        let _gate = self.gate.read().await;
        let _guard = self.id_locks.lock(id.as_str()).await;

        let now_favorite = if self.read_marker(id).await? {
            self.delete_marker(id).await?;
            self.write_set().remove(id);
            false
        } else {
            self.write_marker(id).await?;
            self.write_set().insert(id.clone());
            true
        };
        on_commit(now_favorite);
        Ok(now_favorite)
    }

    /// Run `f` if `id` is a favorite, with no mutation on `id` in between.
    pub async fn with_member<F, R>(&self, id: &FavoriteId, f: F) -> Option<R>
    where
        F: FnOnce() -> R,
    {
        let _gate = self.gate.read().await;
        let _guard = self.id_locks.lock(id.as_str()).await;

        self.contains(id).then(f)
    }

    /// Delete every key this manager owns.
    ///
    /// Keys outside the namespace are left alone. Returns the ids that were
    /// removed. If the store fails part-way, the ids already deleted are
    /// removed from the in-memory set and the error is returned.
    pub async fn clear(&self) -> Result<Vec<FavoriteId>, CoreError> {
        self.clear_with(|_| {}).await
    }

    /// [`clear`](Self::clear), then `on_commit` with whatever is left in
    /// memory. The hook runs on failure too.
    pub async fn clear_with<F>(&self, on_commit: F) -> Result<Vec<FavoriteId>, CoreError>
    where
        F: FnOnce(&FavoriteSet),
    {
        let _gate = self.gate.write().await;

        let keys = match self.namespaced_keys().await {
            Ok(keys) => keys,
            Err(e) => {
                on_commit(&self.current());
                return Err(e.into());
            }
        };
        let mut removed = Vec::with_capacity(keys.len());

        for key in keys {
            if let Err(e) = self.store.remove(&key).await {
                warn!(key = %key, error = %e, "Clear stopped part-way");
                {
                    let mut set = self.write_set();
                    for id in &removed {
                        set.remove(id);
                    }
                }
                on_commit(&self.current());
                return Err(e.into());
            }
            if let Some(id) = self.id_from_key(&key) {
                removed.push(id);
            }
        }

        self.write_set().clear();
        self.id_locks.prune();
        debug!(count = removed.len(), "Favorites cleared");
        on_commit(&FavoriteSet::new());
        Ok(removed)
    }

    /// Move un-namespaced `<url> = <marker>` entries into the namespace.
    ///
    /// Only keys that look like `http(s)` URLs are considered, so unrelated
    /// settings that happen to hold the marker value are never touched.
    /// Returns the number of entries moved.
    pub async fn import_legacy_markers(&self) -> Result<usize, CoreError> {
        let _gate = self.gate.write().await;

        let candidates: Vec<String> = self
            .store
            .list_all_keys()
            .await?
            .into_iter()
            .filter(|key| !key.starts_with(&self.config.key_prefix))
            .filter(|key| FavoriteId::new(key).is_ok_and(|id| id.looks_like_url()))
            .collect();
        if candidates.is_empty() {
            return Ok(0);
        }

        let mut imported = 0;
        for (key, value) in self.store.multi_get(&candidates).await? {
            if value.as_deref() != Some(self.config.marker.as_str()) {
                continue;
            }
            let Ok(id) = FavoriteId::new(&key) else {
                continue;
            };

            self.write_marker(&id).await?;
            self.store.remove(&key).await?;
            self.write_set().insert(id);
            imported += 1;
        }

        if imported > 0 {
            debug!(count = imported, "Imported legacy favorite markers");
        }
        Ok(imported)
    }

    /// In-memory membership check.
    pub fn contains(&self, id: &FavoriteId) -> bool {
        self.read_set().contains(id)
    }

    /// Membership check against the store, bypassing the in-memory set.
    pub async fn is_favorite_durable(&self, id: &FavoriteId) -> Result<bool, CoreError> {
        Ok(self.read_marker(id).await?)
    }

    /// Snapshot of the in-memory set.
    pub fn current(&self) -> FavoriteSet {
        self.read_set().clone()
    }

    /// The configuration this manager was built with.
    pub const fn config(&self) -> &FavoritesConfig {
        &self.config
    }

    fn store_key(&self, id: &FavoriteId) -> String {
        format!("{}{}", self.config.key_prefix, id)
    }

    fn id_from_key(&self, key: &str) -> Option<FavoriteId> {
        key.strip_prefix(&self.config.key_prefix)
            .and_then(|raw| FavoriteId::new(raw).ok())
    }

    async fn read_marker(&self, id: &FavoriteId) -> Result<bool, StoreError> {
        let value = self.store.get(&self.store_key(id)).await?;
        Ok(value.as_deref() == Some(self.config.marker.as_str()))
    }

    async fn write_marker(&self, id: &FavoriteId) -> Result<(), StoreError> {
        self.store
            .set(&self.store_key(id), &self.config.marker)
            .await
            .inspect_err(|e| warn!(id = %id, error = %e, "Failed to store favorite"))
    }

    async fn delete_marker(&self, id: &FavoriteId) -> Result<(), StoreError> {
        self.store
            .remove(&self.store_key(id))
            .await
            .inspect_err(|e| warn!(id = %id, error = %e, "Failed to delete favorite"))
    }

    async fn namespaced_keys(&self) -> Result<Vec<String>, StoreError> {
        Ok(self
            .store
            .list_all_keys()
            .await?
            .into_iter()
            .filter(|key| key.starts_with(&self.config.key_prefix))
            .collect())
    }

    async fn read_durable_set(&self) -> Result<FavoriteSet, StoreError> {
        let keys = self.namespaced_keys().await?;
        if keys.is_empty() {
            return Ok(FavoriteSet::new());
        }

        Ok(self
            .store
            .multi_get(&keys)
            .await?
            .into_iter()
            .filter(|(_, value)| value.as_deref() == Some(self.config.marker.as_str()))
            .filter_map(|(key, _)| self.id_from_key(&key))
            .collect())
    }

    fn read_set(&self) -> RwLockReadGuard<'_, FavoriteSet> {
        self.favorites.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_set(&self) -> RwLockWriteGuard<'_, FavoriteSet> {
        self.favorites.write().unwrap_or_else(PoisonError::into_inner)
    }
}
