//! Favorites engine facade.
//!
//! `FavoritesCore` is what a favorites screen talks to. It wires the favorite
//! set, the hydration cache and the search term together and reports every
//! change through the injected [`FavoritesEventEmitter`].

use std::sync::{Arc, PoisonError, RwLock};

use serde::Serialize;
use tracing::{debug, warn};

use super::favorite_set::FavoriteSetManager;
use super::hydration::HydrationCache;
use super::projector::{ViewRow, project, project_rows};
use crate::config::FavoritesConfig;
use crate::domain::{FavoriteId, FavoriteSet, HydrationState, Record};
use crate::events::FavoritesEvent;
use crate::ports::{CoreError, FavoritesEventEmitter, KeyValueStore, RecordFetcher};

/// Outcome of an [`activate`](FavoritesCore::activate) call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ActivationSummary {
    /// Favorites in the set after loading.
    pub favorites: usize,
    /// Favorites whose record is available.
    pub ready: usize,
    /// Favorites whose fetch failed.
    pub failed: usize,
    /// Legacy markers moved into the namespace.
    pub imported: usize,
}

/// Favorites engine facade.
pub struct FavoritesCore {
    favorites: FavoriteSetManager,
    hydration: HydrationCache,
    search_term: RwLock<String>,
    emitter: Arc<dyn FavoritesEventEmitter>,
}

impl FavoritesCore {
    /// Create an engine. Nothing is read until [`activate`](Self::activate).
    pub fn new(
        store: Arc<dyn KeyValueStore>,
        fetcher: Arc<dyn RecordFetcher>,
        emitter: Arc<dyn FavoritesEventEmitter>,
        config: FavoritesConfig,
    ) -> Result<Self, CoreError> {
        Ok(Self {
            favorites: FavoriteSetManager::new(store, config)?,
            hydration: HydrationCache::new(fetcher, Arc::clone(&emitter)),
            search_term: RwLock::new(String::new()),
            emitter,
        })
    }

    // ========== Lifecycle ==========

    /// Load the favorite set and hydrate every id in it.
    ///
    /// Run this when the favorites screen gains focus. Records already in the
    /// cache are reused; entries for ids that disappeared are evicted. On a
    /// store failure the view becomes empty and the error is returned.
    pub async fn activate(&self) -> Result<ActivationSummary, CoreError> {
        let mut summary = ActivationSummary::default();

        if self.favorites.config().import_legacy_markers {
            summary.imported = self
                .favorites
                .import_legacy_markers()
                .await
                .map_err(|e| self.fail_load(e))?;
            if summary.imported > 0 {
                self.emitter.emit(FavoritesEvent::LegacyMarkersImported {
                    count: summary.imported,
                });
            }
        }

        let set = self
            .favorites
            .load_with(|set| {
                self.hydration.retain(set);
                for id in set {
                    self.hydration.ensure(id);
                }
            })
            .await
            .map_err(|e| self.fail_load(e))?;
        summary.favorites = set.len();
        self.emitter
            .emit(FavoritesEvent::FavoritesLoaded { count: set.len() });

        for entry in self.hydration.settle_all(&set.to_vec()).await {
            match entry.state {
                HydrationState::Ready { .. } => summary.ready += 1,
                HydrationState::Failed { .. } => summary.failed += 1,
                HydrationState::Pending => {}
            }
        }

        debug!(
            favorites = summary.favorites,
            ready = summary.ready,
            failed = summary.failed,
            "Favorites activated"
        );
        Ok(summary)
    }

    fn fail_load(&self, error: CoreError) -> CoreError {
        warn!(error = %error, "Favorites unavailable");
        self.hydration.clear();
        self.emitter.emit(FavoritesEvent::LoadFailed {
            error: error.to_string(),
        });
        error
    }

    // ========== Mutations ==========

    /// Favorite `id` and start hydrating it.
    ///
    /// Returns `true` if `id` was not a favorite before.
    pub async fn add(&self, id: &FavoriteId) -> Result<bool, CoreError> {
        let added = self
            .favorites
            .add_with(id, |_| {
                self.hydration.ensure(id);
            })
            .await?;
        if added {
            self.emitter
                .emit(FavoritesEvent::FavoriteAdded { id: id.clone() });
        }
        Ok(added)
    }

    /// Unfavorite `id` and drop its record.
    ///
    /// Returns `true` if `id` was a favorite before.
    pub async fn remove(&self, id: &FavoriteId) -> Result<bool, CoreError> {
        let removed = self
            .favorites
            .remove_with(id, |_| {
                self.hydration.evict(id);
            })
            .await?;
        if removed {
            self.emitter
                .emit(FavoritesEvent::FavoriteRemoved { id: id.clone() });
        }
        Ok(removed)
    }

    /// Flip membership of `id`. Returns the new membership.
    pub async fn toggle(&self, id: &FavoriteId) -> Result<bool, CoreError> {
        let now_favorite = self
            .favorites
            .toggle_with(id, |now_favorite| {
                if now_favorite {
                    self.hydration.ensure(id);
                } else {
                    self.hydration.evict(id);
                }
            })
            .await?;
        if now_favorite {
            self.emitter
                .emit(FavoritesEvent::FavoriteAdded { id: id.clone() });
        } else {
            self.emitter
                .emit(FavoritesEvent::FavoriteRemoved { id: id.clone() });
        }
        Ok(now_favorite)
    }

    /// Remove every favorite. Returns how many were removed.
    ///
    /// Keys outside the favorites namespace are untouched.
    pub async fn clear(&self) -> Result<usize, CoreError> {
        let removed = self
            .favorites
            .clear_with(|remaining| {
                self.hydration.retain(remaining);
            })
            .await?;
        self.emitter.emit(FavoritesEvent::FavoritesCleared {
            count: removed.len(),
        });
        Ok(removed.len())
    }

    /// Re-fetch the record for `id`.
    ///
    /// Returns `false` if a fetch for it is already in flight.
    pub async fn refresh(&self, id: &FavoriteId) -> Result<bool, CoreError> {
        self.favorites
            .with_member(id, || self.hydration.refetch(id) || self.hydration.ensure(id))
            .await
            .ok_or_else(|| CoreError::NotFavorite(id.to_string()))
    }

    // ========== Queries ==========

    #[must_use]
    pub fn is_favorite(&self, id: &FavoriteId) -> bool {
        self.favorites.contains(id)
    }

    /// Membership according to the store rather than the loaded set.
    pub async fn is_favorite_durable(&self, id: &FavoriteId) -> Result<bool, CoreError> {
        self.favorites.is_favorite_durable(id).await
    }

    #[must_use]
    pub fn favorites(&self) -> FavoriteSet {
        self.favorites.current()
    }

    #[must_use]
    pub fn hydration_state(&self, id: &FavoriteId) -> Option<HydrationState> {
        self.hydration.state(id)
    }

    /// Wait for the record of a favorite.
    pub async fn record(&self, id: &FavoriteId) -> Result<Arc<Record>, CoreError> {
        let tracked = self
            .favorites
            .with_member(id, || {
                self.hydration.ensure(id);
            })
            .await;
        if tracked.is_none() {
            return Err(CoreError::NotFavorite(id.to_string()));
        }

        match self.hydration.settled(id).await {
            Some(HydrationState::Ready { record }) => Ok(record),
            Some(HydrationState::Failed { reason }) => Err(CoreError::FetchFailed {
                id: id.to_string(),
                reason,
            }),
            Some(HydrationState::Pending) => Err(CoreError::InvariantViolation(format!(
                "settled entry for {id} is still pending"
            ))),
            None => Err(CoreError::NotFavorite(id.to_string())),
        }
    }

    // ========== View ==========

    /// Replace the live search term.
    pub fn set_search_term(&self, term: impl Into<String>) {
        let term = term.into();
        {
            let mut current = self
                .search_term
                .write()
                .unwrap_or_else(PoisonError::into_inner);
            if *current == term {
                return;
            }
            current.clone_from(&term);
        }
        self.emitter.emit(FavoritesEvent::SearchTermChanged { term });
    }

    #[must_use]
    pub fn search_term(&self) -> String {
        self.search_term
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Ids to render for the current search term.
    #[must_use]
    pub fn rendered(&self) -> Vec<FavoriteId> {
        project(
            &self.favorites.current(),
            &self.hydration.snapshot(),
            &self.search_term(),
        )
    }

    /// Rows to render for the current search term.
    #[must_use]
    pub fn view(&self) -> Vec<ViewRow> {
        project_rows(
            &self.favorites.current(),
            &self.hydration.snapshot(),
            &self.search_term(),
        )
    }

    /// The hydration cache shared by this engine.
    #[must_use]
    pub const fn hydration(&self) -> &HydrationCache {
        &self.hydration
    }
}
