//! Hydration cache - resolves favorite ids into records.
//!
//! # Concurrency Model
//!
//! - One entry per id; an entry exists from the first `ensure` until `evict`.
//! - Fetches run on spawned tasks, so a caller that stops waiting never strands
//!   a Pending entry.
//! - Every fetch is tagged with a generation. A result only applies when the
//!   entry still exists, carries the same generation and is Pending. Anything
//!   else is a late arrival and is dropped.
//! - The entry map is behind a std mutex that is never held across an await.
//! - Waiters park on a per-entry `watch` channel that flips to `true` when the
//!   entry settles. Evicting drops the sender, which releases waiters.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use futures_util::future::join_all;
use tokio::sync::watch;
use tracing::{debug, error};

use crate::domain::{FavoriteId, FavoriteSet, HydrationEntry, HydrationState, Record};
use crate::events::FavoritesEvent;
use crate::ports::{FavoritesEventEmitter, FetchError, RecordFetcher};

/// Immutable copy of the cache contents at one point in time.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HydrationSnapshot {
    entries: HashMap<FavoriteId, HydrationState>,
}

impl HydrationSnapshot {
    /// State of `id`, if the cache tracks it.
    #[must_use]
    pub fn get(&self, id: &FavoriteId) -> Option<&HydrationState> {
        self.entries.get(id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&FavoriteId, &HydrationState)> {
        self.entries.iter()
    }
}

impl FromIterator<(FavoriteId, HydrationState)> for HydrationSnapshot {
    fn from_iter<I: IntoIterator<Item = (FavoriteId, HydrationState)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

/// Cache entry for one id.
struct Slot {
    /// Generation of the fetch that may settle this slot.
    generation: u64,
    state: HydrationState,
    /// Flips to `true` when `state` leaves Pending.
    settled: watch::Sender<bool>,
}

impl Slot {
    fn pending(generation: u64) -> Self {
        let (settled, _) = watch::channel(false);
        Self {
            generation,
            state: HydrationState::Pending,
            settled,
        }
    }
}

struct Inner {
    fetcher: Arc<dyn RecordFetcher>,
    emitter: Arc<dyn FavoritesEventEmitter>,
    slots: Mutex<HashMap<FavoriteId, Slot>>,
    next_generation: AtomicU64,
}

impl Inner {
    fn lock_slots(&self) -> MutexGuard<'_, HashMap<FavoriteId, Slot>> {
        self.slots.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn next_generation(&self) -> u64 {
        self.next_generation.fetch_add(1, Ordering::Relaxed)
    }

    /// Apply a fetch result if it is still wanted.
    fn complete(&self, id: &FavoriteId, generation: u64, outcome: Result<Record, FetchError>) {
        let event = {
            let mut slots = self.lock_slots();
            let Some(slot) = slots.get_mut(id) else {
                debug!(id = %id, generation, "Discarding result for evicted favorite");
                return;
            };
            if slot.generation != generation {
                debug!(
                    id = %id,
                    generation,
                    current = slot.generation,
                    "Discarding superseded result"
                );
                return;
            }
            if !slot.state.is_pending() {
                error!(
                    id = %id,
                    generation,
                    "Invariant violation: fetch settled an entry that was already settled"
                );
                return;
            }

            let event = match outcome {
                Ok(record) => {
                    slot.state = HydrationState::Ready {
                        record: Arc::new(record),
                    };
                    FavoritesEvent::HydrationReady { id: id.clone() }
                }
                Err(e) => {
                    let reason = e.to_string();
                    debug!(id = %id, reason = %reason, "Hydration failed");
                    slot.state = HydrationState::Failed {
                        reason: reason.clone(),
                    };
                    FavoritesEvent::HydrationFailed {
                        id: id.clone(),
                        reason,
                    }
                }
            };
            slot.settled.send_replace(true);
            event
        };

        self.emitter.emit(event);
    }
}

/// Shared cache of hydrated records, keyed by favorite id.
///
/// Cloning is cheap; clones share the same entries.
#[derive(Clone)]
pub struct HydrationCache {
    inner: Arc<Inner>,
}

impl HydrationCache {
    /// Create an empty cache.
    pub fn new(fetcher: Arc<dyn RecordFetcher>, emitter: Arc<dyn FavoritesEventEmitter>) -> Self {
        Self {
            inner: Arc::new(Inner {
                fetcher,
                emitter,
                slots: Mutex::new(HashMap::new()),
                next_generation: AtomicU64::new(0),
            }),
        }
    }

    /// Start hydrating `id` unless the cache already tracks it.
    ///
    /// Returns `true` if a fetch was issued. Must be called from within a
    /// Tokio runtime.
    pub fn ensure(&self, id: &FavoriteId) -> bool {
        let generation = {
            let mut slots = self.inner.lock_slots();
            if slots.contains_key(id) {
                return false;
            }
            let generation = self.inner.next_generation();
            slots.insert(id.clone(), Slot::pending(generation));
            generation
        };

        self.spawn_fetch(id.clone(), generation);
        true
    }

    /// Ensure every id, then wait until all of them have settled.
    ///
    /// Returns the settled entries in input order. Ids evicted while waiting
    /// are left out.
    pub async fn bulk_ensure<'a, I>(&self, ids: I) -> Vec<HydrationEntry>
    where
        I: IntoIterator<Item = &'a FavoriteId>,
    {
        let ids: Vec<FavoriteId> = ids.into_iter().cloned().collect();
        for id in &ids {
            self.ensure(id);
        }
        self.settle_all(&ids).await
    }

    /// Wait for every tracked id in `ids` to settle, without issuing fetches.
    ///
    /// Returns the settled entries in input order. Untracked or evicted ids
    /// are left out.
    pub async fn settle_all(&self, ids: &[FavoriteId]) -> Vec<HydrationEntry> {
        let states = join_all(ids.iter().map(|id| self.settled(id))).await;
        ids.iter()
            .zip(states)
            .filter_map(|(id, state)| state.map(|state| HydrationEntry::new(id.clone(), state)))
            .collect()
    }

    /// Re-fetch a settled entry, replacing its record when the fetch settles.
    ///
    /// Pending entries are left alone. Returns `false` if nothing was issued.
    pub fn refetch(&self, id: &FavoriteId) -> bool {
        let generation = {
            let mut slots = self.inner.lock_slots();
            let Some(slot) = slots.get_mut(id) else {
                return false;
            };
            if slot.state.is_pending() {
                return false;
            }
            slot.generation = self.inner.next_generation();
            slot.state = HydrationState::Pending;
            slot.settled.send_replace(false);
            slot.generation
        };

        self.spawn_fetch(id.clone(), generation);
        true
    }

    /// Drop the entry for `id`. Any in-flight result for it will be discarded.
    ///
    /// Returns `true` if an entry was removed.
    pub fn evict(&self, id: &FavoriteId) -> bool {
        let removed = self.inner.lock_slots().remove(id).is_some();
        if removed {
            debug!(id = %id, "Evicted hydration entry");
            self.inner
                .emitter
                .emit(FavoritesEvent::HydrationEvicted { id: id.clone() });
        }
        removed
    }

    /// Evict every entry whose id is not in `keep`. Returns the evicted ids.
    pub fn retain(&self, keep: &FavoriteSet) -> Vec<FavoriteId> {
        let stale: Vec<FavoriteId> = self
            .inner
            .lock_slots()
            .keys()
            .filter(|id| !keep.contains(id))
            .cloned()
            .collect();

        stale.into_iter().filter(|id| self.evict(id)).collect()
    }

    /// Evict everything.
    pub fn clear(&self) -> usize {
        self.retain(&FavoriteSet::new()).len()
    }

    /// Wait until `id` has settled and return its state.
    ///
    /// Returns `None` if the id is not tracked or is evicted while waiting.
    pub async fn settled(&self, id: &FavoriteId) -> Option<HydrationState> {
        loop {
            let mut settled = {
                let slots = self.inner.lock_slots();
                let slot = slots.get(id)?;
                if !slot.state.is_pending() {
                    return Some(slot.state.clone());
                }
                slot.settled.subscribe()
            };

            // Err means the sender was dropped: the entry was evicted
            if settled.wait_for(|done| *done).await.is_err() {
                return None;
            }

            match self.state(id) {
                Some(state) if state.is_pending() => {}
                other => return other,
            }
        }
    }

    /// Current state of `id`.
    #[must_use]
    pub fn state(&self, id: &FavoriteId) -> Option<HydrationState> {
        self.inner
            .lock_slots()
            .get(id)
            .map(|slot| slot.state.clone())
    }

    /// Copy of every entry.
    #[must_use]
    pub fn snapshot(&self) -> HydrationSnapshot {
        self.inner
            .lock_slots()
            .iter()
            .map(|(id, slot)| (id.clone(), slot.state.clone()))
            .collect()
    }

    #[must_use]
    pub fn contains(&self, id: &FavoriteId) -> bool {
        self.inner.lock_slots().contains_key(id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.lock_slots().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.lock_slots().is_empty()
    }

    fn spawn_fetch(&self, id: FavoriteId, generation: u64) {
        debug!(id = %id, generation, "Hydration started");
        self.inner
            .emitter
            .emit(FavoritesEvent::HydrationStarted { id: id.clone() });

        let inner = Arc::clone(&self.inner);
        tokio::spawn(async move {
            let outcome = inner.fetcher.fetch(id.as_str()).await;
            inner.complete(&id, generation, outcome);
        });
    }
}
