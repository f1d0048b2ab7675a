//! Change notifications emitted by the favorites engine.
//!
//! # Wire Format
//!
//! Events are serialized with a `type` tag so UI bridges can dispatch on it:
//!
//! ```json
//! { "type": "hydration_failed", "id": "https://api.jikan.moe/v4/anime/1", "reason": "..." }
//! ```

use serde::{Deserialize, Serialize};

use crate::domain::FavoriteId;

/// Everything the UI may want to re-render for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FavoritesEvent {
    // ========== Favorite Set Events ==========
    /// The favorite set was (re)loaded from the store.
    FavoritesLoaded {
        /// Number of favorites found.
        count: usize,
    },

    /// Loading failed; the displayed set is empty until the next activation.
    LoadFailed {
        /// Error description.
        error: String,
    },

    /// Un-namespaced markers from older installs were moved into the namespace.
    LegacyMarkersImported {
        /// Number of markers moved.
        count: usize,
    },

    /// An id joined the favorite set.
    FavoriteAdded { id: FavoriteId },

    /// An id left the favorite set.
    FavoriteRemoved { id: FavoriteId },

    /// All favorites were removed.
    FavoritesCleared {
        /// Number of favorites removed.
        count: usize,
    },

    // ========== Hydration Events ==========
    /// A fetch was issued for an id.
    HydrationStarted { id: FavoriteId },

    /// The record for an id is available.
    HydrationReady { id: FavoriteId },

    /// The fetch for an id failed.
    HydrationFailed {
        id: FavoriteId,
        /// Failure description.
        reason: String,
    },

    /// The hydration entry for an id was dropped.
    HydrationEvicted { id: FavoriteId },

    // ========== View Events ==========
    /// The live search term changed.
    SearchTermChanged { term: String },
}

impl FavoritesEvent {
    /// The favorite this event concerns, if it concerns a single one.
    #[must_use]
    pub const fn id(&self) -> Option<&FavoriteId> {
        match self {
            Self::FavoriteAdded { id }
            | Self::FavoriteRemoved { id }
            | Self::HydrationStarted { id }
            | Self::HydrationReady { id }
            | Self::HydrationFailed { id, .. }
            | Self::HydrationEvicted { id } => Some(id),
            _ => None,
        }
    }
}
