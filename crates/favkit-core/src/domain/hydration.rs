//! Per-id hydration state.

use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::{FavoriteId, Record};

/// Where a favorite is in its fetch lifecycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum HydrationState {
    /// A fetch has been issued and has not settled yet.
    Pending,
    /// The record was fetched successfully.
    Ready {
        /// The hydrated record.
        record: Arc<Record>,
    },
    /// The fetch failed. Not retried automatically.
    Failed {
        /// Human-readable failure description.
        reason: String,
    },
}

impl HydrationState {
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        matches!(self, Self::Pending)
    }

    #[must_use]
    pub const fn is_ready(&self) -> bool {
        matches!(self, Self::Ready { .. })
    }

    #[must_use]
    pub const fn is_failed(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }

    /// The record, if ready.
    #[must_use]
    pub fn record(&self) -> Option<&Arc<Record>> {
        match self {
            Self::Ready { record } => Some(record),
            _ => None,
        }
    }

    /// The failure reason, if failed.
    #[must_use]
    pub fn failure(&self) -> Option<&str> {
        match self {
            Self::Failed { reason } => Some(reason),
            _ => None,
        }
    }
}

/// A favorite id paired with its hydration state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HydrationEntry {
    pub id: FavoriteId,
    pub state: HydrationState,
}

impl HydrationEntry {
    pub const fn new(id: FavoriteId, state: HydrationState) -> Self {
        Self { id, state }
    }
}
