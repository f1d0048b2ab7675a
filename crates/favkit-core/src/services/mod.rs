//! Core services - the favorites engine's business logic layer.
//!
//! Services orchestrate between ports (trait interfaces) and domain types.
//! They never see a concrete store or fetcher.

mod favorite_set;
mod favorites_core;
mod hydration;
mod keyed_lock;
mod projector;

pub use favorite_set::FavoriteSetManager;
pub use favorites_core::{ActivationSummary, FavoritesCore};
pub use hydration::{HydrationCache, HydrationSnapshot};
pub use projector::{ViewRow, project, project_rows};
