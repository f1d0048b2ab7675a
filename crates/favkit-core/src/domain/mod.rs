//! Core domain types.
//!
//! These types represent the pure favorites model, independent of any
//! infrastructure concerns (key-value store, HTTP, etc.).
//!
//! # Structure
//!
//! - `favorite` - Favorite identifiers and the ordered favorite set
//! - `record` - Hydrated remote records
//! - `hydration` - Per-id hydration state

mod favorite;
mod hydration;
mod record;

pub use favorite::{FavoriteId, FavoriteSet};
pub use hydration::{HydrationEntry, HydrationState};
pub use record::Record;
