//! HTTP adapter for the favkit `RecordFetcher` port.
//!
//! [`DefaultRecordFetcher`] GETs a favorite's URL, unwraps the optional
//! `data` envelope and maps the JSON body onto a `favkit_core::Record`.
//! Anime-style bodies (`images.jpg.image_url`, `score`, `authors`,
//! `published`) and product-style bodies (`image`, `rating.rate`,
//! `description`) are both understood.

#![deny(unsafe_code)]
// Allow private types in public type alias - DefaultRecordFetcher is meant to
// be used through the RecordFetcher trait, not its internal generic structure
#![allow(private_interfaces)]

mod client;
mod config;
mod error;
mod http;
mod parsing;

// ============================================================================
// Public API
// ============================================================================

// Client
pub use client::{DefaultRecordFetcher, HttpRecordFetcher};

// Configuration
pub use config::{DEFAULT_BASE_URL, FetcherConfig};
