//! Remote record fetcher port.

use async_trait::async_trait;

use super::FetchError;
use crate::domain::Record;

/// Resolves a favorite URL into its record.
///
/// Implementations perform exactly one attempt per call: no retries, no
/// authentication. De-duplication of concurrent requests is the hydration
/// cache's job, not the fetcher's.
#[async_trait]
pub trait RecordFetcher: Send + Sync {
    /// Fetch and parse the record behind `url`.
    async fn fetch(&self, url: &str) -> Result<Record, FetchError>;
}
