//! HTTP backend abstraction.
//!
//! A trait-based backend keeps the fetcher testable. The production
//! implementation uses reqwest and makes exactly one attempt per request.

use crate::config::FetcherConfig;
use crate::error::{HttpError, HttpResult};
use async_trait::async_trait;
use serde_json::Value;
use url::Url;

// ============================================================================
// HTTP Backend Trait
// ============================================================================

/// Source of raw JSON documents, one GET per call.
///
/// Internal to this crate; callers go through `RecordFetcher`.
#[async_trait]
pub trait HttpBackend: Send + Sync {
    /// GET `url` and return the body as untyped JSON.
    async fn get_json(&self, url: &Url) -> HttpResult<Value>;
}

// ============================================================================
// Reqwest Backend
// ============================================================================

/// Production HTTP backend using reqwest.
pub struct ReqwestBackend {
    client: reqwest::Client,
}

impl ReqwestBackend {
    /// Create a new reqwest backend with the given configuration.
    pub fn new(config: &FetcherConfig) -> HttpResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.clone())
            .build()?;

        Ok(Self { client })
    }
}

#[async_trait]
impl HttpBackend for ReqwestBackend {
    async fn get_json(&self, url: &Url) -> HttpResult<Value> {
        let response = self.client.get(url.clone()).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(HttpError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        Ok(response.json::<Value>().await?)
    }
}

// ============================================================================
// Fake Backend for Testing
// ============================================================================
