//! HTTP implementation of the `RecordFetcher` port.

use async_trait::async_trait;
use favkit_core::{FetchError, Record, RecordFetcher};
use serde_json::Value;
use tracing::debug;
use url::Url;

use crate::config::FetcherConfig;
use crate::error::{HttpError, HttpResult};
use crate::http::{HttpBackend, ReqwestBackend};
use crate::parsing::parse_record;

// ============================================================================
// Type Aliases
// ============================================================================

/// Record fetcher using the reqwest HTTP backend.
pub type DefaultRecordFetcher = HttpRecordFetcher<ReqwestBackend>;

// ============================================================================
// Client
// ============================================================================

/// Fetches favorite records over HTTP.
///
/// Generic over the HTTP backend so tests can substitute a fake. Use
/// [`DefaultRecordFetcher`] in production code.
pub struct HttpRecordFetcher<B: HttpBackend> {
    backend: B,
    base_url: Option<Url>,
}

impl DefaultRecordFetcher {
    /// Create a fetcher with the given configuration.
    ///
    /// Fails if the base URL does not parse or the HTTP client cannot be
    /// built.
    pub fn new(config: &FetcherConfig) -> Result<Self, FetchError> {
        let base_url = parse_base_url(config)?;
        let backend = ReqwestBackend::new(config).map_err(|e| FetchError::Network {
            url: config.base_url.clone().unwrap_or_default(),
            message: e.to_string(),
        })?;
        Ok(Self { backend, base_url })
    }
}

fn parse_base_url(config: &FetcherConfig) -> Result<Option<Url>, FetchError> {
    config
        .base_url
        .as_deref()
        .map(|raw| Url::parse(raw).map_err(|e| HttpError::from(e).into_fetch_error(raw)))
        .transpose()
}

impl<B: HttpBackend> HttpRecordFetcher<B> {
    /// Create a fetcher with a custom backend.
    #[cfg(test)]
    pub(crate) const fn with_backend(backend: B, base_url: Option<Url>) -> Self {
        Self { backend, base_url }
    }

    /// Turn a favorite id into the URL to request.
    ///
    /// Absolute `http(s)` ids are used as-is; anything else is joined onto
    /// the base URL.
    fn resolve(&self, id: &str) -> HttpResult<Url> {
        match Url::parse(id) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => Ok(url),
            Ok(_) | Err(url::ParseError::RelativeUrlWithoutBase) => {
                let base = self.base_url.as_ref().ok_or_else(|| HttpError::RelativeId {
                    id: id.to_string(),
                })?;
                Ok(base.join(id)?)
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn fetch_record(&self, id: &str) -> HttpResult<Record> {
        let url = self.resolve(id)?;
        debug!(url = %url, "Fetching record");
        let body: Value = self.backend.get_json(&url).await?;
        parse_record(&body)
    }
}

#[async_trait]
impl<B: HttpBackend> RecordFetcher for HttpRecordFetcher<B> {
    async fn fetch(&self, url: &str) -> Result<Record, FetchError> {
        self.fetch_record(url)
            .await
            .map_err(|e| e.into_fetch_error(url))
    }
}
