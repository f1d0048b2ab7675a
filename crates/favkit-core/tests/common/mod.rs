//! Shared fakes for the favkit-core integration tests.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use favkit_core::{
    FavoriteId, FavoritesConfig, FavoritesCore, FetchError, KeyValueStore, MemoryKeyValueStore,
    NoopEmitter, Record, RecordFetcher,
};
use tokio::sync::Semaphore;

/// Fetcher that serves titles from a fixed catalogue.
///
/// Unknown URLs fail with a 404. When built with [`CatalogueFetcher::gated`],
/// every fetch waits for a permit from [`CatalogueFetcher::open`].
#[derive(Default)]
pub struct CatalogueFetcher {
    titles: Mutex<HashMap<String, String>>,
    fetches: AtomicUsize,
    gate: Option<Semaphore>,
}

impl CatalogueFetcher {
    pub fn new<'a>(entries: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        Self {
            titles: Mutex::new(
                entries
                    .into_iter()
                    .map(|(url, title)| (url.to_string(), title.to_string()))
                    .collect(),
            ),
            ..Self::default()
        }
    }

    pub fn gated(mut self) -> Self {
        self.gate = Some(Semaphore::new(0));
        self
    }

    pub fn open(&self, permits: usize) {
        if let Some(gate) = &self.gate {
            gate.add_permits(permits);
        }
    }

    pub fn fetches(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RecordFetcher for CatalogueFetcher {
    async fn fetch(&self, url: &str) -> Result<Record, FetchError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        if let Some(gate) = &self.gate {
            gate.acquire().await.unwrap().forget();
        }

        let title = self.titles.lock().unwrap().get(url).cloned();
        title.map(Record::new).ok_or_else(|| FetchError::Status {
            url: url.to_string(),
            status: 404,
        })
    }
}

pub fn id(raw: &str) -> FavoriteId {
    FavoriteId::new(raw).unwrap()
}

pub fn core(store: Arc<MemoryKeyValueStore>, fetcher: Arc<CatalogueFetcher>) -> FavoritesCore {
    FavoritesCore::new(
        store as Arc<dyn KeyValueStore>,
        fetcher,
        Arc::new(NoopEmitter::new()),
        FavoritesConfig::default(),
    )
    .unwrap()
}

/// Let spawned tasks on the current-thread runtime run.
pub async fn yield_many() {
    for _ in 0..16 {
        tokio::task::yield_now().await;
    }
}
