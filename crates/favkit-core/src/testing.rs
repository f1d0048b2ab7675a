//! Test doubles shared by the unit tests in this crate.

use std::collections::{HashMap, VecDeque};
use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;
use tokio::sync::Semaphore;

use crate::domain::Record;
use crate::events::FavoritesEvent;
use crate::ports::{FavoritesEventEmitter, FetchError, RecordFetcher};

/// Fetcher that answers from a per-URL script.
///
/// Each URL has a queue of outcomes. A fetch pops the front of the queue
/// while more than one outcome is left, and repeats the last one after that.
/// Unscripted URLs resolve to a record titled with the URL.
///
/// A gated fetcher parks every fetch until [`ScriptedFetcher::release`] hands
/// out permits. Parked fetches resume in the order they arrived.
#[derive(Default)]
pub(crate) struct ScriptedFetcher {
    scripts: Mutex<HashMap<String, VecDeque<Result<Record, FetchError>>>>,
    calls: Mutex<HashMap<String, usize>>,
    gate: Option<Semaphore>,
}

impl ScriptedFetcher {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_record(self, url: &str, record: Record) -> Self {
        self.push_record(url, record);
        self
    }

    pub(crate) fn with_failure(self, url: &str, error: FetchError) -> Self {
        self.push(url, Err(error));
        self
    }

    pub(crate) fn gated(mut self) -> Self {
        self.gate = Some(Semaphore::new(0));
        self
    }

    pub(crate) fn push_record(&self, url: &str, record: Record) {
        self.push(url, Ok(record));
    }

    /// Let `n` parked fetches through.
    pub(crate) fn release(&self, n: usize) {
        if let Some(gate) = &self.gate {
            gate.add_permits(n);
        }
    }

    /// Number of fetches issued for `url`, including parked ones.
    pub(crate) fn calls(&self, url: &str) -> usize {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(url)
            .copied()
            .unwrap_or(0)
    }

    fn push(&self, url: &str, outcome: Result<Record, FetchError>) {
        self.scripts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(url.to_string())
            .or_default()
            .push_back(outcome);
    }

    fn next_outcome(&self, url: &str) -> Result<Record, FetchError> {
        let mut scripts = self.scripts.lock().unwrap_or_else(PoisonError::into_inner);
        match scripts.get_mut(url) {
            Some(queue) if queue.len() > 1 => queue.pop_front().unwrap(),
            Some(queue) if !queue.is_empty() => queue[0].clone(),
            _ => Ok(Record::new(url)),
        }
    }
}

#[async_trait]
impl RecordFetcher for ScriptedFetcher {
    async fn fetch(&self, url: &str) -> Result<Record, FetchError> {
        *self
            .calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(url.to_string())
            .or_default() += 1;

        if let Some(gate) = &self.gate {
            gate.acquire().await.unwrap().forget();
        }
        self.next_outcome(url)
    }
}

/// Emitter that records every event it sees.
#[derive(Default)]
pub(crate) struct CapturingEmitter {
    events: std::sync::Arc<Mutex<Vec<FavoritesEvent>>>,
}

impl CapturingEmitter {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn events(&self) -> Vec<FavoritesEvent> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl FavoritesEventEmitter for CapturingEmitter {
    fn emit(&self, event: FavoritesEvent) {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(event);
    }

    fn clone_box(&self) -> Box<dyn FavoritesEventEmitter> {
        Box::new(Self {
            events: std::sync::Arc::clone(&self.events),
        })
    }
}

/// Give spawned tasks on the current-thread runtime a chance to run.
pub(crate) async fn settle_tasks() {
    for _ in 0..16 {
        tokio::task::yield_now().await;
    }
}
