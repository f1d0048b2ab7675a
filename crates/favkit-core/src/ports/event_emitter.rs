//! Event emitter trait for change notifications.
//!
//! This module defines the abstraction the engine uses to tell the UI layer
//! that something it renders has changed. Implementations handle transport
//! details (channels, UI bridges, logging, etc.).

use tokio::sync::broadcast;

use crate::events::FavoritesEvent;

/// Trait for emitting favorites change notifications.
///
/// # Implementations
///
/// - `NoopEmitter` - For tests and one-shot CLI invocations
/// - `BroadcastEmitter` - Fan-out to any number of in-process subscribers
pub trait FavoritesEventEmitter: Send + Sync {
    /// Emit an event.
    ///
    /// This method must not block: it is called while the engine is in the
    /// middle of applying a state change.
    fn emit(&self, event: FavoritesEvent);

    /// Clone this emitter into a boxed trait object.
    fn clone_box(&self) -> Box<dyn FavoritesEventEmitter>;
}

/// A no-op event emitter.
#[derive(Debug, Clone, Default)]
pub struct NoopEmitter;

impl NoopEmitter {
    /// Create a new no-op emitter.
    pub const fn new() -> Self {
        Self
    }
}

impl FavoritesEventEmitter for NoopEmitter {
    fn emit(&self, _event: FavoritesEvent) {
        // Intentionally do nothing
    }

    fn clone_box(&self) -> Box<dyn FavoritesEventEmitter> {
        Box::new(self.clone())
    }
}

/// Broadcast emitter backed by a tokio broadcast channel.
///
/// Every subscriber receives every event. Slow subscribers may miss events if
/// the buffer overflows; they should re-read the view when they see a lag.
#[derive(Debug, Clone)]
pub struct BroadcastEmitter {
    sender: broadcast::Sender<FavoritesEvent>,
}

impl BroadcastEmitter {
    /// Create a broadcaster with the given buffer capacity.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Create a broadcaster with default capacity (256 events).
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::new(256)
    }

    /// Subscribe to future events.
    pub fn subscribe(&self) -> broadcast::Receiver<FavoritesEvent> {
        self.sender.subscribe()
    }

    /// Get the number of active subscribers.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl FavoritesEventEmitter for BroadcastEmitter {
    fn emit(&self, event: FavoritesEvent) {
        // No subscribers is fine
        let _ = self.sender.send(event);
    }

    fn clone_box(&self) -> Box<dyn FavoritesEventEmitter> {
        Box::new(self.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::FavoriteId;
    use std::sync::Arc;

    #[test]
    fn test_noop_emitter() {
        let emitter: Arc<dyn FavoritesEventEmitter> = Arc::new(NoopEmitter::new());
        emitter.emit(FavoritesEvent::FavoritesCleared { count: 3 });
        let _boxed: Box<dyn FavoritesEventEmitter> = emitter.clone_box();
    }

    #[tokio::test]
    async fn test_broadcast_reaches_all_subscribers() {
        let emitter = BroadcastEmitter::new(8);
        let mut first = emitter.subscribe();
        let mut second = emitter.subscribe();
        assert_eq!(emitter.subscriber_count(), 2);

        let id = FavoriteId::new("https://api.jikan.moe/v4/anime/21").unwrap();
        emitter.emit(FavoritesEvent::FavoriteAdded { id: id.clone() });

        assert_eq!(
            first.recv().await.unwrap(),
            FavoritesEvent::FavoriteAdded { id: id.clone() }
        );
        assert_eq!(second.recv().await.unwrap(), FavoritesEvent::FavoriteAdded { id });
    }

    #[test]
    fn test_broadcast_without_subscribers_does_not_fail() {
        let emitter = BroadcastEmitter::with_defaults();
        emitter.emit(FavoritesEvent::SearchTermChanged {
            term: "dragon".to_string(),
        });
    }
}
