//! End-to-end flows through the public `FavoritesCore` API.

mod common;

use std::sync::Arc;

use common::{CatalogueFetcher, core, id, yield_many};
use favkit_core::{
    BroadcastEmitter, FavoritesConfig, FavoritesCore, FavoritesEvent, HydrationState,
    KeyValueStore, MemoryKeyValueStore,
};

const DRAGON_BALL: &str = "https://api.jikan.moe/v4/anime/223";
const ONE_PIECE: &str = "https://api.jikan.moe/v4/anime/21";

fn anime_catalogue() -> CatalogueFetcher {
    CatalogueFetcher::new([(DRAGON_BALL, "Dragon Ball"), (ONE_PIECE, "One Piece")])
}

#[tokio::test]
async fn search_filters_on_hydrated_titles() {
    let store = Arc::new(MemoryKeyValueStore::new());
    let engine = core(Arc::clone(&store), Arc::new(anime_catalogue()));

    engine.add(&id(DRAGON_BALL)).await.unwrap();
    engine.add(&id(ONE_PIECE)).await.unwrap();
    engine.activate().await.unwrap();

    engine.set_search_term("dragon");
    assert_eq!(engine.rendered(), vec![id(DRAGON_BALL)]);

    engine.set_search_term("");
    assert_eq!(engine.rendered(), vec![id(DRAGON_BALL), id(ONE_PIECE)]);
}

#[tokio::test]
async fn favorites_survive_a_new_engine() {
    let store = Arc::new(MemoryKeyValueStore::new());
    let fetcher = Arc::new(anime_catalogue());

    let first = core(Arc::clone(&store), Arc::clone(&fetcher));
    first.add(&id(ONE_PIECE)).await.unwrap();
    first.add(&id(DRAGON_BALL)).await.unwrap();
    first.remove(&id(ONE_PIECE)).await.unwrap();

    let second = core(Arc::clone(&store), fetcher);
    let summary = second.activate().await.unwrap();

    assert_eq!(summary.favorites, 1);
    assert_eq!(second.rendered(), vec![id(DRAGON_BALL)]);
    assert!(store.get(&format!("fav:{ONE_PIECE}")).await.unwrap().is_none());
}

#[tokio::test]
async fn clear_leaves_unrelated_keys_alone() {
    let store = Arc::new(MemoryKeyValueStore::with_entries([
        ("session_token", "abc123"),
        ("onboarding_done", "true"),
    ]));
    let engine = core(Arc::clone(&store), Arc::new(anime_catalogue()));
    engine.add(&id(DRAGON_BALL)).await.unwrap();
    engine.add(&id(ONE_PIECE)).await.unwrap();

    assert_eq!(engine.clear().await.unwrap(), 2);

    assert!(engine.favorites().is_empty());
    assert_eq!(
        store.list_all_keys().await.unwrap(),
        vec!["session_token".to_string(), "onboarding_done".to_string()]
    );
}

#[tokio::test]
async fn failed_record_does_not_hide_the_others() {
    const MISSING: &str = "https://api.jikan.moe/v4/anime/999999";
    let store = Arc::new(MemoryKeyValueStore::new());
    let engine = core(Arc::clone(&store), Arc::new(anime_catalogue()));
    engine.add(&id(MISSING)).await.unwrap();
    engine.add(&id(ONE_PIECE)).await.unwrap();

    let summary = engine.activate().await.unwrap();
    assert_eq!((summary.ready, summary.failed), (1, 1));

    let rows = engine.view();
    assert_eq!(rows.len(), 2);
    assert!(rows[0].state.failure().unwrap().contains("404"));
    assert!(rows[1].state.is_ready());

    engine.set_search_term("piece");
    assert_eq!(engine.rendered(), vec![id(ONE_PIECE)]);
}

#[tokio::test]
async fn removing_during_fetch_does_not_resurrect_entry() {
    let fetcher = Arc::new(anime_catalogue().gated());
    let engine = core(Arc::new(MemoryKeyValueStore::new()), Arc::clone(&fetcher));

    engine.add(&id(DRAGON_BALL)).await.unwrap();
    yield_many().await;
    assert_eq!(
        engine.hydration_state(&id(DRAGON_BALL)),
        Some(HydrationState::Pending)
    );

    engine.remove(&id(DRAGON_BALL)).await.unwrap();
    fetcher.open(1);
    yield_many().await;

    assert_eq!(engine.hydration_state(&id(DRAGON_BALL)), None);
    assert!(engine.view().is_empty());
}

#[tokio::test]
async fn concurrent_ensure_fetches_once() {
    let fetcher = Arc::new(anime_catalogue().gated());
    let engine = core(Arc::new(MemoryKeyValueStore::new()), Arc::clone(&fetcher));
    engine.add(&id(ONE_PIECE)).await.unwrap();

    let cache = engine.hydration().clone();
    let waiters: Vec<_> = (0..8)
        .map(|_| {
            let cache = cache.clone();
            tokio::spawn(async move {
                cache.ensure(&id(ONE_PIECE));
                cache.settled(&id(ONE_PIECE)).await
            })
        })
        .collect();

    yield_many().await;
    fetcher.open(1);
    for waiter in waiters {
        assert!(waiter.await.unwrap().unwrap().is_ready());
    }
    assert_eq!(fetcher.fetches(), 1);
}

#[tokio::test]
async fn broadcast_subscribers_see_changes() {
    let emitter = Arc::new(BroadcastEmitter::with_defaults());
    let mut events = emitter.subscribe();
    let engine = FavoritesCore::new(
        Arc::new(MemoryKeyValueStore::new()) as Arc<dyn KeyValueStore>,
        Arc::new(anime_catalogue()),
        emitter,
        FavoritesConfig::default(),
    )
    .unwrap();

    engine.add(&id(ONE_PIECE)).await.unwrap();
    engine.record(&id(ONE_PIECE)).await.unwrap();

    let mut seen = Vec::new();
    while let Ok(event) = events.try_recv() {
        seen.push(event);
    }
    assert_eq!(
        seen,
        vec![
            FavoritesEvent::HydrationStarted { id: id(ONE_PIECE) },
            FavoritesEvent::FavoriteAdded { id: id(ONE_PIECE) },
            FavoritesEvent::HydrationReady { id: id(ONE_PIECE) },
        ]
    );
}
