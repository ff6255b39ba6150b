//! Storage outages must never stop playback or favorites

use gz_core::{Catalog, CoreError, FavoritesSet, LastPlayed, SessionStore, Track, TrackId};
use gz_playback::{Player, PlayerConfig, SimulatedDriver};
use gz_storage::{KvSessionStore, MemoryStore};
use mockall::mock;

mock! {
    pub Store {}

    impl SessionStore for Store {
        fn load_favorites(&self) -> gz_core::Result<FavoritesSet>;
        fn save_favorites(&mut self, favorites: &FavoritesSet) -> gz_core::Result<()>;
        fn load_last_played(&self) -> gz_core::Result<Option<LastPlayed>>;
        fn save_last_played(&mut self, record: &LastPlayed) -> gz_core::Result<()>;
    }
}

fn catalog() -> Catalog {
    Catalog::from_tracks(vec![
        Track::remote("a", "Alpha", "Kid Gz", "https://cdn/a.mp3"),
        Track::remote("b", "Bravo", "Kid Gz", "https://cdn/b.mp3"),
    ])
    .unwrap()
}

fn unavailable() -> CoreError {
    CoreError::storage("quota exceeded")
}

#[test]
fn failing_store_keeps_everything_in_memory() {
    let mut store = MockStore::new();
    store
        .expect_load_favorites()
        .returning(|| Err(unavailable()));
    store
        .expect_save_favorites()
        .times(2)
        .returning(|_| Err(unavailable()));
    store
        .expect_load_last_played()
        .returning(|| Err(unavailable()));
    store
        .expect_save_last_played()
        .returning(|_| Err(unavailable()));

    let mut player = Player::new(SimulatedDriver::default(), store, PlayerConfig::default());
    player.load_catalog(catalog());

    assert!(!player.restore_session());

    player.play_at(&TrackId::new("a")).unwrap();
    assert!(player.state().is_playing);
    player.on_progress(10.0, Some(180.0));
    player.advance();
    assert_eq!(player.current_track().unwrap().id.as_str(), "b");

    assert!(player.toggle_favorite(&TrackId::new("a")));
    assert!(player.is_favorite(&TrackId::new("a")));
    assert!(!player.toggle_favorite(&TrackId::new("a")));
}

#[test]
fn favorites_are_written_as_full_set() {
    let mut store = MockStore::new();
    store
        .expect_load_favorites()
        .returning(|| Ok(["b"].into_iter().map(TrackId::new).collect()));
    store
        .expect_save_favorites()
        .withf(|set: &FavoritesSet| set.len() == 2 && set.contains(&TrackId::new("a")))
        .times(1)
        .returning(|_| Ok(()));

    let mut player = Player::new(SimulatedDriver::default(), store, PlayerConfig::default());
    player.load_catalog(catalog());

    assert!(player.toggle_favorite(&TrackId::new("a")));
}

#[test]
fn disabled_memory_store_degrades_gracefully() {
    let mut player = Player::new(
        SimulatedDriver::default(),
        KvSessionStore::new(MemoryStore::failing()),
        PlayerConfig::default(),
    );
    player.load_catalog(catalog());

    player.toggle_pause();
    assert!(player.state().is_playing);
    assert_eq!(player.current_track().unwrap().id.as_str(), "a");
}
