//! Integration tests for session restore and deferred seeks

use gz_core::{Catalog, LastPlayed, SessionStore, Track, TrackId};
use gz_playback::{DriverCall, MediaDriver, Player, PlayerConfig, SimulatedDriver};
use gz_storage::{KvSessionStore, MemoryStore};

fn catalog() -> Catalog {
    Catalog::from_tracks((1..=4).map(|i| {
        Track::remote(
            format!("t{}", i),
            format!("Song {}", i),
            "Kid Gz",
            format!("https://cdn/{}.mp3", i),
        )
    }))
    .unwrap()
}

fn store_with_last(id: &str, t: f64) -> MemoryStore {
    let kv = MemoryStore::new();
    KvSessionStore::new(kv.clone())
        .save_last_played(&LastPlayed::new(TrackId::new(id), t))
        .unwrap();
    kv
}

fn player(kv: MemoryStore) -> Player<SimulatedDriver> {
    let mut player = Player::new(
        SimulatedDriver::new(120.0),
        KvSessionStore::new(kv),
        PlayerConfig::default(),
    );
    player.load_catalog(catalog());
    player
}

fn deliver_metadata(player: &mut Player<SimulatedDriver>) {
    player.driver_mut().complete_load();
    for event in player.driver_mut().take_events() {
        player.handle_media_event(event);
    }
}

#[test]
fn restore_loads_paused_and_seeks_after_metadata() {
    let mut player = player(store_with_last("t3", 42.0));

    assert!(player.restore_session());
    assert_eq!(player.current_track().unwrap().id.as_str(), "t3");
    assert!(!player.state().is_playing);
    assert!(!player.driver().calls().contains(&DriverCall::Play));

    // nothing is applied before the duration is known
    assert_eq!(player.driver().position(), 0.0);

    deliver_metadata(&mut player);
    assert_eq!(player.driver().position(), 42.0);
}

#[test]
fn restore_discards_position_past_the_end() {
    let mut player = player(store_with_last("t3", 500.0));

    assert!(player.restore_session());
    deliver_metadata(&mut player);

    assert_eq!(player.driver().position(), 0.0);
    assert!(!player
        .driver()
        .calls()
        .iter()
        .any(|c| matches!(c, DriverCall::Seek(_))));
}

#[test]
fn restore_with_stale_id_does_nothing() {
    let mut player = player(store_with_last("gone", 10.0));

    assert!(!player.restore_session());
    assert!(player.current_track().is_none());
    assert!(player.driver().calls().is_empty());
}

#[test]
fn restore_without_record_does_nothing() {
    let mut player = player(MemoryStore::new());
    assert!(!player.restore_session());
}

#[test]
fn seek_fires_once() {
    let mut player = player(store_with_last("t2", 30.0));
    player.restore_session();
    deliver_metadata(&mut player);
    player.driver_mut().seek(5.0);

    // a second metadata event (e.g. source reload) must not re-apply it
    player.handle_media_event(gz_playback::MediaEvent::MetadataLoaded);
    assert_eq!(player.driver().position(), 5.0);
}

#[test]
fn new_track_before_metadata_cancels_pending_seek() {
    let mut player = player(store_with_last("t3", 42.0));
    player.restore_session();

    player.play_at(&TrackId::new("t1")).unwrap();
    deliver_metadata(&mut player);

    assert_eq!(player.current_track().unwrap().id.as_str(), "t1");
    assert_eq!(player.driver().position(), 0.0);
}

#[test]
fn second_play_from_replaces_first_seek() {
    let mut player = player(MemoryStore::new());

    player.play_from(&TrackId::new("t1"), 50.0).unwrap();
    player.play_from(&TrackId::new("t2"), 20.0).unwrap();
    deliver_metadata(&mut player);

    assert_eq!(player.current_track().unwrap().id.as_str(), "t2");
    assert_eq!(player.driver().position(), 20.0);
}

#[test]
fn playback_position_is_persisted() {
    let kv = MemoryStore::new();
    let mut player = player(kv.clone());

    player.play_at(&TrackId::new("t4")).unwrap();
    let last = KvSessionStore::new(kv.clone()).load_last_played().unwrap().unwrap();
    assert_eq!(last.id.as_str(), "t4");
    assert_eq!(last.position_secs, 0.0);

    player.on_progress(17.5, Some(120.0));
    let last = KvSessionStore::new(kv).load_last_played().unwrap().unwrap();
    assert_eq!(last.position_secs, 17.5);
}

#[test]
fn restored_session_resumes_on_toggle() {
    let mut player = player(store_with_last("t2", 12.0));
    player.restore_session();
    deliver_metadata(&mut player);

    player.toggle_pause();
    assert!(player.state().is_playing);
    assert_eq!(player.current_track().unwrap().id.as_str(), "t2");
    assert_eq!(player.driver().position(), 12.0);
}
