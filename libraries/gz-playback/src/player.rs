//! Player - playback and selection state machine
//!
//! Owns the playback state, the catalog snapshot, favorites, the media
//! driver and the session store. Every mutation goes through `&mut self` and
//! ends by notifying subscribers synchronously.

use gz_core::{Catalog, LastPlayed, SessionStore, Track, TrackId};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info, warn};

use crate::{
    deferred::PendingSeek,
    driver::{MediaDriver, MediaEvent},
    error::{PlaybackError, Result},
    events::{PlayerEvent, SubscriptionId, Subscribers},
    favorites::FavoritesController,
    input::InputCommand,
    progress::{known_duration, ProgressUpdate, SCRUB_MAX},
    selection::{next_index, previous_index, PlayMode},
    types::{CatalogStatus, PlaybackState, PlayerConfig},
};

/// Playlist player
///
/// Generic over the media driver so the same state machine runs against an
/// HTML audio element, the simulated clock, or a test double.
pub struct Player<D: MediaDriver> {
    state: PlaybackState,
    catalog: Catalog,
    favorites: FavoritesController,
    driver: D,
    store: Box<dyn SessionStore>,
    subscribers: Subscribers,
    pending_seek: Option<PendingSeek>,
    rng: StdRng,
}

impl<D: MediaDriver> std::fmt::Debug for Player<D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Player")
            .field("state", &self.state)
            .field("tracks", &self.catalog.len())
            .field("pending_seek", &self.pending_seek)
            .field("subscribers", &self.subscribers)
            .finish_non_exhaustive()
    }
}

impl<D: MediaDriver> Player<D> {
    /// Create a player with an empty catalog
    ///
    /// Favorites are read from the store immediately; an unavailable store
    /// starts with an empty set.
    pub fn new(driver: D, store: impl SessionStore + 'static, config: PlayerConfig) -> Self {
        let store: Box<dyn SessionStore> = Box::new(store);
        let favorites = FavoritesController::load(store.as_ref());

        let rng = match config.shuffle_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let state = PlaybackState {
            shuffle_enabled: config.shuffle,
            repeat_one_enabled: config.repeat_one,
            ..PlaybackState::default()
        };

        Self {
            state,
            catalog: Catalog::new(),
            favorites,
            driver,
            store,
            subscribers: Subscribers::new(),
            pending_seek: None,
            rng,
        }
    }

    // ===== Subscriptions =====

    /// Register a view surface
    pub fn subscribe(&mut self, callback: impl FnMut(&PlayerEvent) + 'static) -> SubscriptionId {
        self.subscribers.subscribe(callback)
    }

    /// Remove a view surface
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.subscribers.unsubscribe(id)
    }

    fn publish(&mut self) {
        let snapshot = self.state.clone();
        self.subscribers.notify(&PlayerEvent::StateChanged(snapshot));
    }

    fn publish_progress(&mut self, update: ProgressUpdate) {
        self.subscribers.notify(&PlayerEvent::Progress(update));
    }

    // ===== Catalog =====

    /// Install a freshly loaded catalog
    ///
    /// Imported tracks from the previous snapshot are carried over. A current
    /// track that no longer exists is dropped and the driver unloaded.
    pub fn load_catalog(&mut self, catalog: Catalog) {
        let imported: Vec<Track> = self
            .catalog
            .iter()
            .filter(|t| t.is_imported())
            .cloned()
            .collect();

        self.catalog = catalog;
        for track in imported {
            if let Err(e) = self.catalog.push_imported(track) {
                warn!(error = %e, "Dropping imported track on catalog reload");
            }
        }

        if let Some(id) = self.state.current_track_id.clone() {
            if !self.catalog.contains(&id) {
                info!(track_id = %id, "Current track left the catalog");
                self.state.current_track_id = None;
                self.pending_seek = None;
                self.driver.unload();
            }
        }

        self.state.catalog_status = CatalogStatus::Ready {
            tracks: self.catalog.len(),
        };
        self.reconcile();
        self.recompute_view();
        info!(tracks = self.catalog.len(), "Catalog ready");
        self.publish();
    }

    /// Record a catalog fetch failure for the list view
    pub fn catalog_load_failed(&mut self, message: impl Into<String>) {
        let message = message.into();
        warn!(error = %message, "Catalog load failed");
        self.state.catalog_status = CatalogStatus::Failed { message };
        self.publish();
    }

    /// Append a locally imported track
    pub fn add_imported(&mut self, track: Track) -> Result<()> {
        let id = track.id.clone();
        self.catalog.push_imported(track)?;

        self.state.catalog_status = CatalogStatus::Ready {
            tracks: self.catalog.len(),
        };
        self.recompute_view();
        debug!(track_id = %id, "Imported track added");
        self.publish();
        Ok(())
    }

    // ===== Playback Control =====

    /// Play a track, or pause/resume it if it is already current
    ///
    /// # Errors
    /// `InvalidReference` when the id is not in the catalog; nothing changes.
    pub fn play_at(&mut self, id: &TrackId) -> Result<()> {
        if self.catalog.is_empty() {
            debug!(track_id = %id, "play_at ignored, catalog empty");
            return Ok(());
        }

        let Some(index) = self.catalog.index_of(id) else {
            warn!(track_id = %id, "play_at on unknown track");
            return Err(PlaybackError::InvalidReference(id.clone()));
        };

        if self.state.is_current(id) && self.driver.has_source() {
            self.flip_pause();
        } else {
            self.start_track(index, None);
        }

        self.publish();
        Ok(())
    }

    /// Play the track at a position of the filtered view (row buttons)
    pub fn play_view_index(&mut self, index: usize) -> Result<()> {
        if self.catalog.is_empty() {
            return Ok(());
        }

        let id = self
            .state
            .view
            .get(index)
            .cloned()
            .ok_or(PlaybackError::IndexOutOfRange {
                index,
                len: self.state.view.len(),
            })?;
        self.play_at(&id)
    }

    /// Play the track at a catalog position
    pub fn play_index(&mut self, index: usize) -> Result<()> {
        if self.catalog.is_empty() {
            return Ok(());
        }

        let id = self
            .catalog
            .get(index)
            .map(|t| t.id.clone())
            .ok_or(PlaybackError::IndexOutOfRange {
                index,
                len: self.catalog.len(),
            })?;
        self.play_at(&id)
    }

    /// Start a track and seek to `position` once its metadata is known
    pub fn play_from(&mut self, id: &TrackId, position: f64) -> Result<()> {
        let index = self
            .catalog
            .index_of(id)
            .ok_or_else(|| PlaybackError::InvalidReference(id.clone()))?;

        self.start_track(index, Some(position));
        self.publish();
        Ok(())
    }

    /// Play/pause control
    ///
    /// With nothing loaded, starts the first track of the filtered view (or
    /// of the catalog when the view is empty).
    pub fn toggle_pause(&mut self) {
        if !self.driver.has_source() {
            let target = self
                .state
                .view
                .first()
                .cloned()
                .or_else(|| self.catalog.get(0).map(|t| t.id.clone()));

            if let Some(id) = target {
                if let Err(e) = self.play_at(&id) {
                    warn!(error = %e, "Failed to start playback");
                }
            }
            return;
        }

        self.flip_pause();
        self.publish();
    }

    /// Next track per shuffle/repeat rules
    pub fn advance(&mut self) {
        let mode = PlayMode {
            shuffle: self.state.shuffle_enabled,
            repeat_one: self.state.repeat_one_enabled,
        };

        let Some(target) = next_index(self.current_index(), self.catalog.len(), mode, &mut self.rng)
        else {
            return;
        };

        self.start_track(target, None);
        self.publish();
    }

    /// Previous track in catalog order (ignores shuffle and repeat)
    pub fn retreat(&mut self) {
        let Some(target) = previous_index(self.current_index(), self.catalog.len()) else {
            return;
        };

        self.start_track(target, None);
        self.publish();
    }

    /// Driver reached the end of the current track
    pub fn on_media_ended(&mut self) {
        let current = self.current_track().map(|t| t.id.clone());

        match current {
            Some(id) if self.state.repeat_one_enabled => {
                debug!(track_id = %id, "Repeating track");
                self.driver.seek(0.0);
                self.request_play(&id);
                self.reconcile();
                self.persist_position(&id, 0.0);
                self.publish();
            }
            _ => self.advance(),
        }
    }

    fn start_track(&mut self, index: usize, resume_at: Option<f64>) {
        let Some(track) = self.catalog.get(index) else {
            return;
        };
        let id = track.id.clone();
        let locator = track.locator.clone();
        info!(track_id = %id, title = %track.title, artist = %track.artist, "Starting track");

        self.pending_seek = None;
        self.state.current_track_id = Some(id.clone());

        self.driver.load(&locator);
        self.request_play(&id);
        self.reconcile();

        let resume_at = resume_at.filter(|t| t.is_finite() && *t > 0.0);
        self.persist_position(&id, resume_at.unwrap_or(0.0));

        if let Some(position) = resume_at {
            self.pending_seek = Some(PendingSeek::new(id, position));
        }
    }

    fn request_play(&mut self, id: &TrackId) {
        if let Err(e) = self.driver.play() {
            warn!(track_id = %id, error = %e, "Playback rejected");
        }
    }

    fn flip_pause(&mut self) {
        if self.driver.is_paused() {
            if let Some(id) = self.state.current_track_id.clone() {
                self.request_play(&id);
            }
        } else {
            self.driver.pause();
        }
        self.reconcile();
    }

    fn reconcile(&mut self) {
        self.state.is_playing = self.driver.is_playing();
    }

    // ===== Shuffle & Repeat =====

    /// Set the shuffle flag
    pub fn set_shuffle(&mut self, enabled: bool) {
        self.state.shuffle_enabled = enabled;
        self.publish();
    }

    /// Set the repeat-one flag
    pub fn set_repeat_one(&mut self, enabled: bool) {
        self.state.repeat_one_enabled = enabled;
        self.publish();
    }

    /// Flip the shuffle flag
    pub fn toggle_shuffle(&mut self) {
        self.set_shuffle(!self.state.shuffle_enabled);
    }

    /// Flip the repeat-one flag
    pub fn toggle_repeat_one(&mut self) {
        self.set_repeat_one(!self.state.repeat_one_enabled);
    }

    // ===== Filtering =====

    /// Set the search text
    pub fn set_query(&mut self, query: &str) {
        self.state.filter.query = query.to_string();
        self.recompute_view();
        self.publish();
    }

    /// Show only favorites
    pub fn set_favorites_only(&mut self, enabled: bool) {
        self.state.filter.favorites_only = enabled;
        self.recompute_view();
        self.publish();
    }

    /// Flip the favorites-only filter
    pub fn toggle_favorites_only(&mut self) {
        self.set_favorites_only(!self.state.filter.favorites_only);
    }

    fn recompute_view(&mut self) {
        self.state.view = self
            .catalog
            .filter(&self.state.filter, self.favorites.set())
            .into_iter()
            .map(|t| t.id.clone())
            .collect();
    }

    // ===== Favorites =====

    /// Flip a track's favorite flag, returning the new membership
    pub fn toggle_favorite(&mut self, id: &TrackId) -> bool {
        let favorite = self.favorites.toggle(id, self.store.as_mut());
        debug!(track_id = %id, favorite, "Favorite toggled");

        self.subscribers.notify(&PlayerEvent::FavoriteToggled {
            id: id.clone(),
            favorite,
        });

        if self.state.filter.favorites_only {
            self.recompute_view();
            self.publish();
        }

        favorite
    }

    /// Flip the current track's favorite flag (now-playing heart)
    pub fn toggle_current_favorite(&mut self) -> Option<bool> {
        let id = self.state.current_track_id.clone()?;
        Some(self.toggle_favorite(&id))
    }

    // ===== Seeking =====

    /// Seek to an absolute position; `false` while the duration is unknown
    pub fn seek_to(&mut self, seconds: f64) -> bool {
        let Some(duration) = known_duration(self.driver.duration()) else {
            return false;
        };
        if !seconds.is_finite() {
            return false;
        }

        self.driver.seek(seconds.clamp(0.0, duration));
        let update = ProgressUpdate::new(self.driver.position(), Some(duration));
        self.publish_progress(update);
        true
    }

    /// Seek to a fraction (`0.0..=1.0`) of the duration
    pub fn seek_fraction(&mut self, fraction: f64) -> bool {
        let Some(duration) = known_duration(self.driver.duration()) else {
            return false;
        };
        if !fraction.is_finite() {
            return false;
        }

        self.seek_to(fraction.clamp(0.0, 1.0) * duration)
    }

    /// Seek from the scrubber (`0..=1000`)
    pub fn scrub(&mut self, value: u16) -> bool {
        self.seek_fraction(f64::from(value.min(SCRUB_MAX)) / f64::from(SCRUB_MAX))
    }

    // ===== Media Events =====

    /// Project a playhead update, persist the position and notify subscribers
    pub fn on_progress(&mut self, current: f64, duration: Option<f64>) -> ProgressUpdate {
        let update = ProgressUpdate::new(current, duration);

        if let Some(id) = self.state.current_track_id.clone() {
            let record = LastPlayed::new(id, update.current);
            if let Err(e) = self.store.save_last_played(&record) {
                debug!(error = %e, "Failed to persist playback position");
            }
        }

        self.publish_progress(update.clone());
        update
    }

    /// Feed a driver notification back into the state machine
    pub fn handle_media_event(&mut self, event: MediaEvent) {
        match event {
            MediaEvent::MetadataLoaded => {
                self.apply_pending_seek();
                let update = ProgressUpdate::new(self.driver.position(), self.driver.duration());
                self.publish_progress(update);
            }
            MediaEvent::Progress { current, duration } => {
                self.on_progress(current, duration);
            }
            MediaEvent::Play | MediaEvent::Pause => {
                let was_playing = self.state.is_playing;
                self.reconcile();
                if self.state.is_playing != was_playing {
                    self.publish();
                }
            }
            MediaEvent::Ended => self.on_media_ended(),
        }
    }

    fn apply_pending_seek(&mut self) {
        let Some(seek) = self.pending_seek.take() else {
            return;
        };

        if !self.state.is_current(&seek.track_id) {
            return;
        }

        match seek.target_within(self.driver.duration()) {
            Some(position) => {
                debug!(track_id = %seek.track_id, position, "Applying deferred seek");
                self.driver.seek(position);
            }
            None => {
                debug!(track_id = %seek.track_id, position = seek.position, "Discarding out-of-range seek");
            }
        }
    }

    // ===== Session =====

    /// Restore the last-played track without starting playback
    ///
    /// Call after the catalog is loaded. The saved position is applied once
    /// the driver reports metadata, and only if it lies inside the track.
    /// Returns whether a track was restored.
    pub fn restore_session(&mut self) -> bool {
        let record = match self.store.load_last_played() {
            Ok(Some(record)) => record,
            Ok(None) => return false,
            Err(e) => {
                warn!(error = %e, "Last-played record unavailable");
                return false;
            }
        };

        let Some(track) = self.catalog.find(&record.id) else {
            debug!(track_id = %record.id, "Last-played track no longer in catalog");
            return false;
        };
        let locator = track.locator.clone();
        info!(track_id = %record.id, position = record.position_secs, "Restoring session");

        self.pending_seek = None;
        self.state.current_track_id = Some(record.id.clone());
        self.driver.load(&locator);
        self.reconcile();

        if record.position_secs.is_finite() && record.position_secs > 0.0 {
            self.pending_seek = Some(PendingSeek::new(record.id, record.position_secs));
        }

        self.publish();
        true
    }

    fn persist_position(&mut self, id: &TrackId, position: f64) {
        let record = LastPlayed::new(id.clone(), position);
        if let Err(e) = self.store.save_last_played(&record) {
            warn!(track_id = %id, error = %e, "Failed to persist last-played track");
        }
    }

    // ===== Input =====

    /// Apply a user command
    pub fn dispatch(&mut self, command: InputCommand) -> Result<()> {
        match command {
            InputCommand::TogglePlay => self.toggle_pause(),
            InputCommand::Next => self.advance(),
            InputCommand::Previous => self.retreat(),
            InputCommand::ToggleShuffle => self.toggle_shuffle(),
            InputCommand::ToggleRepeat => self.toggle_repeat_one(),
            InputCommand::ToggleFavoritesOnly => self.toggle_favorites_only(),
            InputCommand::ToggleFavorite(id) => {
                self.toggle_favorite(&id);
            }
            InputCommand::PlayRow(index) => self.play_view_index(index)?,
            InputCommand::Search(query) => self.set_query(&query),
            InputCommand::Scrub(value) => {
                self.scrub(value);
            }
        }
        Ok(())
    }

    // ===== State Queries =====

    /// Current playback state
    pub fn state(&self) -> &PlaybackState {
        &self.state
    }

    /// Owned copy of the playback state
    pub fn snapshot(&self) -> PlaybackState {
        self.state.clone()
    }

    /// Full catalog
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Current track
    pub fn current_track(&self) -> Option<&Track> {
        self.state
            .current_track_id
            .as_ref()
            .and_then(|id| self.catalog.find(id))
    }

    fn current_index(&self) -> Option<usize> {
        self.state
            .current_track_id
            .as_ref()
            .and_then(|id| self.catalog.index_of(id))
    }

    /// Tracks of the filtered view, in catalog order
    pub fn view_tracks(&self) -> Vec<&Track> {
        self.state
            .view
            .iter()
            .filter_map(|id| self.catalog.find(id))
            .collect()
    }

    /// Whether the track is a favorite
    pub fn is_favorite(&self, id: &TrackId) -> bool {
        self.favorites.contains(id)
    }

    /// Favorites set
    pub fn favorites(&self) -> &gz_core::FavoritesSet {
        self.favorites.set()
    }

    /// Progress of the loaded source
    pub fn progress(&self) -> ProgressUpdate {
        ProgressUpdate::new(self.driver.position(), self.driver.duration())
    }

    /// Media driver
    pub fn driver(&self) -> &D {
        &self.driver
    }

    /// Media driver (mutable), for hosts that pump driver events
    pub fn driver_mut(&mut self) -> &mut D {
        &mut self.driver
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::driver::{DriverCall, SimulatedDriver};
    use gz_storage::{KvSessionStore, MemoryStore};
    use std::cell::RefCell;
    use std::rc::Rc;

    fn catalog(n: usize) -> Catalog {
        Catalog::from_tracks((0..n).map(|i| {
            Track::remote(
                format!("t{}", i),
                format!("Song {}", i),
                "Kid Gz",
                format!("https://cdn/{}.mp3", i),
            )
        }))
        .unwrap()
    }

    fn player(n: usize) -> Player<SimulatedDriver> {
        let mut player = Player::new(
            SimulatedDriver::new(120.0),
            KvSessionStore::new(MemoryStore::new()),
            PlayerConfig {
                shuffle_seed: Some(7),
                ..PlayerConfig::default()
            },
        );
        player.load_catalog(catalog(n));
        player
    }

    fn current(player: &Player<SimulatedDriver>) -> Option<&str> {
        player.state().current_track_id.as_ref().map(|id| id.as_str())
    }

    fn record_events(player: &mut Player<SimulatedDriver>) -> Rc<RefCell<Vec<PlayerEvent>>> {
        let events = Rc::new(RefCell::new(Vec::new()));
        let sink = events.clone();
        player.subscribe(move |e| sink.borrow_mut().push(e.clone()));
        events
    }

    #[test]
    fn play_at_starts_track() {
        let mut player = player(3);
        player.play_at(&TrackId::new("t1")).unwrap();

        assert_eq!(current(&player), Some("t1"));
        assert!(player.state().is_playing);
        assert_eq!(
            player.driver().calls(),
            &[
                DriverCall::Load(gz_core::AudioLocator::remote("https://cdn/1.mp3")),
                DriverCall::Play
            ]
        );
    }

    #[test]
    fn play_at_current_toggles_pause() {
        let mut player = player(3);
        let id = TrackId::new("t0");

        player.play_at(&id).unwrap();
        player.play_at(&id).unwrap();
        assert!(!player.state().is_playing);
        assert_eq!(current(&player), Some("t0"));

        player.play_at(&id).unwrap();
        assert!(player.state().is_playing);
    }

    #[test]
    fn unknown_track_is_rejected_without_notification() {
        let mut player = player(3);
        let events = record_events(&mut player);

        let result = player.play_at(&TrackId::new("ghost"));
        assert!(matches!(result, Err(PlaybackError::InvalidReference(_))));
        assert!(events.borrow().is_empty());
        assert_eq!(current(&player), None);
    }

    #[test]
    fn each_operation_publishes_one_snapshot() {
        let mut player = player(3);
        let events = record_events(&mut player);

        player.advance();
        player.toggle_shuffle();
        player.set_query("song");

        let events = events.borrow();
        assert_eq!(events.len(), 3);
        assert!(events
            .iter()
            .all(|e| matches!(e, PlayerEvent::StateChanged(_))));
    }

    #[test]
    fn toggle_pause_without_source_starts_first_view_track() {
        let mut player = player(3);
        player.set_query("Song 2");
        player.toggle_pause();

        assert_eq!(current(&player), Some("t2"));
        assert!(player.state().is_playing);
    }

    #[test]
    fn retreat_without_current_goes_to_last() {
        let mut player = player(3);
        player.retreat();
        assert_eq!(current(&player), Some("t2"));
        player.retreat();
        assert_eq!(current(&player), Some("t1"));
    }

    #[test]
    fn rejected_play_leaves_track_paused() {
        let mut player = player(2);
        player.driver_mut().set_reject_play(true);

        player.play_at(&TrackId::new("t0")).unwrap();
        assert_eq!(current(&player), Some("t0"));
        assert!(!player.state().is_playing);
    }

    #[test]
    fn view_index_out_of_range() {
        let mut player = player(2);
        assert!(matches!(
            player.play_view_index(5),
            Err(PlaybackError::IndexOutOfRange { index: 5, len: 2 })
        ));
    }

    #[test]
    fn seek_is_noop_until_duration_known() {
        let mut player = player(1);
        player.play_at(&TrackId::new("t0")).unwrap();
        assert!(!player.scrub(500));

        player.driver_mut().complete_load();
        assert!(player.scrub(500));
        assert_eq!(player.driver().position(), 60.0);
        assert!(player.seek_to(500.0));
        assert_eq!(player.driver().position(), 120.0);
    }

    #[test]
    fn catalog_reload_drops_missing_current_track() {
        let mut player = player(3);
        player.play_at(&TrackId::new("t2")).unwrap();

        player.load_catalog(catalog(2));
        assert_eq!(current(&player), None);
        assert!(!player.state().is_playing);
        assert!(!player.driver().has_source());
    }

    #[test]
    fn catalog_failure_is_reported_in_state() {
        let mut player = Player::new(
            SimulatedDriver::default(),
            KvSessionStore::new(MemoryStore::new()),
            PlayerConfig::default(),
        );
        player.catalog_load_failed("HTTP 500");

        assert_eq!(
            player.state().catalog_status,
            CatalogStatus::Failed {
                message: "HTTP 500".to_string()
            }
        );
        player.toggle_pause();
        assert!(player.driver().calls().is_empty());
    }

    #[test]
    fn dispatch_routes_commands() {
        let mut player = player(3);
        player.dispatch(InputCommand::PlayRow(1)).unwrap();
        assert_eq!(current(&player), Some("t1"));

        player.dispatch(InputCommand::Next).unwrap();
        assert_eq!(current(&player), Some("t2"));

        player.dispatch(InputCommand::ToggleRepeat).unwrap();
        assert!(player.state().repeat_one_enabled);

        player
            .dispatch(InputCommand::ToggleFavorite(TrackId::new("t0")))
            .unwrap();
        assert!(player.is_favorite(&TrackId::new("t0")));
    }
}
