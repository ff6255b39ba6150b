/// Command implementations
///
/// Each command returns plain data; `main` decides how to print it.
use crate::config::GzConfig;
use crate::error::{CliError, Result};
use crate::session::{open_player, open_store, pump};
use gz_core::{SessionStore, Track, TrackId};
use gz_playback::{MediaDriver, PlayerEvent, SimulatedDriver};
use gz_storage::KvSessionStore;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use std::time::Duration;
use tracing::{debug, info};

/// Row of `gz list`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListRow {
    pub id: TrackId,
    pub title: String,
    pub artist: String,
    pub favorite: bool,
    pub last_played: bool,
}

/// Output of `gz status`
#[derive(Debug, Clone)]
pub struct StatusReport {
    pub tracks: usize,
    pub favorites: usize,
    pub last_played: Option<(Track, f64)>,
    pub mode_label: String,
}

/// Options of `gz play`
#[derive(Debug, Clone)]
pub struct PlayOptions {
    /// Start with this track instead of the restored session
    pub id: Option<TrackId>,
    /// Simulated length of every track, in seconds
    pub track_secs: f64,
    /// Stop after this many tracks have finished
    pub tracks: usize,
    pub shuffle: bool,
    pub repeat_one: bool,
    /// Wall-clock time per simulated second
    pub tick: Duration,
}

impl Default for PlayOptions {
    fn default() -> Self {
        Self {
            id: None,
            track_secs: 30.0,
            tracks: 3,
            shuffle: false,
            repeat_one: false,
            tick: Duration::from_millis(50),
        }
    }
}

/// Result of `gz play`
#[derive(Debug, Clone, Default)]
pub struct PlaybackSummary {
    /// Tracks in the order they started; a repeated track is listed once
    pub started: Vec<TrackId>,
    /// Tracks that played to the end
    pub completed: usize,
}

/// `gz list`: the filtered catalog
pub async fn list(config: &GzConfig, query: Option<&str>, favorites_only: bool) -> Result<Vec<ListRow>> {
    let mut player = open_player(config, SimulatedDriver::default()).await?;
    let last = KvSessionStore::new(open_store(config))
        .load_last_played()
        .ok()
        .flatten()
        .map(|record| record.id);

    if let Some(query) = query {
        player.set_query(query);
    }
    player.set_favorites_only(favorites_only);

    Ok(player
        .view_tracks()
        .into_iter()
        .map(|track| ListRow {
            id: track.id.clone(),
            title: track.title.clone(),
            artist: track.artist.clone(),
            favorite: player.is_favorite(&track.id),
            last_played: last.as_ref() == Some(&track.id),
        })
        .collect())
}

/// `gz favorite <ID>`: flip and persist a favorite
pub async fn favorite(config: &GzConfig, id: &str) -> Result<(Track, bool)> {
    let mut player = open_player(config, SimulatedDriver::default()).await?;
    let id = TrackId::new(id);

    let track = player
        .catalog()
        .find(&id)
        .cloned()
        .ok_or_else(|| CliError::UnknownTrack(id.to_string()))?;

    let favorite = player.toggle_favorite(&id);
    Ok((track, favorite))
}

/// `gz status`: catalog size, favorites and the saved session
pub async fn status(config: &GzConfig) -> Result<StatusReport> {
    let player = open_player(config, SimulatedDriver::default()).await?;
    let session = KvSessionStore::new(open_store(config));

    let last_played = session
        .load_last_played()
        .ok()
        .flatten()
        .and_then(|record| {
            player
                .catalog()
                .find(&record.id)
                .cloned()
                .map(|track| (track, record.position_secs))
        });

    Ok(StatusReport {
        tracks: player.catalog().len(),
        favorites: player.favorites().len(),
        last_played,
        mode_label: player.state().mode_label(),
    })
}

/// `gz play`: run a simulated-clock playback session
///
/// Starts the given track, or resumes the saved session, or starts the first
/// track. Stops after `tracks` tracks finish or on Ctrl-C.
pub async fn play(config: &GzConfig, options: PlayOptions) -> Result<PlaybackSummary> {
    let mut player = open_player(config, SimulatedDriver::new(options.track_secs)).await?;
    if options.shuffle {
        player.set_shuffle(true);
    }
    if options.repeat_one {
        player.set_repeat_one(true);
    }

    let titles: HashMap<TrackId, (String, String)> = player
        .catalog()
        .iter()
        .map(|t| (t.id.clone(), (t.title.clone(), t.artist.clone())))
        .collect();

    let started = Rc::new(RefCell::new(Vec::<TrackId>::new()));
    let sink = started.clone();
    player.subscribe(move |event| match event {
        PlayerEvent::StateChanged(state) => {
            let Some(id) = state.current_track_id.as_ref().filter(|_| state.is_playing) else {
                return;
            };
            if sink.borrow().last() == Some(id) {
                return;
            }
            if let Some((title, artist)) = titles.get(id) {
                println!("▶ {} — {}  [{}]", title, artist, state.mode_label());
            }
            sink.borrow_mut().push(id.clone());
        }
        PlayerEvent::Progress(update) => {
            debug!(elapsed = %update.elapsed_display, total = %update.duration_display, "Progress");
        }
        PlayerEvent::FavoriteToggled { .. } => {}
    });

    match &options.id {
        Some(id) => player.play_at(id)?,
        None => {
            if player.restore_session() {
                info!("Resuming saved session");
            }
            player.toggle_pause();
        }
    }

    if player.current_track().is_none() {
        info!("Nothing to play");
        return Ok(PlaybackSummary::default());
    }

    let mut completed = 0;
    let mut interval = tokio::time::interval(options.tick);
    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    while completed < options.tracks {
        completed += pump(&mut player);
        if completed >= options.tracks {
            break;
        }

        tokio::select! {
            _ = interval.tick() => {}
            _ = &mut ctrl_c => {
                info!("Interrupted");
                break;
            }
        }
        player.driver_mut().tick(1.0);
    }

    // Leave the session paused so the next run resumes where this one stopped
    player.driver_mut().pause();
    pump(&mut player);

    let started = started.borrow().clone();
    Ok(PlaybackSummary { started, completed })
}
