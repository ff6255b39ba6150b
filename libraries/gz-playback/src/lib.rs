//! GZ Player - Playback Management
//!
//! Platform-agnostic playback state machine for GZ Player.
//!
//! This crate provides:
//! - Play/pause/next/previous over a song catalog
//! - Shuffle (never repeats the current track) and repeat-one
//! - Search and favorites-only filtering of the visible list
//! - Favorites with write-through persistence
//! - Session restore with a deferred, bounds-checked seek
//! - Synchronous event fan-out to any number of view surfaces
//! - Keyboard and touch gesture interpretation
//!
//! # Architecture
//!
//! `gz-playback` never touches audio or the DOM directly:
//! - Audio output is a [`MediaDriver`] supplied by the host
//! - Persistence is a [`gz_core::SessionStore`] supplied by the host
//! - Driver notifications come back through [`Player::handle_media_event`]
//!
//! The `wasm` feature adds an HTML audio driver, a `localStorage` backend
//! and the JavaScript-facing `WasmPlayer`.
//!
//! # Example: Basic Playback
//!
//! ```rust
//! use gz_core::{Catalog, TrackId};
//! use gz_playback::{Player, PlayerConfig, SimulatedDriver};
//! use gz_storage::{KvSessionStore, MemoryStore};
//!
//! let catalog = Catalog::from_json(r#"{ "songs": [
//!     { "id": "a", "title": "Night Drive", "audioURL": "https://cdn/a.mp3" },
//!     { "id": "b", "title": "Sunrise", "audioURL": "https://cdn/b.mp3" }
//! ] }"#).unwrap();
//!
//! let mut player = Player::new(
//!     SimulatedDriver::new(180.0),
//!     KvSessionStore::new(MemoryStore::new()),
//!     PlayerConfig::default(),
//! );
//! player.load_catalog(catalog);
//!
//! player.play_at(&TrackId::new("a")).unwrap();
//! assert!(player.state().is_playing);
//!
//! player.advance();
//! assert_eq!(player.current_track().unwrap().title, "Sunrise");
//! ```
//!
//! # Example: Subscribing a View
//!
//! ```rust
//! use gz_playback::{Player, PlayerConfig, PlayerEvent, SimulatedDriver};
//! use gz_storage::{KvSessionStore, MemoryStore};
//!
//! let mut player = Player::new(
//!     SimulatedDriver::default(),
//!     KvSessionStore::new(MemoryStore::new()),
//!     PlayerConfig::default(),
//! );
//!
//! player.subscribe(|event| {
//!     if let PlayerEvent::StateChanged(state) = event {
//!         println!("{} tracks visible, mode {}", state.view.len(), state.mode_label());
//!     }
//! });
//!
//! player.toggle_shuffle();
//! ```

pub mod deferred;
pub mod driver;
pub mod error;
pub mod events;
pub mod favorites;
pub mod input;
pub mod player;
pub mod progress;
pub mod selection;
pub mod types;

#[cfg(feature = "wasm")]
pub mod wasm;

// Re-export main types
pub use deferred::PendingSeek;
pub use driver::{DriverCall, MediaDriver, MediaEvent, SimulatedDriver};
pub use error::{PlaybackError, Result};
pub use events::{PlayerEvent, SubscriptionId, Subscribers};
pub use favorites::FavoritesController;
pub use input::{GestureAction, GestureTracker, InputCommand};
pub use player::Player;
pub use progress::{format_time, ProgressUpdate, SCRUB_MAX};
pub use selection::{next_index, previous_index, PlayMode};
pub use types::{CatalogStatus, PlaybackState, PlayerConfig, IDLE_MODE_LABEL};
