//! WASM-compatible Player wrapper

use std::cell::RefCell;
use std::rc::Rc;

use gz_core::{Catalog, TrackId};
use gz_storage::{ImportLibrary, KvSessionStore};
use js_sys::Function;
use serde::Serialize;
use wasm_bindgen::prelude::*;
use web_sys::HtmlMediaElement;

use super::driver::HtmlAudioDriver;
use super::storage::LocalStorage;
use super::types::WasmTrackRow;
use crate::{GestureTracker, InputCommand, MediaDriver, MediaEvent, Player, PlayerConfig, PlayerEvent};

fn to_js(err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// JavaScript callbacks, shared with the player's subscriber
#[derive(Default)]
struct Callbacks {
    on_state_change: Option<Function>,
    on_progress: Option<Function>,
    on_favorite: Option<Function>,
}

impl Callbacks {
    fn dispatch(&self, event: &PlayerEvent) {
        let (callback, payload) = match event {
            PlayerEvent::StateChanged(state) => (&self.on_state_change, to_value(state)),
            PlayerEvent::Progress(update) => (&self.on_progress, to_value(update)),
            PlayerEvent::FavoriteToggled { .. } => (&self.on_favorite, to_value(event)),
        };

        if let Some(cb) = callback {
            cb.call1(&JsValue::NULL, &payload).ok();
        }
    }
}

fn to_value<T: Serialize>(value: &T) -> JsValue {
    serde_wasm_bindgen::to_value(value).unwrap_or(JsValue::NULL)
}

/// WASM-compatible player
///
/// Wraps `Player` with an `<audio>` element driver and `localStorage`
/// persistence. The host forwards the element's DOM events through
/// `onMediaEvent`.
#[wasm_bindgen]
pub struct WasmPlayer {
    inner: Player<HtmlAudioDriver>,
    imports: ImportLibrary<LocalStorage>,
    gestures: GestureTracker,
    callbacks: Rc<RefCell<Callbacks>>,
}

#[wasm_bindgen]
impl WasmPlayer {
    /// Create a player driving the given media element
    #[wasm_bindgen(constructor)]
    pub fn new(element: HtmlMediaElement) -> Result<WasmPlayer, JsValue> {
        console_error_panic_hook::set_once();

        let storage = LocalStorage::open().map_err(to_js)?;
        let mut inner = Player::new(
            HtmlAudioDriver::new(element),
            KvSessionStore::new(storage.clone()),
            PlayerConfig::default(),
        );

        let callbacks = Rc::new(RefCell::new(Callbacks::default()));
        let sink = callbacks.clone();
        inner.subscribe(move |event| sink.borrow().dispatch(event));

        Ok(Self {
            inner,
            imports: ImportLibrary::new(storage),
            gestures: GestureTracker::new(),
            callbacks,
        })
    }

    // ===== Catalog =====

    /// Install a catalog document (`{ "songs": [...] }`) plus stored imports
    #[wasm_bindgen(js_name = loadCatalog)]
    pub fn load_catalog(&mut self, json: &str) -> Result<(), JsValue> {
        let catalog = Catalog::from_json(json).map_err(to_js)?;
        self.inner.load_catalog(catalog);
        self.load_imported();
        Ok(())
    }

    fn load_imported(&mut self) {
        let tracks = match self.imports.load_tracks() {
            Ok(tracks) => tracks,
            Err(e) => {
                web_sys::console::warn_1(&to_js(e));
                return;
            }
        };

        for track in tracks {
            if self.inner.catalog().contains(&track.id) {
                continue;
            }
            let Ok(data_url) = self.imports.data_url(track.id.as_str()) else {
                continue;
            };
            self.inner
                .driver_mut()
                .register_imported(track.id.as_str(), data_url);
            if let Err(e) = self.inner.add_imported(track) {
                web_sys::console::warn_1(&to_js(e));
            }
        }
    }

    /// Report a failed catalog fetch
    #[wasm_bindgen(js_name = catalogFailed)]
    pub fn catalog_failed(&mut self, message: &str) {
        self.inner.catalog_load_failed(message);
    }

    /// Store an imported file and add it to the catalog; returns its id
    #[wasm_bindgen(js_name = importTrack)]
    pub fn import_track(
        &mut self,
        title: &str,
        artist: &str,
        mime_type: &str,
        bytes: &[u8],
    ) -> Result<String, JsValue> {
        let track = self
            .imports
            .import(title, artist, mime_type, bytes)
            .map_err(to_js)?;
        let data_url = self.imports.data_url(track.id.as_str()).map_err(to_js)?;

        let id = track.id.to_string();
        self.inner.driver_mut().register_imported(id.clone(), data_url);
        self.inner.add_imported(track).map_err(to_js)?;
        Ok(id)
    }

    // ===== Session =====

    /// Restore the last-played track (paused)
    #[wasm_bindgen(js_name = restoreSession)]
    pub fn restore_session(&mut self) -> bool {
        self.inner.restore_session()
    }

    // ===== Playback Control =====

    /// Play, or pause/resume when already current
    #[wasm_bindgen(js_name = playAt)]
    pub fn play_at(&mut self, id: &str) -> Result<(), JsValue> {
        self.inner.play_at(&TrackId::new(id)).map_err(to_js)
    }

    /// Play a row of the filtered list
    #[wasm_bindgen(js_name = playRow)]
    pub fn play_row(&mut self, index: usize) -> Result<(), JsValue> {
        self.inner.play_view_index(index).map_err(to_js)
    }

    /// Play/pause
    #[wasm_bindgen(js_name = togglePause)]
    pub fn toggle_pause(&mut self) {
        self.inner.toggle_pause();
    }

    /// Skip to next track
    pub fn next(&mut self) {
        self.inner.advance();
    }

    /// Go to previous track
    pub fn previous(&mut self) {
        self.inner.retreat();
    }

    /// Seek from the scrubber (0-1000)
    pub fn scrub(&mut self, value: u16) -> bool {
        self.inner.scrub(value)
    }

    /// Handle a `KeyboardEvent.key`; returns whether it was consumed
    #[wasm_bindgen(js_name = handleKey)]
    pub fn handle_key(&mut self, key: &str) -> bool {
        let Some(command) = InputCommand::from_key(key) else {
            return false;
        };
        self.inner.dispatch(command).is_ok()
    }

    // ===== Touch Gestures =====

    /// Finger down on the now-playing artwork
    #[wasm_bindgen(js_name = touchStart)]
    pub fn touch_start(&mut self, x: f64, y: f64) {
        self.gestures.touch_start(x, y);
    }

    /// Finger moved
    #[wasm_bindgen(js_name = touchMove)]
    pub fn touch_move(&mut self, x: f64, y: f64) {
        self.gestures.touch_move(x, y);
    }

    /// Finger up; returns whether a swipe or double tap was recognized
    #[wasm_bindgen(js_name = touchEnd)]
    pub fn touch_end(&mut self, x: f64, y: f64, now_ms: f64) -> bool {
        let Some(action) = self.gestures.touch_end(x, y, now_ms) else {
            return false;
        };
        self.inner.dispatch(action.into()).is_ok()
    }

    // ===== Shuffle & Repeat =====

    /// Set shuffle
    #[wasm_bindgen(js_name = setShuffle)]
    pub fn set_shuffle(&mut self, enabled: bool) {
        self.inner.set_shuffle(enabled);
    }

    /// Set repeat-one
    #[wasm_bindgen(js_name = setRepeatOne)]
    pub fn set_repeat_one(&mut self, enabled: bool) {
        self.inner.set_repeat_one(enabled);
    }

    // ===== Filtering & Favorites =====

    /// Set the search text
    #[wasm_bindgen(js_name = setQuery)]
    pub fn set_query(&mut self, query: &str) {
        self.inner.set_query(query);
    }

    /// Show only favorites
    #[wasm_bindgen(js_name = setFavoritesOnly)]
    pub fn set_favorites_only(&mut self, enabled: bool) {
        self.inner.set_favorites_only(enabled);
    }

    /// Flip a track's favorite flag; returns the new value
    #[wasm_bindgen(js_name = toggleFavorite)]
    pub fn toggle_favorite(&mut self, id: &str) -> bool {
        self.inner.toggle_favorite(&TrackId::new(id))
    }

    /// Now-playing heart; returns the new value, or `undefined` with nothing loaded
    #[wasm_bindgen(js_name = toggleCurrentFavorite)]
    pub fn toggle_current_favorite(&mut self) -> Option<bool> {
        self.inner.toggle_current_favorite()
    }

    // ===== Media Events =====

    /// Forward a DOM media event (`loadedmetadata`, `timeupdate`, `play`, `pause`, `ended`)
    #[wasm_bindgen(js_name = onMediaEvent)]
    pub fn on_media_event(&mut self, name: &str) {
        let event = if name == "timeupdate" {
            let driver = self.inner.driver();
            Some(MediaEvent::Progress {
                current: driver.position(),
                duration: driver.duration(),
            })
        } else {
            MediaEvent::from_dom_name(name)
        };

        if let Some(event) = event {
            self.inner.handle_media_event(event);
        }
    }

    // ===== State Queries =====

    /// Current state snapshot
    #[wasm_bindgen(js_name = getState)]
    pub fn get_state(&self) -> JsValue {
        to_value(self.inner.state())
    }

    /// Rows of the filtered list
    #[wasm_bindgen(js_name = viewTracks)]
    pub fn view_tracks(&self) -> JsValue {
        let state = self.inner.state();
        let rows: Vec<WasmTrackRow> = self
            .inner
            .view_tracks()
            .into_iter()
            .map(|t| WasmTrackRow::new(t, self.inner.is_favorite(&t.id), state.is_current(&t.id)))
            .collect();
        to_value(&rows)
    }

    /// Current track row, or `null`
    #[wasm_bindgen(js_name = currentTrack)]
    pub fn current_track(&self) -> JsValue {
        match self.inner.current_track() {
            Some(track) => to_value(&WasmTrackRow::new(
                track,
                self.inner.is_favorite(&track.id),
                true,
            )),
            None => JsValue::NULL,
        }
    }

    /// Now-playing mode tag
    #[wasm_bindgen(js_name = modeLabel)]
    pub fn mode_label(&self) -> String {
        self.inner.state().mode_label()
    }

    // ===== Event Listeners =====

    /// Register state change callback (receives the state snapshot)
    #[wasm_bindgen(js_name = onStateChange)]
    pub fn on_state_change(&mut self, callback: Function) {
        self.callbacks.borrow_mut().on_state_change = Some(callback);
    }

    /// Register progress callback
    #[wasm_bindgen(js_name = onProgress)]
    pub fn on_progress(&mut self, callback: Function) {
        self.callbacks.borrow_mut().on_progress = Some(callback);
    }

    /// Register favorite toggle callback
    #[wasm_bindgen(js_name = onFavorite)]
    pub fn on_favorite(&mut self, callback: Function) {
        self.callbacks.borrow_mut().on_favorite = Some(callback);
    }
}
