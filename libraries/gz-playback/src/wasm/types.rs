//! WASM-compatible type definitions

use gz_core::Track;
use serde::Serialize;

/// Row of the track list as handed to JavaScript
///
/// Flattens the locator and adds the derived favorite/current flags so the
/// list view does not need a second lookup.
#[derive(Serialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct WasmTrackRow {
    id: String,
    title: String,
    artist: String,
    #[serde(rename = "artworkURL")]
    artwork_url: Option<String>,
    imported: bool,
    favorite: bool,
    current: bool,
}

impl WasmTrackRow {
    /// Build a row from a track and its derived flags
    pub fn new(track: &Track, favorite: bool, current: bool) -> Self {
        Self {
            id: track.id.to_string(),
            title: track.title.clone(),
            artist: track.artist.clone(),
            artwork_url: track.artwork_url.clone(),
            imported: track.is_imported(),
            favorite,
            current,
        }
    }
}
