//! Core types for playback management

use gz_core::{CatalogFilter, TrackId};
use serde::{Deserialize, Serialize};

/// Label shown in the now-playing view when no mode flag is set
pub const IDLE_MODE_LABEL: &str = "GZ UP";

/// Catalog availability as seen by the list view
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum CatalogStatus {
    /// Fetch in progress (or not started)
    #[default]
    Loading,

    /// Catalog loaded
    Ready {
        /// Number of tracks in the full catalog
        tracks: usize,
    },

    /// Fetch or parse failed; rendered as a visible, non-fatal message
    Failed {
        /// Error description
        message: String,
    },
}

/// Playback state published to every view surface
///
/// Holds a weak reference to the current track (its id), never the track
/// itself: the track may be filtered out of `view` while still playing.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PlaybackState {
    /// Current track, always present in the full catalog when set
    pub current_track_id: Option<TrackId>,

    /// Driver has a source loaded and is not paused
    pub is_playing: bool,

    /// Random next-track selection
    pub shuffle_enabled: bool,

    /// Replay the current track on advance/end
    pub repeat_one_enabled: bool,

    /// Track ids eligible for row navigation, in catalog order
    pub view: Vec<TrackId>,

    /// Active search text and favorites-only flag
    pub filter: CatalogFilter,

    /// Catalog availability
    pub catalog_status: CatalogStatus,
}

impl PlaybackState {
    /// Whether the given track is the current one
    pub fn is_current(&self, id: &TrackId) -> bool {
        self.current_track_id.as_ref() == Some(id)
    }

    /// Mode tag for the now-playing view ("SHUFFLE • REPEAT", ...)
    pub fn mode_label(&self) -> String {
        let mut bits = Vec::with_capacity(2);
        if self.shuffle_enabled {
            bits.push("SHUFFLE");
        }
        if self.repeat_one_enabled {
            bits.push("REPEAT");
        }

        if bits.is_empty() {
            IDLE_MODE_LABEL.to_string()
        } else {
            bits.join(" • ")
        }
    }
}

/// Configuration for the player
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlayerConfig {
    /// Initial shuffle flag (default: false)
    #[serde(default)]
    pub shuffle: bool,

    /// Initial repeat-one flag (default: false)
    #[serde(default)]
    pub repeat_one: bool,

    /// Fixed seed for shuffle draws; `None` seeds from OS entropy
    #[serde(default)]
    pub shuffle_seed: Option<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = PlayerConfig::default();
        assert!(!config.shuffle);
        assert!(!config.repeat_one);
        assert_eq!(config.shuffle_seed, None);
    }

    #[test]
    fn mode_label_combines_flags() {
        let mut state = PlaybackState::default();
        assert_eq!(state.mode_label(), IDLE_MODE_LABEL);

        state.shuffle_enabled = true;
        assert_eq!(state.mode_label(), "SHUFFLE");

        state.repeat_one_enabled = true;
        assert_eq!(state.mode_label(), "SHUFFLE • REPEAT");

        state.shuffle_enabled = false;
        assert_eq!(state.mode_label(), "REPEAT");
    }

    #[test]
    fn catalog_status_serializes_with_tag() {
        let failed = CatalogStatus::Failed {
            message: "HTTP 404".to_string(),
        };
        let json = serde_json::to_value(&failed).unwrap();
        assert_eq!(json["status"], "failed");
        assert_eq!(json["message"], "HTTP 404");
    }
}
