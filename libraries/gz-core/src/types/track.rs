/// Track domain type
use serde::{Deserialize, Serialize};

use super::TrackId;

/// Title shown when the source record has none
pub const DEFAULT_TITLE: &str = "Untitled";

/// Artist shown when the source record has none
pub const DEFAULT_ARTIST: &str = "—";

/// Where the media driver loads a track's audio from
///
/// Remote catalog tracks and locally imported tracks use different storage
/// strategies, so they never share a variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum AudioLocator {
    /// Audio fetched from a URL listed in the catalog document
    Remote {
        /// Audio URL
        url: String,
    },

    /// Audio imported by the user, bytes held by the import library
    Imported {
        /// Payload key in the import library
        key: String,
        /// MIME type of the payload (e.g. `audio/mpeg`)
        mime_type: String,
    },
}

impl AudioLocator {
    /// Create a remote locator
    pub fn remote(url: impl Into<String>) -> Self {
        Self::Remote { url: url.into() }
    }

    /// Remote URL, if this is a remote locator
    pub fn url(&self) -> Option<&str> {
        match self {
            Self::Remote { url } => Some(url),
            Self::Imported { .. } => None,
        }
    }
}

/// Audio track
///
/// Favorite status is not part of the record; it lives in `FavoritesSet`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    /// Unique track identifier
    pub id: TrackId,

    /// Track title
    pub title: String,

    /// Artist name
    pub artist: String,

    /// Audio location for the media driver
    pub locator: AudioLocator,

    /// Artwork URL
    pub artwork_url: Option<String>,
}

impl Track {
    /// Create a remote track
    pub fn remote(
        id: impl Into<TrackId>,
        title: impl Into<String>,
        artist: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            artist: artist.into(),
            locator: AudioLocator::remote(url),
            artwork_url: None,
        }
    }

    /// Set the artwork URL
    #[must_use]
    pub fn with_artwork(mut self, url: impl Into<String>) -> Self {
        self.artwork_url = Some(url.into());
        self
    }

    /// Whether this track was imported locally
    pub fn is_imported(&self) -> bool {
        matches!(self.locator, AudioLocator::Imported { .. })
    }

    /// Artwork URL, or the given placeholder
    pub fn artwork_or<'a>(&'a self, placeholder: &'a str) -> &'a str {
        self.artwork_url.as_deref().unwrap_or(placeholder)
    }

    /// Case-insensitive match of an already lowercased needle against title or artist
    pub(crate) fn matches_lowercase(&self, needle: &str) -> bool {
        self.title.to_lowercase().contains(needle) || self.artist.to_lowercase().contains(needle)
    }
}
