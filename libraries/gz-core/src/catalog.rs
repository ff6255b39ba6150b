//! Song catalog
//!
//! Normalizes the remote song document into `Track`s and projects filtered
//! views of it. Filtering never mutates the catalog and never re-sorts.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{debug, warn};

use crate::error::{CoreError, Result};
use crate::types::{AudioLocator, FavoritesSet, Track, TrackId, DEFAULT_ARTIST, DEFAULT_TITLE};

/// Catalog document as served: `{ "songs": [...] }`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawCatalog {
    /// Song records
    #[serde(default)]
    pub songs: Vec<RawTrack>,
}

/// A song record as it appears in the document; every field may be missing
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawTrack {
    /// String or numeric id
    #[serde(default)]
    pub id: Option<serde_json::Value>,

    /// Display title
    #[serde(default)]
    pub title: Option<String>,

    /// Display artist
    #[serde(default)]
    pub artist: Option<String>,

    /// Audio URL
    #[serde(rename = "audioURL", default)]
    pub audio_url: Option<String>,

    /// Artwork URL
    #[serde(rename = "artworkURL", default)]
    pub artwork_url: Option<String>,
}

impl RawTrack {
    /// Id as a string, falling back to the 1-based position in the document
    fn resolved_id(&self, position: usize) -> TrackId {
        match &self.id {
            None | Some(serde_json::Value::Null) => TrackId::new((position + 1).to_string()),
            Some(serde_json::Value::String(s)) => TrackId::new(s.clone()),
            // `1.0` and `1` name the same track
            Some(serde_json::Value::Number(n)) => match (n.as_i64(), n.as_f64()) {
                (Some(i), _) => TrackId::new(i.to_string()),
                (None, Some(f)) => TrackId::new(f.to_string()),
                (None, None) => TrackId::new(n.to_string()),
            },
            Some(other) => TrackId::new(other.to_string()),
        }
    }
}

/// Search text and favorites-only flag applied to the catalog
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogFilter {
    /// Free text matched against title and artist
    pub query: String,

    /// Only include favorites
    pub favorites_only: bool,
}

impl CatalogFilter {
    /// Filter with search text only
    pub fn with_query(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            favorites_only: false,
        }
    }

    /// Whether a track passes this filter
    pub fn matches(&self, track: &Track, favorites: &FavoritesSet) -> bool {
        if self.favorites_only && !favorites.contains(&track.id) {
            return false;
        }

        let needle = self.query.trim().to_lowercase();
        needle.is_empty() || track.matches_lowercase(&needle)
    }
}

/// Ordered, id-indexed song catalog
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    tracks: Vec<Track>,
    index: HashMap<TrackId, usize>,
}

impl Catalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Normalize a raw document into a catalog
    ///
    /// Records without an audio URL are skipped, as are records whose id
    /// repeats an earlier one.
    pub fn load(raw: RawCatalog) -> Self {
        let mut catalog = Self {
            tracks: Vec::with_capacity(raw.songs.len()),
            index: HashMap::with_capacity(raw.songs.len()),
        };

        for (position, record) in raw.songs.into_iter().enumerate() {
            let id = record.resolved_id(position);

            let Some(url) = record.audio_url.filter(|u| !u.is_empty()) else {
                warn!(track_id = %id, "Skipping catalog record without audioURL");
                continue;
            };

            if catalog.index.contains_key(&id) {
                warn!(track_id = %id, "Skipping catalog record with duplicate id");
                continue;
            }

            let track = Track {
                id,
                title: record.title.unwrap_or_else(|| DEFAULT_TITLE.to_string()),
                artist: record.artist.unwrap_or_else(|| DEFAULT_ARTIST.to_string()),
                locator: AudioLocator::Remote { url },
                artwork_url: record.artwork_url.filter(|u| !u.is_empty()),
            };
            catalog.insert(track);
        }

        debug!(tracks = catalog.len(), "Catalog loaded");
        catalog
    }

    /// Parse and normalize a JSON catalog document
    pub fn from_json(json: &str) -> Result<Self> {
        let raw: RawCatalog = serde_json::from_str(json)?;
        Ok(Self::load(raw))
    }

    /// Build a catalog from already-normalized tracks
    pub fn from_tracks(tracks: impl IntoIterator<Item = Track>) -> Result<Self> {
        let mut catalog = Self::new();
        for track in tracks {
            if catalog.contains(&track.id) {
                return Err(CoreError::DuplicateTrack(track.id));
            }
            catalog.insert(track);
        }
        Ok(catalog)
    }

    /// Append a locally imported track
    pub fn push_imported(&mut self, track: Track) -> Result<()> {
        if self.contains(&track.id) {
            return Err(CoreError::DuplicateTrack(track.id));
        }
        self.insert(track);
        Ok(())
    }

    fn insert(&mut self, track: Track) {
        self.index.insert(track.id.clone(), self.tracks.len());
        self.tracks.push(track);
    }

    /// Number of tracks
    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    /// Whether the catalog is empty
    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    /// Track at catalog position
    pub fn get(&self, index: usize) -> Option<&Track> {
        self.tracks.get(index)
    }

    /// Catalog position of a track id
    pub fn index_of(&self, id: &TrackId) -> Option<usize> {
        self.index.get(id).copied()
    }

    /// Look up a track by id
    pub fn find(&self, id: &TrackId) -> Option<&Track> {
        self.index_of(id).map(|i| &self.tracks[i])
    }

    /// Whether the id is in the catalog
    pub fn contains(&self, id: &TrackId) -> bool {
        self.index.contains_key(id)
    }

    /// Iterate tracks in catalog order
    pub fn iter(&self) -> std::slice::Iter<'_, Track> {
        self.tracks.iter()
    }

    /// All tracks in catalog order
    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    /// Filtered view in catalog order
    pub fn filter(&self, filter: &CatalogFilter, favorites: &FavoritesSet) -> Vec<&Track> {
        self.tracks
            .iter()
            .filter(|t| filter.matches(t, favorites))
            .collect()
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a Track;
    type IntoIter = std::slice::Iter<'a, Track>;

    fn into_iter(self) -> Self::IntoIter {
        self.tracks.iter()
    }
}

/// Filter a catalog by search text and favorites-only flag
///
/// A track is included iff `(!favorites_only || id ∈ favorites)` and the
/// query is empty or a case-insensitive substring of title or artist.
pub fn filter<'a>(
    catalog: &'a Catalog,
    query: &str,
    favorites_only: bool,
    favorites: &FavoritesSet,
) -> Vec<&'a Track> {
    let filter = CatalogFilter {
        query: query.to_string(),
        favorites_only,
    };
    catalog.filter(&filter, favorites)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(tracks: &[&Track]) -> Vec<String> {
        tracks.iter().map(|t| t.id.to_string()).collect()
    }

    #[test]
    fn load_applies_fallbacks() {
        let catalog = Catalog::from_json(
            r#"{ "songs": [
                { "audioURL": "https://cdn/a.mp3" },
                { "id": 7, "title": "Seven", "artist": "Gz", "audioURL": "https://cdn/7.mp3", "artworkURL": "" }
            ] }"#,
        )
        .unwrap();

        let first = catalog.get(0).unwrap();
        assert_eq!(first.id.as_str(), "1");
        assert_eq!(first.title, DEFAULT_TITLE);
        assert_eq!(first.artist, DEFAULT_ARTIST);

        let second = catalog.get(1).unwrap();
        assert_eq!(second.id.as_str(), "7");
        assert_eq!(second.artwork_url, None);
    }

    #[test]
    fn integral_float_ids_match_integer_ids() {
        let catalog = Catalog::from_json(
            r#"{ "songs": [
                { "id": 1.0, "audioURL": "https://cdn/1.mp3" },
                { "id": 2.5, "audioURL": "https://cdn/2.mp3" },
                { "id": 1, "audioURL": "https://cdn/dup.mp3" }
            ] }"#,
        )
        .unwrap();

        assert_eq!(ids(&catalog.iter().collect::<Vec<_>>()), vec!["1", "2.5"]);
    }

    #[test]
    fn load_skips_missing_audio_and_duplicates() {
        let catalog = Catalog::from_json(
            r#"{ "songs": [
                { "id": "a", "audioURL": "https://cdn/a.mp3" },
                { "id": "b" },
                { "id": "a", "audioURL": "https://cdn/other.mp3" },
                { "id": "c", "audioURL": "https://cdn/c.mp3" }
            ] }"#,
        )
        .unwrap();

        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.index_of(&TrackId::new("c")), Some(1));
        assert_eq!(
            catalog.find(&TrackId::new("a")).unwrap().locator.url(),
            Some("https://cdn/a.mp3")
        );
    }

    #[test]
    fn missing_songs_key_is_empty_catalog() {
        let catalog = Catalog::from_json("{}").unwrap();
        assert!(catalog.is_empty());
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(matches!(
            Catalog::from_json("{ songs: "),
            Err(CoreError::Serialization(_))
        ));
    }

    #[test]
    fn filter_matches_title_or_artist_case_insensitively() {
        let catalog = Catalog::from_tracks([
            Track::remote("1", "Night Drive", "Kid Gz", "u1"),
            Track::remote("2", "Sunrise", "DRIVER", "u2"),
            Track::remote("3", "Morning", "Nobody", "u3"),
        ])
        .unwrap();

        let view = filter(&catalog, "  DRIVE ", false, &FavoritesSet::new());
        assert_eq!(ids(&view), vec!["1", "2"]);
    }

    #[test]
    fn favorites_only_intersects_with_query() {
        let catalog = Catalog::from_tracks([
            Track::remote("1", "Night Drive", "Kid Gz", "u1"),
            Track::remote("2", "Sunrise", "Kid Gz", "u2"),
            Track::remote("3", "Morning", "Nobody", "u3"),
        ])
        .unwrap();
        let favorites: FavoritesSet = ["2", "3"].into_iter().map(TrackId::new).collect();

        assert_eq!(ids(&filter(&catalog, "", true, &favorites)), vec!["2", "3"]);
        assert_eq!(ids(&filter(&catalog, "kid", true, &favorites)), vec!["2"]);
    }

    #[test]
    fn push_imported_rejects_duplicate() {
        let mut catalog = Catalog::from_tracks([Track::remote("1", "A", "B", "u1")]).unwrap();
        let duplicate = Track::remote("1", "Other", "B", "u2");
        assert!(matches!(
            catalog.push_imported(duplicate),
            Err(CoreError::DuplicateTrack(_))
        ));
        assert_eq!(catalog.len(), 1);
    }
}
