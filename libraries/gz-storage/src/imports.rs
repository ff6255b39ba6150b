//! Imported track library
//!
//! Locally imported audio is persisted through the same key/value channel as
//! the session records, with payloads base64-encoded. Imported tracks carry
//! `AudioLocator::Imported`, never a remote URL.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use gz_core::{AudioLocator, Track, TrackId};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use crate::error::{Result, StorageError};
use crate::kv::KeyValueStore;
use crate::KEY_IMPORTED;

/// Persisted form of an imported track
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportedRecord {
    /// Track id (also the payload key)
    pub id: String,
    /// Display title
    pub title: String,
    /// Display artist
    pub artist: String,
    /// Payload MIME type
    pub mime_type: String,
    /// Base64 payload
    pub data: String,
}

impl ImportedRecord {
    fn to_track(&self) -> Track {
        Track {
            id: TrackId::new(self.id.clone()),
            title: self.title.clone(),
            artist: self.artist.clone(),
            locator: AudioLocator::Imported {
                key: self.id.clone(),
                mime_type: self.mime_type.clone(),
            },
            artwork_url: None,
        }
    }
}

/// Imported tracks over a key/value backend
#[derive(Debug, Clone)]
pub struct ImportLibrary<K> {
    kv: K,
}

impl<K: KeyValueStore> ImportLibrary<K> {
    /// Wrap a key/value backend
    pub fn new(kv: K) -> Self {
        Self { kv }
    }

    fn records(&self) -> Result<Vec<ImportedRecord>> {
        let Some(raw) = self.kv.get(KEY_IMPORTED)? else {
            return Ok(Vec::new());
        };

        match serde_json::from_str(&raw) {
            Ok(records) => Ok(records),
            Err(e) => {
                warn!(key = KEY_IMPORTED, error = %e, "Discarding unreadable imported tracks");
                Ok(Vec::new())
            }
        }
    }

    fn write_records(&mut self, records: &[ImportedRecord]) -> Result<()> {
        self.kv.set(KEY_IMPORTED, serde_json::to_string(records)?)
    }

    /// Store a new imported payload and return its track
    pub fn import(
        &mut self,
        title: &str,
        artist: &str,
        mime_type: &str,
        bytes: &[u8],
    ) -> Result<Track> {
        let record = ImportedRecord {
            id: format!("imported-{}", Uuid::new_v4()),
            title: if title.trim().is_empty() {
                gz_core::types::DEFAULT_TITLE.to_string()
            } else {
                title.to_string()
            },
            artist: if artist.trim().is_empty() {
                gz_core::types::DEFAULT_ARTIST.to_string()
            } else {
                artist.to_string()
            },
            mime_type: mime_type.to_string(),
            data: STANDARD.encode(bytes),
        };

        let mut records = self.records()?;
        records.push(record.clone());
        self.write_records(&records)?;

        info!(track_id = %record.id, bytes = bytes.len(), "Imported track");
        Ok(record.to_track())
    }

    /// All imported tracks, in import order
    pub fn load_tracks(&self) -> Result<Vec<Track>> {
        Ok(self.records()?.iter().map(ImportedRecord::to_track).collect())
    }

    /// Decoded payload bytes for a locator key
    pub fn payload(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let Some(record) = self.records()?.into_iter().find(|r| r.id == key) else {
            return Ok(None);
        };

        STANDARD
            .decode(record.data.as_bytes())
            .map(Some)
            .map_err(|e| StorageError::Decode(format!("payload {}: {}", key, e)))
    }

    /// `data:` URL for a locator key, loadable by a browser media element
    pub fn data_url(&self, key: &str) -> Result<String> {
        self.records()?
            .into_iter()
            .find(|r| r.id == key)
            .map(|r| format!("data:{};base64,{}", r.mime_type, r.data))
            .ok_or_else(|| StorageError::not_found("Imported track", key))
    }

    /// Delete an imported track, returning whether it existed
    pub fn remove(&mut self, id: &TrackId) -> Result<bool> {
        let mut records = self.records()?;
        let before = records.len();
        records.retain(|r| r.id != id.as_str());

        if records.len() == before {
            return Ok(false);
        }
        self.write_records(&records)?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemoryStore;

    #[test]
    fn import_persists_payload_and_builds_imported_track() {
        let mut library = ImportLibrary::new(MemoryStore::new());
        let track = library
            .import("Voice memo", "", "audio/mpeg", &[0xFF, 0xFB, 0x90])
            .unwrap();

        assert!(track.id.as_str().starts_with("imported-"));
        assert_eq!(track.artist, gz_core::types::DEFAULT_ARTIST);
        let AudioLocator::Imported { key, mime_type } = &track.locator else {
            panic!("expected imported locator");
        };
        assert_eq!(key, track.id.as_str());
        assert_eq!(mime_type, "audio/mpeg");

        assert_eq!(library.payload(key).unwrap(), Some(vec![0xFF, 0xFB, 0x90]));
        assert_eq!(library.data_url(key).unwrap(), "data:audio/mpeg;base64,//uQ");
        assert_eq!(library.load_tracks().unwrap(), vec![track]);
    }

    #[test]
    fn remove_deletes_only_matching_record() {
        let mut library = ImportLibrary::new(MemoryStore::new());
        let a = library.import("A", "X", "audio/ogg", b"a").unwrap();
        let b = library.import("B", "X", "audio/ogg", b"b").unwrap();

        assert!(library.remove(&a.id).unwrap());
        assert!(!library.remove(&a.id).unwrap());
        assert_eq!(library.load_tracks().unwrap(), vec![b]);
        assert!(library.payload(a.id.as_str()).unwrap().is_none());
    }

    #[test]
    fn missing_data_url_is_not_found() {
        let library = ImportLibrary::new(MemoryStore::new());
        assert!(matches!(
            library.data_url("nope"),
            Err(StorageError::NotFound { .. })
        ));
    }
}
