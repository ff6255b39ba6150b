//! `SessionStore` over a key/value backend

use gz_core::{FavoritesSet, LastPlayed, SessionStore};
use tracing::warn;

use crate::kv::KeyValueStore;
use crate::{KEY_FAVORITES, KEY_LAST_PLAYED};

/// Favorites and last-played records stored as JSON values
///
/// Unreadable values (corrupt JSON from an older build, manual edits) read
/// as "nothing saved" with a warning. Backend failures are returned so the
/// caller can fall back to in-memory state.
#[derive(Debug, Clone)]
pub struct KvSessionStore<K> {
    kv: K,
}

impl<K: KeyValueStore> KvSessionStore<K> {
    /// Wrap a key/value backend
    pub fn new(kv: K) -> Self {
        Self { kv }
    }

    /// Borrow the backend
    pub fn inner(&self) -> &K {
        &self.kv
    }

    /// Unwrap the backend
    pub fn into_inner(self) -> K {
        self.kv
    }
}

impl<K: KeyValueStore> SessionStore for KvSessionStore<K> {
    fn load_favorites(&self) -> gz_core::Result<FavoritesSet> {
        let Some(raw) = self.kv.get(KEY_FAVORITES)? else {
            return Ok(FavoritesSet::new());
        };

        match serde_json::from_str(&raw) {
            Ok(favorites) => Ok(favorites),
            Err(e) => {
                warn!(key = KEY_FAVORITES, error = %e, "Discarding unreadable favorites");
                Ok(FavoritesSet::new())
            }
        }
    }

    fn save_favorites(&mut self, favorites: &FavoritesSet) -> gz_core::Result<()> {
        let value = serde_json::to_string(favorites)?;
        self.kv.set(KEY_FAVORITES, value)?;
        Ok(())
    }

    fn load_last_played(&self) -> gz_core::Result<Option<LastPlayed>> {
        let Some(raw) = self.kv.get(KEY_LAST_PLAYED)? else {
            return Ok(None);
        };

        match serde_json::from_str::<Option<LastPlayed>>(&raw) {
            Ok(record) => Ok(record),
            Err(e) => {
                warn!(key = KEY_LAST_PLAYED, error = %e, "Discarding unreadable last-played record");
                Ok(None)
            }
        }
    }

    fn save_last_played(&mut self, record: &LastPlayed) -> gz_core::Result<()> {
        let value = serde_json::to_string(record)?;
        self.kv.set(KEY_LAST_PLAYED, value)?;
        Ok(())
    }
}
