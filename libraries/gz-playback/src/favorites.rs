//! Favorites controller
//!
//! Owns the in-memory favorites set and writes the whole set through to the
//! session store on every change. Store failures never roll back the toggle.

use gz_core::{FavoritesSet, SessionStore, TrackId};
use tracing::{debug, warn};

/// Favorites set with write-through persistence
#[derive(Debug, Clone, Default)]
pub struct FavoritesController {
    set: FavoritesSet,
}

impl FavoritesController {
    /// Start from an existing set
    pub fn new(set: FavoritesSet) -> Self {
        Self { set }
    }

    /// Load the persisted set (empty when the store is unavailable)
    pub fn load(store: &dyn SessionStore) -> Self {
        match store.load_favorites() {
            Ok(set) => {
                debug!(count = set.len(), "Loaded favorites");
                Self { set }
            }
            Err(e) => {
                warn!(error = %e, "Favorites unavailable, starting empty");
                Self::default()
            }
        }
    }

    /// Flip membership, persist, and return the new membership
    pub fn toggle(&mut self, id: &TrackId, store: &mut dyn SessionStore) -> bool {
        let favorite = self.set.toggle(id);

        if let Err(e) = store.save_favorites(&self.set) {
            warn!(track_id = %id, error = %e, "Failed to persist favorites");
        }

        favorite
    }

    /// Whether the track is a favorite
    pub fn contains(&self, id: &TrackId) -> bool {
        self.set.contains(id)
    }

    /// Current set
    pub fn set(&self) -> &FavoritesSet {
        &self.set
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gz_storage::{KvSessionStore, MemoryStore};

    #[test]
    fn double_toggle_restores_persisted_value() {
        let mut store = KvSessionStore::new(MemoryStore::new());
        let mut favorites = FavoritesController::load(&store);
        let id = TrackId::new("t1");

        assert!(favorites.toggle(&id, &mut store));
        assert!(store.load_favorites().unwrap().contains(&id));

        assert!(!favorites.toggle(&id, &mut store));
        assert!(store.load_favorites().unwrap().is_empty());
    }

    #[test]
    fn failing_store_keeps_memory_state() {
        let mut store = KvSessionStore::new(MemoryStore::failing());
        let mut favorites = FavoritesController::load(&store);
        let id = TrackId::new("t1");

        assert!(favorites.toggle(&id, &mut store));
        assert!(favorites.contains(&id));
    }
}
