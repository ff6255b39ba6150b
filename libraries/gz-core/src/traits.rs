/// Core traits for GZ Player
use crate::error::Result;
use crate::types::{FavoritesSet, LastPlayed};

/// Durable projections of a playback session
///
/// Implementers persist the favorites set and the last-played record.
/// Callers treat every error as "storage unavailable": they log it and keep
/// working from in-memory state, so implementations should fail fast rather
/// than retry.
pub trait SessionStore {
    /// Load the favorites set (empty if never saved)
    fn load_favorites(&self) -> Result<FavoritesSet>;

    /// Overwrite the whole favorites set
    fn save_favorites(&mut self, favorites: &FavoritesSet) -> Result<()>;

    /// Load the last-played record, if any
    fn load_last_played(&self) -> Result<Option<LastPlayed>>;

    /// Overwrite the last-played record
    fn save_last_played(&mut self, record: &LastPlayed) -> Result<()>;
}

impl<S: SessionStore + ?Sized> SessionStore for Box<S> {
    fn load_favorites(&self) -> Result<FavoritesSet> {
        (**self).load_favorites()
    }

    fn save_favorites(&mut self, favorites: &FavoritesSet) -> Result<()> {
        (**self).save_favorites(favorites)
    }

    fn load_last_played(&self) -> Result<Option<LastPlayed>> {
        (**self).load_last_played()
    }

    fn save_last_played(&mut self, record: &LastPlayed) -> Result<()> {
        (**self).save_last_played(record)
    }
}
