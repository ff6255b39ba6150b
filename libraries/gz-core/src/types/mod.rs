mod favorites;
mod ids;
mod last_played;
mod track;

pub use favorites::FavoritesSet;
pub use ids::TrackId;
pub use last_played::LastPlayed;
pub use track::{AudioLocator, Track, DEFAULT_ARTIST, DEFAULT_TITLE};
