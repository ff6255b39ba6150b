//! Error types for playback management

use gz_core::{CoreError, TrackId};
use thiserror::Error;

/// Playback errors
#[derive(Debug, Error)]
pub enum PlaybackError {
    /// Navigation target is not in the catalog
    #[error("Track not in catalog: {0}")]
    InvalidReference(TrackId),

    /// Row or catalog position past the end
    #[error("Index {index} out of range (len {len})")]
    IndexOutOfRange {
        /// Requested position
        index: usize,
        /// Number of entries
        len: usize,
    },

    /// The media driver refused to start (e.g. autoplay policy)
    #[error("Playback rejected: {0}")]
    PlaybackRejected(String),

    /// No audio source is loaded in the media driver
    #[error("No source loaded")]
    NoSourceLoaded,

    /// Core error (catalog, storage)
    #[error(transparent)]
    Core(#[from] CoreError),
}

/// Result type for playback operations
pub type Result<T> = std::result::Result<T, PlaybackError>;
