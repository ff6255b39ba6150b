/// Core error types for GZ Player
use thiserror::Error;

use crate::types::TrackId;

/// Result type alias using `CoreError`
pub type Result<T> = std::result::Result<T, CoreError>;

/// Core error type for GZ Player
#[derive(Error, Debug)]
pub enum CoreError {
    /// The catalog document could not be fetched or parsed
    #[error("Catalog load failed: {0}")]
    CatalogLoad(String),

    /// A track reference does not resolve in the catalog
    #[error("Track not found in catalog: {0}")]
    InvalidReference(TrackId),

    /// A track with this id is already in the catalog
    #[error("Duplicate track id: {0}")]
    DuplicateTrack(TrackId),

    /// Persistence read/write failure
    #[error("Storage unavailable: {0}")]
    Storage(String),

    /// Serialization errors
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
}

impl CoreError {
    /// Create a catalog load error
    pub fn catalog_load(msg: impl Into<String>) -> Self {
        Self::CatalogLoad(msg.into())
    }

    /// Create a storage error
    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }
}
