//! Error types for the catalog client.

use thiserror::Error;

/// Errors that can occur while fetching or reading the catalog.
#[derive(Error, Debug)]
pub enum CatalogClientError {
    /// HTTP request failed (connection refused, timeout, ...)
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Server answered with a non-success status
    #[error("Catalog server returned HTTP {status}")]
    ServerError { status: u16 },

    /// Invalid catalog URL
    #[error("Invalid catalog URL: {0}")]
    InvalidUrl(String),

    /// Document is not a valid catalog
    #[error("Failed to parse catalog: {0}")]
    Parse(String),

    /// IO error reading a local catalog file
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for catalog client operations.
pub type Result<T> = std::result::Result<T, CatalogClientError>;
