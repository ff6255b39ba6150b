/// CLI error types
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Catalog error: {0}")]
    Catalog(#[from] gz_catalog_client::CatalogClientError),

    #[error("Playback error: {0}")]
    Playback(#[from] gz_playback::PlaybackError),

    #[error("Unknown track: {0}")]
    UnknownTrack(String),
}
