//! GZ Player Catalog Client
//!
//! Fetches the song catalog document (`{ "songs": [...] }`) over HTTP or
//! reads it from disk, and normalizes it into a `gz_core::Catalog`.
//!
//! One request per fetch: failures are returned to the caller, which shows
//! them in the list view. There are no retries.
//!
//! # Example
//!
//! ```ignore
//! use gz_catalog_client::{CatalogClient, CatalogClientConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = CatalogClient::new(CatalogClientConfig::new("https://gz.example.com/songs.json"))?;
//!
//!     let catalog = client.fetch().await?;
//!     println!("Found {} tracks", catalog.len());
//!
//!     Ok(())
//! }
//! ```

mod client;
mod error;

// Re-export main types
pub use client::{CatalogClient, CatalogClientConfig, DEFAULT_TIMEOUT};
pub use error::{CatalogClientError, Result};
