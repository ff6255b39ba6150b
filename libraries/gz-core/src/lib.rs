//! GZ Player Core
//!
//! Platform-agnostic core types, catalog handling and persistence contracts
//! for GZ Player.
//!
//! # Architecture
//!
//! The core crate defines:
//! - **Domain Types**: `Track`, `TrackId`, `AudioLocator`, `FavoritesSet`, `LastPlayed`
//! - **Catalog**: normalization of the remote song document and filtered views
//! - **Persistence Contract**: the `SessionStore` trait implemented by `gz-storage`
//! - **Error Handling**: Unified `CoreError` and `Result` types
//!
//! # Example
//!
//! ```rust
//! use gz_core::{Catalog, CatalogFilter, FavoritesSet};
//!
//! let json = r#"{ "songs": [
//!     { "id": "a", "title": "Night Drive", "artist": "Kid Gz", "audioURL": "https://cdn/a.mp3" },
//!     { "title": "Sunrise", "audioURL": "https://cdn/b.mp3" }
//! ] }"#;
//!
//! let catalog = Catalog::from_json(json).unwrap();
//! assert_eq!(catalog.len(), 2);
//!
//! let filter = CatalogFilter::with_query("drive");
//! let view = catalog.filter(&filter, &FavoritesSet::new());
//! assert_eq!(view.len(), 1);
//! assert_eq!(view[0].title, "Night Drive");
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod catalog;
pub mod error;
pub mod traits;
pub mod types;

// Re-export commonly used types
pub use catalog::{filter, Catalog, CatalogFilter, RawCatalog, RawTrack};
pub use error::{CoreError, Result};
pub use traits::SessionStore;
pub use types::{AudioLocator, FavoritesSet, LastPlayed, Track, TrackId};
