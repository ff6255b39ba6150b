//! GZ Player Storage
//!
//! Key/value persistence for the durable projections of a playback session.
//!
//! # Architecture
//!
//! - **`KeyValueStore`**: the leaf adapter (string keys, string values), the
//!   same shape as browser `localStorage`
//! - **`MemoryStore` / `JsonFileStore`**: in-process and single-file backends
//! - **`KvSessionStore`**: implements `gz_core::SessionStore` on top of any
//!   `KeyValueStore` (favorites + last-played)
//! - **`ImportLibrary`**: locally imported audio, payloads stored as base64
//!
//! # Example
//!
//! ```rust
//! use gz_core::{SessionStore, TrackId};
//! use gz_storage::{KvSessionStore, MemoryStore};
//!
//! let mut session = KvSessionStore::new(MemoryStore::new());
//!
//! let mut favorites = session.load_favorites().unwrap();
//! favorites.toggle(&TrackId::new("t1"));
//! session.save_favorites(&favorites).unwrap();
//!
//! assert!(session.load_favorites().unwrap().contains(&TrackId::new("t1")));
//! ```

mod error;
mod imports;
mod kv;
mod session;

pub use error::{Result, StorageError};
pub use imports::{ImportLibrary, ImportedRecord};
pub use kv::{JsonFileStore, KeyValueStore, MemoryStore};
pub use session::KvSessionStore;

/// Favorites key (JSON array of track ids)
pub const KEY_FAVORITES: &str = "gz_favs_v2";

/// Last-played key (`{"id": ..., "t": ...}`)
pub const KEY_LAST_PLAYED: &str = "gz_last_v2";

/// Imported tracks key (JSON array of records with base64 payloads)
pub const KEY_IMPORTED: &str = "gz_imported_v1";
