//! GZ Player CLI Library
//!
//! Configuration, catalog/storage wiring and the command implementations
//! behind the `gz` binary.
//!
//! This library exposes the core components for testing purposes.

pub mod commands;
pub mod config;
pub mod error;
pub mod session;

// Re-export commonly used types for convenience
pub use commands::{ListRow, PlayOptions, PlaybackSummary, StatusReport};
pub use config::GzConfig;
pub use error::{CliError, Result};
