//! WASM bindings for gz-playback
//!
//! Runs the player in a browser: an `<audio>` element as the media driver,
//! `window.localStorage` as the key/value backend, and JavaScript callbacks
//! as view subscribers.

pub mod driver;
pub mod player;
pub mod storage;
pub mod types;

pub use driver::HtmlAudioDriver;
pub use player::WasmPlayer;
pub use storage::LocalStorage;
pub use types::WasmTrackRow;
