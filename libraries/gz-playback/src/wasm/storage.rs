//! `localStorage` key/value backend

use gz_storage::{KeyValueStore, Result, StorageError};
use web_sys::Storage;

fn unavailable(err: wasm_bindgen::JsValue) -> StorageError {
    StorageError::unavailable(format!("{:?}", err))
}

/// `window.localStorage`
///
/// Private browsing modes and quota limits surface as
/// `StorageError::Unavailable`.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    storage: Storage,
}

impl LocalStorage {
    /// Open the window's local storage
    pub fn open() -> Result<Self> {
        let window = web_sys::window().ok_or_else(|| StorageError::unavailable("no window"))?;
        let storage = window
            .local_storage()
            .map_err(unavailable)?
            .ok_or_else(|| StorageError::unavailable("localStorage disabled"))?;
        Ok(Self { storage })
    }
}

impl KeyValueStore for LocalStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        self.storage.get_item(key).map_err(unavailable)
    }

    fn set(&mut self, key: &str, value: String) -> Result<()> {
        self.storage.set_item(key, &value).map_err(unavailable)
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.storage.remove_item(key).map_err(unavailable)
    }
}
