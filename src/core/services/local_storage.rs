//! Browser `window.localStorage` backend.

use web_sys::Storage;

use super::storage::KeyValueStore;
use crate::error::{BoardError, Result};

#[derive(Debug, Clone)]
pub struct LocalStorage {
    storage: Storage,
}

impl LocalStorage {
    /// The window's local storage, if the browser exposes one.
    pub fn open() -> Result<Self> {
        let window = web_sys::window().ok_or_else(|| BoardError::storage("no window"))?;
        let storage = window
            .local_storage()
            .map_err(|e| BoardError::storage(format!("localStorage unavailable: {:?}", e)))?
            .ok_or_else(|| BoardError::storage("localStorage unavailable"))?;
        Ok(Self { storage })
    }
}

impl KeyValueStore for LocalStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        self.storage
            .get_item(key)
            .map_err(|e| BoardError::storage(format!("failed to read '{}': {:?}", key, e)))
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.storage
            .set_item(key, value)
            .map_err(|e| BoardError::storage(format!("failed to write '{}': {:?}", key, e)))
    }
}
