//! Browser LocalStorage store (wasm32)

use super::{PersistenceError, ProgressionStore};

/// Progression store backed by `window.localStorage`
#[derive(Debug, Default)]
pub struct LocalStorageStore;

impl LocalStorageStore {
    pub fn new() -> Self {
        Self
    }

    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
    }
}

impl ProgressionStore for LocalStorageStore {
    fn load_string(&self, key: &str) -> Option<String> {
        Self::storage().and_then(|s| s.get_item(key).ok().flatten())
    }

    fn save_string(&mut self, key: &str, value: &str) -> Result<(), PersistenceError> {
        let storage = Self::storage()
            .ok_or_else(|| PersistenceError::Unavailable("no localStorage".into()))?;
        storage
            .set_item(key, value)
            .map_err(|e| PersistenceError::Unavailable(format!("set_item({key}) failed: {e:?}")))
    }
}
