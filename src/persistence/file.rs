//! JSON file store (native)
//!
//! The whole key-value map is one JSON object. Writes go to `<path>.tmp`
//! first and are renamed over the save, so a crash mid-write leaves the
//! previous save intact.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use super::{PersistenceError, ProgressionStore};

/// File-backed progression store
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl JsonFileStore {
    /// Open (or start) a save at `path`. A missing or corrupt file starts
    /// empty; the next write replaces it.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = match fs::read_to_string(&path) {
            Ok(json) => match serde_json::from_str::<BTreeMap<String, String>>(&json) {
                Ok(entries) => {
                    log::info!("Loaded {} progress entries from {}", entries.len(), path.display());
                    entries
                }
                Err(e) => {
                    log::warn!("Ignoring corrupt save {}: {}", path.display(), e);
                    BTreeMap::new()
                }
            },
            Err(_) => {
                log::info!("No save at {}, starting fresh", path.display());
                BTreeMap::new()
            }
        };
        Self { path, entries }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self) -> Result<(), PersistenceError> {
        let json = serde_json::to_string_pretty(&self.entries)?;
        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);
        let written = fs::write(&tmp, json).and_then(|()| fs::rename(&tmp, &self.path));
        if written.is_err() {
            let _ = fs::remove_file(&tmp);
        }
        written.map_err(PersistenceError::from)
    }
}

impl ProgressionStore for JsonFileStore {
    fn load_string(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn save_string(&mut self, key: &str, value: &str) -> Result<(), PersistenceError> {
        self.entries.insert(key.to_string(), value.to_string());
        self.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::{KEY_CURRENT_SKIN, KEY_TOTAL_COINS};

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("coin-runner-{}-{}.json", name, std::process::id()))
    }

    #[test]
    fn test_values_survive_reopen() {
        let path = temp_path("reopen");
        let _ = fs::remove_file(&path);

        let mut store = JsonFileStore::open(&path);
        store.save_int(KEY_TOTAL_COINS, 17).unwrap();
        store.save_string(KEY_CURRENT_SKIN, "blue").unwrap();

        let reopened = JsonFileStore::open(&path);
        assert_eq!(reopened.load_int(KEY_TOTAL_COINS), 17);
        assert_eq!(reopened.load_string(KEY_CURRENT_SKIN).as_deref(), Some("blue"));

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_corrupt_file_starts_empty() {
        let path = temp_path("corrupt");
        fs::write(&path, "{{{ nope").unwrap();

        let store = JsonFileStore::open(&path);
        assert_eq!(store.load_int(KEY_TOTAL_COINS), 0);
        assert!(store.load_string(KEY_CURRENT_SKIN).is_none());

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_failed_rename_cleans_tmp() {
        // A directory at the save path makes the rename fail
        let path = temp_path("dir-target");
        let _ = fs::remove_dir_all(&path);
        fs::create_dir_all(&path).unwrap();
        let mut tmp = path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);

        let mut store = JsonFileStore::open(&path);
        let err = store.save_int(KEY_TOTAL_COINS, 3).unwrap_err();
        assert!(matches!(err, PersistenceError::Io(_)));
        assert!(!tmp.exists());
        assert_eq!(store.load_int(KEY_TOTAL_COINS), 3);

        let _ = fs::remove_dir_all(&path);
    }

    #[test]
    fn test_write_into_missing_dir_fails() {
        let mut store = JsonFileStore::open("/definitely/not/here/save.json");
        let err = store.save_int(KEY_TOTAL_COINS, 1).unwrap_err();
        assert!(matches!(err, PersistenceError::Io(_)));
        // In-memory value is still readable
        assert_eq!(store.load_int(KEY_TOTAL_COINS), 1);
    }
}
