//! Progression persistence
//!
//! Two scalars survive between runs: the coin balance and the selected skin.
//! The simulation talks to storage only through [`ProgressionStore`]:
//! - `MemoryStore`: in-process map (tests, headless runs)
//! - `JsonFileStore`: JSON object on disk (native)
//! - `LocalStorageStore`: browser LocalStorage (wasm32)

use std::collections::BTreeMap;

use thiserror::Error;

#[cfg(not(target_arch = "wasm32"))]
pub mod file;
#[cfg(target_arch = "wasm32")]
pub mod web;

#[cfg(not(target_arch = "wasm32"))]
pub use file::JsonFileStore;
#[cfg(target_arch = "wasm32")]
pub use web::LocalStorageStore;

/// Key for the accumulated coin balance
pub const KEY_TOTAL_COINS: &str = "totalCoins";
/// Key for the selected skin id
pub const KEY_CURRENT_SKIN: &str = "currentSkin";

/// A write that did not reach storage. Never fatal: in-memory counters stay
/// authoritative for the current run.
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("storage serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// Generic key-value persistence consumed by the simulation engine
pub trait ProgressionStore {
    /// Raw string value for `key`, if present
    fn load_string(&self, key: &str) -> Option<String>;

    /// Store a string value
    fn save_string(&mut self, key: &str, value: &str) -> Result<(), PersistenceError>;

    /// Integer value for `key`; 0 when absent or unparsable
    fn load_int(&self, key: &str) -> i64 {
        self.load_string(key)
            .and_then(|s| parse_leading_int(&s))
            .unwrap_or(0)
    }

    /// Store an integer value (as its decimal string)
    fn save_int(&mut self, key: &str, value: i64) -> Result<(), PersistenceError> {
        self.save_string(key, &value.to_string())
    }
}

impl<S: ProgressionStore + ?Sized> ProgressionStore for Box<S> {
    fn load_string(&self, key: &str) -> Option<String> {
        (**self).load_string(key)
    }

    fn save_string(&mut self, key: &str, value: &str) -> Result<(), PersistenceError> {
        (**self).save_string(key, value)
    }

    fn load_int(&self, key: &str) -> i64 {
        (**self).load_int(key)
    }

    fn save_int(&mut self, key: &str, value: i64) -> Result<(), PersistenceError> {
        (**self).save_int(key, value)
    }
}

/// Lenient integer parse: optional sign then leading digits ("12abc" -> 12).
/// Values written by older builds or by hand still load; out-of-range
/// values saturate instead of being dropped.
fn parse_leading_int(s: &str) -> Option<i64> {
    let s = s.trim();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }
    let value = digits[..end].bytes().fold(0i64, |acc, b| {
        acc.saturating_mul(10).saturating_add(i64::from(b - b'0'))
    });
    Some(if negative { -value } else { value })
}

/// In-memory store
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-populated with `entries`
    pub fn with_entries<K, V>(entries: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            entries: entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl ProgressionStore for MemoryStore {
    fn load_string(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn save_string(&mut self, key: &str, value: &str) -> Result<(), PersistenceError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_int_defaults_to_zero() {
        let store = MemoryStore::new();
        assert_eq!(store.load_int(KEY_TOTAL_COINS), 0);
    }

    #[test]
    fn test_int_roundtrip_through_string() {
        let mut store = MemoryStore::new();
        store.save_int(KEY_TOTAL_COINS, 42).unwrap();
        assert_eq!(store.load_string(KEY_TOTAL_COINS).as_deref(), Some("42"));
        assert_eq!(store.load_int(KEY_TOTAL_COINS), 42);
    }

    #[test]
    fn test_lenient_int_parse() {
        assert_eq!(parse_leading_int("12abc"), Some(12));
        assert_eq!(parse_leading_int("  -7 "), Some(-7));
        assert_eq!(parse_leading_int("abc"), None);
        assert_eq!(parse_leading_int(""), None);
        assert_eq!(parse_leading_int("-"), None);

        let store = MemoryStore::with_entries([(KEY_TOTAL_COINS, "garbage")]);
        assert_eq!(store.load_int(KEY_TOTAL_COINS), 0);
    }

    #[test]
    fn test_oversized_int_saturates() {
        assert_eq!(parse_leading_int("99999999999999999999"), Some(i64::MAX));
        assert_eq!(parse_leading_int("9223372036854775807"), Some(i64::MAX));
        assert_eq!(parse_leading_int("-99999999999999999999"), Some(-i64::MAX));

        let store = MemoryStore::with_entries([(KEY_TOTAL_COINS, "99999999999999999999")]);
        assert_eq!(store.load_int(KEY_TOTAL_COINS), i64::MAX);
    }

    #[test]
    fn test_boxed_store_delegates() {
        let mut store: Box<dyn ProgressionStore> = Box::new(MemoryStore::new());
        store.save_string(KEY_CURRENT_SKIN, "red").unwrap();
        assert_eq!(store.load_string(KEY_CURRENT_SKIN).as_deref(), Some("red"));
    }
}
