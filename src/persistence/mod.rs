//! Key/value storage for scores and settings
//!
//! Backends:
//! - `MemoryStore`: in-process map (tests, headless runs)
//! - `FileStore`: one JSON document on disk (native)
//! - `LocalStore`: browser LocalStorage (wasm32)
//!
//! Callers treat storage as best-effort: a failing backend must never stop a game.

use std::collections::BTreeMap;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// No storage available in this environment
    Unavailable,
    /// Reading or writing the backing medium failed
    Io(String),
    /// The backend refused the write (quota, private mode, ...)
    Rejected(String),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unavailable => write!(f, "storage unavailable"),
            Self::Io(msg) => write!(f, "storage I/O failed: {}", msg),
            Self::Rejected(msg) => write!(f, "storage rejected write: {}", msg),
        }
    }
}

impl std::error::Error for StoreError {}

pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
}

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// A store that fails every call, standing in for blocked storage
#[derive(Debug, Clone, Copy, Default)]
pub struct UnavailableStore;

impl KeyValueStore for UnavailableStore {
    fn get(&self, _key: &str) -> Result<Option<String>, StoreError> {
        Err(StoreError::Unavailable)
    }

    fn set(&mut self, _key: &str, _value: &str) -> Result<(), StoreError> {
        Err(StoreError::Unavailable)
    }
}

/// All keys in one JSON object on disk, rewritten on every `set`
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Clone)]
pub struct FileStore {
    path: std::path::PathBuf,
}

#[cfg(not(target_arch = "wasm32"))]
impl FileStore {
    pub fn new(path: impl Into<std::path::PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn read_all(&self) -> Result<BTreeMap<String, String>, StoreError> {
        match std::fs::read_to_string(&self.path) {
            Ok(json) => serde_json::from_str(&json).map_err(|e| StoreError::Io(e.to_string())),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(StoreError::Io(e.to_string())),
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.read_all()?.remove(key))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut entries = self.read_all()?;
        entries.insert(key.to_string(), value.to_string());
        let json =
            serde_json::to_string_pretty(&entries).map_err(|e| StoreError::Io(e.to_string()))?;
        std::fs::write(&self.path, json).map_err(|e| StoreError::Io(e.to_string()))
    }
}

/// Browser LocalStorage
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStore;

#[cfg(target_arch = "wasm32")]
impl LocalStore {
    fn storage() -> Result<web_sys::Storage, StoreError> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
            .ok_or(StoreError::Unavailable)
    }
}

#[cfg(target_arch = "wasm32")]
impl KeyValueStore for LocalStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Self::storage()?
            .get_item(key)
            .map_err(|e| StoreError::Io(format!("{:?}", e)))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        Self::storage()?
            .set_item(key, value)
            .map_err(|e| StoreError::Rejected(format!("{:?}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_round_trip() {
        let mut store = MemoryStore::new();
        assert_eq!(store.get("k"), Ok(None));
        store.set("k", "v").unwrap();
        assert_eq!(store.get("k"), Ok(Some("v".to_string())));
    }

    #[test]
    fn test_unavailable_store_errors() {
        let mut store = UnavailableStore;
        assert_eq!(store.get("k"), Err(StoreError::Unavailable));
        assert_eq!(store.set("k", "v"), Err(StoreError::Unavailable));
        assert_eq!(StoreError::Unavailable.to_string(), "storage unavailable");
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn test_file_store_persists_between_instances() {
        let path =
            std::env::temp_dir().join(format!("snake_duel_store_{}.json", std::process::id()));
        let _ = std::fs::remove_file(&path);

        let mut store = FileStore::new(&path);
        assert_eq!(store.get("best"), Ok(None));
        store.set("best", "12").unwrap();
        store.set("other", "x").unwrap();

        let reopened = FileStore::new(&path);
        assert_eq!(reopened.get("best"), Ok(Some("12".to_string())));
        assert_eq!(reopened.get("other"), Ok(Some("x".to_string())));
        let _ = std::fs::remove_file(&path);
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn test_file_store_corrupt_file_is_error() {
        let path =
            std::env::temp_dir().join(format!("snake_duel_corrupt_{}.json", std::process::id()));
        std::fs::write(&path, "not json").unwrap();
        let store = FileStore::new(&path);
        assert!(matches!(store.get("best"), Err(StoreError::Io(_))));
        let _ = std::fs::remove_file(&path);
    }
}
