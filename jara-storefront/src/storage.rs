//! Client-side key/value persistence
//!
//! Two lifetimes exist: device storage (recent addresses, recent searches,
//! voice analytics, the cart) and session storage (session id, dedup keys).
//! Both sit behind [`KeyValueStore`]; [`FileStore`] keeps one JSON file per
//! key, [`MemoryStore`] backs session storage and tests.

use crate::error::StorageError;
use dashmap::DashMap;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};
use std::sync::Arc;

// ============================================================================
// Keys
// ============================================================================

pub const RECENT_ADDRESSES_KEY: &str = "jara_recent_addresses";
pub const RECENT_SEARCHES_KEY: &str = "recentSearches";
pub const VOICE_ANALYTICS_KEY: &str = "voiceSearchAnalytics";
pub const CART_KEY: &str = "jara_cart";
pub const SESSION_ID_KEY: &str = "jara_session_id";
pub const VOICE_DEDUP_KEY: &str = "jara_voice_seen";

/// Raw string storage
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

fn check_key(key: &str) -> Result<(), StorageError> {
    let valid = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-' || c == ':');
    if valid {
        Ok(())
    } else {
        Err(StorageError::InvalidKey(key.to_string()))
    }
}

// ============================================================================
// Backends
// ============================================================================

/// One `<key>.json` file per key under a directory
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Open (and create) the storage directory
    pub fn open(dir: impl AsRef<Path>) -> Result<Self, StorageError> {
        let dir = dir.as_ref().to_path_buf();
        std::fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, StorageError> {
        check_key(key)?;
        Ok(self.dir.join(format!("{}.json", key.replace(':', "_"))))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.path_for(key)?;
        match std::fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        // Write-then-rename so a crash never leaves a truncated file behind
        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, value)?;
        std::fs::rename(&tmp, &path)?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        match std::fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: DashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        check_key(key)?;
        Ok(self.entries.get(key).map(|v| v.value().clone()))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        check_key(key)?;
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        check_key(key)?;
        self.entries.remove(key);
        Ok(())
    }
}

// ============================================================================
// Typed facade
// ============================================================================

/// JSON view over a [`KeyValueStore`]
#[derive(Clone)]
pub struct Storage {
    backend: Arc<dyn KeyValueStore>,
}

impl Storage {
    pub fn new(backend: Arc<dyn KeyValueStore>) -> Self {
        Self { backend }
    }

    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStore::new()))
    }

    /// Device storage rooted at `dir`
    pub fn open_dir(dir: impl AsRef<Path>) -> Result<Self, StorageError> {
        Ok(Self::new(Arc::new(FileStore::open(dir)?)))
    }

    pub fn load<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StorageError> {
        match self.backend.get(key)? {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    /// Load a value, treating a missing or corrupt entry as the default
    pub fn load_or_default<T: DeserializeOwned + Default>(&self, key: &str) -> T {
        match self.load(key) {
            Ok(Some(value)) => value,
            Ok(None) => T::default(),
            Err(e) => {
                tracing::warn!(key, error = %e, "Discarding unreadable stored value");
                T::default()
            }
        }
    }

    pub fn save<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<(), StorageError> {
        let raw = serde_json::to_string(value)?;
        self.backend.set(key, &raw)
    }

    pub fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.backend.remove(key)
    }
}

impl std::fmt::Debug for Storage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Storage").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_store_roundtrip_and_remove() {
        let dir = tempfile::tempdir().unwrap();
        let storage = Storage::open_dir(dir.path()).unwrap();

        storage.save(RECENT_SEARCHES_KEY, &vec!["suya", "amala"]).unwrap();
        let loaded: Vec<String> = storage.load(RECENT_SEARCHES_KEY).unwrap().unwrap();
        assert_eq!(loaded, vec!["suya", "amala"]);

        storage.remove(RECENT_SEARCHES_KEY).unwrap();
        assert!(storage.load::<Vec<String>>(RECENT_SEARCHES_KEY).unwrap().is_none());
        // Removing twice is fine
        storage.remove(RECENT_SEARCHES_KEY).unwrap();
    }

    #[test]
    fn test_corrupt_entry_falls_back_to_default() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("jara_cart.json"), "{not json").unwrap();
        let storage = Storage::open_dir(dir.path()).unwrap();

        assert!(storage.load::<Vec<String>>(CART_KEY).is_err());
        let fallback: Vec<String> = storage.load_or_default(CART_KEY);
        assert!(fallback.is_empty());
    }

    #[test]
    fn test_rejects_path_like_keys() {
        let storage = Storage::in_memory();
        assert!(matches!(
            storage.save("../escape", &1),
            Err(StorageError::InvalidKey(_))
        ));
    }

    #[test]
    fn test_memory_store_is_isolated_per_instance() {
        let a = Storage::in_memory();
        let b = Storage::in_memory();
        a.save(SESSION_ID_KEY, "abc").unwrap();
        assert!(b.load::<String>(SESSION_ID_KEY).unwrap().is_none());
    }
}
