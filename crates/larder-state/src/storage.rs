//! Durable key-value storage capability.
//!
//! Favorites (and anything else that must survive a reload) go through
//! this seam instead of an ambient global, so state types stay testable
//! without a real storage backend.

use thiserror::Error;

/// Storage operation errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StorageError {
    /// The backend could not be opened.
    #[error("storage unavailable: {0}")]
    Unavailable(String),

    /// A read or write failed.
    #[error("storage operation failed: {0}")]
    Operation(String),
}

/// A durable string-blob store scoped to the browsing client.
pub trait KeyValueStorage {
    /// Read the blob under a key, `None` when absent.
    fn load(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Write the blob under a key, replacing any prior value.
    fn store(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

impl<S: KeyValueStorage + ?Sized> KeyValueStorage for &S {
    fn load(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).load(key)
    }

    fn store(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).store(key, value)
    }
}

/// In-memory storage for hosts and tests.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: std::cell::RefCell<std::collections::HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-seed an entry (test fixture hook).
    pub fn with_entry(self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.entries.borrow_mut().insert(key.into(), value.into());
        self
    }
}

impl KeyValueStorage for MemoryStorage {
    fn load(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn store(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Storage backed by the platform key-value store.
#[cfg(target_arch = "wasm32")]
pub struct KvStorage {
    store: spin_sdk::key_value::Store,
}

#[cfg(target_arch = "wasm32")]
impl KvStorage {
    /// Open the default store.
    pub fn open_default() -> Result<Self, StorageError> {
        let store = spin_sdk::key_value::Store::open_default()
            .map_err(|e| StorageError::Unavailable(e.to_string()))?;
        Ok(Self { store })
    }
}

#[cfg(target_arch = "wasm32")]
impl KeyValueStorage for KvStorage {
    fn load(&self, key: &str) -> Result<Option<String>, StorageError> {
        match self.store.get(key) {
            Ok(Some(bytes)) => String::from_utf8(bytes)
                .map(Some)
                .map_err(|e| StorageError::Operation(e.to_string())),
            Ok(None) => Ok(None),
            Err(e) => Err(StorageError::Operation(e.to_string())),
        }
    }

    fn store(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.store
            .set(key, value.as_bytes())
            .map_err(|e| StorageError::Operation(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_storage_round_trip() {
        let storage = MemoryStorage::new();
        assert_eq!(storage.load("missing").unwrap(), None);

        storage.store("key", "value").unwrap();
        assert_eq!(storage.load("key").unwrap().as_deref(), Some("value"));

        storage.store("key", "replaced").unwrap();
        assert_eq!(storage.load("key").unwrap().as_deref(), Some("replaced"));
    }

    #[test]
    fn test_with_entry_seeds_fixture() {
        let storage = MemoryStorage::new().with_entry("a", "1");
        assert_eq!(storage.load("a").unwrap().as_deref(), Some("1"));
    }
}
