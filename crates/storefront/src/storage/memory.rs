//! In-memory key-value backend.

use std::collections::HashMap;
use std::sync::Mutex;

use super::{PersistentKv, StorageError, StorageKey};

/// Key-value store that lives only as long as the process.
#[derive(Debug, Default)]
pub struct MemoryKv {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryKv {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a value, e.g. a snapshot left by a previous session.
    #[must_use]
    pub fn with_entry(self, key: &StorageKey, value: impl Into<String>) -> Self {
        if let Ok(mut entries) = self.entries.lock() {
            entries.insert(key.to_string(), value.into());
        }
        self
    }
}

impl PersistentKv for MemoryKv {
    fn load(&self, key: &StorageKey) -> Result<Option<String>, StorageError> {
        let entries = self
            .entries
            .lock()
            .map_err(|e| StorageError::Unavailable(e.to_string()))?;
        Ok(entries.get(&key.to_string()).cloned())
    }

    fn save(&self, key: &StorageKey, value: &str) -> Result<(), StorageError> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|e| StorageError::Unavailable(e.to_string()))?;
        entries.insert(key.to_string(), value.to_owned());
        Ok(())
    }
}
