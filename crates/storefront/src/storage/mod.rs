//! Persistent key-value storage for client-side state.
//!
//! # Keys
//!
//! Every key is namespaced: the cart lives at `"{namespace}:cart"`, which with
//! the default namespace is `@RocketShoes:cart`. An undecodable cart found at
//! startup is copied to `"{namespace}:cart.corrupt"`.
//!
//! # Backends
//!
//! - [`FileKv`] - one JSON file per key, written atomically
//! - [`MemoryKv`] - process-local map, for tests and throwaway sessions
//!
//! Values are opaque strings; callers own serialization.

mod file;
mod memory;

pub use file::FileKv;
pub use memory::MemoryKv;

use core::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Logical name of the stored cart snapshot.
pub const CART_KEY: &str = "cart";

/// Errors that can occur when reading or writing stored state.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Filesystem operation failed.
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Value could not be encoded for storage.
    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Backend cannot be used (e.g. a poisoned lock).
    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

/// A namespaced storage key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StorageKey {
    namespace: String,
    name: String,
}

impl StorageKey {
    #[must_use]
    pub fn new(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            name: name.into(),
        }
    }

    /// Key of the cart snapshot within `namespace`.
    #[must_use]
    pub fn cart(namespace: impl Into<String>) -> Self {
        Self::new(namespace, CART_KEY)
    }

    /// Key holding the last undecodable value found under this one.
    #[must_use]
    pub fn corrupt_backup(&self) -> Self {
        Self::new(self.namespace.clone(), format!("{}.corrupt", self.name))
    }

    #[must_use]
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for StorageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.namespace, self.name)
    }
}

/// Synchronous key-value store holding serialized snapshots.
pub trait PersistentKv: Send + Sync {
    /// Read the value stored under `key`, or `None` if nothing is stored.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    fn load(&self, key: &StorageKey) -> Result<Option<String>, StorageError>;

    /// Replace the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the value was not durably written.
    fn save(&self, key: &StorageKey, value: &str) -> Result<(), StorageError>;
}
