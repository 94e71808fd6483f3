//! Key-value preference storage
//!
//! The toggle persists a single string setting. Storage is modelled as a
//! capability: anything implementing [`PreferenceStore`] can back it, and
//! [`Preferences`] hides every failure from callers.
//!
//! # Architecture
//!
//! - `PreferenceStore`: fallible `get`/`set` over string keys and values
//! - `JsonFileStore`: one JSON object on disk, rewritten atomically
//! - `MemoryStore`: process-local map (tests, hosts without a disk)
//! - `NullStore`: stores nothing, for environments with storage disabled
//! - `Preferences`: infallible facade; failures are logged and read as
//!   "no stored value" / "write skipped"

pub mod file_store;
pub mod memory;

pub use file_store::JsonFileStore;
pub use memory::MemoryStore;

use crate::error::Result;
use tracing::warn;

/// A string key-value store
pub trait PreferenceStore {
    /// Read a value; `Ok(None)` when the key was never written
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Write a value
    fn set(&self, key: &str, value: &str) -> Result<()>;
}

/// Store that keeps nothing
#[derive(Debug, Clone, Copy, Default)]
pub struct NullStore;

impl PreferenceStore for NullStore {
    fn get(&self, _key: &str) -> Result<Option<String>> {
        Ok(None)
    }

    fn set(&self, _key: &str, _value: &str) -> Result<()> {
        Ok(())
    }
}

/// Infallible view over a [`PreferenceStore`]
pub struct Preferences {
    store: Box<dyn PreferenceStore>,
}

impl Preferences {
    /// Wrap a store
    pub fn new(store: impl PreferenceStore + 'static) -> Self {
        Self {
            store: Box::new(store),
        }
    }

    /// Preferences that remember nothing
    pub fn disabled() -> Self {
        Self::new(NullStore)
    }

    /// Stored value, or `None` if missing or unreadable
    pub fn get(&self, key: &str) -> Option<String> {
        match self.store.get(key) {
            Ok(value) => value,
            Err(e) => {
                warn!("Failed to read preference '{}': {}", key, e);
                None
            }
        }
    }

    /// Store a value; failures are logged and otherwise ignored
    pub fn set(&self, key: &str, value: &str) {
        if let Err(e) = self.store.set(key, value) {
            warn!("Failed to write preference '{}': {}", key, e);
        }
    }
}

impl std::fmt::Debug for Preferences {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Preferences").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{PullcordError, StringError};

    struct BrokenStore;

    impl PreferenceStore for BrokenStore {
        fn get(&self, _key: &str) -> Result<Option<String>> {
            Err(PullcordError::StorageError(StringError::new("storage disabled")))
        }

        fn set(&self, _key: &str, _value: &str) -> Result<()> {
            Err(PullcordError::StorageError(StringError::new("storage disabled")))
        }
    }

    #[test]
    fn test_broken_store_reads_as_missing() {
        let prefs = Preferences::new(BrokenStore);
        assert_eq!(prefs.get("kms-theme"), None);
        // Must not panic or propagate
        prefs.set("kms-theme", "white");
    }

    #[test]
    fn test_disabled_preferences_forget_writes() {
        let prefs = Preferences::disabled();
        prefs.set("kms-theme", "white");
        assert_eq!(prefs.get("kms-theme"), None);
    }

    #[test]
    fn test_memory_backed_preferences() {
        let prefs = Preferences::new(MemoryStore::default());
        prefs.set("kms-theme", "white");
        assert_eq!(prefs.get("kms-theme").as_deref(), Some("white"));
    }
}
