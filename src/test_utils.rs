#![expect(
    clippy::unwrap_used,
    reason = "Test utilities use .unwrap() for brevity"
)]

//! Shared test utilities for `pullcord` unit tests.
//!
//! This module provides common test infrastructure used across multiple test modules.
//! It is only compiled during testing (`#[cfg(test)]`).

use crate::config::CONFIG_DIR_ENV;
use std::sync::Mutex;
use tempfile::TempDir;

/// Global mutex to serialize tests that modify the config dir environment variable.
static CONFIG_DIR_LOCK: Mutex<()> = Mutex::new(());

/// Helper function to create a temporary test directory using tempfile.
/// Returns a `TempDir` that automatically cleans up when dropped.
pub fn create_test_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp directory")
}

/// RAII guard that points `PULLCORD_CONFIG_DIR` at a temp directory for a
/// test scope and restores the original value when dropped.
///
/// # Safety Considerations
///
/// `std::env::set_var` and `std::env::remove_var` are unsafe because other
/// threads may read the environment concurrently. Every test touching the
/// variable holds `CONFIG_DIR_LOCK` for the guard's lifetime, so writes are
/// serialized, and each test gets its own `TempDir`.
pub struct ConfigDirGuard {
    original: Option<String>,
    // Held for the lifetime of the guard
    _lock: std::sync::MutexGuard<'static, ()>,
}

#[expect(
    unsafe_code,
    reason = "Test-only code that modifies environment variables under a global lock"
)]
impl ConfigDirGuard {
    /// Create a new guard that sets the config dir to the given temp directory path.
    pub fn new(temp_dir: &TempDir) -> Self {
        let lock = CONFIG_DIR_LOCK
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);

        let original = std::env::var(CONFIG_DIR_ENV).ok();
        // SAFETY: serialized by CONFIG_DIR_LOCK, restored on drop
        unsafe {
            std::env::set_var(CONFIG_DIR_ENV, temp_dir.path());
        }
        Self {
            original,
            _lock: lock,
        }
    }
}

#[expect(
    unsafe_code,
    reason = "Test-only code that restores environment variables under a global lock"
)]
impl Drop for ConfigDirGuard {
    fn drop(&mut self) {
        // SAFETY: still holding CONFIG_DIR_LOCK
        if let Some(ref original) = self.original {
            unsafe {
                std::env::set_var(CONFIG_DIR_ENV, original);
            }
        } else {
            unsafe {
                std::env::remove_var(CONFIG_DIR_ENV);
            }
        }
    }
}

#[test]
fn test_guard_restores_environment() {
    let before = std::env::var(CONFIG_DIR_ENV).ok();
    {
        let dir = create_test_dir();
        let _guard = ConfigDirGuard::new(&dir);
        assert_eq!(
            std::env::var(CONFIG_DIR_ENV).unwrap(),
            dir.path().to_string_lossy()
        );
    }
    // Another test may hold the lock now, so only check when nothing was set before
    if before.is_none() {
        let lock = CONFIG_DIR_LOCK
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        assert!(std::env::var(CONFIG_DIR_ENV).is_err());
        drop(lock);
    }
}
