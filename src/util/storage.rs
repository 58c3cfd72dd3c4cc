//! Durable key-value storage capability backing persisted sessions.
//!
//! SYSTEM CONTEXT
//! ==============
//! The session store never touches `web_sys` directly. It receives an optional
//! [`KeyValueStorage`]: [`BrowserStorage`] in the hydrate build, nothing during
//! SSR, and [`MemoryStorage`] in tests.
//!
//! TRADE-OFFS
//! ==========
//! `BrowserStorage` re-resolves `window.localStorage` on every call instead of
//! holding a `web_sys::Storage`, which keeps the handle `Send + Sync` so stores
//! can live in Leptos context.

#[cfg(test)]
#[path = "storage_test.rs"]
mod storage_test;

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Error returned by [`KeyValueStorage`] operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StorageError {
    /// No storage medium is reachable (no window, or storage disabled).
    #[error("storage unavailable")]
    Unavailable,
    /// Reading an entry was rejected by the storage medium.
    #[error("failed to read {key}: {reason}")]
    Read { key: String, reason: String },
    /// Typically a quota or privacy-mode rejection from the browser.
    #[error("failed to write {key}: {reason}")]
    Write { key: String, reason: String },
    /// Removing an entry was rejected by the storage medium.
    #[error("failed to remove {key}: {reason}")]
    Remove { key: String, reason: String },
}

/// String-keyed, string-valued durable storage.
pub trait KeyValueStorage: Send + Sync {
    /// Read `key`, returning `None` when no entry exists.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Write `value` under `key`, overwriting any existing entry.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove `key`. Removing a missing key succeeds.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// In-process storage. Clones share the same entries, so a clone handed to a
/// second store behaves like the same browser profile after a reload.
#[derive(Clone, Debug, Default)]
pub struct MemoryStorage {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn entries(&self) -> MutexGuard<'_, HashMap<String, String>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries().contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries().is_empty()
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries().insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.entries().remove(key);
        Ok(())
    }
}

/// The browser's `window.localStorage`.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserStorage;

#[cfg(feature = "hydrate")]
fn local_storage() -> Result<web_sys::Storage, StorageError> {
    let window = web_sys::window().ok_or(StorageError::Unavailable)?;
    match window.local_storage() {
        Ok(Some(storage)) => Ok(storage),
        _ => Err(StorageError::Unavailable),
    }
}

#[cfg(feature = "hydrate")]
impl KeyValueStorage for BrowserStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        local_storage()?
            .get_item(key)
            .map_err(|e| StorageError::Read { key: key.to_owned(), reason: format!("{e:?}") })
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        local_storage()?
            .set_item(key, value)
            .map_err(|e| StorageError::Write { key: key.to_owned(), reason: format!("{e:?}") })
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        local_storage()?
            .remove_item(key)
            .map_err(|e| StorageError::Remove { key: key.to_owned(), reason: format!("{e:?}") })
    }
}

#[cfg(not(feature = "hydrate"))]
impl KeyValueStorage for BrowserStorage {
    fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
        Err(StorageError::Unavailable)
    }

    fn set(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
        Err(StorageError::Unavailable)
    }

    fn remove(&self, _key: &str) -> Result<(), StorageError> {
        Err(StorageError::Unavailable)
    }
}

/// Browser storage when running in a browser context with `localStorage`
/// enabled; `None` during SSR and native builds.
pub fn browser_storage() -> Option<BrowserStorage> {
    #[cfg(feature = "hydrate")]
    {
        match local_storage() {
            Ok(_) => Some(BrowserStorage),
            Err(e) => {
                log::warn!("localStorage not reachable: {e}");
                None
            }
        }
    }
    #[cfg(not(feature = "hydrate"))]
    {
        None
    }
}
