//! # Browser `localStorage` backend
//!
//! [`LocalStorage`] is the backend the storefront uses when compiled to wasm32
//! with the `web` feature. It is a zero-size handle that looks up
//! `window.localStorage` on every call; the `web_sys::Storage` object itself is
//! not `Send`, so it is never held.
//!
//! A browser with storage disabled (private mode, blocked cookies) reports
//! [`StorageError::Unavailable`]; a full quota reports
//! [`StorageError::Rejected`]. The store logs both and keeps working in memory.

use crate::error::StorageError;
use crate::storage::KeyValueStorage;

/// `window.localStorage` for the current page.
#[derive(Clone, Copy, Debug, Default)]
pub struct LocalStorage;

impl LocalStorage {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    fn storage() -> Result<web_sys::Storage, StorageError> {
        let window = web_sys::window()
            .ok_or_else(|| StorageError::Unavailable("no window".to_string()))?;
        window
            .local_storage()
            .map_err(|e| StorageError::Unavailable(format!("{e:?}")))?
            .ok_or_else(|| StorageError::Unavailable("localStorage disabled".to_string()))
    }
}

impl KeyValueStorage for LocalStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        Self::storage()?
            .get_item(key)
            .map_err(|e| StorageError::Unavailable(format!("{e:?}")))
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        Self::storage()?
            .set_item(key, value)
            .map_err(|e| StorageError::Rejected(format!("{e:?}")))
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        Self::storage()?
            .remove_item(key)
            .map_err(|e| StorageError::Rejected(format!("{e:?}")))
    }
}
