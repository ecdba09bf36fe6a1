//! Durable key-value slots.
//!
//! The store persists one JSON blob under one string key. Anything that can
//! get, set, and remove a string by key can back it:
//!
//! | Backend | Use |
//! |---------|-----|
//! | [`MemoryStorage`] | Tests, and hosts with no persistence |
//! | [`FileStorage`] | Native hosts (CLI); one file per key in a data directory |
//! | `LocalStorage` | Browser `window.localStorage` (`web` feature, wasm32 only) |

mod file;
mod memory;

#[cfg(all(target_arch = "wasm32", feature = "web"))]
mod local;

pub use file::FileStorage;
pub use memory::MemoryStorage;

#[cfg(all(target_arch = "wasm32", feature = "web"))]
pub use local::LocalStorage;

use crate::error::StorageError;

/// A string-valued key-value store, shaped like the browser `Storage` API.
pub trait KeyValueStorage: Send + Sync {
    /// Read the value stored under `key`, `None` if the key is absent.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store cannot be read.
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Overwrite the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store rejects the write.
    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove `key`. Removing an absent key is not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store cannot be modified.
    fn remove_item(&self, key: &str) -> Result<(), StorageError>;
}

impl<T: KeyValueStorage + ?Sized> KeyValueStorage for std::sync::Arc<T> {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get_item(key)
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set_item(key, value)
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        (**self).remove_item(key)
    }
}
