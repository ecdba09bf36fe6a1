//! Error types for the state container.
//!
//! None of these reach a caller of [`Store::dispatch`](crate::Store::dispatch):
//! storage failures are logged and recorded, a corrupt blob falls back to the
//! default state. They surface only from the storage backends themselves and
//! from [`try_use_app`](crate::try_use_app).

use thiserror::Error;

/// A durable key-value slot rejected a read or write.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Filesystem operation failed.
    #[error("I/O error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Key cannot be mapped to a slot (empty, or contains path separators).
    #[error("invalid storage key: {0:?}")]
    InvalidKey(String),

    /// The backing store is not available (no window, storage disabled).
    #[error("storage unavailable: {0}")]
    Unavailable(String),

    /// The backing store refused the write (quota exceeded, read-only).
    #[error("storage write rejected: {0}")]
    Rejected(String),
}

/// State container errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The store was looked up outside of any [`AppProvider`](crate::AppProvider) scope.
    #[error("use_app must be used within an AppProvider scope")]
    NoProvider,

    /// The persisted blob could not be parsed.
    #[error("persisted state is corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),

    /// The durable slot could not be read or written.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
}

/// Result type alias for `StoreError`.
pub type Result<T> = std::result::Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_error_display() {
        assert_eq!(
            StoreError::NoProvider.to_string(),
            "use_app must be used within an AppProvider scope"
        );

        let err = StoreError::from(StorageError::Rejected("quota exceeded".to_string()));
        assert_eq!(
            err.to_string(),
            "storage error: storage write rejected: quota exceeded"
        );
    }

    #[test]
    fn test_corrupt_wraps_serde_error() {
        let err = serde_json::from_str::<serde_json::Value>("{not json").map_err(StoreError::from);
        assert!(matches!(err, Err(StoreError::Corrupt(_))));
    }
}
