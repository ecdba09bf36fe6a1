//! Store configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All optional:
//! - `UNIDEMY_STATE_KEY` - Storage key for the persisted blob (default: `unidemy-state`)
//! - `UNIDEMY_DATA_DIR` - Directory for [`FileStorage`](crate::FileStorage) (default: `.unidemy`)
//! - `UNIDEMY_REHYDRATE` - `replay` or `snapshot` (default: `replay`)

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use thiserror::Error;

/// Storage key the web client has always used.
pub const DEFAULT_STATE_KEY: &str = "unidemy-state";

/// Default data directory for native hosts, relative to the working directory.
pub const DEFAULT_DATA_DIR: &str = ".unidemy";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// How a persisted blob is turned back into state on startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RehydrateMode {
    /// Replay `LOGIN`, then one `ADD_TO_WISHLIST` per saved listing, then one
    /// `ADD_TO_CART` per cart line, through the reducer. Stored cart lines that
    /// share an ID are merged by summing their quantities.
    #[default]
    Replay,
    /// Restore the stored lists directly. Stored lines that share an ID keep
    /// only the first occurrence.
    Snapshot,
}

impl fmt::Display for RehydrateMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Replay => write!(f, "replay"),
            Self::Snapshot => write!(f, "snapshot"),
        }
    }
}

impl FromStr for RehydrateMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "replay" => Ok(Self::Replay),
            "snapshot" => Ok(Self::Snapshot),
            _ => Err(format!("invalid rehydrate mode: {s} (expected replay or snapshot)")),
        }
    }
}

/// State container configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Key of the durable slot holding the persisted blob
    pub storage_key: String,
    /// Directory used by file-backed storage
    pub data_dir: PathBuf,
    /// Rehydration strategy
    pub rehydrate: RehydrateMode,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STATE_KEY.to_string(),
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            rehydrate: RehydrateMode::default(),
        }
    }
}

impl StoreConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let storage_key = get_or_default(&get, "UNIDEMY_STATE_KEY", DEFAULT_STATE_KEY);
        if storage_key.trim().is_empty() {
            return Err(ConfigError::InvalidEnvVar(
                "UNIDEMY_STATE_KEY".to_string(),
                "must not be empty".to_string(),
            ));
        }

        let data_dir = PathBuf::from(get_or_default(&get, "UNIDEMY_DATA_DIR", DEFAULT_DATA_DIR));
        let rehydrate = get_or_default(&get, "UNIDEMY_REHYDRATE", "replay")
            .parse::<RehydrateMode>()
            .map_err(|e| ConfigError::InvalidEnvVar("UNIDEMY_REHYDRATE".to_string(), e))?;

        Ok(Self {
            storage_key,
            data_dir,
            rehydrate,
        })
    }

    /// Builder method to set the data directory.
    #[must_use]
    pub fn with_data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.data_dir = dir.into();
        self
    }

    /// Builder method to set the rehydration strategy.
    #[must_use]
    pub const fn with_rehydrate(mut self, mode: RehydrateMode) -> Self {
        self.rehydrate = mode;
        self
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a variable with a default value.
fn get_or_default(get: &impl Fn(&str) -> Option<String>, key: &str, default: &str) -> String {
    get(key).unwrap_or_else(|| default.to_string())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = StoreConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, StoreConfig::default());
        assert_eq!(config.storage_key, "unidemy-state");
        assert_eq!(config.rehydrate, RehydrateMode::Replay);
    }

    #[test]
    fn test_overrides() {
        let config = StoreConfig::from_lookup(lookup(&[
            ("UNIDEMY_STATE_KEY", "staging-state"),
            ("UNIDEMY_DATA_DIR", "/var/lib/unidemy"),
            ("UNIDEMY_REHYDRATE", "Snapshot"),
        ]))
        .unwrap();
        assert_eq!(config.storage_key, "staging-state");
        assert_eq!(config.data_dir, PathBuf::from("/var/lib/unidemy"));
        assert_eq!(config.rehydrate, RehydrateMode::Snapshot);
    }

    #[test]
    fn test_invalid_rehydrate_mode() {
        let err = StoreConfig::from_lookup(lookup(&[("UNIDEMY_REHYDRATE", "merge")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(ref var, _) if var == "UNIDEMY_REHYDRATE"));
    }

    #[test]
    fn test_empty_state_key_rejected() {
        assert!(StoreConfig::from_lookup(lookup(&[("UNIDEMY_STATE_KEY", " ")])).is_err());
    }

    #[test]
    fn test_rehydrate_mode_display_round_trips() {
        for mode in [RehydrateMode::Replay, RehydrateMode::Snapshot] {
            assert_eq!(mode.to_string().parse::<RehydrateMode>().unwrap(), mode);
        }
    }
}
