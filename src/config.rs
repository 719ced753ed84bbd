// SPDX-License-Identifier: MPL-2.0
//! Center configuration, loadable from a `toast.toml` file.
//!
//! Both knobs of the subsystem are explicit here rather than hardcoded:
//! the store capacity and the removal delay. The defaults reproduce the
//! reference behavior — a single visible notification, and a removal delay
//! long enough that entries effectively stay until dismissed by hand.

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

/// Default maximum number of concurrent notifications.
pub const DEFAULT_CAPACITY: usize = 1;

/// Default delay between dismissal and physical removal, in milliseconds.
pub const DEFAULT_REMOVAL_DELAY_MS: u64 = 1_000_000;

/// Tuning knobs for a [`crate::NotificationCenter`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Maximum number of notifications held at once. Enqueuing beyond this
    /// evicts the oldest entries immediately.
    #[serde(default = "default_capacity")]
    pub capacity: usize,
    /// How long a dismissed notification lingers before removal.
    #[serde(default = "default_removal_delay_ms")]
    pub removal_delay_ms: u64,
}

fn default_capacity() -> usize {
    DEFAULT_CAPACITY
}

fn default_removal_delay_ms() -> u64 {
    DEFAULT_REMOVAL_DELAY_MS
}

impl Default for Config {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            removal_delay_ms: DEFAULT_REMOVAL_DELAY_MS,
        }
    }
}

impl Config {
    /// Returns the removal delay as a [`Duration`].
    #[must_use]
    pub fn removal_delay(&self) -> Duration {
        Duration::from_millis(self.removal_delay_ms)
    }
}

/// Loads a configuration from a TOML file.
///
/// Malformed content degrades to the defaults rather than failing; only a
/// missing or unreadable file is reported as an error.
pub fn load_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    Ok(toml::from_str(&content).unwrap_or_default())
}

/// Saves a configuration to a TOML file, creating parent directories.
pub fn save_to_path(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config)?;
    fs::write(path, content)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn defaults_match_reference_constants() {
        let config = Config::default();
        assert_eq!(config.capacity, 1);
        assert_eq!(config.removal_delay_ms, 1_000_000);
        assert_eq!(config.removal_delay(), Duration::from_millis(1_000_000));
    }

    #[test]
    fn save_and_load_round_trip() {
        let config = Config {
            capacity: 3,
            removal_delay_ms: 5_000,
        };
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("nested").join("toast.toml");

        save_to_path(&config, &config_path).expect("failed to save config");
        let loaded = load_from_path(&config_path).expect("failed to load config");

        assert_eq!(loaded, config);
    }

    #[test]
    fn load_from_path_returns_default_on_invalid_toml() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("toast.toml");
        fs::write(&config_path, "not = valid = toml").expect("failed to write invalid toml");

        let loaded = load_from_path(&config_path).expect("load should not error");
        assert_eq!(loaded, Config::default());
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("toast.toml");
        fs::write(&config_path, "capacity = 4\n").expect("failed to write config");

        let loaded = load_from_path(&config_path).expect("failed to load config");
        assert_eq!(loaded.capacity, 4);
        assert_eq!(loaded.removal_delay_ms, DEFAULT_REMOVAL_DELAY_MS);
    }
}
