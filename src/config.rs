//! Run configuration
//!
//! Values come from an optional TOML file and are then overridden by
//! command-line flags.
//!
//! # Example solvebench.toml
//!
//! ```toml
//! repetitions = 10
//! group_keys = [1, 2, 3, 4, 5]
//! ```

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Problem types run when none are configured
pub const DEFAULT_GROUP_KEYS: [i64; 5] = [1, 2, 3, 4, 5];

/// Invalid configuration values
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("repetitions must be >= 1, got {0}")]
    ZeroRepetitions(u32),

    #[error("at least one group key is required")]
    NoGroupKeys,

    #[error("group key {0} is listed more than once")]
    DuplicateGroupKey(i64),
}

/// How many times to run each instance, and which problem types to run
///
/// # Example
/// ```
/// use solvebench::config::RunConfig;
///
/// let config = RunConfig::default();
/// assert_eq!(config.repetitions, 1);
/// assert_eq!(config.group_keys, vec![1, 2, 3, 4, 5]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RunConfig {
    /// Solver invocations per instance; every repetition contributes a sample
    pub repetitions: u32,

    /// Problem types, run in this order; each one is a summary group
    pub group_keys: Vec<i64>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            repetitions: 1,
            group_keys: DEFAULT_GROUP_KEYS.to_vec(),
        }
    }
}

impl RunConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;

        Self::from_toml_str(&content)
            .with_context(|| format!("Invalid configuration in {}", path.display()))
    }

    /// Load configuration from a TOML string
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse TOML")
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.repetitions == 0 {
            return Err(ConfigError::ZeroRepetitions(self.repetitions));
        }

        if self.group_keys.is_empty() {
            return Err(ConfigError::NoGroupKeys);
        }

        let mut seen = HashSet::new();
        for &key in &self.group_keys {
            if !seen.insert(key) {
                return Err(ConfigError::DuplicateGroupKey(key));
            }
        }

        Ok(())
    }
}
