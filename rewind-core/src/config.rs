//! Construction-time configuration for histories.

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::HistoryError;

/// Capacity used when none is specified.
pub const DEFAULT_CAPACITY: usize = 100;

fn default_capacity() -> usize {
    DEFAULT_CAPACITY
}

/// Options a history is built from. Only the initial capacity is configurable;
/// after construction use `set_capacity`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HistoryConfig {
    #[serde(default = "default_capacity")]
    pub initial_capacity: usize,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            initial_capacity: DEFAULT_CAPACITY,
        }
    }
}

impl HistoryConfig {
    pub fn with_capacity(initial_capacity: usize) -> Result<Self, HistoryError> {
        let config = Self { initial_capacity };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), HistoryError> {
        if self.initial_capacity == 0 {
            tracing::warn!(
                capacity = self.initial_capacity,
                "history capacity must be positive"
            );
            return Err(HistoryError::InvalidCapacity(self.initial_capacity));
        }
        Ok(())
    }

    /// Parse and validate a JSON config document.
    pub fn from_json_str(json: &str) -> anyhow::Result<Self> {
        let config: HistoryConfig = serde_json::from_str(json).context("parse history config")?;
        config.validate().context("validate history config")?;
        Ok(config)
    }
}

/// Load a history config from disk.
pub fn load_config(path: impl AsRef<Path>) -> anyhow::Result<HistoryConfig> {
    let path = path.as_ref();
    let data = fs::read_to_string(path)
        .with_context(|| format!("read history config: {}", path.display()))?;
    HistoryConfig::from_json_str(&data)
        .with_context(|| format!("load history config: {}", path.display()))
}
