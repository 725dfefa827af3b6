//! Engine configuration
//!
//! The default configuration runs the base pipeline: LIKE conditions are
//! rejected at evaluation, ORDER BY and GROUP BY are parsed but not
//! applied, and ungrouped aggregates are only logged.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// File could not be read
    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Contents are not a valid configuration
    #[error("Invalid config: {0}")]
    Invalid(#[from] serde_json::Error),
}

/// Query engine configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    /// Evaluate LIKE conditions with `%` / `_` wildcards (default: false)
    pub like_matching: bool,

    /// Sort results by ORDER BY fields (default: false)
    pub apply_order_by: bool,

    /// Fail queries that use an aggregate without GROUP BY (default: false)
    pub reject_ungrouped_aggregate: bool,

    /// Emit structured log lines (default: true)
    pub log_events: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            like_matching: false,
            apply_order_by: false,
            reject_ungrouped_aggregate: false,
            log_events: true,
        }
    }
}

impl EngineConfig {
    /// Base pipeline plus LIKE matching and ORDER BY sorting
    pub fn extended() -> Self {
        Self {
            like_matching: true,
            apply_order_by: true,
            ..Default::default()
        }
    }

    /// Same configuration with logging turned off
    pub fn quiet(self) -> Self {
        Self {
            log_events: false,
            ..self
        }
    }

    /// Parses a JSON configuration; missing keys take their defaults
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads a JSON configuration file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&contents)
    }
}
