//! Configuration structures
//!
//! Loaded by `rotaboard-infra::config` from TOML/JSON files and environment
//! overrides. Every field has a default so a partial file is valid.

use std::collections::{BTreeMap, HashSet};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_BASE_INTERVAL_MS, DEFAULT_JOIN_TIMEOUT_MS, DEFAULT_RETRY_DELAY_MS,
    DEFAULT_WIDGET_TIMEOUT_MS,
};
use crate::errors::{Result, RotaboardError};
use crate::types::Rank;

/// Top-level application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub rotation: RotationConfig,
    #[serde(default)]
    pub widgets: Vec<WidgetConfig>,
}

/// Cadence settings for the rotation scheduler
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RotationConfig {
    /// Interval multiplied by the upcoming widget's rank after a success
    #[serde(default = "default_base_interval_ms")]
    pub base_interval_ms: u64,
    /// Fixed delay after a failed or timed out cycle
    #[serde(default = "default_retry_delay_ms")]
    pub retry_delay_ms: u64,
    /// Upper bound on a single widget invocation
    #[serde(default = "default_widget_timeout_ms")]
    pub widget_timeout_ms: u64,
    /// How long `stop` waits for the loop task to finish
    #[serde(default = "default_join_timeout_ms")]
    pub join_timeout_ms: u64,
}

/// A widget declared in configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WidgetConfig {
    pub name: String,
    pub url: String,
    #[serde(default)]
    pub rank: Rank,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub headers: BTreeMap<String, String>,
}

const fn default_base_interval_ms() -> u64 {
    DEFAULT_BASE_INTERVAL_MS
}

const fn default_retry_delay_ms() -> u64 {
    DEFAULT_RETRY_DELAY_MS
}

const fn default_widget_timeout_ms() -> u64 {
    DEFAULT_WIDGET_TIMEOUT_MS
}

const fn default_join_timeout_ms() -> u64 {
    DEFAULT_JOIN_TIMEOUT_MS
}

impl Default for RotationConfig {
    fn default() -> Self {
        Self {
            base_interval_ms: default_base_interval_ms(),
            retry_delay_ms: default_retry_delay_ms(),
            widget_timeout_ms: default_widget_timeout_ms(),
            join_timeout_ms: default_join_timeout_ms(),
        }
    }
}

impl RotationConfig {
    pub const fn base_interval(&self) -> Duration {
        Duration::from_millis(self.base_interval_ms)
    }

    pub const fn retry_delay(&self) -> Duration {
        Duration::from_millis(self.retry_delay_ms)
    }

    pub const fn widget_timeout(&self) -> Duration {
        Duration::from_millis(self.widget_timeout_ms)
    }

    pub const fn join_timeout(&self) -> Duration {
        Duration::from_millis(self.join_timeout_ms)
    }
}

impl Config {
    /// Check cross-field constraints that serde cannot express.
    ///
    /// # Errors
    /// Returns `RotaboardError::Config` describing the first violation.
    pub fn validate(&self) -> Result<()> {
        if self.rotation.base_interval_ms == 0 {
            return Err(RotaboardError::Config("base_interval_ms must be greater than zero".into()));
        }
        if self.rotation.widget_timeout_ms == 0 {
            return Err(RotaboardError::Config(
                "widget_timeout_ms must be greater than zero".into(),
            ));
        }

        let mut seen = HashSet::new();
        for widget in &self.widgets {
            if widget.name.trim().is_empty() {
                return Err(RotaboardError::Config("widget name must not be empty".into()));
            }
            if !seen.insert(widget.name.as_str()) {
                return Err(RotaboardError::Config(format!(
                    "duplicate widget name: {}",
                    widget.name
                )));
            }
        }

        Ok(())
    }
}
