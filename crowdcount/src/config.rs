//! Configuration for the crowd counter
//!
//! Loaded from JSON; any missing field falls back to its default.

use crate::error::{CounterError, Result};
use centrack::TrackerConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CounterConfig {
    /// Association and eviction thresholds for the tracker
    pub tracker: TrackerConfig,

    /// Log a progress line every this many frames (0 disables)
    pub report_interval: u64,
}

impl Default for CounterConfig {
    fn default() -> Self {
        Self {
            tracker: TrackerConfig::default(),
            report_interval: 100,
        }
    }
}

impl CounterConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json_str(&json)?;
        log::info!("Loaded counter config from {}", path.display());
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.tracker.max_distance.is_nan() || self.tracker.max_distance < 0.0 {
            return Err(CounterError::config(format!(
                "tracker.max_distance must be non-negative, got {}",
                self.tracker.max_distance
            )));
        }
        Ok(())
    }
}
