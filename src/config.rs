//! Dashboard configuration parameters
//!
//! All tunable parameters for the greenhouse monitor. Values can be
//! overridden from a JSON file on the command line or through the
//! [`ConfigPort`](crate::app::ports::ConfigPort).

use serde::{Deserialize, Serialize};

use crate::app::ports::ConfigError;
use crate::controls::DEFAULT_THRESHOLD_HUMIDITY;
use crate::engine::EngineConfig;
use crate::feed::FEED_DEPTH;
use crate::history::HISTORY_CAPACITY;

/// Core dashboard configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Control-store key of the fan/LED controller.
    pub device_name: String,
    /// Samples requested from the telemetry source at startup.
    pub history_limit: usize,
    /// Threshold used when the store holds no control record yet.
    pub default_threshold_humidity: u8,
    /// Maximum samples drained from the feed per refresh (0 = unbounded).
    pub feed_drain_batch: usize,
    /// Score and status thresholds.
    pub engine: EngineConfig,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            device_name: "led_fan".into(),
            history_limit: HISTORY_CAPACITY,
            default_threshold_humidity: DEFAULT_THRESHOLD_HUMIDITY,
            feed_drain_batch: FEED_DEPTH,
            engine: EngineConfig::default(),
        }
    }
}

impl DashboardConfig {
    /// Range-check every field. Invalid values are rejected, never clamped.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.device_name.trim().is_empty() {
            return Err(ConfigError::ValidationFailed("device_name must not be empty"));
        }
        if !(1..=HISTORY_CAPACITY).contains(&self.history_limit) {
            return Err(ConfigError::ValidationFailed(
                "history_limit must be 1–history capacity",
            ));
        }
        if self.default_threshold_humidity > 100 {
            return Err(ConfigError::ValidationFailed(
                "default_threshold_humidity must be 0–100",
            ));
        }

        let g = &self.engine.growth;
        let limits = [
            g.temperature_min_c,
            g.temperature_max_c,
            g.humidity_min_pct,
            g.humidity_max_pct,
            g.vpd_min_kpa,
            g.vpd_max_kpa,
        ];
        if limits.iter().any(|v| !v.is_finite()) {
            return Err(ConfigError::ValidationFailed("growth band limits must be finite"));
        }
        if g.temperature_min_c > g.temperature_max_c {
            return Err(ConfigError::ValidationFailed(
                "growth temperature_min_c must be <= temperature_max_c",
            ));
        }
        if g.humidity_min_pct > g.humidity_max_pct {
            return Err(ConfigError::ValidationFailed(
                "growth humidity_min_pct must be <= humidity_max_pct",
            ));
        }
        if g.vpd_min_kpa > g.vpd_max_kpa {
            return Err(ConfigError::ValidationFailed(
                "growth vpd_min_kpa must be <= vpd_max_kpa",
            ));
        }
        if g.floor > 100 {
            return Err(ConfigError::ValidationFailed("growth floor must be 0–100"));
        }
        if !self.engine.status.is_ordered() {
            return Err(ConfigError::ValidationFailed(
                "status bands must be finite and strictly increasing",
            ));
        }
        Ok(())
    }
}
