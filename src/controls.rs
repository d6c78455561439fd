//! Device control record.
//!
//! The fan/LED controller is driven by a small record held in the control
//! store: an automatic-mode flag, a humidity threshold for automatic mode,
//! and the manual on/off state. Updates are partial: a [`ControlPatch`]
//! carries only the fields that change.

use serde::{Deserialize, Serialize};

use crate::app::ports::ConfigError;
use crate::sample::Sample;

/// Default humidity threshold (%) above which the fan runs in auto mode.
pub const DEFAULT_THRESHOLD_HUMIDITY: u8 = 75;

/// Persisted control state for one device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControlRecord {
    /// Controller decides fan state from humidity when set.
    pub auto_mode: bool,
    /// Relative humidity (%) above which auto mode runs the fan.
    pub threshold_humidity: u8,
    /// Manual fan state (only meaningful when `auto_mode` is off).
    #[serde(rename = "status")]
    pub fan_on: bool,
}

impl Default for ControlRecord {
    fn default() -> Self {
        Self::with_threshold(DEFAULT_THRESHOLD_HUMIDITY)
    }
}

impl ControlRecord {
    pub fn with_threshold(threshold_humidity: u8) -> Self {
        Self {
            auto_mode: false,
            threshold_humidity,
            fan_on: false,
        }
    }

    /// Merge a patch; absent fields keep their current value.
    pub fn apply(&mut self, patch: &ControlPatch) {
        if let Some(v) = patch.auto_mode {
            self.auto_mode = v;
        }
        if let Some(v) = patch.threshold_humidity {
            self.threshold_humidity = v;
        }
        if let Some(v) = patch.fan_on {
            self.fan_on = v;
        }
    }

    /// Whether the fan should be running for this sample.
    ///
    /// Auto mode compares humidity strictly above the threshold; manual
    /// mode follows the manual switch.
    pub fn fan_demand(&self, sample: &Sample) -> bool {
        if self.auto_mode {
            sample.humidity_pct > f64::from(self.threshold_humidity)
        } else {
            self.fan_on
        }
    }
}

/// Partial update of a [`ControlRecord`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ControlPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auto_mode: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub threshold_humidity: Option<u8>,
    #[serde(default, rename = "status", skip_serializing_if = "Option::is_none")]
    pub fan_on: Option<bool>,
}

impl ControlPatch {
    pub fn auto_mode(on: bool) -> Self {
        Self {
            auto_mode: Some(on),
            ..Self::default()
        }
    }

    pub fn threshold_humidity(pct: u8) -> Self {
        Self {
            threshold_humidity: Some(pct),
            ..Self::default()
        }
    }

    pub fn fan_on(on: bool) -> Self {
        Self {
            fan_on: Some(on),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.auto_mode.is_none() && self.threshold_humidity.is_none() && self.fan_on.is_none()
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.threshold_humidity.is_some_and(|t| t > 100) {
            return Err(ConfigError::ValidationFailed(
                "threshold_humidity must be 0–100",
            ));
        }
        Ok(())
    }
}
