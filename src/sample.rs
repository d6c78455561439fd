//! Telemetry data model.
//!
//! A [`Sample`] is one temperature/humidity reading as delivered by the
//! telemetry source. It is validated once at the boundary and never
//! mutated afterwards. [`DerivedMetrics`] is what the engine computes
//! from it; it carries no identity beyond the sample it came from.

use serde::{Deserialize, Serialize};

use crate::engine::psychrometrics::{AH_POLE_C, SVP_POLE_C};
use crate::engine::status::VpdStatus;
use crate::error::SampleError;

/// One telemetry reading.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(try_from = "RawSample")]
pub struct Sample {
    /// Air temperature (°C). Not range-checked.
    pub temperature_c: f64,
    /// Relative humidity (%). Nominally 0–100, not clamped.
    pub humidity_pct: f64,
    /// Unix time of the reading in milliseconds.
    pub timestamp_ms: u64,
}

impl Sample {
    /// Validate and build a sample.
    ///
    /// Rejects non-finite inputs and the two temperatures where the
    /// saturation-pressure formulas divide by zero. Physically implausible
    /// but finite values pass through untouched.
    pub fn new(
        temperature_c: f64,
        humidity_pct: f64,
        timestamp_ms: u64,
    ) -> Result<Self, SampleError> {
        if !temperature_c.is_finite() || !humidity_pct.is_finite() {
            return Err(SampleError::NonFinite);
        }
        if temperature_c == SVP_POLE_C || temperature_c == AH_POLE_C {
            return Err(SampleError::SingularTemperature(temperature_c));
        }
        Ok(Self {
            temperature_c,
            humidity_pct,
            timestamp_ms,
        })
    }

    /// The zero reading shown before any telemetry has arrived.
    pub const fn placeholder() -> Self {
        Self {
            temperature_c: 0.0,
            humidity_pct: 0.0,
            timestamp_ms: 0,
        }
    }
}

/// Wire shape accepted from the telemetry backend before validation.
#[derive(Debug, Deserialize)]
struct RawSample {
    #[serde(alias = "temperature")]
    temperature_c: f64,
    #[serde(alias = "humidity")]
    humidity_pct: f64,
    #[serde(default, alias = "created_at_ms")]
    timestamp_ms: u64,
}

impl TryFrom<RawSample> for Sample {
    type Error = SampleError;

    fn try_from(raw: RawSample) -> Result<Self, Self::Error> {
        Sample::new(raw.temperature_c, raw.humidity_pct, raw.timestamp_ms)
    }
}

/// Engine output for one sample.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DerivedMetrics {
    /// Vapor-pressure deficit (kPa), 2 decimals.
    pub vpd_kpa: f64,
    /// Absolute humidity (g/m³), 2 decimals.
    pub absolute_humidity_g_m3: f64,
    /// Composite health heuristic, 10–100.
    pub growth_score: u8,
    /// VPD band classification.
    pub status: VpdStatus,
}

impl DerivedMetrics {
    /// True when the air is dry enough to raise the critical water-loss alert.
    pub fn is_critical(&self) -> bool {
        self.status == VpdStatus::CriticalWaterLoss
    }
}
