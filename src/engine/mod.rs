//! Environmental derivation engine.
//!
//! Maps one `(temperature, humidity)` pair to VPD, absolute humidity, a
//! growth score and a status class. Everything here is a pure function of
//! its arguments: no I/O, no interior state, no dependence on call order.
//! An [`Engine`] is plain data and can be shared across threads freely.
//!
//! The score and the status are computed from the **rounded** VPD, so the
//! reported value and its classification always agree.

pub mod psychrometrics;
pub mod score;
pub mod status;

use serde::{Deserialize, Serialize};

use crate::error::{Error, SampleError};
use crate::sample::{DerivedMetrics, Sample};

pub use psychrometrics::{absolute_humidity_g_m3, round2, vpd_kpa};
pub use score::{GrowthBands, growth_score};
pub use status::{ColorTag, StatusBands, VpdStatus, classify_status};

/// Tunable thresholds for scoring and classification.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct EngineConfig {
    pub growth: GrowthBands,
    pub status: StatusBands,
}

/// Derivation engine bound to a threshold set.
#[derive(Debug, Clone, Copy, Default)]
pub struct Engine {
    config: EngineConfig,
}

impl Engine {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Derive all metrics for a sample.
    pub fn derive(&self, sample: &Sample) -> DerivedMetrics {
        let t = sample.temperature_c;
        let rh = sample.humidity_pct;
        let vpd = vpd_kpa(t, rh);
        DerivedMetrics {
            vpd_kpa: vpd,
            absolute_humidity_g_m3: absolute_humidity_g_m3(t, rh),
            growth_score: self.config.growth.score(t, rh, vpd),
            status: self.config.status.classify(vpd),
        }
    }

    /// Like [`derive`](Self::derive), but rejects non-finite results.
    ///
    /// Validated samples can still overflow `exp` when the temperature sits
    /// just below a formula pole.
    pub fn try_derive(&self, sample: &Sample) -> Result<DerivedMetrics, Error> {
        let m = self.derive(sample);
        if m.vpd_kpa.is_finite() && m.absolute_humidity_g_m3.is_finite() {
            Ok(m)
        } else {
            Err(SampleError::NonFiniteResult.into())
        }
    }
}

/// Derive metrics with the default thresholds.
pub fn derive(sample: &Sample) -> DerivedMetrics {
    Engine::default().derive(sample)
}
