//! Growth score: a 10–100 health heuristic built from band violations.
//!
//! Each of the three bands (temperature, humidity, VPD) carries an
//! independent penalty. Every band is checked; penalties add up and the
//! total is floored.

use serde::{Deserialize, Serialize};

/// Band limits and penalties for [`GrowthBands::score`].
///
/// Limits are inclusive: a value equal to a limit is inside the band.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GrowthBands {
    pub temperature_min_c: f64,
    pub temperature_max_c: f64,
    pub humidity_min_pct: f64,
    pub humidity_max_pct: f64,
    pub vpd_min_kpa: f64,
    pub vpd_max_kpa: f64,
    pub temperature_penalty: u8,
    pub humidity_penalty: u8,
    pub vpd_penalty: u8,
    /// Lowest score ever reported.
    pub floor: u8,
}

impl Default for GrowthBands {
    fn default() -> Self {
        Self {
            temperature_min_c: 18.0,
            temperature_max_c: 30.0,
            humidity_min_pct: 40.0,
            humidity_max_pct: 80.0,
            vpd_min_kpa: 0.5,
            vpd_max_kpa: 1.5,
            temperature_penalty: 20,
            humidity_penalty: 20,
            vpd_penalty: 30,
            floor: 10,
        }
    }
}

const MAX_SCORE: u8 = 100;

impl GrowthBands {
    /// Score one `(T, RH, VPD)` triple.
    pub fn score(&self, temperature_c: f64, humidity_pct: f64, vpd_kpa: f64) -> u8 {
        let mut score = i16::from(MAX_SCORE);

        if temperature_c < self.temperature_min_c || temperature_c > self.temperature_max_c {
            score -= i16::from(self.temperature_penalty);
        }
        if humidity_pct < self.humidity_min_pct || humidity_pct > self.humidity_max_pct {
            score -= i16::from(self.humidity_penalty);
        }
        if vpd_kpa < self.vpd_min_kpa || vpd_kpa > self.vpd_max_kpa {
            score -= i16::from(self.vpd_penalty);
        }

        score.max(i16::from(self.floor)).min(i16::from(MAX_SCORE)) as u8
    }

    /// Number of bands the triple falls outside of (0–3).
    pub fn violations(&self, temperature_c: f64, humidity_pct: f64, vpd_kpa: f64) -> u8 {
        u8::from(temperature_c < self.temperature_min_c || temperature_c > self.temperature_max_c)
            + u8::from(humidity_pct < self.humidity_min_pct || humidity_pct > self.humidity_max_pct)
            + u8::from(vpd_kpa < self.vpd_min_kpa || vpd_kpa > self.vpd_max_kpa)
    }
}

/// Score with the default bands.
pub fn growth_score(temperature_c: f64, humidity_pct: f64, vpd_kpa: f64) -> u8 {
    GrowthBands::default().score(temperature_c, humidity_pct, vpd_kpa)
}
