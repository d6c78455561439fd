//! VPD status bands.
//!
//! ```text
//!   FungalRisk │ GrowthOnset │   Ideal    │ RapidTranspiration │ CriticalWaterLoss
//!   ──────────0.4───────────0.8──────────1.2──────────────────1.6────────────────▶ kPa
//!              [             ]  (        ]  (                  ]  (
//! ```
//!
//! The growth-onset band is closed on both ends; the bands above it are
//! open below and closed above.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Display colour paired with each status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorTag {
    Blue,
    Cyan,
    Green,
    Yellow,
    Red,
}

impl ColorTag {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Blue => "blue",
            Self::Cyan => "cyan",
            Self::Green => "green",
            Self::Yellow => "yellow",
            Self::Red => "red",
        }
    }
}

impl fmt::Display for ColorTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classification of a VPD value, ordered from wettest to driest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum VpdStatus {
    /// High humidity, fungal risk.
    FungalRisk,
    /// Growth onset.
    GrowthOnset,
    /// Ideal conditions.
    Ideal,
    /// Rapid transpiration.
    RapidTranspiration,
    /// Critical water loss, plants under stress.
    CriticalWaterLoss,
}

impl VpdStatus {
    /// All statuses in ascending VPD order.
    pub const ALL: [VpdStatus; 5] = [
        Self::FungalRisk,
        Self::GrowthOnset,
        Self::Ideal,
        Self::RapidTranspiration,
        Self::CriticalWaterLoss,
    ];

    /// Human-readable label.
    pub const fn label(self) -> &'static str {
        match self {
            Self::FungalRisk => "High humidity / fungal risk",
            Self::GrowthOnset => "Growth onset",
            Self::Ideal => "Ideal conditions",
            Self::RapidTranspiration => "Rapid transpiration",
            Self::CriticalWaterLoss => "Critical water loss / stress",
        }
    }

    pub const fn color(self) -> ColorTag {
        match self {
            Self::FungalRisk => ColorTag::Blue,
            Self::GrowthOnset => ColorTag::Cyan,
            Self::Ideal => ColorTag::Green,
            Self::RapidTranspiration => ColorTag::Yellow,
            Self::CriticalWaterLoss => ColorTag::Red,
        }
    }
}

impl fmt::Display for VpdStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Upper edges of the status bands (kPa).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StatusBands {
    /// Below this: fungal risk. At or above: growth onset.
    pub fungal_below_kpa: f64,
    /// Last value still in growth onset.
    pub onset_max_kpa: f64,
    /// Last value still ideal.
    pub ideal_max_kpa: f64,
    /// Last value still rapid transpiration; above is critical.
    pub transpiration_max_kpa: f64,
}

impl Default for StatusBands {
    fn default() -> Self {
        Self {
            fungal_below_kpa: 0.4,
            onset_max_kpa: 0.8,
            ideal_max_kpa: 1.2,
            transpiration_max_kpa: 1.6,
        }
    }
}

impl StatusBands {
    /// Classify a VPD value. First matching band wins.
    pub fn classify(&self, vpd_kpa: f64) -> VpdStatus {
        if vpd_kpa < self.fungal_below_kpa {
            VpdStatus::FungalRisk
        } else if vpd_kpa <= self.onset_max_kpa {
            VpdStatus::GrowthOnset
        } else if vpd_kpa <= self.ideal_max_kpa {
            VpdStatus::Ideal
        } else if vpd_kpa <= self.transpiration_max_kpa {
            VpdStatus::RapidTranspiration
        } else {
            VpdStatus::CriticalWaterLoss
        }
    }

    /// True when every edge is finite and edges strictly increase.
    pub fn is_ordered(&self) -> bool {
        let edges = [
            self.fungal_below_kpa,
            self.onset_max_kpa,
            self.ideal_max_kpa,
            self.transpiration_max_kpa,
        ];
        edges.iter().all(|e| e.is_finite()) && edges.windows(2).all(|w| w[0] < w[1])
    }
}

/// Classify with the default bands.
pub fn classify_status(vpd_kpa: f64) -> VpdStatus {
    StatusBands::default().classify(vpd_kpa)
}
