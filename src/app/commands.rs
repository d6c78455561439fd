//! Inbound commands to the dashboard service.
//!
//! These represent actions requested by the operator (switches and the
//! threshold slider on the dashboard) or by tooling, which the
//! [`DashboardService`](super::service::DashboardService) applies.

use crate::config::DashboardConfig;
use crate::controls::ControlPatch;

/// Commands that external adapters can send into the core.
#[derive(Debug, Clone)]
pub enum AppCommand {
    /// Toggle automatic fan control.
    SetAutoMode(bool),

    /// Humidity (%) above which auto mode runs the fan.
    SetHumidityThreshold(u8),

    /// Manual fan switch (used when auto mode is off).
    SetManualFan(bool),

    /// Hot-reload configuration.
    UpdateConfig(DashboardConfig),
}

impl AppCommand {
    /// The control-store patch this command writes, if any.
    pub fn control_patch(&self) -> Option<ControlPatch> {
        match self {
            Self::SetAutoMode(on) => Some(ControlPatch::auto_mode(*on)),
            Self::SetHumidityThreshold(pct) => Some(ControlPatch::threshold_humidity(*pct)),
            Self::SetManualFan(on) => Some(ControlPatch::fan_on(*on)),
            Self::UpdateConfig(_) => None,
        }
    }
}
