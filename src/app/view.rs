//! Render-ready dashboard state.
//!
//! A [`DashboardView`] is an owned snapshot handed to the rendering layer.
//! Renderers read it and send [`AppCommand`](super::commands::AppCommand)s
//! back; they never hold references into the service.

use serde::Serialize;

use crate::controls::ControlRecord;
use crate::sample::{DerivedMetrics, Sample};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardView {
    /// True until the initial history and controls have been loaded.
    pub loading: bool,
    /// Newest sample, or the zero placeholder when none has arrived.
    pub current: Sample,
    /// Engine output for `current`.
    pub metrics: DerivedMetrics,
    /// Recent samples, oldest-first.
    pub history: Vec<Sample>,
    pub controls: ControlRecord,
    /// Effective fan request for `current`.
    pub fan_demand: bool,
    /// Critical water-loss alert.
    pub critical: bool,
}
