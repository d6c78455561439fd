//! Outbound application events.
//!
//! The [`DashboardService`](super::service::DashboardService) emits these
//! through the [`EventSink`](super::ports::EventSink) port. Adapters on the
//! other side decide what to do with them: log them, push them to a
//! renderer, forward them to an alerting channel.

use serde::Serialize;

use crate::controls::ControlRecord;
use crate::error::SampleError;
use crate::feed::FeedStatus;
use crate::sample::{DerivedMetrics, Sample};

/// Structured events emitted by the application core.
#[derive(Debug, Clone)]
pub enum AppEvent {
    /// The service finished loading history and controls.
    Started { device: String },

    /// Initial history loaded (number of samples kept).
    HistoryLoaded(usize),

    /// A new sample was appended and its metrics derived.
    SampleDerived(SampleReport),

    /// The newest sample is in the critical water-loss band.
    CriticalWaterLoss(SampleReport),

    /// The control record changed locally.
    ControlsChanged(ControlRecord),

    /// The realtime subscription changed state.
    FeedStatusChanged(FeedStatus),

    /// A reading was rejected before reaching the engine.
    SampleRejected(SampleError),
}

/// A sample with its derived metrics, suitable for logging or transmission.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SampleReport {
    pub sample: Sample,
    pub metrics: DerivedMetrics,
    /// Effective fan request under the current controls.
    pub fan_demand: bool,
}
