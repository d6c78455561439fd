//! Logging event sink.
//!
//! Writes every [`AppEvent`] to the `log` facade as one line. The CLI
//! routes these through its tracing subscriber; a renderer or alerting
//! adapter would implement the same trait.

use log::{info, warn};

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`AppEvent`].
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl Default for LogEventSink {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::SampleDerived(r) => {
                info!(
                    "SAMPLE | ts={} | T={:.1}\u{00b0}C RH={:.1}% | VPD={:.2}kPa AH={:.2}g/m3 | \
                     score={} | {} ({}) | fan={}",
                    r.sample.timestamp_ms,
                    r.sample.temperature_c,
                    r.sample.humidity_pct,
                    r.metrics.vpd_kpa,
                    r.metrics.absolute_humidity_g_m3,
                    r.metrics.growth_score,
                    r.metrics.status,
                    r.metrics.status.color(),
                    if r.fan_demand { "ON" } else { "OFF" },
                );
            }
            AppEvent::CriticalWaterLoss(r) => {
                warn!(
                    "ALERT | critical water loss, VPD={:.2}kPa at ts={}; humidify now",
                    r.metrics.vpd_kpa, r.sample.timestamp_ms
                );
            }
            AppEvent::HistoryLoaded(n) => {
                info!("HISTORY | {} samples", n);
            }
            AppEvent::ControlsChanged(c) => {
                info!(
                    "CONTROLS | auto={} threshold={}% fan={}",
                    c.auto_mode,
                    c.threshold_humidity,
                    if c.fan_on { "ON" } else { "OFF" }
                );
            }
            AppEvent::FeedStatusChanged(status) => {
                info!("FEED | {}", status);
            }
            AppEvent::SampleRejected(reason) => {
                warn!("REJECT | {}", reason);
            }
            AppEvent::Started { device } => {
                info!("START | device={}", device);
            }
        }
    }
}
