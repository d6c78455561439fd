//! Dashboard service, the hexagonal core.
//!
//! [`DashboardService`] owns the explicit dashboard state: the bounded
//! sample history, the local copy of the control record and the engine
//! thresholds. The engine itself stays a pure function boundary and never
//! sees this state. All I/O flows through port traits injected at call
//! sites, so the whole service runs against in-memory adapters in tests.
//!
//! ```text
//!  TelemetrySource ──▶ ┌─────────────────────────┐ ──▶ EventSink
//!  SampleFeed ───────▶ │    DashboardService     │
//!  ControlStore ◀────▶ │  History · Controls ·   │ ──▶ DashboardView
//!                      │  Engine                 │
//!                      └─────────────────────────┘
//! ```

use log::{debug, info, warn};

use crate::config::DashboardConfig;
use crate::controls::ControlRecord;
use crate::engine::Engine;
use crate::error::{Error, Result};
use crate::feed::{FeedStatus, SampleFeed};
use crate::history::SampleHistory;
use crate::sample::{DerivedMetrics, Sample};

use super::commands::AppCommand;
use super::events::{AppEvent, SampleReport};
use super::ports::{ConfigError, ControlStore, EventSink, TelemetrySource};
use super::view::DashboardView;

// ───────────────────────────────────────────────────────────────
// DashboardService
// ───────────────────────────────────────────────────────────────

/// The application service orchestrates all dashboard logic.
pub struct DashboardService {
    config: DashboardConfig,
    engine: Engine,
    history: SampleHistory,
    controls: ControlRecord,
    loading: bool,
    ingested: u64,
}

impl DashboardService {
    /// Construct the service from configuration.
    ///
    /// The service starts in the loading state; call
    /// [`bootstrap`](Self::bootstrap) next.
    pub fn new(config: DashboardConfig) -> Self {
        let engine = Engine::new(config.engine);
        let controls = ControlRecord::with_threshold(config.default_threshold_humidity);
        Self {
            config,
            engine,
            history: SampleHistory::new(),
            controls,
            loading: true,
            ingested: 0,
        }
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Load recent history and the device's control record.
    ///
    /// Backend failures are logged and leave the corresponding state at
    /// its default; loading always completes. Recorded samples whose
    /// metrics are not finite are dropped and reported as rejected.
    pub fn bootstrap(
        &mut self,
        source: &impl TelemetrySource,
        store: &impl ControlStore,
        sink: &mut impl EventSink,
    ) {
        match source.recent(self.config.history_limit) {
            Ok(samples) => {
                let engine = self.engine;
                let usable = samples.into_iter().filter(|s| match engine.try_derive(s) {
                    Ok(_) => true,
                    Err(e) => {
                        if let Error::InvalidSample(reason) = e {
                            sink.emit(&AppEvent::SampleRejected(reason));
                        }
                        warn!("History sample ts={} dropped: {e}", s.timestamp_ms);
                        false
                    }
                });
                self.history = SampleHistory::from_recent(usable);
                info!("History loaded: {} samples", self.history.len());
            }
            Err(e) => {
                warn!("History load failed: {e}");
                self.history.clear();
            }
        }
        sink.emit(&AppEvent::HistoryLoaded(self.history.len()));

        let device = self.config.device_name.as_str();
        self.controls = match store.load(device) {
            Ok(Some(record)) => record,
            Ok(None) => {
                info!("No control record for {device}, using defaults");
                ControlRecord::with_threshold(self.config.default_threshold_humidity)
            }
            Err(e) => {
                warn!("Control record load failed for {device}: {e}");
                ControlRecord::with_threshold(self.config.default_threshold_humidity)
            }
        };
        sink.emit(&AppEvent::ControlsChanged(self.controls));

        self.loading = false;
        sink.emit(&AppEvent::Started {
            device: self.config.device_name.clone(),
        });
        info!("DashboardService started for {}", self.config.device_name);
    }

    // ── Telemetry ─────────────────────────────────────────────

    /// Append a newly arrived sample and derive its metrics.
    ///
    /// Samples whose metrics overflow are rejected and not appended.
    pub fn ingest(&mut self, sample: Sample, sink: &mut impl EventSink) -> Result<DerivedMetrics> {
        let metrics = match self.engine.try_derive(&sample) {
            Ok(m) => m,
            Err(e) => {
                if let Error::InvalidSample(reason) = e {
                    sink.emit(&AppEvent::SampleRejected(reason));
                }
                warn!("Sample ts={} rejected: {e}", sample.timestamp_ms);
                return Err(e);
            }
        };

        self.history.push(sample);
        self.ingested += 1;

        let report = SampleReport {
            sample,
            metrics,
            fan_demand: self.controls.fan_demand(&sample),
        };
        sink.emit(&AppEvent::SampleDerived(report));
        if metrics.is_critical() {
            warn!("Critical water loss: VPD {:.2} kPa", metrics.vpd_kpa);
            sink.emit(&AppEvent::CriticalWaterLoss(report));
        }
        Ok(metrics)
    }

    /// Validate a raw reading and ingest it.
    pub fn ingest_reading(
        &mut self,
        temperature_c: f64,
        humidity_pct: f64,
        timestamp_ms: u64,
        sink: &mut impl EventSink,
    ) -> Result<DerivedMetrics> {
        match Sample::new(temperature_c, humidity_pct, timestamp_ms) {
            Ok(sample) => self.ingest(sample, sink),
            Err(reason) => {
                sink.emit(&AppEvent::SampleRejected(reason));
                warn!("Reading ts={timestamp_ms} rejected: {reason}");
                Err(reason.into())
            }
        }
    }

    /// Ingest pending feed samples in arrival order.
    ///
    /// At most `feed_drain_batch` samples are taken per call (all pending
    /// samples when the batch is 0). Returns the number of samples taken.
    pub fn drain_feed<const DEPTH: usize>(
        &mut self,
        feed: &SampleFeed<DEPTH>,
        sink: &mut impl EventSink,
    ) -> usize {
        let batch = match self.config.feed_drain_batch {
            0 => usize::MAX,
            n => n,
        };
        let mut taken = 0;
        while taken < batch {
            let Some(sample) = feed.try_next() else {
                break;
            };
            taken += 1;
            // Rejections are already reported through the sink.
            let _ = self.ingest(sample, sink);
        }
        if taken > 0 {
            debug!("Drained {taken} samples from feed");
        }
        taken
    }

    /// Record a subscription status change on the feed and report it.
    pub fn update_feed_status<const DEPTH: usize>(
        &self,
        feed: &SampleFeed<DEPTH>,
        status: FeedStatus,
        sink: &mut impl EventSink,
    ) {
        let prev = feed.set_status(status);
        if prev != status {
            info!("Realtime feed: {prev} -> {status}");
            sink.emit(&AppEvent::FeedStatusChanged(status));
        }
    }

    // ── Command handling ──────────────────────────────────────

    /// Process an operator command.
    ///
    /// Control changes are applied locally first so the view reflects them
    /// immediately, then written to the store. A failed write is returned
    /// but the local change is kept.
    pub fn handle_command(
        &mut self,
        cmd: AppCommand,
        store: &mut impl ControlStore,
        sink: &mut impl EventSink,
    ) -> Result<()> {
        let Some(patch) = cmd.control_patch() else {
            if let AppCommand::UpdateConfig(new_config) = cmd {
                new_config.validate()?;
                if new_config.device_name != self.config.device_name {
                    return Err(ConfigError::ValidationFailed(
                        "device_name cannot change at runtime",
                    )
                    .into());
                }
                self.engine = Engine::new(new_config.engine);
                self.config = new_config;
                info!("Configuration updated at runtime");
            }
            return Ok(());
        };

        patch.validate()?;
        self.controls.apply(&patch);
        sink.emit(&AppEvent::ControlsChanged(self.controls));

        match store.update(&self.config.device_name, &patch) {
            Ok(stored) => {
                debug!("Control store now {:?}", stored);
                Ok(())
            }
            Err(e) => {
                warn!("Control update for {} failed: {e}", self.config.device_name);
                Err(e.into())
            }
        }
    }

    // ── Queries ───────────────────────────────────────────────

    /// Build the render-ready snapshot of the current state.
    pub fn view(&self) -> DashboardView {
        let current = self
            .history
            .latest()
            .copied()
            .unwrap_or_else(Sample::placeholder);
        let metrics = self.engine.derive(&current);
        DashboardView {
            loading: self.loading,
            current,
            metrics,
            history: self.history.to_vec(),
            controls: self.controls,
            fan_demand: self.controls.fan_demand(&current),
            critical: metrics.is_critical(),
        }
    }

    /// Whether the initial load is still pending.
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn controls(&self) -> ControlRecord {
        self.controls
    }

    pub fn history(&self) -> &SampleHistory {
        &self.history
    }

    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    /// Samples ingested since startup (excluding the initial history).
    pub fn ingested_count(&self) -> u64 {
        self.ingested
    }
}
