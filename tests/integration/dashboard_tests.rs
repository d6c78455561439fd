//! Integration tests for the source → DashboardService → view pipeline.
//!
//! These verify bootstrap, sample ingestion and control updates end to end
//! against the in-memory telemetry table and a recording control store.

use greenhouse::adapters::memory::{InMemoryStore, InMemoryTelemetry};
use greenhouse::app::commands::AppCommand;
use greenhouse::app::events::AppEvent;
use greenhouse::app::ports::{ConfigError, ControlStore, StoreError};
use greenhouse::app::service::DashboardService;
use greenhouse::config::DashboardConfig;
use greenhouse::controls::ControlRecord;
use greenhouse::engine::VpdStatus;
use greenhouse::error::{Error, SampleError};
use greenhouse::sample::Sample;

use crate::mock_backend::{MockStore, RecordingSink};

fn s(t: f64, rh: f64, ts: u64) -> Sample {
    Sample::new(t, rh, ts).unwrap()
}

fn started() -> (DashboardService, MockStore, RecordingSink) {
    let mut svc = DashboardService::new(DashboardConfig::default());
    let store = MockStore::new();
    let mut sink = RecordingSink::new();
    svc.bootstrap(&InMemoryTelemetry::default(), &store, &mut sink);
    sink.clear();
    (svc, store, sink)
}

// ── Bootstrap ─────────────────────────────────────────────────

#[test]
fn bootstrap_loads_newest_history_oldest_first() {
    let table = InMemoryTelemetry::new((0..80).map(|ts| s(22.0, 60.0, ts)).collect());
    let mut svc = DashboardService::new(DashboardConfig::default());
    let mut sink = RecordingSink::new();
    assert!(svc.is_loading());

    svc.bootstrap(&table, &MockStore::new(), &mut sink);

    assert!(!svc.is_loading());
    let view = svc.view();
    assert_eq!(view.history.len(), 50);
    assert_eq!(view.history.first().map(|x| x.timestamp_ms), Some(30));
    assert_eq!(view.current.timestamp_ms, 79);
    assert!(matches!(sink.events[0], AppEvent::HistoryLoaded(50)));
    assert!(matches!(sink.events.last(), Some(AppEvent::Started { .. })));
}

#[test]
fn bootstrap_respects_configured_history_limit() {
    let table = InMemoryTelemetry::new((0..20).map(|ts| s(22.0, 60.0, ts)).collect());
    let config = DashboardConfig {
        history_limit: 5,
        ..DashboardConfig::default()
    };
    let mut svc = DashboardService::new(config);
    svc.bootstrap(&table, &MockStore::new(), &mut RecordingSink::new());
    let stamps: Vec<u64> = svc.history().iter().map(|x| x.timestamp_ms).collect();
    assert_eq!(stamps, [15, 16, 17, 18, 19]);
}

#[test]
fn offline_source_still_finishes_loading() {
    let mut table = InMemoryTelemetry::default();
    table.set_offline(true);
    let mut svc = DashboardService::new(DashboardConfig::default());
    let mut sink = RecordingSink::new();

    svc.bootstrap(&table, &MockStore::new(), &mut sink);

    let view = svc.view();
    assert!(!view.loading);
    assert!(view.history.is_empty());
    assert_eq!(view.current, Sample::placeholder());
    assert_eq!(view.metrics.status, VpdStatus::GrowthOnset);
    assert_eq!(view.metrics.growth_score, 60);
    assert!(matches!(sink.events[0], AppEvent::HistoryLoaded(0)));
}

#[test]
fn recorded_samples_with_overflowing_metrics_are_dropped() {
    let table = InMemoryTelemetry::new(vec![s(24.0, 65.0, 6), s(-238.0, 50.0, 7)]);
    let mut svc = DashboardService::new(DashboardConfig::default());
    let mut sink = RecordingSink::new();

    svc.bootstrap(&table, &MockStore::new(), &mut sink);

    let view = svc.view();
    assert_eq!(view.history.len(), 1);
    assert_eq!(view.current.timestamp_ms, 6);
    assert!(view.metrics.vpd_kpa.is_finite());
    assert!(!view.critical);
    assert_eq!(
        sink.count(|e| matches!(e, AppEvent::SampleRejected(SampleError::NonFiniteResult))),
        1
    );
    assert!(sink.events.iter().any(|e| matches!(e, AppEvent::HistoryLoaded(1))));
}

#[test]
fn stored_controls_are_adopted() {
    let record = ControlRecord {
        auto_mode: true,
        threshold_humidity: 65,
        fan_on: false,
    };
    let mut svc = DashboardService::new(DashboardConfig::default());
    let mut sink = RecordingSink::new();
    svc.bootstrap(
        &InMemoryTelemetry::default(),
        &MockStore::with_record(record),
        &mut sink,
    );
    assert_eq!(svc.controls(), record);
    assert_eq!(
        sink.count(|e| matches!(e, AppEvent::ControlsChanged(r) if *r == record)),
        1
    );
}

#[test]
fn unreadable_controls_fall_back_to_configured_default() {
    let config = DashboardConfig {
        default_threshold_humidity: 70,
        ..DashboardConfig::default()
    };
    let mut svc = DashboardService::new(config);
    svc.bootstrap(
        &InMemoryTelemetry::default(),
        &MockStore::failing_loads(StoreError::Unavailable),
        &mut RecordingSink::new(),
    );
    assert_eq!(svc.controls(), ControlRecord::with_threshold(70));
}

#[test]
fn corrupted_postcard_record_falls_back_to_default() {
    let store = InMemoryStore::new();
    store.put_raw("device_controls", "led_fan", vec![0xff, 0xff, 0xff]);
    let mut svc = DashboardService::new(DashboardConfig::default());
    svc.bootstrap(&InMemoryTelemetry::default(), &store, &mut RecordingSink::new());
    assert_eq!(svc.controls(), ControlRecord::default());
}

// ── Ingestion ─────────────────────────────────────────────────

#[test]
fn ingest_emits_report_with_metrics() {
    let (mut svc, _store, mut sink) = started();

    let m = svc.ingest(s(25.0, 60.0, 1_000), &mut sink).unwrap();

    assert_eq!(m.vpd_kpa, 1.27);
    assert_eq!(m.absolute_humidity_g_m3, 13.82);
    assert_eq!(m.growth_score, 100);
    assert_eq!(sink.events.len(), 1);
    match &sink.events[0] {
        AppEvent::SampleDerived(r) => {
            assert_eq!(r.sample.timestamp_ms, 1_000);
            assert_eq!(r.metrics, m);
            assert!(!r.fan_demand);
        }
        other => panic!("unexpected event {other:?}"),
    }
}

#[test]
fn critical_sample_raises_alert() {
    let (mut svc, _store, mut sink) = started();

    let m = svc.ingest(s(35.0, 20.0, 1), &mut sink).unwrap();

    assert_eq!(m.status, VpdStatus::CriticalWaterLoss);
    assert_eq!(sink.count(|e| matches!(e, AppEvent::CriticalWaterLoss(_))), 1);
    assert!(svc.view().critical);

    // Back in band: no further alert.
    sink.clear();
    svc.ingest(s(25.0, 60.0, 2), &mut sink).unwrap();
    assert_eq!(sink.count(|e| matches!(e, AppEvent::CriticalWaterLoss(_))), 0);
    assert!(!svc.view().critical);
}

#[test]
fn singular_reading_is_rejected_and_not_appended() {
    let (mut svc, _store, mut sink) = started();

    let r = svc.ingest_reading(-237.3, 50.0, 5, &mut sink);

    assert_eq!(
        r,
        Err(Error::InvalidSample(SampleError::SingularTemperature(-237.3)))
    );
    assert!(svc.history().is_empty());
    assert_eq!(svc.ingested_count(), 0);
    assert_eq!(sink.count(|e| matches!(e, AppEvent::SampleRejected(_))), 1);
}

#[test]
fn overflowing_metrics_are_rejected() {
    let (mut svc, _store, mut sink) = started();

    let r = svc.ingest(s(-238.0, 50.0, 5), &mut sink);

    assert_eq!(r, Err(Error::InvalidSample(SampleError::NonFiniteResult)));
    assert!(svc.history().is_empty());
    assert_eq!(
        sink.count(|e| matches!(e, AppEvent::SampleRejected(SampleError::NonFiniteResult))),
        1
    );
}

#[test]
fn history_is_capped_at_fifty() {
    let (mut svc, _store, mut sink) = started();
    for ts in 0..75 {
        svc.ingest(s(24.0, 65.0, ts), &mut sink).unwrap();
    }
    let view = svc.view();
    assert_eq!(view.history.len(), 50);
    assert_eq!(view.history[0].timestamp_ms, 25);
    assert_eq!(view.current.timestamp_ms, 74);
    assert_eq!(svc.ingested_count(), 75);
}

// ── Controls ──────────────────────────────────────────────────

#[test]
fn threshold_update_is_written_to_store() {
    let (mut svc, mut store, mut sink) = started();

    svc.handle_command(AppCommand::SetHumidityThreshold(60), &mut store, &mut sink)
        .unwrap();

    assert_eq!(svc.controls().threshold_humidity, 60);
    assert_eq!(store.writes.len(), 1);
    assert_eq!(store.writes[0].0, "led_fan");
    assert_eq!(store.writes[0].1.threshold_humidity, Some(60));
    assert_eq!(store.record.map(|r| r.threshold_humidity), Some(60));
    assert_eq!(sink.count(|e| matches!(e, AppEvent::ControlsChanged(_))), 1);
}

#[test]
fn failed_store_write_keeps_local_change() {
    let (mut svc, _, mut sink) = started();
    let mut store = MockStore::failing_updates(StoreError::Unavailable);

    let r = svc.handle_command(AppCommand::SetManualFan(true), &mut store, &mut sink);

    assert_eq!(r, Err(Error::Store(StoreError::Unavailable)));
    assert!(svc.controls().fan_on);
    assert!(svc.view().fan_demand);
}

#[test]
fn out_of_range_threshold_is_refused_before_any_write() {
    let (mut svc, mut store, mut sink) = started();

    let r = svc.handle_command(AppCommand::SetHumidityThreshold(101), &mut store, &mut sink);

    assert!(matches!(
        r,
        Err(Error::Config(ConfigError::ValidationFailed(_)))
    ));
    assert_eq!(svc.controls().threshold_humidity, 75);
    assert!(store.writes.is_empty());
    assert!(sink.events.is_empty());
}

#[test]
fn auto_mode_fan_demand_follows_humidity() {
    let (mut svc, mut store, mut sink) = started();
    svc.handle_command(AppCommand::SetAutoMode(true), &mut store, &mut sink)
        .unwrap();

    svc.ingest(s(22.0, 75.0, 1), &mut sink).unwrap();
    assert!(!svc.view().fan_demand, "threshold itself does not trigger");

    svc.ingest(s(22.0, 75.5, 2), &mut sink).unwrap();
    assert!(svc.view().fan_demand);

    // Manual switch is ignored while auto mode is on.
    svc.handle_command(AppCommand::SetManualFan(false), &mut store, &mut sink)
        .unwrap();
    assert!(svc.view().fan_demand);
}

#[test]
fn controls_round_trip_through_in_memory_store() {
    let (mut svc, _, mut sink) = started();
    let mut store = InMemoryStore::new();

    svc.handle_command(AppCommand::SetAutoMode(true), &mut store, &mut sink)
        .unwrap();
    svc.handle_command(AppCommand::SetHumidityThreshold(68), &mut store, &mut sink)
        .unwrap();

    let stored = ControlStore::load(&store, "led_fan").unwrap();
    assert_eq!(stored, Some(svc.controls()));

    // A fresh service picks the record up on bootstrap.
    let mut next = DashboardService::new(DashboardConfig::default());
    next.bootstrap(&InMemoryTelemetry::default(), &store, &mut RecordingSink::new());
    assert_eq!(next.controls().threshold_humidity, 68);
    assert!(next.controls().auto_mode);
}

// ── Configuration ─────────────────────────────────────────────

#[test]
fn update_config_swaps_engine_thresholds() {
    let (mut svc, mut store, mut sink) = started();
    let mut cfg = DashboardConfig::default();
    cfg.engine.status.ideal_max_kpa = 1.0;
    cfg.engine.status.transpiration_max_kpa = 1.2;

    svc.handle_command(AppCommand::UpdateConfig(cfg.clone()), &mut store, &mut sink)
        .unwrap();
    assert_eq!(svc.config(), &cfg);

    let m = svc.ingest(s(25.0, 60.0, 1), &mut sink).unwrap();
    assert_eq!(m.status, VpdStatus::CriticalWaterLoss);
}

#[test]
fn invalid_config_is_refused() {
    let (mut svc, mut store, mut sink) = started();
    let cfg = DashboardConfig {
        history_limit: 0,
        ..DashboardConfig::default()
    };

    let r = svc.handle_command(AppCommand::UpdateConfig(cfg), &mut store, &mut sink);

    assert!(matches!(
        r,
        Err(Error::Config(ConfigError::ValidationFailed(_)))
    ));
    assert_eq!(svc.config(), &DashboardConfig::default());
}

#[test]
fn device_rename_at_runtime_is_refused() {
    let (mut svc, mut store, mut sink) = started();
    let cfg = DashboardConfig {
        device_name: "mist_pump".into(),
        ..DashboardConfig::default()
    };

    let r = svc.handle_command(AppCommand::UpdateConfig(cfg), &mut store, &mut sink);

    assert!(matches!(
        r,
        Err(Error::Config(ConfigError::ValidationFailed(_)))
    ));
    assert_eq!(svc.config().device_name, "led_fan");

    // Later control writes still target the original device.
    svc.handle_command(AppCommand::SetManualFan(true), &mut store, &mut sink)
        .unwrap();
    assert_eq!(store.writes[0].0, "led_fan");
}

#[test]
fn view_serialises_for_renderer() {
    let (mut svc, _store, mut sink) = started();
    svc.ingest(s(25.0, 60.0, 42), &mut sink).unwrap();

    let json = serde_json::to_value(svc.view()).unwrap();

    assert_eq!(json["loading"], false);
    assert_eq!(json["metrics"]["vpd_kpa"], 1.27);
    assert_eq!(json["metrics"]["growth_score"], 100);
    assert_eq!(json["controls"]["threshold_humidity"], 75);
    assert_eq!(json["history"].as_array().map(Vec::len), Some(1));
}
