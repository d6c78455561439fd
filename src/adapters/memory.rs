//! In-memory backend adapters.
//!
//! Stand-ins for the hosted backend, used by the CLI replay mode and by
//! tests. [`InMemoryStore`] keeps records as postcard blobs in a keyed map,
//! so encode/decode and validation run exactly as they would against a
//! real store.

use std::cell::RefCell;
use std::collections::HashMap;

use log::{debug, info};

use crate::app::ports::{
    ConfigError, ConfigPort, ControlStore, SourceError, StoreError, TelemetrySource,
};
use crate::config::DashboardConfig;
use crate::controls::{ControlPatch, ControlRecord};
use crate::sample::Sample;

const CONTROLS_NAMESPACE: &str = "device_controls";
const CONFIG_NAMESPACE: &str = "greenhouse";
const CONFIG_KEY: &str = "dashcfg";

// ───────────────────────────────────────────────────────────────
// Telemetry
// ───────────────────────────────────────────────────────────────

/// Telemetry table held in memory, oldest-first.
#[derive(Debug, Default)]
pub struct InMemoryTelemetry {
    samples: Vec<Sample>,
    offline: bool,
}

impl InMemoryTelemetry {
    pub fn new(samples: Vec<Sample>) -> Self {
        Self {
            samples,
            offline: false,
        }
    }

    /// Make every subsequent query fail with [`SourceError::Unavailable`].
    pub fn set_offline(&mut self, offline: bool) {
        self.offline = offline;
    }

    /// Record a new sample (appended as newest).
    pub fn insert(&mut self, sample: Sample) {
        self.samples.push(sample);
    }
}

impl TelemetrySource for InMemoryTelemetry {
    fn recent(&self, limit: usize) -> Result<Vec<Sample>, SourceError> {
        if self.offline {
            return Err(SourceError::Unavailable);
        }
        let start = self.samples.len().saturating_sub(limit);
        Ok(self.samples[start..].to_vec())
    }
}

// ───────────────────────────────────────────────────────────────
// Control records and config
// ───────────────────────────────────────────────────────────────

/// Keyed blob store implementing [`ControlStore`] and [`ConfigPort`].
#[derive(Debug, Default)]
pub struct InMemoryStore {
    store: RefCell<HashMap<String, Vec<u8>>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a device's control record.
    pub fn with_controls(self, device: &str, record: ControlRecord) -> Result<Self, StoreError> {
        self.put_controls(device, &record)?;
        Ok(self)
    }

    fn composite_key(namespace: &str, key: &str) -> String {
        format!("{}::{}", namespace, key)
    }

    fn put_controls(&self, device: &str, record: &ControlRecord) -> Result<(), StoreError> {
        let bytes = postcard::to_allocvec(record)
            .map_err(|_| StoreError::Rejected("record encode failed"))?;
        self.store
            .borrow_mut()
            .insert(Self::composite_key(CONTROLS_NAMESPACE, device), bytes);
        Ok(())
    }

    /// Overwrite a raw entry (test hook for corrupted records).
    pub fn put_raw(&self, namespace: &str, key: &str, bytes: Vec<u8>) {
        self.store
            .borrow_mut()
            .insert(Self::composite_key(namespace, key), bytes);
    }
}

impl ControlStore for InMemoryStore {
    fn load(&self, device: &str) -> Result<Option<ControlRecord>, StoreError> {
        let key = Self::composite_key(CONTROLS_NAMESPACE, device);
        match self.store.borrow().get(&key) {
            Some(bytes) => postcard::from_bytes(bytes)
                .map(Some)
                .map_err(|_| StoreError::Corrupted),
            None => Ok(None),
        }
    }

    /// Missing records are created from the default before the patch is applied.
    fn update(&mut self, device: &str, patch: &ControlPatch) -> Result<ControlRecord, StoreError> {
        let mut record = ControlStore::load(self, device)?.unwrap_or_default();
        record.apply(patch);
        self.put_controls(device, &record)?;
        debug!("InMemoryStore: {device} <- {:?}", patch);
        Ok(record)
    }
}

impl ConfigPort for InMemoryStore {
    fn load(&self) -> Result<DashboardConfig, ConfigError> {
        let key = Self::composite_key(CONFIG_NAMESPACE, CONFIG_KEY);
        if let Some(bytes) = self.store.borrow().get(&key) {
            let cfg: DashboardConfig =
                postcard::from_bytes(bytes).map_err(|_| ConfigError::Corrupted)?;
            info!("InMemoryStore: loaded config from store");
            Ok(cfg)
        } else {
            info!("InMemoryStore: no stored config, using defaults");
            Ok(DashboardConfig::default())
        }
    }

    fn save(&self, config: &DashboardConfig) -> Result<(), ConfigError> {
        config.validate()?;
        let bytes = postcard::to_allocvec(config).map_err(|_| ConfigError::IoError)?;
        self.store
            .borrow_mut()
            .insert(Self::composite_key(CONFIG_NAMESPACE, CONFIG_KEY), bytes);
        info!("InMemoryStore: config saved");
        Ok(())
    }
}
