//! Port traits: the hexagonal boundary between the dashboard core and the
//! hosted backend.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ DashboardService (domain)
//! ```
//!
//! Driven adapters (telemetry source, control store, event sinks, config
//! storage) implement these traits. The
//! [`DashboardService`](super::service::DashboardService) consumes them via
//! generics, so the core never touches the network or a database directly.

use crate::config::DashboardConfig;
use crate::controls::{ControlPatch, ControlRecord};
use crate::sample::Sample;

// ───────────────────────────────────────────────────────────────
// Telemetry source (driven adapter: backend → domain)
// ───────────────────────────────────────────────────────────────

/// Read-side port for historical telemetry.
pub trait TelemetrySource {
    /// Return up to `limit` of the most recent samples, ordered oldest-first
    /// (newest last).
    fn recent(&self, limit: usize) -> Result<Vec<Sample>, SourceError>;
}

// ───────────────────────────────────────────────────────────────
// Control store (driven adapter: domain ↔ device_controls)
// ───────────────────────────────────────────────────────────────

/// Holds the control record of each device, keyed by device name.
pub trait ControlStore {
    /// Load the record. `Ok(None)` if the device has no record yet.
    fn load(&self, device: &str) -> Result<Option<ControlRecord>, StoreError>;

    /// Apply a partial update and return the stored record afterwards.
    fn update(&mut self, device: &str, patch: &ControlPatch) -> Result<ControlRecord, StoreError>;
}

// ───────────────────────────────────────────────────────────────
// Event sink (driven adapter: domain → logging / rendering)
// ───────────────────────────────────────────────────────────────

/// The core emits structured [`AppEvent`](super::events::AppEvent)s through
/// this port. Adapters decide where they go.
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}

// ───────────────────────────────────────────────────────────────
// Configuration port (driven adapter: domain ↔ persistent config)
// ───────────────────────────────────────────────────────────────

/// Loads and persists the dashboard configuration.
///
/// Implementations MUST validate before persisting and reject invalid
/// ranges with [`ConfigError::ValidationFailed`] instead of clamping.
pub trait ConfigPort {
    /// Load configuration. Returns [`DashboardConfig::default()`] if none is stored.
    fn load(&self) -> Result<DashboardConfig, ConfigError>;

    /// Validate and persist configuration.
    fn save(&self, config: &DashboardConfig) -> Result<(), ConfigError>;
}

// ───────────────────────────────────────────────────────────────
// Error types
// ───────────────────────────────────────────────────────────────

/// Errors from [`TelemetrySource`] operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceError {
    /// Backend could not be reached.
    Unavailable,
    /// Backend answered with rows that are not valid samples.
    Malformed(&'static str),
}

/// Errors from [`ControlStore`] operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreError {
    /// No record for the requested device.
    NotFound,
    /// Stored record failed to decode.
    Corrupted,
    /// Backend could not be reached.
    Unavailable,
    /// Backend refused the write.
    Rejected(&'static str),
}

/// Errors from [`ConfigPort`] operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// No config found in storage.
    NotFound,
    /// Stored config failed to decode.
    Corrupted,
    /// A config field failed range validation.
    /// The `&'static str` describes which field and why.
    ValidationFailed(&'static str),
    /// Generic I/O error from the storage backend.
    IoError,
}

impl core::fmt::Display for SourceError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Unavailable => write!(f, "telemetry backend unavailable"),
            Self::Malformed(msg) => write!(f, "malformed telemetry: {}", msg),
        }
    }
}

impl core::fmt::Display for StoreError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::NotFound => write!(f, "record not found"),
            Self::Corrupted => write!(f, "record corrupted"),
            Self::Unavailable => write!(f, "store unavailable"),
            Self::Rejected(msg) => write!(f, "write rejected: {}", msg),
        }
    }
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::NotFound => write!(f, "config not found"),
            Self::Corrupted => write!(f, "config corrupted"),
            Self::ValidationFailed(msg) => write!(f, "validation failed: {}", msg),
            Self::IoError => write!(f, "I/O error"),
        }
    }
}
