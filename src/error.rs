//! Unified error types for the greenhouse monitor.
//!
//! A single `Error` enum that every subsystem converts into, so the
//! dashboard service and the CLI handle failures uniformly. Port-level
//! errors live next to their traits in [`crate::app::ports`].

use core::fmt;

use crate::app::ports::{ConfigError, SourceError, StoreError};

// ---------------------------------------------------------------------------
// Top-level error
// ---------------------------------------------------------------------------

/// Every fallible operation in the crate funnels into this type.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// A sample failed boundary validation or produced non-finite metrics.
    InvalidSample(SampleError),
    /// The telemetry source could not deliver samples.
    Source(SourceError),
    /// The control store rejected a read or write.
    Store(StoreError),
    /// Configuration is invalid or could not be loaded.
    Config(ConfigError),
    /// A telemetry line could not be decoded.
    Parse(&'static str),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidSample(e) => write!(f, "invalid sample: {e}"),
            Self::Source(e) => write!(f, "telemetry source: {e}"),
            Self::Store(e) => write!(f, "control store: {e}"),
            Self::Config(e) => write!(f, "config: {e}"),
            Self::Parse(msg) => write!(f, "parse: {msg}"),
        }
    }
}

impl std::error::Error for Error {}

// ---------------------------------------------------------------------------
// Sample errors
// ---------------------------------------------------------------------------

/// Reasons a `(temperature, humidity)` pair is out of contract for the engine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SampleError {
    /// Temperature or humidity is NaN or infinite.
    NonFinite,
    /// Temperature sits on a pole of the saturation-pressure formulas.
    SingularTemperature(f64),
    /// Inputs were finite but a derived metric overflowed.
    NonFiniteResult,
}

impl fmt::Display for SampleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonFinite => write!(f, "non-finite temperature or humidity"),
            Self::SingularTemperature(t) => write!(f, "singular temperature {t} C"),
            Self::NonFiniteResult => write!(f, "derived metrics are not finite"),
        }
    }
}

impl From<SampleError> for Error {
    fn from(e: SampleError) -> Self {
        Self::InvalidSample(e)
    }
}

impl From<SourceError> for Error {
    fn from(e: SourceError) -> Self {
        Self::Source(e)
    }
}

impl From<StoreError> for Error {
    fn from(e: StoreError) -> Self {
        Self::Store(e)
    }
}

impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Crate-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
