//! Greenhouse monitor core library.
//!
//! Derives vapor-pressure deficit, absolute humidity, a growth score and a
//! status class from temperature/humidity telemetry, and keeps the explicit
//! dashboard state (bounded history, control record) that a renderer
//! consumes. Backend access goes through the port traits in [`app::ports`].

#![deny(unused_must_use)]

pub mod adapters;
pub mod app;
pub mod config;
pub mod controls;
pub mod engine;
pub mod error;
pub mod feed;
pub mod history;
pub mod sample;

pub use engine::{
    ColorTag, Engine, EngineConfig, VpdStatus, absolute_humidity_g_m3, classify_status, derive,
    growth_score, vpd_kpa,
};
pub use error::{Error, Result, SampleError};
pub use sample::{DerivedMetrics, Sample};
