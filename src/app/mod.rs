//! Application core: dashboard state and orchestration, zero I/O.
//!
//! This module holds the rules for turning telemetry into a render-ready
//! view and for applying operator commands to the control record. All
//! interaction with the backend happens through **port traits** defined
//! in [`ports`], keeping this layer fully testable with in-memory adapters.

pub mod commands;
pub mod events;
pub mod ports;
pub mod service;
pub mod view;
