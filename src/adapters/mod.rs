//! Adapters: concrete implementations of the hexagonal port traits.
//!
//! | Adapter    | Implements        | Connects to                    |
//! |------------|-------------------|--------------------------------|
//! | `jsonl`    | (line reader)     | JSON-lines telemetry replay    |
//! | `log_sink` | EventSink         | `log` facade                   |
//! | `memory`   | TelemetrySource   | In-memory telemetry table      |
//! |            | ControlStore      | In-memory control records      |
//! |            | ConfigPort        |                                |

pub mod jsonl;
pub mod log_sink;
pub mod memory;
