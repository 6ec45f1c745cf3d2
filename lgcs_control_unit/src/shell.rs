//! Operator-facing shell around the gear machine.
//!
//! - [`menu`] - line-oriented command menu
//! - [`log_sink`] - console, log file and `tracing` event sinks

pub mod log_sink;
pub mod menu;
