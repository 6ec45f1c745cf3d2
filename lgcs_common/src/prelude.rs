//! Prelude module for common re-exports.
//!
//! Consumers can do `use lgcs_common::prelude::*;` and get the most
//! important types without listing individual paths.

// ─── Configuration ──────────────────────────────────────────────────
pub use crate::config::{
    ConfigError, ConfigLoader, EventFormat, LgcsConfig, LogConfig, LogLevel, SharedConfig,
};
pub use crate::gear::config::{FaultPolicy, GearConfig};

// ─── Gear ───────────────────────────────────────────────────────────
pub use crate::gear::event::{
    EventKind, EventRecorder, EventSink, Fanout, GearEvent, NullSink, RejectReason, Severity,
};
pub use crate::gear::fault::{FaultReport, FaultSource, HydraulicFaultLine};
pub use crate::gear::state::{Direction, GearPosition};

// ─── Performance Requirements ───────────────────────────────────────
pub use crate::consts::{BACKUP_PUMP_DELAY_S, GEAR_DOWN_TIME_S, GEAR_UP_TIME_S};
