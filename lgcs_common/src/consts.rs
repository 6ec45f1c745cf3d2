//! System-wide constants for the LGCS workspace.
//!
//! Single source of truth for performance requirements, timing bounds and
//! default paths. Imported by all crates.

/// Gear down and locked within this time [s].
pub const GEAR_DOWN_TIME_S: f64 = 5.0;

/// Gear up and locked within this time [s].
pub const GEAR_UP_TIME_S: f64 = 7.0;

/// Extra gear movement time consumed by the backup hydraulic pump [s].
pub const BACKUP_PUMP_DELAY_S: f64 = 3.0;

/// Upper bound for any configured transition or recovery time [s].
pub const TRANSITION_TIME_MAX_S: f64 = 60.0;

/// Upper bound for the pacing time scale (1.0 = real time).
pub const TIME_SCALE_MAX: f64 = 10.0;

/// Default configuration file path.
pub const DEFAULT_CONFIG_PATH: &str = "config/lgcs.toml";

/// Default event log file name.
pub const DEFAULT_LOG_FILE: &str = "landing_gear.log";

/// Diagnostic reported while the hydraulic fault is active.
pub const HYDRAULIC_FAULT_DIAGNOSTIC: &str =
    "Primary hydraulic pump failure detected - technician required before next flight";
