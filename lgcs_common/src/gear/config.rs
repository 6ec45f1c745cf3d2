//! Gear machine configuration (`[gear]` table).
//!
//! Times are seconds as `f64` in TOML. Optional fields use
//! `#[serde(default)]` so a missing table yields the certified defaults.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::consts::{
    BACKUP_PUMP_DELAY_S, GEAR_DOWN_TIME_S, GEAR_UP_TIME_S, TIME_SCALE_MAX, TRANSITION_TIME_MAX_S,
};

use super::state::{Direction, GearPosition};

/// How an active hydraulic fault interacts with gear commands.
///
/// A machine runs exactly one policy for its whole life.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum FaultPolicy {
    /// The fault only affects the transition in progress. Extension recovers
    /// on the backup pump; retraction aborts and fails safe to `DownLocked`.
    #[default]
    Degraded,
    /// Any gear command issued while the fault is active is inhibited and
    /// the machine parks in `Fault` until the fault is cleared.
    ImmediateGate,
}

impl FaultPolicy {
    /// Config/CLI spelling.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Degraded => "degraded",
            Self::ImmediateGate => "immediate_gate",
        }
    }
}

impl std::str::FromStr for FaultPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "degraded" => Ok(Self::Degraded),
            "immediate_gate" | "immediate" => Ok(Self::ImmediateGate),
            other => Err(format!(
                "unknown fault policy '{other}' (expected degraded or immediate_gate)"
            )),
        }
    }
}

/// Gear machine configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GearConfig {
    /// Position at construction and after reset (`up_locked` or `down_locked`).
    #[serde(default)]
    pub initial_position: GearPosition,

    /// Fault interaction policy.
    #[serde(default)]
    pub fault_policy: FaultPolicy,

    /// Nominal extension time [s] (default: 5.0).
    #[serde(default = "default_gear_down_time")]
    pub gear_down_time_s: f64,

    /// Nominal retraction time [s] (default: 7.0).
    #[serde(default = "default_gear_up_time")]
    pub gear_up_time_s: f64,

    /// Extra time consumed by backup pump recovery [s] (default: 3.0).
    #[serde(default = "default_backup_pump_delay")]
    pub backup_pump_delay_s: f64,

    /// Wall-clock pacing factor (1.0 = real time, 0.0 = no waiting).
    #[serde(default = "default_time_scale")]
    pub time_scale: f64,
}

fn default_gear_down_time() -> f64 {
    GEAR_DOWN_TIME_S
}
fn default_gear_up_time() -> f64 {
    GEAR_UP_TIME_S
}
fn default_backup_pump_delay() -> f64 {
    BACKUP_PUMP_DELAY_S
}
fn default_time_scale() -> f64 {
    1.0
}

impl Default for GearConfig {
    fn default() -> Self {
        Self {
            initial_position: GearPosition::default(),
            fault_policy: FaultPolicy::default(),
            gear_down_time_s: GEAR_DOWN_TIME_S,
            gear_up_time_s: GEAR_UP_TIME_S,
            backup_pump_delay_s: BACKUP_PUMP_DELAY_S,
            time_scale: 1.0,
        }
    }
}

impl GearConfig {
    /// Validate parameter bounds and the initial position.
    pub fn validate(&self) -> Result<(), String> {
        if !self.initial_position.is_locked() {
            return Err(format!(
                "initial_position {} must be up_locked or down_locked",
                self.initial_position.label()
            ));
        }
        check_time("gear_down_time_s", self.gear_down_time_s, false)?;
        check_time("gear_up_time_s", self.gear_up_time_s, false)?;
        check_time("backup_pump_delay_s", self.backup_pump_delay_s, true)?;
        if !(0.0..=TIME_SCALE_MAX).contains(&self.time_scale) {
            return Err(format!(
                "time_scale {} out of range [0, {}]",
                self.time_scale, TIME_SCALE_MAX
            ));
        }
        Ok(())
    }

    /// Nominal transition time for a direction.
    #[inline]
    pub fn transition_time(&self, direction: Direction) -> Duration {
        match direction {
            Direction::Down => secs(self.gear_down_time_s),
            Direction::Up => secs(self.gear_up_time_s),
        }
    }

    /// Backup pump recovery time.
    #[inline]
    pub fn backup_pump_delay(&self) -> Duration {
        secs(self.backup_pump_delay_s)
    }
}

fn check_time(name: &str, value: f64, allow_zero: bool) -> Result<(), String> {
    let lower_ok = if allow_zero { value >= 0.0 } else { value > 0.0 };
    if !value.is_finite() || !lower_ok || value > TRANSITION_TIME_MAX_S {
        return Err(format!(
            "{name} {value} out of range {}, {}]",
            if allow_zero { "[0" } else { "(0" },
            TRANSITION_TIME_MAX_S
        ));
    }
    Ok(())
}

fn secs(value: f64) -> Duration {
    Duration::from_secs_f64(value.max(0.0))
}
