//! Gear position state enum.
//!
//! Uses `#[repr(u8)]` for a compact layout. Display labels are kept next to
//! the enum instead of being derived from variant names.

use serde::{Deserialize, Serialize};
use static_assertions::const_assert_eq;
use std::fmt;

/// Landing gear position.
///
/// Exactly one position is active at any time. `TransitioningDown` and
/// `TransitioningUp` exist only while a command is executing; every command
/// leaves the gear in `UpLocked`, `DownLocked` or `Fault`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum GearPosition {
    /// Gear retracted, uplocks engaged.
    UpLocked = 0,
    /// Extension in progress.
    TransitioningDown = 1,
    /// Gear extended, downlocks engaged.
    DownLocked = 2,
    /// Retraction in progress.
    TransitioningUp = 3,
    /// Commands inhibited by a hydraulic fault. Exited only via fault clearing.
    Fault = 4,
}

const_assert_eq!(core::mem::size_of::<GearPosition>(), 1);

impl GearPosition {
    /// Display label used in event logs and the operator menu.
    #[inline]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::UpLocked => "UP_LOCKED",
            Self::TransitioningDown => "TRANSITIONING_DOWN",
            Self::DownLocked => "DOWN_LOCKED",
            Self::TransitioningUp => "TRANSITIONING_UP",
            Self::Fault => "FAULT",
        }
    }

    /// Returns true for the steady positions `UpLocked` and `DownLocked`.
    #[inline]
    pub const fn is_locked(&self) -> bool {
        matches!(self, Self::UpLocked | Self::DownLocked)
    }

    /// Returns true while a transition is in progress.
    #[inline]
    pub const fn is_transitioning(&self) -> bool {
        matches!(self, Self::TransitioningDown | Self::TransitioningUp)
    }
}

impl Default for GearPosition {
    fn default() -> Self {
        Self::DownLocked
    }
}

impl fmt::Display for GearPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Direction of a gear transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Extension towards `DownLocked`.
    Down,
    /// Retraction towards `UpLocked`.
    Up,
}

impl Direction {
    /// Position the gear must be in for the command to be legal.
    #[inline]
    pub const fn origin(&self) -> GearPosition {
        match self {
            Self::Down => GearPosition::UpLocked,
            Self::Up => GearPosition::DownLocked,
        }
    }

    /// Intermediate position while moving.
    #[inline]
    pub const fn transit(&self) -> GearPosition {
        match self {
            Self::Down => GearPosition::TransitioningDown,
            Self::Up => GearPosition::TransitioningUp,
        }
    }

    /// Position reached on success.
    #[inline]
    pub const fn target(&self) -> GearPosition {
        match self {
            Self::Down => GearPosition::DownLocked,
            Self::Up => GearPosition::UpLocked,
        }
    }

    /// Lowercase name used in event messages.
    #[inline]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Down => "down",
            Self::Up => "up",
        }
    }
}
