//! Hydraulic fault line.
//!
//! The fault flag is not global state: each gear machine is handed a
//! [`FaultSource`] capability. The fault-injection control (operator menu,
//! test harness) holds a clone of the same [`HydraulicFaultLine`], so
//! independent machines observe independent faults.

use serde::Serialize;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::consts::HYDRAULIC_FAULT_DIAGNOSTIC;

/// Capability to observe and drive the hydraulic fault condition.
///
/// The gear machine samples [`is_active`](Self::is_active) once per command.
/// Writers are the injection control and the machine's own fault clearing.
pub trait FaultSource: Send + Sync {
    /// Whether the primary hydraulic pump fault is present.
    fn is_active(&self) -> bool;

    /// Raise the fault.
    fn inject(&self);

    /// Drop the fault. Returns whether it was active.
    fn clear(&self) -> bool;
}

/// Shared atomic fault flag.
///
/// Cloning yields another handle to the same line.
#[derive(Debug, Clone, Default)]
pub struct HydraulicFaultLine {
    active: Arc<AtomicBool>,
}

impl HydraulicFaultLine {
    /// Create a new line with no fault present.
    pub fn new() -> Self {
        Self::default()
    }
}

impl FaultSource for HydraulicFaultLine {
    #[inline]
    fn is_active(&self) -> bool {
        self.active.load(Ordering::SeqCst)
    }

    #[inline]
    fn inject(&self) {
        self.active.store(true, Ordering::SeqCst);
    }

    #[inline]
    fn clear(&self) -> bool {
        self.active.swap(false, Ordering::SeqCst)
    }
}

/// Snapshot returned by a fault query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FaultReport {
    /// Whether the fault is present.
    pub active: bool,
    /// Fixed diagnostic text while active.
    pub diagnostic: Option<&'static str>,
}

impl FaultReport {
    /// Build a report from the flag value.
    pub const fn from_active(active: bool) -> Self {
        Self {
            active,
            diagnostic: if active {
                Some(HYDRAULIC_FAULT_DIAGNOSTIC)
            } else {
                None
            },
        }
    }
}
