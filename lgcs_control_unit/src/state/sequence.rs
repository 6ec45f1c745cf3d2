//! Transition sequences and fault recovery plans.
//!
//! A legal gear command is executed as a fixed list of [`Step`]s chosen by
//! [`plan_transition`] from the fault policy, the direction and the fault
//! flag sampled at command entry:
//!
//! | Policy | Fault | Down | Up |
//! |--------|-------|------|----|
//! | any | no | `Nominal(Down)` | `Nominal(Up)` |
//! | `Degraded` | yes | `BackupPump` | `FailsafeAbort` |
//! | `ImmediateGate` | yes | `Inhibit` | `Inhibit` |
//!
//! The backup pump only assists extension and the failsafe abort only
//! applies to retraction, so neither carries a direction.

use lgcs_common::gear::config::FaultPolicy;
use lgcs_common::gear::event::EventKind;
use lgcs_common::gear::state::{Direction, GearPosition};

/// How a legal command will be carried out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionPlan {
    /// Primary hydraulics healthy.
    Nominal(Direction),
    /// Extension finishes on the backup pump, fault cleared on completion.
    BackupPump,
    /// Retraction abandoned, gear parked `DownLocked`, fault kept.
    FailsafeAbort,
    /// Command refused at entry, machine parks in `Fault`.
    Inhibit,
}

/// Modeled duration a [`Step::Wait`] consumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaitFor {
    /// Nominal transition time for the direction.
    Nominal,
    /// Backup pump recovery time.
    BackupPump,
}

/// One step of a transition sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Block for a modeled duration.
    Wait(WaitFor),
    /// Emit an event at the current position.
    Emit(EventKind),
    /// Move to a position.
    Enter(GearPosition),
    /// Drop the hydraulic fault flag.
    ClearFault,
}

use Step::{ClearFault, Emit, Enter, Wait};

const NOMINAL_DOWN: &[Step] = &[
    Enter(Direction::Down.transit()),
    Emit(EventKind::Deploying),
    Wait(WaitFor::Nominal),
    Enter(GearPosition::DownLocked),
    Emit(EventKind::DownLocked),
];

const NOMINAL_UP: &[Step] = &[
    Enter(Direction::Up.transit()),
    Emit(EventKind::Retracting),
    Wait(WaitFor::Nominal),
    Enter(GearPosition::UpLocked),
    Emit(EventKind::UpLocked),
];

const BACKUP_PUMP_DOWN: &[Step] = &[
    Enter(Direction::Down.transit()),
    Emit(EventKind::Deploying),
    Wait(WaitFor::Nominal),
    Emit(EventKind::TimeExceeded(Direction::Down)),
    Emit(EventKind::LowHydraulicPressure),
    Emit(EventKind::BackupPumpActivated),
    Wait(WaitFor::BackupPump),
    Emit(EventKind::BackupOperationComplete),
    ClearFault,
    Emit(EventKind::FaultCleared),
    Enter(GearPosition::DownLocked),
    Emit(EventKind::DownLocked),
];

const FAILSAFE_ABORT_UP: &[Step] = &[
    Enter(Direction::Up.transit()),
    Emit(EventKind::Retracting),
    Wait(WaitFor::Nominal),
    Emit(EventKind::TimeExceeded(Direction::Up)),
    Emit(EventKind::LowHydraulicPressure),
    Emit(EventKind::RetractionAborted),
    Enter(GearPosition::DownLocked),
    Emit(EventKind::FailsafeDown),
    Emit(EventKind::MaintenanceRequired),
];

const INHIBIT: &[Step] = &[Enter(GearPosition::Fault), Emit(EventKind::CommandInhibited)];

/// Choose how a legal command is carried out.
pub const fn plan_transition(
    policy: FaultPolicy,
    direction: Direction,
    fault_active: bool,
) -> TransitionPlan {
    match (policy, direction, fault_active) {
        (_, direction, false) => TransitionPlan::Nominal(direction),
        (FaultPolicy::Degraded, Direction::Down, true) => TransitionPlan::BackupPump,
        (FaultPolicy::Degraded, Direction::Up, true) => TransitionPlan::FailsafeAbort,
        (FaultPolicy::ImmediateGate, _, true) => TransitionPlan::Inhibit,
    }
}

impl TransitionPlan {
    /// Steps of this plan.
    pub const fn steps(&self) -> &'static [Step] {
        match self {
            Self::Nominal(Direction::Down) => NOMINAL_DOWN,
            Self::Nominal(Direction::Up) => NOMINAL_UP,
            Self::BackupPump => BACKUP_PUMP_DOWN,
            Self::FailsafeAbort => FAILSAFE_ABORT_UP,
            Self::Inhibit => INHIBIT,
        }
    }

    /// Position the sequence ends in.
    pub const fn final_position(&self) -> GearPosition {
        match self {
            Self::Nominal(direction) => direction.target(),
            Self::BackupPump | Self::FailsafeAbort => GearPosition::DownLocked,
            Self::Inhibit => GearPosition::Fault,
        }
    }
}
