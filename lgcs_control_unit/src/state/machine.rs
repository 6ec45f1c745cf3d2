//! GearStateMachine: sequencing, preconditions and hydraulic fault handling.
//!
//! Positions: UpLocked ⇄ TransitioningDown/TransitioningUp ⇄ DownLocked, plus
//! Fault under the immediate-gate policy.
//!
//! Commands are synchronous and take `&mut self`, so one command always runs
//! to completion before the next is accepted. The fault flag is sampled once
//! at command entry and that snapshot drives the whole command.

use std::time::Duration;

use lgcs_common::config::ConfigError;
use lgcs_common::gear::config::{FaultPolicy, GearConfig};
use lgcs_common::gear::event::{EventKind, EventSink, GearEvent, RejectReason};
use lgcs_common::gear::fault::{FaultReport, FaultSource};
use lgcs_common::gear::state::{Direction, GearPosition};
use tracing::debug;

use crate::clock::PacingClock;
use crate::state::sequence::{Step, TransitionPlan, WaitFor, plan_transition};

/// Timing of one executed transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransitionSummary {
    /// Commanded direction.
    pub direction: Direction,
    /// Modeled time from command acceptance to the final position.
    pub elapsed: Duration,
    /// Performance requirement for the direction.
    pub limit: Duration,
    /// Whether the commanded position was reached.
    pub reached_target: bool,
}

impl TransitionSummary {
    /// Target reached within the performance requirement.
    #[inline]
    pub fn met_requirement(&self) -> bool {
        self.reached_target && self.elapsed <= self.limit
    }
}

/// Result of a gear command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandOutcome {
    /// Nominal transition.
    Completed(TransitionSummary),
    /// Extension completed on the backup pump.
    Degraded(TransitionSummary),
    /// Retraction aborted, gear held down.
    Aborted(TransitionSummary),
    /// Command inhibited by an active fault, machine parked in `Fault`.
    Inhibited {
        /// Position snapshot restored by `clear_fault`.
        previous: GearPosition,
    },
    /// Command illegal for the current position, nothing changed.
    Rejected(RejectReason),
}

impl CommandOutcome {
    /// Timing of the transition, if one ran.
    pub const fn summary(&self) -> Option<&TransitionSummary> {
        match self {
            Self::Completed(s) | Self::Degraded(s) | Self::Aborted(s) => Some(s),
            Self::Inhibited { .. } | Self::Rejected(_) => None,
        }
    }
}

/// Result of `clear_fault`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClearOutcome {
    /// Left `Fault` and returned to the snapshot position.
    Restored(GearPosition),
    /// Fault flag dropped, position untouched.
    Cleared,
    /// No fault present.
    NothingToClear,
}

/// Landing gear sequencing state machine.
pub struct GearStateMachine {
    config: GearConfig,
    position: GearPosition,
    /// Snapshot taken on entry to `Fault`.
    previous: GearPosition,
    fault: Box<dyn FaultSource>,
    clock: Box<dyn PacingClock>,
    sink: Box<dyn EventSink>,
}

impl std::fmt::Debug for GearStateMachine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GearStateMachine")
            .field("position", &self.position)
            .field("previous", &self.previous)
            .field("fault_active", &self.fault.is_active())
            .field("policy", &self.config.fault_policy)
            .finish_non_exhaustive()
    }
}

impl GearStateMachine {
    /// Create a machine in the configured initial position.
    ///
    /// Emits `SystemInitialised`.
    ///
    /// # Errors
    /// `ConfigError::ValidationError` if `config` fails validation.
    pub fn new(
        config: GearConfig,
        fault: impl FaultSource + 'static,
        clock: impl PacingClock + 'static,
        sink: impl EventSink + 'static,
    ) -> Result<Self, ConfigError> {
        config.validate().map_err(ConfigError::ValidationError)?;
        let initial = config.initial_position;
        let mut machine = Self {
            config,
            position: initial,
            previous: initial,
            fault: Box::new(fault),
            clock: Box::new(clock),
            sink: Box::new(sink),
        };
        machine.emit(EventKind::SystemInitialised);
        Ok(machine)
    }

    /// Current position.
    #[inline]
    pub fn position(&self) -> GearPosition {
        self.position
    }

    /// Position snapshot taken on the last entry to `Fault`.
    #[inline]
    pub fn previous_position(&self) -> GearPosition {
        self.previous
    }

    /// Active fault policy.
    #[inline]
    pub fn policy(&self) -> FaultPolicy {
        self.config.fault_policy
    }

    #[inline]
    pub fn config(&self) -> &GearConfig {
        &self.config
    }

    /// Total modeled time spent in transitions.
    #[inline]
    pub fn elapsed(&self) -> Duration {
        self.clock.elapsed()
    }

    /// Request extension to `DownLocked`. Legal only from `UpLocked`.
    pub fn command_down(&mut self) -> CommandOutcome {
        self.command(Direction::Down)
    }

    /// Request retraction to `UpLocked`. Legal only from `DownLocked`.
    pub fn command_up(&mut self) -> CommandOutcome {
        self.command(Direction::Up)
    }

    /// Raise the hydraulic fault. Position is untouched; the next command
    /// reacts to it.
    pub fn inject_fault(&mut self) {
        self.fault.inject();
        self.emit(EventKind::FaultInjected);
    }

    /// Clear the hydraulic fault.
    ///
    /// From `Fault` the pre-fault position is restored. Elsewhere only the
    /// flag is dropped.
    pub fn clear_fault(&mut self) -> ClearOutcome {
        let was_active = self.fault.clear();
        if self.position == GearPosition::Fault {
            self.position = self.previous;
            self.emit(EventKind::SystemRestored);
            ClearOutcome::Restored(self.position)
        } else if was_active {
            self.emit(EventKind::FaultCleared);
            ClearOutcome::Cleared
        } else {
            self.emit(EventKind::NoFaultToClear);
            ClearOutcome::NothingToClear
        }
    }

    /// Fault status. No side effects.
    pub fn query_fault(&self) -> FaultReport {
        FaultReport::from_active(self.fault.is_active())
    }

    /// Return to the configured initial position and drop any fault.
    pub fn reset(&mut self) {
        self.fault.clear();
        self.position = self.config.initial_position;
        self.previous = self.position;
        self.emit(EventKind::SystemReset);
    }

    fn command(&mut self, direction: Direction) -> CommandOutcome {
        let fault_active = self.fault.is_active();
        debug!(
            direction = direction.as_str(),
            position = self.position.label(),
            fault_active,
            "gear command"
        );

        debug_assert!(
            !self.position.is_transitioning(),
            "command entered while {} is still in progress",
            self.position
        );

        if let Some(reason) = self.precondition(direction, fault_active) {
            self.emit(EventKind::CommandRejected(reason));
            return CommandOutcome::Rejected(reason);
        }

        let plan = plan_transition(self.config.fault_policy, direction, fault_active);
        if plan == TransitionPlan::Inhibit {
            self.previous = self.position;
        }

        let start = self.clock.elapsed();
        for step in plan.steps() {
            self.execute(*step, direction);
        }
        debug_assert_eq!(self.position, plan.final_position());

        let summary = TransitionSummary {
            direction,
            elapsed: self.clock.elapsed().saturating_sub(start),
            limit: self.config.transition_time(direction),
            reached_target: self.position == direction.target(),
        };

        match plan {
            TransitionPlan::Nominal(_) => CommandOutcome::Completed(summary),
            TransitionPlan::BackupPump => CommandOutcome::Degraded(summary),
            TransitionPlan::FailsafeAbort => CommandOutcome::Aborted(summary),
            TransitionPlan::Inhibit => CommandOutcome::Inhibited {
                previous: self.previous,
            },
        }
    }

    /// Reason the command must be refused, if any.
    fn precondition(&self, direction: Direction, fault_active: bool) -> Option<RejectReason> {
        match self.position {
            GearPosition::Fault => Some(RejectReason::FaultLatched),
            GearPosition::TransitioningDown | GearPosition::TransitioningUp => {
                Some(RejectReason::InTransit)
            }
            // The gate inhibits any command, including wrong-direction ones.
            _ if fault_active && self.config.fault_policy == FaultPolicy::ImmediateGate => None,
            pos if pos == direction.origin() => None,
            GearPosition::DownLocked => Some(RejectReason::AlreadyDown),
            GearPosition::UpLocked => Some(RejectReason::AlreadyUp),
        }
    }

    fn execute(&mut self, step: Step, direction: Direction) {
        match step {
            Step::Wait(WaitFor::Nominal) => {
                let duration = self.config.transition_time(direction);
                self.clock.wait(duration);
            }
            Step::Wait(WaitFor::BackupPump) => {
                let duration = self.config.backup_pump_delay();
                self.clock.wait(duration);
            }
            Step::Emit(kind) => self.emit(kind),
            Step::Enter(position) => self.position = position,
            Step::ClearFault => {
                self.fault.clear();
            }
        }
    }

    fn emit(&mut self, kind: EventKind) {
        let event = GearEvent::now(self.position, kind);
        self.sink.record(&event);
    }
}

// ─── Tests ──────────────────────────────────────────────────────────
