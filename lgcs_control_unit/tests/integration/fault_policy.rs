//! Integration test: hydraulic fault handling under each policy.
//!
//! Degraded: backup pump on extension, failsafe abort on retraction.
//! Immediate gate: any command with the fault active parks the gear in
//! FAULT until `clear_fault` restores the snapshot.

use lgcs_common::consts::HYDRAULIC_FAULT_DIAGNOSTIC;
use lgcs_common::gear::config::{FaultPolicy, GearConfig};
use lgcs_common::gear::event::{EventKind, EventRecorder, RejectReason, Severity};
use lgcs_common::gear::fault::{FaultSource, HydraulicFaultLine};
use lgcs_common::gear::state::{Direction, GearPosition};
use lgcs_control_unit::clock::SimulatedClock;
use lgcs_control_unit::{ClearOutcome, CommandOutcome, GearStateMachine};
use std::time::Duration;

fn machine(
    initial: GearPosition,
    policy: FaultPolicy,
) -> (GearStateMachine, HydraulicFaultLine, EventRecorder) {
    let line = HydraulicFaultLine::new();
    let recorder = EventRecorder::new();
    let config = GearConfig {
        initial_position: initial,
        fault_policy: policy,
        ..Default::default()
    };
    let sm = GearStateMachine::new(config, line.clone(), SimulatedClock::new(), recorder.clone())
        .unwrap();
    recorder.drain();
    (sm, line, recorder)
}

// ── Degraded policy ─────────────────────────────────────────────────

#[test]
fn backup_pump_extension_event_sequence() {
    let (mut sm, _, recorder) = machine(GearPosition::UpLocked, FaultPolicy::Degraded);
    sm.inject_fault();
    recorder.drain();

    sm.command_down();

    let events = recorder.events();
    let kinds: Vec<EventKind> = events.iter().map(|e| e.kind).collect();
    assert_eq!(
        kinds,
        vec![
            EventKind::Deploying,
            EventKind::TimeExceeded(Direction::Down),
            EventKind::LowHydraulicPressure,
            EventKind::BackupPumpActivated,
            EventKind::BackupOperationComplete,
            EventKind::FaultCleared,
            EventKind::DownLocked,
        ]
    );
    assert!(
        events[..events.len() - 1]
            .iter()
            .all(|e| e.position == GearPosition::TransitioningDown)
    );
    assert_eq!(events.last().map(|e| e.position), Some(GearPosition::DownLocked));
}

#[test]
fn failsafe_retraction_event_sequence() {
    let (mut sm, _, recorder) = machine(GearPosition::DownLocked, FaultPolicy::Degraded);
    sm.inject_fault();
    recorder.drain();

    sm.command_up();

    assert_eq!(
        recorder.kinds(),
        vec![
            EventKind::Retracting,
            EventKind::TimeExceeded(Direction::Up),
            EventKind::LowHydraulicPressure,
            EventKind::RetractionAborted,
            EventKind::FailsafeDown,
            EventKind::MaintenanceRequired,
        ]
    );
    let worst = recorder.events().iter().map(|e| e.kind.severity()).max();
    assert_eq!(worst, Some(Severity::Alert));
}

#[test]
fn degraded_policy_never_enters_fault() {
    for initial in [GearPosition::UpLocked, GearPosition::DownLocked] {
        for direction in [Direction::Down, Direction::Up] {
            let (mut sm, _, _) = machine(initial, FaultPolicy::Degraded);
            sm.inject_fault();
            match direction {
                Direction::Down => sm.command_down(),
                Direction::Up => sm.command_up(),
            };
            assert_ne!(sm.position(), GearPosition::Fault);
        }
    }
}

// ── Immediate gate ──────────────────────────────────────────────────

#[test]
fn gate_parks_in_fault_without_elapsed_time() {
    for initial in [GearPosition::UpLocked, GearPosition::DownLocked] {
        let (mut sm, line, recorder) = machine(initial, FaultPolicy::ImmediateGate);
        sm.inject_fault();
        recorder.drain();

        let outcome = sm.command_down();

        assert_eq!(outcome, CommandOutcome::Inhibited { previous: initial });
        assert_eq!(sm.position(), GearPosition::Fault);
        assert_eq!(sm.previous_position(), initial);
        assert_eq!(sm.elapsed(), Duration::ZERO);
        assert!(line.is_active());
        assert_eq!(recorder.kinds(), vec![EventKind::CommandInhibited]);
    }
}

#[test]
fn gate_clear_restores_snapshot_and_drops_flag() {
    let (mut sm, line, recorder) = machine(GearPosition::UpLocked, FaultPolicy::ImmediateGate);
    sm.inject_fault();
    sm.command_down();
    recorder.drain();

    assert_eq!(sm.clear_fault(), ClearOutcome::Restored(GearPosition::UpLocked));
    assert_eq!(sm.position(), GearPosition::UpLocked);
    assert!(!line.is_active());
    assert_eq!(recorder.kinds(), vec![EventKind::SystemRestored]);

    // Normal operation resumes.
    assert!(matches!(sm.command_down(), CommandOutcome::Completed(_)));
    assert_eq!(sm.position(), GearPosition::DownLocked);
}

#[test]
fn gate_latches_until_cleared() {
    let (mut sm, line, _) = machine(GearPosition::DownLocked, FaultPolicy::ImmediateGate);
    sm.inject_fault();
    sm.command_up();

    // Clearing the line from outside does not unlatch the machine.
    line.clear();
    assert_eq!(
        sm.command_up(),
        CommandOutcome::Rejected(RejectReason::FaultLatched)
    );
    assert_eq!(sm.clear_fault(), ClearOutcome::Restored(GearPosition::DownLocked));
}

#[test]
fn gate_without_fault_runs_nominal() {
    let (mut sm, _, _) = machine(GearPosition::DownLocked, FaultPolicy::ImmediateGate);
    assert!(matches!(sm.command_up(), CommandOutcome::Completed(_)));
    assert_eq!(sm.position(), GearPosition::UpLocked);
}

// ── Fault API ───────────────────────────────────────────────────────

#[test]
fn clear_outside_fault_keeps_position() {
    for policy in [FaultPolicy::Degraded, FaultPolicy::ImmediateGate] {
        let (mut sm, line, recorder) = machine(GearPosition::UpLocked, policy);
        sm.inject_fault();
        recorder.drain();

        assert_eq!(sm.clear_fault(), ClearOutcome::Cleared);
        assert_eq!(sm.position(), GearPosition::UpLocked);
        assert!(!line.is_active());

        assert_eq!(sm.clear_fault(), ClearOutcome::NothingToClear);
        assert_eq!(
            recorder.kinds(),
            vec![EventKind::FaultCleared, EventKind::NoFaultToClear]
        );
    }
}

#[test]
fn query_reports_diagnostic_only_when_active() {
    let (mut sm, _, recorder) = machine(GearPosition::DownLocked, FaultPolicy::Degraded);
    let report = sm.query_fault();
    assert!(!report.active);
    assert_eq!(report.diagnostic, None);

    sm.inject_fault();
    recorder.drain();
    let report = sm.query_fault();
    assert!(report.active);
    assert_eq!(report.diagnostic, Some(HYDRAULIC_FAULT_DIAGNOSTIC));
    assert!(recorder.is_empty());
}

#[test]
fn inject_does_not_move_gear() {
    let (mut sm, _, recorder) = machine(GearPosition::UpLocked, FaultPolicy::ImmediateGate);
    sm.inject_fault();
    assert_eq!(sm.position(), GearPosition::UpLocked);
    assert_eq!(recorder.kinds(), vec![EventKind::FaultInjected]);
}
