//! Integration test: operator scenarios and the rejection no-op rule.
//!
//! Every illegal command, from every reachable position and under both
//! fault policies, must leave position, fault flag and clock untouched.

use lgcs_common::gear::config::{FaultPolicy, GearConfig};
use lgcs_common::gear::event::{EventKind, EventRecorder, RejectReason};
use lgcs_common::gear::fault::{FaultSource, HydraulicFaultLine};
use lgcs_common::gear::state::{Direction, GearPosition};
use lgcs_control_unit::clock::SimulatedClock;
use lgcs_control_unit::{CommandOutcome, GearStateMachine};

// ── Helpers ─────────────────────────────────────────────────────────

const POLICIES: [FaultPolicy; 2] = [FaultPolicy::Degraded, FaultPolicy::ImmediateGate];

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
    (sm, line, recorder)
}

fn command(sm: &mut GearStateMachine, direction: Direction) -> CommandOutcome {
    match direction {
        Direction::Down => sm.command_down(),
        Direction::Up => sm.command_up(),
    }
}

/// Drive a gate-policy machine into `Fault` from `from`.
fn latched(from: GearPosition) -> (GearStateMachine, HydraulicFaultLine, EventRecorder) {
    let (mut sm, line, recorder) = machine(from, FaultPolicy::ImmediateGate);
    sm.inject_fault();
    assert!(matches!(sm.command_down(), CommandOutcome::Inhibited { .. }));
    assert_eq!(sm.position(), GearPosition::Fault);
    (sm, line, recorder)
}

fn assert_no_op(
    sm: &mut GearStateMachine,
    line: &HydraulicFaultLine,
    recorder: &EventRecorder,
    direction: Direction,
    expected: RejectReason,
) {
    let position = sm.position();
    let previous = sm.previous_position();
    let fault = line.is_active();
    let elapsed = sm.elapsed();
    recorder.drain();

    assert_eq!(command(sm, direction), CommandOutcome::Rejected(expected));

    assert_eq!(sm.position(), position);
    assert_eq!(sm.previous_position(), previous);
    assert_eq!(line.is_active(), fault);
    assert_eq!(sm.elapsed(), elapsed);
    assert_eq!(recorder.kinds(), vec![EventKind::CommandRejected(expected)]);
}

// ── Tests ───────────────────────────────────────────────────────────

#[test]
fn wrong_direction_is_no_op_under_both_policies() {
    for policy in POLICIES {
        let (mut sm, line, recorder) = machine(GearPosition::DownLocked, policy);
        assert_no_op(&mut sm, &line, &recorder, Direction::Down, RejectReason::AlreadyDown);

        let (mut sm, line, recorder) = machine(GearPosition::UpLocked, policy);
        assert_no_op(&mut sm, &line, &recorder, Direction::Up, RejectReason::AlreadyUp);
    }
}

#[test]
fn wrong_direction_with_fault_is_no_op_when_degraded() {
    let (mut sm, line, recorder) = machine(GearPosition::DownLocked, FaultPolicy::Degraded);
    sm.inject_fault();
    assert_no_op(&mut sm, &line, &recorder, Direction::Down, RejectReason::AlreadyDown);
    assert!(line.is_active());

    let (mut sm, line, recorder) = machine(GearPosition::UpLocked, FaultPolicy::Degraded);
    sm.inject_fault();
    assert_no_op(&mut sm, &line, &recorder, Direction::Up, RejectReason::AlreadyUp);
}

#[test]
fn every_command_is_no_op_in_fault() {
    for from in [GearPosition::UpLocked, GearPosition::DownLocked] {
        let (mut sm, line, recorder) = latched(from);
        for direction in [Direction::Down, Direction::Up] {
            assert_no_op(&mut sm, &line, &recorder, direction, RejectReason::FaultLatched);
        }
    }
}

#[test]
fn transitioning_positions_never_observable_after_command() {
    for policy in POLICIES {
        for initial in [GearPosition::UpLocked, GearPosition::DownLocked] {
            for inject in [false, true] {
                for direction in [Direction::Down, Direction::Up] {
                    let (mut sm, _, _) = machine(initial, policy);
                    if inject {
                        sm.inject_fault();
                    }
                    command(&mut sm, direction);
                    assert!(
                        !sm.position().is_transitioning(),
                        "{policy:?} {initial} inject={inject} {direction:?} left {}",
                        sm.position()
                    );
                }
            }
        }
    }
}

#[test]
fn down_up_cycle_with_repeated_command() {
    for policy in POLICIES {
        let (mut sm, line, _) = machine(GearPosition::UpLocked, policy);

        assert!(matches!(sm.command_down(), CommandOutcome::Completed(_)));
        assert_eq!(sm.position(), GearPosition::DownLocked);

        assert_eq!(
            sm.command_down(),
            CommandOutcome::Rejected(RejectReason::AlreadyDown)
        );
        assert_eq!(sm.position(), GearPosition::DownLocked);

        assert!(matches!(sm.command_up(), CommandOutcome::Completed(_)));
        assert_eq!(sm.position(), GearPosition::UpLocked);
        assert!(!line.is_active());
    }
}

#[test]
fn degraded_extension_self_heals() {
    let (mut sm, line, _) = machine(GearPosition::UpLocked, FaultPolicy::Degraded);
    sm.inject_fault();

    let outcome = sm.command_down();

    assert!(matches!(outcome, CommandOutcome::Degraded(_)));
    assert_eq!(sm.position(), GearPosition::DownLocked);
    assert!(!line.is_active());
    assert!(!sm.query_fault().active);
}

#[test]
fn failsafe_retraction_keeps_fault() {
    let (mut sm, line, _) = machine(GearPosition::DownLocked, FaultPolicy::Degraded);
    sm.inject_fault();

    let outcome = sm.command_up();

    assert!(matches!(outcome, CommandOutcome::Aborted(_)));
    assert_eq!(sm.position(), GearPosition::DownLocked);
    assert!(line.is_active());

    // Fault persists: the next retraction aborts again.
    assert!(matches!(sm.command_up(), CommandOutcome::Aborted(_)));
    sm.clear_fault();
    assert!(matches!(sm.command_up(), CommandOutcome::Completed(_)));
    assert_eq!(sm.position(), GearPosition::UpLocked);
}

#[test]
fn reset_recovers_from_any_position() {
    for policy in POLICIES {
        for initial in [GearPosition::UpLocked, GearPosition::DownLocked] {
            let (mut sm, line, _) = machine(initial, policy);
            sm.inject_fault();
            let legal = if initial == GearPosition::UpLocked {
                Direction::Down
            } else {
                Direction::Up
            };
            command(&mut sm, legal);
            sm.reset();
            assert_eq!(sm.position(), initial);
            assert_eq!(sm.previous_position(), initial);
            assert!(!line.is_active());
        }
    }
}

#[test]
fn machines_use_independent_fault_lines() {
    let (mut a, line_a, _) = machine(GearPosition::UpLocked, FaultPolicy::Degraded);
    let (mut b, line_b, _) = machine(GearPosition::UpLocked, FaultPolicy::Degraded);

    a.inject_fault();
    assert!(line_a.is_active());
    assert!(!line_b.is_active());

    assert!(matches!(a.command_down(), CommandOutcome::Degraded(_)));
    assert!(matches!(b.command_down(), CommandOutcome::Completed(_)));
}

#[test]
fn external_fault_line_is_seen_by_next_command() {
    let (mut sm, line, _) = machine(GearPosition::DownLocked, FaultPolicy::Degraded);
    // Raised by another component sharing the line.
    line.clone().inject();
    assert!(sm.query_fault().active);
    assert!(matches!(sm.command_up(), CommandOutcome::Aborted(_)));
}
