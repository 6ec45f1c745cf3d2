//! Integration test: modeled transition timing.
//!
//! Checks elapsed time against the performance requirements (gear down
//! within 5 s, gear up within 7 s) and that observers never change states.

use lgcs_common::gear::config::{FaultPolicy, GearConfig};
use lgcs_common::gear::event::{EventRecorder, NullSink};
use lgcs_common::gear::fault::HydraulicFaultLine;
use lgcs_common::gear::state::{Direction, GearPosition};
use lgcs_control_unit::clock::{SimulatedClock, ThreadClock};
use lgcs_control_unit::{CommandOutcome, GearStateMachine};
use std::time::{Duration, Instant};

fn config(initial: GearPosition, policy: FaultPolicy) -> GearConfig {
    GearConfig {
        initial_position: initial,
        fault_policy: policy,
        ..Default::default()
    }
}

fn simulated(initial: GearPosition, policy: FaultPolicy) -> GearStateMachine {
    GearStateMachine::new(
        config(initial, policy),
        HydraulicFaultLine::new(),
        SimulatedClock::new(),
        NullSink,
    )
    .unwrap()
}

#[test]
fn nominal_transitions_meet_requirements() {
    let mut sm = simulated(GearPosition::UpLocked, FaultPolicy::Degraded);

    let down = sm.command_down();
    let summary = down.summary().copied().unwrap();
    assert_eq!(summary.direction, Direction::Down);
    assert_eq!(summary.elapsed, Duration::from_secs(5));
    assert_eq!(summary.limit, Duration::from_secs(5));
    assert!(summary.met_requirement());

    let up = sm.command_up();
    let summary = up.summary().copied().unwrap();
    assert_eq!(summary.elapsed, Duration::from_secs(7));
    assert!(summary.met_requirement());

    assert_eq!(sm.elapsed(), Duration::from_secs(12));
}

#[test]
fn backup_pump_adds_its_delay() {
    let mut sm = simulated(GearPosition::UpLocked, FaultPolicy::Degraded);
    sm.inject_fault();

    let CommandOutcome::Degraded(summary) = sm.command_down() else {
        panic!("expected backup pump extension");
    };
    assert_eq!(summary.elapsed, Duration::from_secs(8));
    assert!(summary.reached_target);
    assert!(!summary.met_requirement());
}

#[test]
fn failsafe_abort_misses_target() {
    let mut sm = simulated(GearPosition::DownLocked, FaultPolicy::Degraded);
    sm.inject_fault();

    let CommandOutcome::Aborted(summary) = sm.command_up() else {
        panic!("expected failsafe abort");
    };
    assert_eq!(summary.elapsed, Duration::from_secs(7));
    assert!(!summary.reached_target);
    assert!(!summary.met_requirement());
}

#[test]
fn rejections_and_gate_take_no_time() {
    let mut sm = simulated(GearPosition::DownLocked, FaultPolicy::ImmediateGate);
    sm.command_down();
    sm.inject_fault();
    sm.command_up();
    sm.command_up();
    sm.clear_fault();
    assert_eq!(sm.elapsed(), Duration::ZERO);
}

#[test]
fn configured_times_are_used() {
    let config = GearConfig {
        gear_down_time_s: 2.5,
        gear_up_time_s: 4.0,
        backup_pump_delay_s: 1.5,
        ..config(GearPosition::UpLocked, FaultPolicy::Degraded)
    };
    let mut sm =
        GearStateMachine::new(config, HydraulicFaultLine::new(), SimulatedClock::new(), NullSink)
            .unwrap();

    sm.inject_fault();
    sm.command_down();
    assert_eq!(sm.elapsed(), Duration::from_secs(4));
    sm.command_up();
    assert_eq!(sm.elapsed(), Duration::from_secs(8));
}

#[test]
fn null_sink_yields_same_states_as_recorder() {
    let script: [fn(&mut GearStateMachine); 7] = [
        |sm| {
            sm.command_up();
        },
        |sm| sm.inject_fault(),
        |sm| {
            sm.command_down();
        },
        |sm| {
            sm.command_up();
        },
        |sm| {
            sm.clear_fault();
        },
        |sm| {
            sm.command_down();
        },
        |sm| sm.reset(),
    ];

    for policy in [FaultPolicy::Degraded, FaultPolicy::ImmediateGate] {
        let recorder = EventRecorder::new();
        let mut quiet = simulated(GearPosition::DownLocked, policy);
        let mut loud = GearStateMachine::new(
            config(GearPosition::DownLocked, policy),
            HydraulicFaultLine::new(),
            SimulatedClock::new(),
            recorder.clone(),
        )
        .unwrap();

        for step in script {
            step(&mut quiet);
            step(&mut loud);
            assert_eq!(quiet.position(), loud.position());
            assert_eq!(quiet.previous_position(), loud.previous_position());
            assert_eq!(quiet.query_fault(), loud.query_fault());
            assert_eq!(quiet.elapsed(), loud.elapsed());
        }
        assert!(!recorder.is_empty());
    }
}

#[test]
fn zero_time_scale_does_not_sleep() {
    let mut sm = GearStateMachine::new(
        config(GearPosition::UpLocked, FaultPolicy::Degraded),
        HydraulicFaultLine::new(),
        ThreadClock::new(0.0),
        NullSink,
    )
    .unwrap();

    let start = Instant::now();
    sm.command_down();
    sm.command_up();
    assert!(start.elapsed() < Duration::from_secs(1));
    assert_eq!(sm.elapsed(), Duration::from_secs(12));
    assert_eq!(sm.position(), GearPosition::UpLocked);
}
