/*!
 * Driver lifecycle: start, drain, stop, faults and join
 */

use crate::support::{executions, slow, wait_for};
use pretty_assertions::assert_eq;
use sched_sim::{
    ChannelSink, Decision, DriverConfig, DriverState, ExecutionDriver, Fcfs, PolicyError,
    PolicyKind, ProcessRecord, ProcessSpec, RunOutcome, SchedulingPolicy, SimError, SimEvent,
    SimTime, StateError, ValidationError,
};

fn fcfs_workload() -> Vec<ProcessSpec> {
    vec![
        ProcessSpec::new("A", 0, 4),
        ProcessSpec::new("B", 0, 3),
        ProcessSpec::new("C", 1, 2),
    ]
}

#[test]
fn test_run_drains_and_terminates() {
    let (sink, rx) = ChannelSink::unbounded();
    let mut driver =
        ExecutionDriver::start(Fcfs, &fcfs_workload(), DriverConfig::instant(), sink).unwrap();

    let summary = driver.join().unwrap();
    assert_eq!(summary.outcome, RunOutcome::Completed);
    assert_eq!(summary.final_time, 9);
    assert_eq!(summary.completion_order(), vec!["A", "B", "C"]);
    assert_eq!(driver.state(), DriverState::Terminated);

    let events: Vec<SimEvent> = rx.try_iter().collect();
    let runs = executions(&events);
    let times: Vec<SimTime> = runs.iter().map(|(_, t)| *t).collect();
    assert_eq!(times, (0..9).collect::<Vec<_>>());
    assert_eq!(runs[0].0, "A");
    assert_eq!(runs[4].0, "B");
    assert_eq!(runs[8].0, "C");
}

#[test]
fn test_event_order() {
    let (sink, rx) = ChannelSink::unbounded();
    let mut driver =
        ExecutionDriver::start(Fcfs, &fcfs_workload(), DriverConfig::instant(), sink).unwrap();
    driver.join().unwrap();

    let events: Vec<SimEvent> = rx.try_iter().collect();

    // Initial merge, then execute/snapshot pairs
    match &events[0] {
        SimEvent::Snapshot { rows } => {
            assert_eq!(rows.len(), 3);
            assert!(rows.iter().all(|r| r.remaining == r.burst));
        }
        other => panic!("expected initial snapshot, got {:?}", other),
    }
    assert!(matches!(events[1], SimEvent::Execute { .. }));
    match &events[2] {
        SimEvent::Snapshot { rows } => assert_eq!(rows[0].remaining, 3),
        other => panic!("expected snapshot, got {:?}", other),
    }

    let n = events.len();
    assert!(matches!(events[n - 2], SimEvent::Statistics { .. }));
    assert_eq!(events[n - 1], SimEvent::Done { outcome: RunOutcome::Completed });
    assert_eq!(events.iter().filter(|e| e.is_done()).count(), 1);
    let statistics = events
        .iter()
        .filter(|e| matches!(e, SimEvent::Statistics { .. }))
        .count();
    assert_eq!(statistics, 1);
}

#[test]
fn test_builder_with_policy_kind() {
    let mut driver = ExecutionDriver::builder()
        .policy_kind(PolicyKind::RoundRobin)
        .config(DriverConfig::instant().with_default_quantum(2))
        .process(ProcessSpec::new("P1", 0, 5))
        .process(ProcessSpec::new("P2", 1, 11))
        .process(ProcessSpec::new("P3", 2, 8))
        .start()
        .unwrap();

    let summary = driver.join().unwrap();
    assert_eq!(summary.policy, "round_robin");
    assert_eq!(summary.completion("P1"), Some(11));
    assert_eq!(summary.completion("P3"), Some(21));
    assert_eq!(summary.completion("P2"), Some(24));
}

#[test]
fn test_empty_run_drains_immediately() {
    let mut driver = ExecutionDriver::builder()
        .config(DriverConfig::instant())
        .start()
        .unwrap();
    let summary = driver.join().unwrap();
    assert_eq!(summary.outcome, RunOutcome::Completed);
    assert_eq!(summary.final_time, 0);
    assert_eq!(summary.statistics.avg_waiting, 0.0);
}

#[test]
fn test_invalid_initial_spec_rejects_start() {
    let result = ExecutionDriver::builder()
        .config(DriverConfig::instant())
        .process(ProcessSpec::new("A", 0, 2))
        .process(ProcessSpec::new("B", 0, 0))
        .start();
    assert!(matches!(
        result,
        Err(SimError::Validation(ValidationError::NonPositiveBurst { .. }))
    ));
}

#[test]
fn test_stop_cancels_and_still_reports() {
    let (sink, rx) = ChannelSink::unbounded();
    let mut driver = ExecutionDriver::builder()
        .config(slow())
        .process(ProcessSpec::new("Long", 0, 1_000))
        .sink(sink.without_snapshots())
        .start()
        .unwrap();

    assert!(wait_for(|| driver.current_time() >= 2));
    driver.stop();
    let summary = driver.join().unwrap();

    assert_eq!(summary.outcome, RunOutcome::Cancelled);
    assert!(summary.final_time < 1_000);
    assert_eq!(summary.statistics.completed, 0);
    assert_eq!(summary.statistics.avg_turnaround, 0.0);
    assert!(summary.completion("Long").is_none());

    let events: Vec<SimEvent> = rx.try_iter().collect();
    assert!(events.iter().any(|e| matches!(e, SimEvent::Statistics { .. })));
    assert_eq!(events.last(), Some(&SimEvent::Done { outcome: RunOutcome::Cancelled }));
}

/// Hands out a pid that does not exist
struct Rogue;

impl SchedulingPolicy for Rogue {
    fn name(&self) -> &'static str {
        "rogue"
    }

    fn is_preemptive(&self) -> bool {
        false
    }

    fn select(&mut self, _active: &[ProcessRecord], _now: SimTime) -> Option<Decision> {
        Some(Decision::new(99, 1))
    }
}

#[test]
fn test_policy_fault_halts_run() {
    let (sink, rx) = ChannelSink::unbounded();
    let mut driver = ExecutionDriver::start(
        Rogue,
        &[ProcessSpec::new("A", 0, 2)],
        DriverConfig::instant(),
        sink,
    )
    .unwrap();

    let err = driver.join().unwrap_err();
    assert!(matches!(
        err,
        SimError::Policy(PolicyError::UnknownProcess { pid: 99, .. })
    ));
    assert!(!err.is_recoverable());
    assert_eq!(driver.state(), DriverState::Terminated);

    let events: Vec<SimEvent> = rx.try_iter().collect();
    assert!(executions(&events).is_empty());
    assert!(!events.iter().any(|e| matches!(e, SimEvent::Statistics { .. })));
    assert_eq!(events.last(), Some(&SimEvent::Done { outcome: RunOutcome::Faulted }));
}

#[test]
fn test_join_twice_is_state_error() {
    let mut driver = ExecutionDriver::builder()
        .config(DriverConfig::instant())
        .start()
        .unwrap();
    driver.join().unwrap();
    assert!(matches!(
        driver.join(),
        Err(SimError::State(StateError::AlreadyJoined))
    ));
}

#[test]
fn test_drop_without_join_stops_run() {
    let driver = ExecutionDriver::builder()
        .config(slow())
        .process(ProcessSpec::new("Long", 0, 1_000))
        .start()
        .unwrap();
    let handle = driver.handle();
    drop(driver);

    assert!(wait_for(|| handle.state() == DriverState::Terminated));
    assert!(handle.current_time() < 1_000);
}
