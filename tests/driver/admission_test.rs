/*!
 * Dynamic admission into a running driver
 */

use crate::support::{slow, wait_for};
use pretty_assertions::assert_eq;
use sched_sim::{
    DriverConfig, DriverState, ExecutionDriver, PolicyKind, ProcessSpec, SimError, Srtf,
    StateError, ValidationError,
};
use std::thread;

#[test]
fn test_submission_while_running() {
    let mut driver = ExecutionDriver::builder()
        .config(slow())
        .process(ProcessSpec::new("A", 0, 20))
        .start()
        .unwrap();

    assert!(wait_for(|| driver.current_time() >= 2));
    let now = driver.current_time() as i64;
    let pid = driver.submit(ProcessSpec::new("B", now, 3)).unwrap();
    assert_eq!(pid, 2);

    let summary = driver.join().unwrap();
    assert_eq!(summary.completion_order(), vec!["A", "B"]);
    assert_eq!(summary.completion("B"), Some(23));
}

#[test]
fn test_short_submission_preempts_under_srtf() {
    let mut driver = ExecutionDriver::start(
        Srtf::new(),
        &[ProcessSpec::new("Long", 0, 40)],
        slow(),
        sched_sim::NullSink,
    )
    .unwrap();

    assert!(wait_for(|| driver.current_time() >= 2));
    driver.pause().unwrap();
    let now = driver.current_time();
    driver
        .submit(ProcessSpec::new("Short", now as i64, 2))
        .unwrap();
    driver.resume().unwrap();

    let summary = driver.join().unwrap();
    assert_eq!(summary.completion("Short"), Some(now + 2));
    assert_eq!(summary.completion("Long"), Some(42));
    assert_eq!(summary.counters.preemptions, 1);
}

#[test]
fn test_duplicate_rejected_and_run_continues() {
    let mut driver = ExecutionDriver::builder()
        .config(slow())
        .process(ProcessSpec::new("A", 0, 10))
        .start()
        .unwrap();
    driver.pause().unwrap();

    let err = driver.submit(ProcessSpec::new("A", 0, 1)).unwrap_err();
    assert!(matches!(
        err,
        SimError::Validation(ValidationError::DuplicateName(ref name)) if name == "A"
    ));
    assert!(err.is_recoverable());

    driver.submit(ProcessSpec::new("B", 0, 1)).unwrap();
    assert!(driver.submit(ProcessSpec::new("B", 0, 1)).is_err());
    assert!(driver.submit(ProcessSpec::new("", 0, 1)).is_err());

    driver.resume().unwrap();
    let summary = driver.join().unwrap();
    assert_eq!(summary.records.len(), 2);
    assert_eq!(summary.statistics.completed, 2);
}

#[test]
fn test_priority_required_on_submit() {
    let mut driver = ExecutionDriver::builder()
        .policy_kind(PolicyKind::PriorityPreemptive)
        .config(slow())
        .process(ProcessSpec::new("A", 0, 10).with_priority(3))
        .start()
        .unwrap();
    driver.pause().unwrap();

    assert!(matches!(
        driver.submit(ProcessSpec::new("B", 0, 1)),
        Err(SimError::Validation(ValidationError::MissingPriority { .. }))
    ));
    driver.submit(ProcessSpec::new("B", 0, 1).with_priority(1)).unwrap();

    driver.resume().unwrap();
    let summary = driver.join().unwrap();
    assert_eq!(summary.completion_order(), vec!["B", "A"]);
}

#[test]
fn test_submit_after_termination_fails() {
    let mut driver = ExecutionDriver::builder()
        .config(DriverConfig::instant())
        .process(ProcessSpec::new("A", 0, 1))
        .start()
        .unwrap();
    let handle = driver.handle();
    driver.join().unwrap();

    assert!(matches!(
        handle.submit(ProcessSpec::new("B", 0, 1)),
        Err(SimError::State(StateError::AdmissionClosed(DriverState::Terminated)))
    ));
}

#[test]
fn test_submit_after_stop_fails() {
    let mut driver = ExecutionDriver::builder()
        .config(slow())
        .process(ProcessSpec::new("A", 0, 100))
        .start()
        .unwrap();
    driver.stop();

    assert!(matches!(
        driver.submit(ProcessSpec::new("B", 0, 1)),
        Err(SimError::State(StateError::AdmissionClosed(_)))
    ));
    driver.join().unwrap();
}

#[test]
fn test_concurrent_submitters() {
    let mut driver = ExecutionDriver::builder()
        .config(slow())
        .process(ProcessSpec::new("Seed", 0, 30))
        .start()
        .unwrap();
    driver.pause().unwrap();

    let workers: Vec<_> = (0..4)
        .map(|w| {
            let handle = driver.handle();
            thread::spawn(move || {
                (0..5)
                    .map(|i| handle.submit(ProcessSpec::new(format!("w{}-{}", w, i), 0, 1)))
                    .filter(Result::is_ok)
                    .count()
            })
        })
        .collect();

    let admitted: usize = workers.into_iter().map(|w| w.join().unwrap()).sum();
    assert_eq!(admitted, 20);

    driver.resume().unwrap();
    let summary = driver.join().unwrap();
    assert_eq!(summary.statistics.completed, 21);
    assert_eq!(summary.final_time, 50);

    let mut pids: Vec<u32> = summary.records.iter().map(|r| r.pid()).collect();
    pids.sort_unstable();
    assert_eq!(pids, (1..=21).collect::<Vec<_>>());
}
