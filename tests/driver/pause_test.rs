/*!
 * Pause and resume semantics
 */

use crate::support::{executions, slow, wait_for};
use pretty_assertions::assert_eq;
use sched_sim::{
    ChannelSink, DriverHandle, DriverState, EventSink, ExecutionDriver, ProcessSpec, RunOutcome,
    SimError, SimEvent, SimTime, StateError,
};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

#[test]
fn test_no_execution_while_paused() {
    let (sink, rx) = ChannelSink::unbounded();
    let mut driver = ExecutionDriver::builder()
        .config(slow())
        .process(ProcessSpec::new("A", 0, 30))
        .sink(sink.without_snapshots())
        .start()
        .unwrap();

    assert!(wait_for(|| driver.current_time() >= 3));
    driver.pause().unwrap();
    assert_eq!(driver.state(), DriverState::Paused);

    let before: Vec<SimEvent> = rx.try_iter().collect();
    let paused_at = driver.current_time();

    thread::sleep(Duration::from_millis(40));
    assert_eq!(rx.try_iter().count(), 0);
    assert_eq!(driver.current_time(), paused_at);

    driver.resume().unwrap();
    let summary = driver.join().unwrap();
    assert_eq!(summary.outcome, RunOutcome::Completed);
    assert_eq!(summary.completion("A"), Some(30));

    // Time continues exactly where it stopped
    let mut all = before;
    all.extend(rx.try_iter());
    let times: Vec<SimTime> = executions(&all).into_iter().map(|(_, t)| t).collect();
    assert_eq!(times, (0..30).collect::<Vec<_>>());
}

#[test]
fn test_pause_and_resume_state_errors() {
    let mut driver = ExecutionDriver::builder()
        .config(slow())
        .process(ProcessSpec::new("A", 0, 20))
        .start()
        .unwrap();

    assert!(matches!(
        driver.resume(),
        Err(SimError::State(StateError::NotPaused(DriverState::Running)))
    ));

    driver.pause().unwrap();
    assert!(matches!(
        driver.pause(),
        Err(SimError::State(StateError::NotRunning(DriverState::Paused)))
    ));

    driver.resume().unwrap();
    driver.join().unwrap();

    assert!(matches!(
        driver.pause(),
        Err(SimError::State(StateError::NotRunning(DriverState::Terminated)))
    ));
    assert!(driver.resume().is_err());
}

#[test]
fn test_stop_releases_paused_driver() {
    let mut driver = ExecutionDriver::builder()
        .config(slow())
        .process(ProcessSpec::new("A", 0, 50))
        .start()
        .unwrap();

    driver.pause().unwrap();
    driver.stop();
    let summary = driver.join().unwrap();
    assert_eq!(summary.outcome, RunOutcome::Cancelled);
}

/// Pauses the run from inside the driver thread once `at` has executed
struct PauseAt {
    at: SimTime,
    handle: Arc<parking_lot::Mutex<Option<DriverHandle>>>,
}

impl EventSink for PauseAt {
    fn on_execute(&mut self, _name: &str, time: SimTime) {
        if time == self.at {
            if let Some(handle) = self.handle.lock().as_ref() {
                handle.pause().unwrap();
            }
        }
    }
}

#[test]
fn test_pause_from_sink_callback() {
    let slot = Arc::new(parking_lot::Mutex::new(None));
    let mut driver = ExecutionDriver::builder()
        .config(slow())
        .process(ProcessSpec::new("A", 0, 10))
        .sink(PauseAt {
            at: 5,
            handle: Arc::clone(&slot),
        })
        .start()
        .unwrap();
    *slot.lock() = Some(driver.handle());

    assert!(wait_for(|| driver.state() == DriverState::Paused));
    thread::sleep(Duration::from_millis(20));
    assert_eq!(driver.current_time(), 6);

    driver.resume().unwrap();
    let summary = driver.join().unwrap();
    assert_eq!(summary.completion("A"), Some(10));
}
