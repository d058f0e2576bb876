/*!
 * Driver Loop
 *
 * Body of the driver thread. Each iteration is one simulation unit:
 * stop check, pause park, admission merge, drain check, engine step,
 * events, pacing. The engine and the sink live on this thread only.
 */

use super::config::DriverConfig;
use super::shared::Shared;
use super::state::DriverState;
use crate::core::types::{RunOutcome, SimResult};
use crate::events::EventSink;
use crate::monitoring::RunSpan;
use crate::simulation::{Engine, RunSummary, Step};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};
use tracing::{debug, error, info, trace};
use uuid::Uuid;

/// Marks the run terminated however the driver thread exits, panics included
struct TerminateOnExit<'a>(&'a Shared);

impl Drop for TerminateOnExit<'_> {
    fn drop(&mut self) {
        self.0.terminate();
    }
}

/// What the top of a unit decided under the lock
enum Gate {
    Proceed { merged: usize },
    Drained,
    Cancelled,
}

pub(super) fn run(
    shared: Arc<Shared>,
    mut engine: Engine,
    config: DriverConfig,
    mut sink: Box<dyn EventSink>,
    run_id: Uuid,
) -> SimResult<RunSummary> {
    let span = RunSpan::new(run_id, engine.policy_name());
    let _enter = span.enter();
    let _guard = TerminateOnExit(&shared);

    shared.inner.lock().driver_thread = Some(thread::current().id());

    let delay = config.unit_delay();
    info!(delay_ms = delay.as_millis() as u64, live = config.live, "run started");

    let outcome = loop {
        let merged = match gate(&shared, &mut engine) {
            Gate::Proceed { merged } => merged,
            Gate::Drained => break RunOutcome::Completed,
            Gate::Cancelled => break RunOutcome::Cancelled,
        };
        if merged > 0 {
            debug!(merged, time = engine.now(), "admissions merged");
            sink.on_snapshot(&engine.live_table());
        }

        match engine.step() {
            Ok(Step::Executed(unit)) => {
                sink.on_execute(engine.record_name(unit.pid), unit.time);
                sink.on_snapshot(&engine.live_table());
            }
            Ok(Step::Idle { time }) => trace!(time, "idle tick"),
            Err(e) => {
                error!(error = %e, time = engine.now(), "policy fault, halting run");
                span.record_outcome(RunOutcome::Faulted, engine.now());
                shared.terminate();
                sink.on_done(RunOutcome::Faulted);
                return Err(e.into());
            }
        }
        shared.publish_time(engine.now());

        if !pace(&shared, delay) {
            break RunOutcome::Cancelled;
        }
    };

    let statistics = engine.statistics();
    sink.on_statistics(&statistics);

    span.record_outcome(outcome, engine.now());
    shared.terminate();
    info!(
        %outcome,
        final_time = engine.now(),
        completed = statistics.completed,
        avg_waiting = statistics.avg_waiting,
        avg_turnaround = statistics.avg_turnaround,
        "run finished"
    );
    sink.on_done(outcome);

    Ok(engine.finish(outcome))
}

/// Top of a unit: honour stop, park while paused, merge, check for drain
fn gate(shared: &Shared, engine: &mut Engine) -> Gate {
    let mut inner = shared.inner.lock();

    while inner.state == DriverState::Paused && !shared.stop_requested() {
        if !inner.parked {
            inner.parked = true;
            debug!(time = engine.now(), "driver parked");
            shared.wake.notify_all();
        }
        shared.wake.wait(&mut inner);
    }
    inner.parked = false;

    if shared.stop_requested() {
        return Gate::Cancelled;
    }

    let merged = engine.admit(inner.admission.drain());

    // Queue was emptied above, so this is the full drain condition
    if engine.is_drained() {
        if let Err(e) = inner.state.transition(DriverState::Draining) {
            debug!(error = %e, "drain transition skipped");
        }
        return Gate::Drained;
    }

    Gate::Proceed { merged }
}

/// Sleep for one unit; false when a stop request cut it short
///
/// A pause request also ends the wait early so that `pause()` callers are
/// released within the current unit.
fn pace(shared: &Shared, delay: Duration) -> bool {
    if delay.is_zero() {
        return !shared.stop_requested();
    }

    let deadline = Instant::now() + delay;
    let mut inner = shared.inner.lock();
    loop {
        if shared.stop_requested() {
            return false;
        }
        if inner.state == DriverState::Paused {
            return true;
        }
        if shared.wake.wait_until(&mut inner, deadline).timed_out() {
            return !shared.stop_requested();
        }
    }
}
