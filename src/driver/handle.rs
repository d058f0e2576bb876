/*!
 * Driver Handles
 * Owner and cloneable control handles for a running simulation
 */

use super::builder::DriverBuilder;
use super::config::DriverConfig;
use super::shared::Shared;
use super::state::DriverState;
use crate::core::errors::{SimError, StateError};
use crate::core::types::{Pid, SimResult, SimTime};
use crate::events::EventSink;
use crate::process::ProcessSpec;
use crate::scheduler::SchedulingPolicy;
use crate::simulation::RunSummary;
use std::any::Any;
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Cloneable control surface of a run, usable from any thread
#[derive(Clone)]
pub struct DriverHandle {
    shared: Arc<Shared>,
}

impl DriverHandle {
    pub(super) fn new(shared: Arc<Shared>) -> Self {
        Self { shared }
    }

    /// Admit a process into the running simulation
    ///
    /// The record becomes visible to the policy at the next unit boundary.
    pub fn submit(&self, spec: ProcessSpec) -> SimResult<Pid> {
        let mut inner = self.shared.inner.lock();

        if self.shared.stop_requested() || !inner.state.accepts_admission() {
            let state = inner.state;
            drop(inner);
            warn!(name = %spec.name, state = %state, "submission after admission closed");
            return Err(StateError::AdmissionClosed(state).into());
        }

        let admitted = inner.admission.admit(&spec);
        drop(inner);

        match admitted {
            Ok(pid) => {
                info!(
                    pid,
                    name = %spec.name,
                    arrival = spec.arrival,
                    burst = spec.burst,
                    "process admitted"
                );
                Ok(pid)
            }
            Err(e) => {
                warn!(name = %spec.name, error = %e, "submission rejected");
                Err(e.into())
            }
        }
    }

    /// Pause the run
    ///
    /// Returns once the driver thread has parked, so no execution event
    /// follows a successful call. Called from the driver thread itself (from
    /// inside a sink callback) it returns immediately and the driver parks at
    /// the next unit boundary.
    pub fn pause(&self) -> SimResult<()> {
        let mut inner = self.shared.inner.lock();
        if inner.state != DriverState::Running || self.shared.stop_requested() {
            return Err(StateError::NotRunning(inner.state).into());
        }
        inner.state = DriverState::Paused;
        self.shared.wake.notify_all();

        if inner.driver_thread == Some(thread::current().id()) {
            drop(inner);
            info!(time = self.shared.now(), "pause requested from driver thread");
            return Ok(());
        }

        while !inner.parked && inner.state == DriverState::Paused && !self.shared.stop_requested() {
            self.shared.wake.wait(&mut inner);
        }
        drop(inner);
        info!(time = self.shared.now(), "run paused");
        Ok(())
    }

    pub fn resume(&self) -> SimResult<()> {
        let mut inner = self.shared.inner.lock();
        if inner.state != DriverState::Paused {
            return Err(StateError::NotPaused(inner.state).into());
        }
        inner.state = DriverState::Running;
        self.shared.wake.notify_all();
        drop(inner);
        info!(time = self.shared.now(), "run resumed");
        Ok(())
    }

    /// Request cancellation; the run ends at the next unit boundary or
    /// suspension point without finishing the current slice
    pub fn stop(&self) {
        if !self.shared.stop_requested() {
            info!(time = self.shared.now(), "stop requested");
        }
        self.shared.request_stop();
    }

    pub fn state(&self) -> DriverState {
        self.shared.inner.lock().state
    }

    /// Simulation time published by the driver thread, read without the lock
    #[inline]
    pub fn current_time(&self) -> SimTime {
        self.shared.now()
    }
}

impl std::fmt::Debug for DriverHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DriverHandle")
            .field("state", &self.state())
            .field("current_time", &self.current_time())
            .finish()
    }
}

/// Owner of a running simulation and its driver thread
pub struct ExecutionDriver {
    handle: DriverHandle,
    thread: Option<JoinHandle<SimResult<RunSummary>>>,
    run_id: Uuid,
}

impl ExecutionDriver {
    pub fn builder() -> DriverBuilder {
        DriverBuilder::new()
    }

    /// Validate `specs` and start the driver thread
    ///
    /// Any invalid spec rejects the whole start.
    pub fn start<P, S>(
        policy: P,
        specs: &[ProcessSpec],
        config: DriverConfig,
        sink: S,
    ) -> SimResult<Self>
    where
        P: SchedulingPolicy + 'static,
        S: EventSink + 'static,
    {
        Self::builder()
            .policy(policy)
            .processes(specs.iter().cloned())
            .config(config)
            .sink(sink)
            .start()
    }

    pub(super) fn new(
        handle: DriverHandle,
        thread: JoinHandle<SimResult<RunSummary>>,
        run_id: Uuid,
    ) -> Self {
        Self {
            handle,
            thread: Some(thread),
            run_id,
        }
    }

    pub fn handle(&self) -> DriverHandle {
        self.handle.clone()
    }

    #[inline]
    pub fn run_id(&self) -> Uuid {
        self.run_id
    }

    pub fn submit(&self, spec: ProcessSpec) -> SimResult<Pid> {
        self.handle.submit(spec)
    }

    pub fn pause(&self) -> SimResult<()> {
        self.handle.pause()
    }

    pub fn resume(&self) -> SimResult<()> {
        self.handle.resume()
    }

    pub fn stop(&self) {
        self.handle.stop()
    }

    pub fn state(&self) -> DriverState {
        self.handle.state()
    }

    pub fn current_time(&self) -> SimTime {
        self.handle.current_time()
    }

    /// Wait for the driver thread and collect the run's results
    pub fn join(&mut self) -> SimResult<RunSummary> {
        let thread = self.thread.take().ok_or(StateError::AlreadyJoined)?;
        let result = thread
            .join()
            .map_err(|payload| SimError::DriverPanicked(panic_message(payload.as_ref())))?;
        debug!(run_id = %self.run_id, ok = result.is_ok(), "driver joined");
        result
    }
}

impl Drop for ExecutionDriver {
    fn drop(&mut self) {
        if let Some(thread) = self.thread.take() {
            if !thread.is_finished() {
                warn!(run_id = %self.run_id, "driver dropped without join, stopping run");
                self.handle.stop();
            }
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic payload".to_string()
    }
}
