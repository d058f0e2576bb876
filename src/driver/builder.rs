/*!
 * Driver Builder
 * Collects policy, configuration, initial workload and sink before start
 */

use super::config::DriverConfig;
use super::handle::{DriverHandle, ExecutionDriver};
use super::shared::Shared;
use super::state::DriverState;
use super::task;
use crate::core::errors::SimError;
use crate::core::types::SimResult;
use crate::events::{EventSink, NullSink};
use crate::monitoring::generate_run_id;
use crate::process::ProcessSpec;
use crate::scheduler::{PolicyKind, SchedulingPolicy};
use crate::simulation::{AdmissionQueue, Engine};
use std::sync::Arc;
use std::thread;
use tracing::info;
use uuid::Uuid;

enum PolicyChoice {
    Kind(PolicyKind),
    Custom(Box<dyn SchedulingPolicy>),
}

/// Builder for [`ExecutionDriver`]
///
/// Defaults to FCFS, [`DriverConfig::default`], no initial processes and a
/// [`NullSink`].
pub struct DriverBuilder {
    policy: PolicyChoice,
    config: DriverConfig,
    specs: Vec<ProcessSpec>,
    sink: Box<dyn EventSink>,
}

impl DriverBuilder {
    pub fn new() -> Self {
        Self {
            policy: PolicyChoice::Kind(PolicyKind::Fcfs),
            config: DriverConfig::default(),
            specs: Vec::new(),
            sink: Box::new(NullSink),
        }
    }

    /// Use a custom policy instance
    pub fn policy<P: SchedulingPolicy + 'static>(mut self, policy: P) -> Self {
        self.policy = PolicyChoice::Custom(Box::new(policy));
        self
    }

    /// Use a built-in policy; Round Robin takes the configured default quantum
    pub fn policy_kind(mut self, kind: PolicyKind) -> Self {
        self.policy = PolicyChoice::Kind(kind);
        self
    }

    pub fn config(mut self, config: DriverConfig) -> Self {
        self.config = config;
        self
    }

    pub fn process(mut self, spec: ProcessSpec) -> Self {
        self.specs.push(spec);
        self
    }

    pub fn processes(mut self, specs: impl IntoIterator<Item = ProcessSpec>) -> Self {
        self.specs.extend(specs);
        self
    }

    pub fn sink<S: EventSink + 'static>(mut self, sink: S) -> Self {
        self.sink = Box::new(sink);
        self
    }

    /// Validate the initial workload and spawn the driver thread
    pub fn start(self) -> SimResult<ExecutionDriver> {
        let policy = match self.policy {
            PolicyChoice::Kind(kind) => kind.build(self.config.default_quantum),
            PolicyChoice::Custom(policy) => policy,
        };

        let mut admission = AdmissionQueue::for_policy(&*policy);
        admission.admit_batch(&self.specs)?;

        let run_id = generate_run_id();
        let policy_name = policy.name();
        let shared = Arc::new(Shared::new(admission));
        shared.inner.lock().state.transition(DriverState::Running)?;

        let engine = Engine::new(policy);
        let worker = Arc::clone(&shared);
        let config = self.config;
        let sink = self.sink;

        let thread = thread::Builder::new()
            .name(format!("sim-driver-{}", short_id(&run_id)))
            .spawn(move || task::run(worker, engine, config, sink, run_id))
            .map_err(|e| {
                shared.terminate();
                SimError::SpawnFailed(e.to_string())
            })?;

        info!(
            %run_id,
            policy = policy_name,
            processes = self.specs.len(),
            "driver started"
        );

        Ok(ExecutionDriver::new(DriverHandle::new(shared), thread, run_id))
    }
}

impl Default for DriverBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn short_id(run_id: &Uuid) -> String {
    run_id.simple().to_string().chars().take(8).collect()
}
