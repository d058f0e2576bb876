/*!
 * Scheduling Simulator Library
 * CPU scheduling policies and a live, pausable execution driver
 */

pub mod core;
pub mod driver;
pub mod events;
pub mod monitoring;
pub mod process;
pub mod scheduler;
pub mod simulation;
pub mod workload;

// Re-exports
pub use crate::core::errors::{ConfigError, PolicyError, SimError, StateError, ValidationError};
pub use crate::core::types::{Pid, Priority, RunOutcome, SimResult, SimTime};
pub use driver::{DriverBuilder, DriverConfig, DriverHandle, DriverState, ExecutionDriver};
pub use events::{ChannelSink, EventSink, NullSink, SimEvent, TracingSink};
pub use monitoring::init_tracing;
pub use process::{LiveRow, ProcessRecord, ProcessSpec};
pub use scheduler::{
    Decision, Fcfs, PolicyKind, PriorityScheduler, RoundRobin, SchedulingPolicy, Sjf, Srtf,
};
pub use simulation::{
    run_offline, run_to_completion, Counters, RunSummary, Statistics, Timeline, TimelineEntry,
};
pub use workload::{TimedSubmission, Workload};
