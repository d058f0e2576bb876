/*!
 * Error Types
 * Centralized error handling with thiserror and miette
 */

use super::types::{Pid, SimTime};
use crate::driver::DriverState;
use miette::Diagnostic;
use thiserror::Error;

/// Admission-time rejections. The simulation state is never touched when one
/// of these is returned.
#[derive(Error, Debug, Clone, PartialEq, Eq, Diagnostic)]
pub enum ValidationError {
    #[error("Process name cannot be empty")]
    #[diagnostic(
        code(admission::empty_name),
        help("Every process needs a non-empty, run-unique name.")
    )]
    EmptyName,

    #[error("Process '{0}' already exists in this run")]
    #[diagnostic(
        code(admission::duplicate_name),
        help("Names are unique across the active set and the admission queue, including finished processes.")
    )]
    DuplicateName(String),

    #[error("Process '{name}' has non-positive burst {burst}")]
    #[diagnostic(code(admission::non_positive_burst))]
    NonPositiveBurst { name: String, burst: i64 },

    #[error("Process '{name}' has negative arrival {arrival}")]
    #[diagnostic(code(admission::negative_arrival))]
    NegativeArrival { name: String, arrival: i64 },

    #[error("Process '{name}' has negative priority {priority}")]
    #[diagnostic(code(admission::negative_priority))]
    NegativePriority { name: String, priority: i64 },

    #[error("Process '{name}' has no priority but policy '{policy}' requires one")]
    #[diagnostic(
        code(admission::missing_priority),
        help("Priority policies order by the priority field; supply one for every process.")
    )]
    MissingPriority { name: String, policy: &'static str },

    #[error("Process '{name}' has non-positive quantum override {quantum}")]
    #[diagnostic(code(admission::non_positive_quantum))]
    NonPositiveQuantum { name: String, quantum: i64 },

    #[error("Value {value} for '{field}' of process '{name}' is out of range")]
    #[diagnostic(code(admission::out_of_range))]
    OutOfRange {
        name: String,
        field: &'static str,
        value: i64,
    },
}

/// Driver operations requested in a state that does not allow them
#[derive(Error, Debug, Clone, PartialEq, Eq, Diagnostic)]
pub enum StateError {
    #[error("Cannot pause: driver is {0}, not running")]
    #[diagnostic(code(driver::not_running))]
    NotRunning(DriverState),

    #[error("Cannot resume: driver is {0}, not paused")]
    #[diagnostic(code(driver::not_paused))]
    NotPaused(DriverState),

    #[error("Admission closed: driver is {0}")]
    #[diagnostic(
        code(driver::admission_closed),
        help("A drained, stopped or terminated run never accepts new processes. Start a new run.")
    )]
    AdmissionClosed(DriverState),

    #[error("Invalid driver state transition: {from} -> {to}")]
    #[diagnostic(code(driver::invalid_transition))]
    InvalidTransition { from: DriverState, to: DriverState },

    #[error("Driver thread was already joined")]
    #[diagnostic(code(driver::already_joined))]
    AlreadyJoined,
}

/// A policy returned a decision that violates the selection contract. This is
/// a defect in the policy and halts the run.
#[derive(Error, Debug, Clone, PartialEq, Eq, Diagnostic)]
pub enum PolicyError {
    #[error("Policy '{policy}' selected unknown pid {pid} at time {time}")]
    #[diagnostic(code(policy::unknown_process))]
    UnknownProcess {
        policy: &'static str,
        pid: Pid,
        time: SimTime,
    },

    #[error("Policy '{policy}' selected completed process '{name}' at time {time}")]
    #[diagnostic(code(policy::completed_process))]
    CompletedProcess {
        policy: &'static str,
        name: String,
        time: SimTime,
    },

    #[error("Policy '{policy}' selected '{name}' at time {time} before its arrival {arrival}")]
    #[diagnostic(code(policy::not_arrived))]
    NotArrived {
        policy: &'static str,
        name: String,
        arrival: SimTime,
        time: SimTime,
    },

    #[error("Policy '{policy}' gave '{name}' slice {slice} with {remaining} units remaining")]
    #[diagnostic(code(policy::invalid_slice))]
    InvalidSlice {
        policy: &'static str,
        name: String,
        slice: u64,
        remaining: u64,
    },

    #[error("Policy '{policy}' returned no decision at time {time} while {ready} process(es) were ready")]
    #[diagnostic(
        code(policy::stalled),
        help("select() may only return None when nothing has arrived or everything is finished.")
    )]
    Stalled {
        policy: &'static str,
        time: SimTime,
        ready: usize,
    },
}

/// Workload and environment configuration errors
#[derive(Error, Debug, Diagnostic)]
pub enum ConfigError {
    #[error("Failed to read workload file {path}: {source}")]
    #[diagnostic(code(config::io))]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse workload: {0}")]
    #[diagnostic(code(config::parse))]
    Parse(#[from] serde_json::Error),

    #[error("Invalid policy '{0}'. Valid: fcfs, sjf, srtf, priority, priority_preemptive, round_robin")]
    #[diagnostic(code(config::invalid_policy))]
    InvalidPolicy(String),

    #[error("Invalid value '{value}' for {key}: {reason}")]
    #[diagnostic(code(config::invalid_env))]
    InvalidEnv {
        key: &'static str,
        value: String,
        reason: String,
    },
}

/// Top-level simulator error
#[derive(Error, Debug, Diagnostic)]
pub enum SimError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    State(#[from] StateError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Policy(#[from] PolicyError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Config(#[from] ConfigError),

    #[error("Driver thread panicked: {0}")]
    #[diagnostic(code(driver::panicked))]
    DriverPanicked(String),

    #[error("Failed to spawn driver thread: {0}")]
    #[diagnostic(code(driver::spawn_failed))]
    SpawnFailed(String),
}

impl SimError {
    /// Recoverable errors leave the driver running
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::Validation(_) | Self::State(_) | Self::Config(_))
    }
}
