/*!
 * Process Records
 * Submission specs and the driver-mutated records built from them
 */

use super::validation::{validate_spec, ValidSpec};
use crate::core::errors::ValidationError;
use crate::core::types::{Pid, Priority, SimTime};
use serde::{Deserialize, Serialize};

/// Process submission shape at the admission boundary
///
/// Fields are signed so that negative input reaches validation and is
/// reported, instead of failing to deserialize.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessSpec {
    pub name: String,
    pub arrival: i64,
    pub burst: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantum: Option<i64>,
}

impl ProcessSpec {
    pub fn new(name: impl Into<String>, arrival: i64, burst: i64) -> Self {
        Self {
            name: name.into(),
            arrival,
            burst,
            priority: None,
            quantum: None,
        }
    }

    #[must_use]
    pub fn with_priority(mut self, priority: i64) -> Self {
        self.priority = Some(priority);
        self
    }

    #[must_use]
    pub fn with_quantum(mut self, quantum: i64) -> Self {
        self.quantum = Some(quantum);
        self
    }
}

/// One unit of work inside a run
///
/// `executed` and `completion` are only mutated by the simulation engine;
/// everything else is fixed at admission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProcessRecord {
    pid: Pid,
    name: String,
    arrival: SimTime,
    burst: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    priority: Option<Priority>,
    #[serde(skip_serializing_if = "Option::is_none")]
    quantum: Option<u64>,
    executed: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    completion: Option<SimTime>,
}

impl ProcessRecord {
    /// Build a fresh record from a spec, validating every field
    pub fn from_spec(
        pid: Pid,
        spec: &ProcessSpec,
        requires_priority: Option<&'static str>,
    ) -> Result<Self, ValidationError> {
        let valid = validate_spec(spec, requires_priority)?;
        Ok(Self::from_valid(pid, valid))
    }

    pub(crate) fn from_valid(pid: Pid, valid: ValidSpec) -> Self {
        Self {
            pid,
            name: valid.name,
            arrival: valid.arrival,
            burst: valid.burst,
            priority: valid.priority,
            quantum: valid.quantum,
            executed: 0,
            completion: None,
        }
    }

    #[inline]
    pub fn pid(&self) -> Pid {
        self.pid
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn arrival(&self) -> SimTime {
        self.arrival
    }

    #[inline]
    pub fn burst(&self) -> u64 {
        self.burst
    }

    #[inline]
    pub fn priority(&self) -> Option<Priority> {
        self.priority
    }

    #[inline]
    pub fn quantum(&self) -> Option<u64> {
        self.quantum
    }

    #[inline]
    pub fn executed(&self) -> u64 {
        self.executed
    }

    #[inline]
    pub fn completion(&self) -> Option<SimTime> {
        self.completion
    }

    /// Units of work still owed
    #[inline]
    pub fn remaining(&self) -> u64 {
        self.burst - self.executed
    }

    #[inline]
    pub fn is_finished(&self) -> bool {
        self.completion.is_some()
    }

    #[inline]
    pub fn has_arrived(&self, now: SimTime) -> bool {
        self.arrival <= now
    }

    /// Arrived and unfinished
    #[inline]
    pub fn is_ready(&self, now: SimTime) -> bool {
        self.has_arrived(now) && !self.is_finished()
    }

    /// Sort key used for "earliest arrival, then submission order"
    #[inline]
    pub fn arrival_key(&self) -> (SimTime, Pid) {
        (self.arrival, self.pid)
    }

    /// `completion - arrival`, defined only once completed
    pub fn turnaround(&self) -> Option<u64> {
        self.completion.map(|c| c - self.arrival)
    }

    /// `turnaround - burst`, defined only once completed
    pub fn waiting(&self) -> Option<u64> {
        self.turnaround().map(|t| t.saturating_sub(self.burst))
    }

    /// Run one unit ending at `end`. Returns true if this unit completed the
    /// record.
    pub(crate) fn run_unit(&mut self, end: SimTime) -> bool {
        debug_assert!(!self.is_finished(), "run_unit on finished '{}'", self.name);
        debug_assert!(end > self.arrival, "'{}' ran before arrival", self.name);

        self.executed += 1;
        if self.executed == self.burst {
            self.completion = Some(end);
            true
        } else {
            false
        }
    }

    pub fn live_row(&self) -> LiveRow {
        LiveRow {
            name: self.name.clone(),
            arrival: self.arrival,
            burst: self.burst,
            remaining: self.remaining(),
        }
    }
}

/// Row of the live process table pushed to sinks
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LiveRow {
    pub name: String,
    pub arrival: SimTime,
    pub burst: u64,
    pub remaining: u64,
}
