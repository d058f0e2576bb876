/*!
 * Scheduler Types
 * Decisions and the catalogue of built-in policies
 */

use super::fcfs::Fcfs;
use super::priority::PriorityScheduler;
use super::round_robin::RoundRobin;
use super::sjf::Sjf;
use super::srtf::Srtf;
use super::traits::SchedulingPolicy;
use crate::core::errors::ConfigError;
use crate::core::types::Pid;
use crate::process::ProcessRecord;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::str::FromStr;

/// A policy's answer: run `pid` for `slice` units
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Decision {
    pub pid: Pid,
    pub slice: u64,
}

impl Decision {
    #[inline]
    pub const fn new(pid: Pid, slice: u64) -> Self {
        Self { pid, slice }
    }

    /// Plan policies commit to the whole remaining burst
    #[inline]
    pub fn run_to_completion(record: &ProcessRecord) -> Self {
        Self::new(record.pid(), record.remaining())
    }

    /// Preemptive policies re-decide after every unit
    #[inline]
    pub fn single_unit(record: &ProcessRecord) -> Self {
        Self::new(record.pid(), 1)
    }
}

/// Built-in scheduling policies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PolicyKind {
    /// First come, first served
    Fcfs,
    /// Shortest job first (non-preemptive)
    Sjf,
    /// Shortest remaining time first (preemptive SJF)
    Srtf,
    /// Lowest priority value first, runs to completion
    PriorityNonPreemptive,
    /// Lowest priority value first, preempts on strictly better priority
    PriorityPreemptive,
    /// FIFO ready queue with a time quantum
    RoundRobin,
}

impl PolicyKind {
    pub const ALL: [PolicyKind; 6] = [
        Self::Fcfs,
        Self::Sjf,
        Self::Srtf,
        Self::PriorityNonPreemptive,
        Self::PriorityPreemptive,
        Self::RoundRobin,
    ];

    #[inline]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Fcfs => "fcfs",
            Self::Sjf => "sjf",
            Self::Srtf => "srtf",
            Self::PriorityNonPreemptive => "priority",
            Self::PriorityPreemptive => "priority_preemptive",
            Self::RoundRobin => "round_robin",
        }
    }

    #[inline]
    pub const fn requires_priority(&self) -> bool {
        matches!(self, Self::PriorityNonPreemptive | Self::PriorityPreemptive)
    }

    /// Instantiate the policy; `quantum` only matters for Round Robin
    pub fn build(&self, quantum: u64) -> Box<dyn SchedulingPolicy> {
        match self {
            Self::Fcfs => Box::new(Fcfs),
            Self::Sjf => Box::new(Sjf),
            Self::Srtf => Box::new(Srtf::new()),
            Self::PriorityNonPreemptive => Box::new(PriorityScheduler::non_preemptive()),
            Self::PriorityPreemptive => Box::new(PriorityScheduler::preemptive()),
            Self::RoundRobin => Box::new(RoundRobin::new(quantum)),
        }
    }
}

impl FromStr for PolicyKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "fcfs" | "fifo" => Ok(Self::Fcfs),
            "sjf" => Ok(Self::Sjf),
            "srtf" | "srt" => Ok(Self::Srtf),
            "priority" | "priority_nonpreemptive" | "priority_non_preemptive" | "prio" => {
                Ok(Self::PriorityNonPreemptive)
            }
            "priority_preemptive" | "priority_preem" => Ok(Self::PriorityPreemptive),
            "round_robin" | "roundrobin" | "rr" => Ok(Self::RoundRobin),
            _ => Err(ConfigError::InvalidPolicy(s.to_string())),
        }
    }
}

impl std::fmt::Display for PolicyKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for PolicyKind {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for PolicyKind {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
