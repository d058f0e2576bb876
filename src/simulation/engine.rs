/*!
 * Simulation Engine
 *
 * Single-threaded step machine shared by the threaded driver and the offline
 * runner. One call to [`Engine::step`] advances the clock by exactly one
 * unit: either a unit of the held decision is executed, or the CPU idles.
 *
 * Decision handling:
 * - With no held decision the policy is always consulted.
 * - A pending re-decision (new admissions) only interrupts a held slice when
 *   the policy is preemptive. Otherwise the slice is finished first and the
 *   flag is honoured at the next selection.
 * - A completed record clears the held decision.
 */

use super::stats::Statistics;
use super::summary::RunSummary;
use super::timeline::Timeline;
use crate::core::errors::PolicyError;
use crate::core::types::{Pid, RunOutcome, SimTime};
use crate::process::{ActiveSet, LiveRow, ProcessRecord};
use crate::scheduler::{Decision, SchedulingPolicy};
use serde::{Deserialize, Serialize};
use tracing::{trace, warn};

/// Decision currently being executed
#[derive(Debug, Clone, Copy)]
struct Held {
    pid: Pid,
    left: u64,
    opened: bool,
}

/// Scheduling activity counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Counters {
    /// Decisions returned by the policy
    pub decisions: u64,
    /// Units in which a different record ran than in the previous unit
    pub context_switches: u64,
    /// Switches away from a record that still had work
    pub preemptions: u64,
    /// Units in which nothing ran
    pub idle_ticks: u64,
    /// Units in which something ran
    pub executed_units: u64,
}

/// One executed unit, spanning `[time, time + 1)`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExecutedUnit {
    pub pid: Pid,
    pub time: SimTime,
    pub completed: bool,
}

/// Result of a single step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Executed(ExecutedUnit),
    Idle { time: SimTime },
}

pub struct Engine {
    policy: Box<dyn SchedulingPolicy>,
    active: ActiveSet,
    now: SimTime,
    held: Option<Held>,
    redecide: bool,
    last_run: Option<Pid>,
    timeline: Timeline,
    counters: Counters,
}

impl Engine {
    pub fn new(policy: Box<dyn SchedulingPolicy>) -> Self {
        Self {
            policy,
            active: ActiveSet::new(),
            now: 0,
            held: None,
            redecide: true,
            last_run: None,
            timeline: Timeline::new(),
            counters: Counters::default(),
        }
    }

    /// Merge admitted records into the active set; returns how many were added
    ///
    /// Records whose pid is already present are dropped.
    pub(crate) fn admit(&mut self, records: Vec<ProcessRecord>) -> usize {
        let offered = records.len();
        let added = self.active.extend(records);
        if added < offered {
            warn!(dropped = offered - added, "duplicate pids ignored at merge");
        }
        if added > 0 {
            self.redecide = true;
        }
        added
    }

    /// Every merged record has completed
    ///
    /// The caller decides whether more work can still be admitted.
    #[inline]
    pub fn is_drained(&self) -> bool {
        self.active.all_finished()
    }

    pub fn step(&mut self) -> Result<Step, PolicyError> {
        let interrupt = self.redecide && self.policy.is_preemptive();
        let mut held = match self.held.take() {
            Some(held) if !interrupt => held,
            _ => {
                self.redecide = false;
                match self.policy.select(self.active.records(), self.now) {
                    Some(decision) => self.accept(decision)?,
                    None => return self.idle(),
                }
            }
        };

        let start = self.now;
        let end = start + 1;

        if !held.opened {
            if let Some(record) = self.active.get(held.pid) {
                self.timeline.begin(record, start);
            }
            held.opened = true;
        }

        let completed = self
            .active
            .run_unit(held.pid, end)
            .ok_or(PolicyError::UnknownProcess {
                policy: self.policy.name(),
                pid: held.pid,
                time: start,
            })?;
        self.timeline.extend_open();

        if self.last_run.is_some_and(|p| p != held.pid) {
            self.counters.context_switches += 1;
        }
        self.last_run = Some(held.pid);
        self.counters.executed_units += 1;
        self.now = end;

        held.left -= 1;
        if completed {
            trace!(pid = held.pid, time = end, "process completed");
            self.redecide = true;
        } else if held.left > 0 {
            self.held = Some(held);
        }

        Ok(Step::Executed(ExecutedUnit {
            pid: held.pid,
            time: start,
            completed,
        }))
    }

    /// Check a decision against the selection contract and hold it
    fn accept(&mut self, decision: Decision) -> Result<Held, PolicyError> {
        let policy = self.policy.name();
        let now = self.now;

        let record = self
            .active
            .get(decision.pid)
            .ok_or(PolicyError::UnknownProcess {
                policy,
                pid: decision.pid,
                time: now,
            })?;

        if record.is_finished() {
            return Err(PolicyError::CompletedProcess {
                policy,
                name: record.name().to_string(),
                time: now,
            });
        }
        if !record.has_arrived(now) {
            return Err(PolicyError::NotArrived {
                policy,
                name: record.name().to_string(),
                arrival: record.arrival(),
                time: now,
            });
        }
        if decision.slice == 0 || decision.slice > record.remaining() {
            return Err(PolicyError::InvalidSlice {
                policy,
                name: record.name().to_string(),
                slice: decision.slice,
                remaining: record.remaining(),
            });
        }

        if let Some(previous) = self.last_run.filter(|&p| p != decision.pid) {
            if self.active.get(previous).is_some_and(|r| !r.is_finished()) {
                self.counters.preemptions += 1;
            }
        }
        self.counters.decisions += 1;

        trace!(
            policy,
            pid = decision.pid,
            slice = decision.slice,
            time = now,
            "decision"
        );

        Ok(Held {
            pid: decision.pid,
            left: decision.slice,
            opened: false,
        })
    }

    fn idle(&mut self) -> Result<Step, PolicyError> {
        let ready = self.active.ready_count(self.now);
        if ready > 0 {
            return Err(PolicyError::Stalled {
                policy: self.policy.name(),
                time: self.now,
                ready,
            });
        }

        let time = self.now;
        self.now += 1;
        self.counters.idle_ticks += 1;
        Ok(Step::Idle { time })
    }

    #[inline]
    pub fn now(&self) -> SimTime {
        self.now
    }

    #[inline]
    pub fn policy_name(&self) -> &'static str {
        self.policy.name()
    }

    #[inline]
    pub fn active(&self) -> &ActiveSet {
        &self.active
    }

    #[inline]
    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    #[inline]
    pub fn counters(&self) -> Counters {
        self.counters
    }

    pub fn record_name(&self, pid: Pid) -> &str {
        self.active.get(pid).map_or("", ProcessRecord::name)
    }

    pub fn live_table(&self) -> Vec<LiveRow> {
        self.active.live_table()
    }

    pub fn statistics(&self) -> Statistics {
        Statistics::compute(self.active.records())
    }

    /// Close the run and package its results
    pub fn finish(self, outcome: RunOutcome) -> RunSummary {
        let statistics = self.statistics();
        RunSummary {
            policy: self.policy.name().to_string(),
            outcome,
            final_time: self.now,
            statistics,
            counters: self.counters,
            timeline: self.timeline,
            records: self.active.into_records(),
        }
    }
}
