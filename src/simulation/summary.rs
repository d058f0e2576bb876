/*!
 * Run Summary
 * Everything a finished (or cancelled) run leaves behind
 */

use super::engine::Counters;
use super::stats::Statistics;
use super::timeline::Timeline;
use crate::core::types::{RunOutcome, SimTime};
use crate::process::ProcessRecord;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub policy: String,
    pub outcome: RunOutcome,
    pub final_time: SimTime,
    pub statistics: Statistics,
    pub counters: Counters,
    pub timeline: Timeline,
    pub records: Vec<ProcessRecord>,
}

impl RunSummary {
    pub fn record(&self, name: &str) -> Option<&ProcessRecord> {
        self.records.iter().find(|r| r.name() == name)
    }

    /// Completion time of `name`, if it completed
    pub fn completion(&self, name: &str) -> Option<SimTime> {
        self.record(name).and_then(ProcessRecord::completion)
    }

    /// Names ordered by completion time (ties by submission order)
    pub fn completion_order(&self) -> Vec<&str> {
        let mut done: Vec<&ProcessRecord> =
            self.records.iter().filter(|r| r.is_finished()).collect();
        done.sort_by_key(|r| (r.completion(), r.pid()));
        done.into_iter().map(ProcessRecord::name).collect()
    }
}
