/*!
 * Active Set
 * Every record admitted to a run, owned by the simulation engine
 */

use super::record::{LiveRow, ProcessRecord};
use crate::core::types::{Pid, SimTime};
use ahash::RandomState;
use std::collections::HashMap;

/// Records of one run in submission order
///
/// Finished records stay in the set: they still count for statistics and for
/// name uniqueness, policies simply skip them.
#[derive(Debug, Clone, Default)]
pub struct ActiveSet {
    records: Vec<ProcessRecord>,
    index: HashMap<Pid, usize, RandomState>,
    finished: usize,
}

impl ActiveSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `record` unless its pid is already present; true if it was added
    pub(crate) fn insert(&mut self, record: ProcessRecord) -> bool {
        if self.index.contains_key(&record.pid()) {
            return false;
        }
        self.index.insert(record.pid(), self.records.len());
        self.records.push(record);
        true
    }

    pub(crate) fn extend(&mut self, records: impl IntoIterator<Item = ProcessRecord>) -> usize {
        let mut added = 0;
        for record in records {
            if self.insert(record) {
                added += 1;
            }
        }
        added
    }

    #[inline]
    pub fn records(&self) -> &[ProcessRecord] {
        &self.records
    }

    pub fn get(&self, pid: Pid) -> Option<&ProcessRecord> {
        self.index.get(&pid).map(|&i| &self.records[i])
    }

    pub fn by_name(&self, name: &str) -> Option<&ProcessRecord> {
        self.records.iter().find(|r| r.name() == name)
    }

    /// Run one unit of `pid` ending at `end`; true if it completed
    pub(crate) fn run_unit(&mut self, pid: Pid, end: SimTime) -> Option<bool> {
        let idx = *self.index.get(&pid)?;
        let completed = self.records[idx].run_unit(end);
        if completed {
            self.finished += 1;
        }
        Some(completed)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    #[inline]
    pub fn finished_count(&self) -> usize {
        self.finished
    }

    /// True when every record has a completion time (vacuously for an empty set)
    #[inline]
    pub fn all_finished(&self) -> bool {
        self.finished == self.records.len()
    }

    pub fn ready_count(&self, now: SimTime) -> usize {
        self.records.iter().filter(|r| r.is_ready(now)).count()
    }

    /// Sum of executed units over all records
    pub fn total_executed(&self) -> u64 {
        self.records.iter().map(ProcessRecord::executed).sum()
    }

    pub fn live_table(&self) -> Vec<LiveRow> {
        self.records.iter().map(ProcessRecord::live_row).collect()
    }

    pub fn into_records(self) -> Vec<ProcessRecord> {
        self.records
    }
}
