/*!
 * Timeline
 * Executed decision slices in time order
 */

use crate::core::types::{Pid, SimTime};
use crate::process::ProcessRecord;
use serde::{Deserialize, Serialize};

/// One executed decision: `duration` units of `name` starting at `start`
///
/// Plan policies produce one entry per record, preemptive policies one entry
/// per unit and Round Robin one entry per quantum slice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelineEntry {
    pub pid: Pid,
    pub name: String,
    pub arrival: SimTime,
    pub burst: u64,
    pub start: SimTime,
    pub duration: u64,
}

impl TimelineEntry {
    #[inline]
    pub fn end(&self) -> SimTime {
        self.start + self.duration
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timeline {
    entries: Vec<TimelineEntry>,
}

impl Timeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a new entry for `record` starting at `start`
    pub(crate) fn begin(&mut self, record: &ProcessRecord, start: SimTime) {
        self.entries.push(TimelineEntry {
            pid: record.pid(),
            name: record.name().to_string(),
            arrival: record.arrival(),
            burst: record.burst(),
            start,
            duration: 0,
        });
    }

    /// Extend the open entry by one unit
    pub(crate) fn extend_open(&mut self) {
        if let Some(last) = self.entries.last_mut() {
            last.duration += 1;
        }
    }

    #[inline]
    pub fn entries(&self) -> &[TimelineEntry] {
        &self.entries
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Units executed across all entries
    pub fn total_units(&self) -> u64 {
        self.entries.iter().map(|e| e.duration).sum()
    }

    /// Names in execution order, one per entry
    pub fn order(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.name.as_str()).collect()
    }

    /// Adjacent entries of the same process merged into one bar
    pub fn coalesced(&self) -> Vec<TimelineEntry> {
        let mut bars: Vec<TimelineEntry> = Vec::with_capacity(self.entries.len());
        for entry in &self.entries {
            match bars.last_mut() {
                Some(bar) if bar.pid == entry.pid && bar.end() == entry.start => {
                    bar.duration += entry.duration;
                }
                _ => bars.push(entry.clone()),
            }
        }
        bars
    }
}
