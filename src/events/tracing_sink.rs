/*!
 * Tracing Sink
 * Reports driver events as structured tracing events
 */

use super::EventSink;
use crate::core::types::{RunOutcome, SimTime};
use crate::process::LiveRow;
use crate::simulation::Statistics;
use tracing::{debug, info, trace};

/// Execution events at `debug`, snapshots at `trace`, results at `info`
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl EventSink for TracingSink {
    fn on_execute(&mut self, name: &str, time: SimTime) {
        debug!(target: "sched_sim::events", process = name, time, "execute");
    }

    fn on_snapshot(&mut self, table: &[LiveRow]) {
        let remaining: u64 = table.iter().map(|row| row.remaining).sum();
        trace!(
            target: "sched_sim::events",
            processes = table.len(),
            remaining,
            "snapshot"
        );
    }

    fn on_statistics(&mut self, statistics: &Statistics) {
        info!(
            target: "sched_sim::events",
            completed = statistics.completed,
            total = statistics.total,
            avg_waiting = statistics.avg_waiting,
            avg_turnaround = statistics.avg_turnaround,
            "statistics"
        );
    }

    fn on_done(&mut self, outcome: RunOutcome) {
        info!(target: "sched_sim::events", %outcome, "done");
    }
}
