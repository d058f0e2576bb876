/*!
 * Round Robin
 * FIFO ready queue with a per-record or driver-wide time quantum
 */

use super::traits::SchedulingPolicy;
use super::types::Decision;
use crate::core::types::{Pid, SimTime};
use crate::process::ProcessRecord;
use ahash::RandomState;
use std::collections::{HashSet, VecDeque};

/// Round Robin scheduler
///
/// Every call first appends records that arrived strictly inside the slice that
/// just ended (by arrival, then submission order), then re-queues the record
/// whose slice ended if it still has work, then appends records arriving at
/// the boundary instant itself, then hands out the queue head for
/// `min(quantum, remaining)` units. The quantum bounds the slice but the
/// policy does not react to admissions mid-slice, so it reports itself as
/// non-preemptive to the engine.
#[derive(Debug, Clone)]
pub struct RoundRobin {
    quantum: u64,
    queue: VecDeque<Pid>,
    seen: HashSet<Pid, RandomState>,
    running: Option<Pid>,
}

impl RoundRobin {
    /// `quantum` is clamped to at least one unit
    pub fn new(quantum: u64) -> Self {
        Self {
            quantum: quantum.max(1),
            queue: VecDeque::new(),
            seen: HashSet::default(),
            running: None,
        }
    }

    #[inline]
    pub fn quantum(&self) -> u64 {
        self.quantum
    }

    /// Pids currently waiting, head first
    pub fn queued(&self) -> impl Iterator<Item = Pid> + '_ {
        self.queue.iter().copied()
    }

    fn enqueue_arrivals<F>(&mut self, active: &[ProcessRecord], now: SimTime, keep: F)
    where
        F: Fn(&ProcessRecord) -> bool,
    {
        let mut arrivals: Vec<&ProcessRecord> = super::ready(active, now)
            .filter(|r| !self.seen.contains(&r.pid()) && keep(r))
            .collect();
        arrivals.sort_by_key(|r| r.arrival_key());

        for record in arrivals {
            self.seen.insert(record.pid());
            self.queue.push_back(record.pid());
        }
    }
}

fn find(active: &[ProcessRecord], pid: Pid) -> Option<&ProcessRecord> {
    active.iter().find(|r| r.pid() == pid)
}

impl SchedulingPolicy for RoundRobin {
    fn name(&self) -> &'static str {
        "round_robin"
    }

    fn is_preemptive(&self) -> bool {
        false
    }

    fn select(&mut self, active: &[ProcessRecord], now: SimTime) -> Option<Decision> {
        self.enqueue_arrivals(active, now, |r| r.arrival() < now);

        if let Some(pid) = self.running.take() {
            if find(active, pid).is_some_and(|r| !r.is_finished()) {
                self.queue.push_back(pid);
            }
        }

        self.enqueue_arrivals(active, now, |r| r.arrival() == now);

        while let Some(pid) = self.queue.pop_front() {
            let Some(record) = find(active, pid) else {
                continue;
            };
            if record.is_finished() {
                continue;
            }

            let quantum = record.quantum().unwrap_or(self.quantum);
            self.running = Some(pid);
            return Some(Decision::new(pid, quantum.min(record.remaining())));
        }

        None
    }
}
