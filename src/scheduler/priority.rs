/*!
 * Priority Scheduling
 * Preemptive and non-preemptive variants sharing one ordering
 */

use super::traits::SchedulingPolicy;
use super::types::Decision;
use crate::core::types::{Pid, Priority, SimTime};
use crate::process::ProcessRecord;

/// Lowest priority value wins; ties go to earliest arrival, then submission
/// order
///
/// The non-preemptive variant hands out the whole remaining burst. The
/// preemptive variant hands out single units and lets a strictly better
/// priority take over; on equal priority the running record continues.
#[derive(Debug, Clone)]
pub struct PriorityScheduler {
    preemptive: bool,
    running: Option<Pid>,
}

impl PriorityScheduler {
    pub fn non_preemptive() -> Self {
        Self {
            preemptive: false,
            running: None,
        }
    }

    pub fn preemptive() -> Self {
        Self {
            preemptive: true,
            running: None,
        }
    }
}

impl SchedulingPolicy for PriorityScheduler {
    fn name(&self) -> &'static str {
        if self.preemptive {
            "priority_preemptive"
        } else {
            "priority"
        }
    }

    fn is_preemptive(&self) -> bool {
        self.preemptive
    }

    fn requires_priority(&self) -> bool {
        true
    }

    fn select(&mut self, active: &[ProcessRecord], now: SimTime) -> Option<Decision> {
        let running = self.running;
        let next = super::ready(active, now).min_by_key(|r| {
            (
                r.priority().unwrap_or(Priority::MAX),
                Some(r.pid()) != running,
                r.arrival(),
                r.pid(),
            )
        })?;

        if self.preemptive {
            self.running = Some(next.pid());
            Some(Decision::single_unit(next))
        } else {
            Some(Decision::run_to_completion(next))
        }
    }
}
