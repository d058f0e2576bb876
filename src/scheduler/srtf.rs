/*!
 * Shortest Remaining Time First
 */

use super::traits::SchedulingPolicy;
use super::types::Decision;
use crate::core::types::{Pid, SimTime};
use crate::process::ProcessRecord;

/// Smallest remaining work runs for one unit, then the choice is re-made
///
/// A ready record preempts the running one only with strictly less remaining
/// time; on a tie the running record keeps the CPU, then earliest arrival,
/// then submission order.
#[derive(Debug, Clone, Default)]
pub struct Srtf {
    running: Option<Pid>,
}

impl Srtf {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SchedulingPolicy for Srtf {
    fn name(&self) -> &'static str {
        "srtf"
    }

    fn is_preemptive(&self) -> bool {
        true
    }

    fn select(&mut self, active: &[ProcessRecord], now: SimTime) -> Option<Decision> {
        let running = self.running;
        let next = super::ready(active, now).min_by_key(|r| {
            (
                r.remaining(),
                Some(r.pid()) != running,
                r.arrival(),
                r.pid(),
            )
        });

        self.running = next.map(ProcessRecord::pid);
        next.map(Decision::single_unit)
    }
}
