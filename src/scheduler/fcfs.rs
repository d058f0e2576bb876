/*!
 * First Come, First Served
 */

use super::traits::SchedulingPolicy;
use super::types::Decision;
use crate::core::types::SimTime;
use crate::process::ProcessRecord;

/// Earliest arrival runs to completion; ties go to submission order
#[derive(Debug, Clone, Copy, Default)]
pub struct Fcfs;

impl SchedulingPolicy for Fcfs {
    fn name(&self) -> &'static str {
        "fcfs"
    }

    fn is_preemptive(&self) -> bool {
        false
    }

    fn select(&mut self, active: &[ProcessRecord], now: SimTime) -> Option<Decision> {
        super::ready(active, now)
            .min_by_key(|r| r.arrival_key())
            .map(Decision::run_to_completion)
    }
}
