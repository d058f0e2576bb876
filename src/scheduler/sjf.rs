/*!
 * Shortest Job First (non-preemptive)
 */

use super::traits::SchedulingPolicy;
use super::types::Decision;
use crate::core::types::SimTime;
use crate::process::ProcessRecord;

/// Smallest total burst runs to completion
///
/// Ties: earliest arrival, then submission order. Total burst equals the
/// remaining work at selection time because a selected job is never
/// interrupted.
#[derive(Debug, Clone, Copy, Default)]
pub struct Sjf;

impl SchedulingPolicy for Sjf {
    fn name(&self) -> &'static str {
        "sjf"
    }

    fn is_preemptive(&self) -> bool {
        false
    }

    fn select(&mut self, active: &[ProcessRecord], now: SimTime) -> Option<Decision> {
        super::ready(active, now)
            .min_by_key(|r| (r.burst(), r.arrival(), r.pid()))
            .map(Decision::run_to_completion)
    }
}
