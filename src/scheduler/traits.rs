/*!
 * Scheduling Policy Traits
 * Interface between the simulation engine and a policy
 */

use super::types::Decision;
use crate::core::types::SimTime;
use crate::process::ProcessRecord;

/// Decides which record runs next and for how long
///
/// `select` is a query over the engine's records: it must not assume it is
/// called once per unit, and it must only return `None` when no unfinished
/// record has arrived by `now`. Policies that keep private bookkeeping (ready
/// queues, the pid they last handed out) update it inside `select`.
pub trait SchedulingPolicy: Send {
    /// Stable identifier used in logs and errors
    fn name(&self) -> &'static str;

    /// Whether a pending re-decision may cut a held slice short
    ///
    /// Non-preemptive policies always finish the slice they committed to,
    /// even when new work is admitted mid-slice.
    fn is_preemptive(&self) -> bool;

    /// Whether submissions must carry a priority
    fn requires_priority(&self) -> bool {
        false
    }

    /// Pick the next record to run among `active` at time `now`
    fn select(&mut self, active: &[ProcessRecord], now: SimTime) -> Option<Decision>;
}

impl<P: SchedulingPolicy + ?Sized> SchedulingPolicy for Box<P> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn is_preemptive(&self) -> bool {
        (**self).is_preemptive()
    }

    fn requires_priority(&self) -> bool {
        (**self).requires_priority()
    }

    fn select(&mut self, active: &[ProcessRecord], now: SimTime) -> Option<Decision> {
        (**self).select(active, now)
    }
}
