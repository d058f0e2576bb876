/*!
 * Scheduler Module
 * Scheduling policies and the contract the simulation engine drives them by
 */

mod fcfs;
mod priority;
mod round_robin;
mod sjf;
mod srtf;
pub mod traits;
pub mod types;

// Re-export public API
pub use fcfs::Fcfs;
pub use priority::PriorityScheduler;
pub use round_robin::RoundRobin;
pub use sjf::Sjf;
pub use srtf::Srtf;
pub use traits::SchedulingPolicy;
pub use types::{Decision, PolicyKind};

use crate::core::types::SimTime;
use crate::process::ProcessRecord;

/// Records that have arrived by `now` and are not finished
#[inline]
pub(crate) fn ready(
    active: &[ProcessRecord],
    now: SimTime,
) -> impl Iterator<Item = &ProcessRecord> {
    active.iter().filter(move |r| r.is_ready(now))
}
