/*!
 * Shared helpers for driver tests
 */

use sched_sim::{DriverConfig, SimEvent, SimTime};
use std::thread;
use std::time::{Duration, Instant};

/// Paced just enough that a test thread can act mid-run
pub fn slow() -> DriverConfig {
    DriverConfig::instant().with_idle_delay(Duration::from_millis(5))
}

/// Poll `cond` until it holds or two seconds pass
pub fn wait_for(mut cond: impl FnMut() -> bool) -> bool {
    let deadline = Instant::now() + Duration::from_secs(2);
    while Instant::now() < deadline {
        if cond() {
            return true;
        }
        thread::sleep(Duration::from_millis(1));
    }
    cond()
}

/// `(name, time)` of every execution event, in order
pub fn executions(events: &[SimEvent]) -> Vec<(String, SimTime)> {
    events
        .iter()
        .filter_map(|e| match e {
            SimEvent::Execute { name, time } => Some((name.clone(), *time)),
            _ => None,
        })
        .collect()
}
