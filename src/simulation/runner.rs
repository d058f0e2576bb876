/*!
 * Offline Runner
 * Runs a whole simulation synchronously, without threads or pacing
 */

use super::admission::AdmissionQueue;
use super::engine::Engine;
use super::summary::RunSummary;
use crate::core::types::{RunOutcome, SimResult, SimTime};
use crate::process::ProcessSpec;
use crate::scheduler::SchedulingPolicy;
use std::collections::VecDeque;
use tracing::debug;

/// Run `specs` under `policy` until every record completes
pub fn run_to_completion<P>(policy: P, specs: &[ProcessSpec]) -> SimResult<RunSummary>
where
    P: SchedulingPolicy + 'static,
{
    run_offline(policy, specs, Vec::new())
}

/// Like [`run_to_completion`], with `submissions` admitted dynamically once
/// the clock reaches their time
///
/// A submission scheduled for time `t` is merged at the top of unit `t`,
/// which is where a live submission arriving during unit `t - 1` would be
/// merged.
pub fn run_offline<P>(
    policy: P,
    specs: &[ProcessSpec],
    submissions: Vec<(SimTime, ProcessSpec)>,
) -> SimResult<RunSummary>
where
    P: SchedulingPolicy + 'static,
{
    let mut admission = AdmissionQueue::for_policy(&policy);
    admission.admit_batch(specs)?;

    let mut scheduled: Vec<(SimTime, ProcessSpec)> = submissions;
    scheduled.sort_by_key(|(at, _)| *at);
    let mut scheduled = VecDeque::from(scheduled);

    let mut engine = Engine::new(Box::new(policy));
    loop {
        while scheduled.front().is_some_and(|(at, _)| *at <= engine.now()) {
            if let Some((_, spec)) = scheduled.pop_front() {
                admission.admit(&spec)?;
            }
        }
        engine.admit(admission.drain());

        if engine.is_drained() && scheduled.is_empty() {
            break;
        }
        engine.step()?;
    }

    debug!(
        policy = engine.policy_name(),
        final_time = engine.now(),
        "offline run complete"
    );
    Ok(engine.finish(RunOutcome::Completed))
}
