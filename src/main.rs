/*!
 * Scheduling Simulator - Main Entry Point
 *
 * Runs a JSON workload through the execution driver:
 * - Paced (live or fixed-delay) runs on the driver thread
 * - Timed dynamic submissions fed from a tokio task
 * - Ctrl-C maps to stop(); the partial run is still summarised
 * - SIM_EVENTS_JSON=1 prints every driver event as a JSON line
 */

use anyhow::{Context, Result};
use sched_sim::core::limits::ENV_EVENTS_JSON;
use sched_sim::{
    init_tracing, run_offline, ChannelSink, DriverConfig, DriverHandle, ExecutionDriver,
    ProcessSpec, RunSummary, SimError, SimTime, TracingSink, Workload,
};
use std::collections::VecDeque;
use std::time::Duration;
use tokio::time::MissedTickBehavior;
use tracing::{error, info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let path = std::env::args()
        .nth(1)
        .context("usage: sched-sim <workload.json>")?;
    let workload =
        Workload::load(&path).with_context(|| format!("failed to load workload {}", path))?;
    let config = workload.driver_config(DriverConfig::from_env()?);

    info!(
        policy = %workload.policy,
        processes = workload.processes.len(),
        submissions = workload.submissions.len(),
        live = config.live,
        "workload loaded"
    );

    let result = if config.unit_delay().is_zero() && !workload.submissions.is_empty() {
        // Unpaced runs cannot be fed from wall-clock time; replay offline
        info!("no pacing, replaying timed submissions offline");
        let policy = workload.policy.build(config.default_quantum);
        run_offline(policy, &workload.processes, workload.timed_specs())
    } else {
        run_live(&workload, config).await?
    };

    match result {
        Ok(summary) => {
            println!("{}", serde_json::to_string_pretty(&summary)?);
            Ok(())
        }
        Err(err) => {
            error!(error = %err, "simulation failed");
            eprintln!("{:?}", miette::Report::new(err));
            std::process::exit(1);
        }
    }
}

async fn run_live(
    workload: &Workload,
    config: DriverConfig,
) -> Result<Result<RunSummary, SimError>> {
    let print_events = std::env::var(ENV_EVENTS_JSON)
        .map(|v| v == "1" || v == "true")
        .unwrap_or(false);

    let (channel, events) = ChannelSink::unbounded();
    let channel = if print_events {
        channel
    } else {
        channel.without_snapshots()
    };

    let mut driver = match ExecutionDriver::builder()
        .policy_kind(workload.policy)
        .config(config)
        .processes(workload.processes.iter().cloned())
        .sink((TracingSink, channel))
        .start()
    {
        Ok(driver) => driver,
        Err(err) => return Ok(Err(err)),
    };
    let handle = driver.handle();

    let printer = tokio::spawn(async move {
        while let Ok(event) = events.recv_async().await {
            if print_events {
                match serde_json::to_string(&event) {
                    Ok(line) => println!("{}", line),
                    Err(e) => warn!(error = %e, "failed to encode event"),
                }
            }
            if event.is_done() {
                break;
            }
        }
    });

    let feeder = tokio::spawn(feed_submissions(
        handle.clone(),
        workload.timed_specs().into(),
        poll_interval(config),
    ));

    let mut joined = tokio::task::spawn_blocking(move || driver.join());
    let result = tokio::select! {
        res = &mut joined => res.context("driver join task failed")?,
        _ = tokio::signal::ctrl_c() => {
            warn!("interrupt received, stopping run");
            handle.stop();
            joined.await.context("driver join task failed")?
        }
    };

    feeder.abort();
    if let Err(e) = printer.await {
        warn!(error = %e, "event printer ended abnormally");
    }
    Ok(result)
}

/// Submit each pending spec once the published simulation time reaches it
async fn feed_submissions(
    handle: DriverHandle,
    mut pending: VecDeque<(SimTime, ProcessSpec)>,
    every: Duration,
) {
    pending.make_contiguous().sort_by_key(|(at, _)| *at);

    let mut interval = tokio::time::interval(every);
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

    while !pending.is_empty() {
        interval.tick().await;

        if handle.state().is_finished() {
            warn!(remaining = pending.len(), "run ended before all submissions were made");
            return;
        }

        let now = handle.current_time();
        while pending.front().is_some_and(|(at, _)| *at <= now) {
            let Some((at, spec)) = pending.pop_front() else {
                break;
            };
            if let Err(e) = handle.submit(spec) {
                warn!(at, error = %e, "timed submission rejected");
            }
        }
    }
}

fn poll_interval(config: DriverConfig) -> Duration {
    (config.unit_delay() / 4).max(Duration::from_millis(1))
}
