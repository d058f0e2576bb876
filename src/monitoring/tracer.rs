/*!
 * Structured Tracing
 * Subscriber setup and the span every driver run executes in
 *
 * Features:
 * - Run ids for correlating a run's events across threads
 * - JSON-formatted logs for structured parsing
 * - Wall-clock duration and outcome recorded on the run span
 */

use crate::core::limits::ENV_TRACE_JSON;
use crate::core::types::{RunOutcome, SimTime};
use std::time::Instant;
use tracing::{debug, info, span, Level, Span};
use tracing_subscriber::{
    fmt::format::FmtSpan, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter,
};
use uuid::Uuid;

/// Initialize structured tracing
///
/// Environment variables:
/// - RUST_LOG: Set log level (default: info)
/// - SIM_TRACE_JSON: Enable JSON output (default: false)
///
/// Safe to call more than once; later calls leave the first subscriber in
/// place.
pub fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let use_json = std::env::var(ENV_TRACE_JSON)
        .map(|v| v == "1" || v == "true")
        .unwrap_or(false);

    let registry = tracing_subscriber::registry().with(env_filter);

    let installed = if use_json {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_target(true)
                    .with_thread_names(true)
                    .with_current_span(true)
                    .with_span_list(true)
                    .with_span_events(FmtSpan::CLOSE),
            )
            .try_init()
    } else {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(true)
                    .with_thread_names(true)
                    .with_span_events(FmtSpan::CLOSE)
                    .compact(),
            )
            .try_init()
    };

    if installed.is_ok() {
        info!(json = use_json, "structured tracing initialized");
    }
}

/// Generate a unique id for one simulation run
pub fn generate_run_id() -> Uuid {
    Uuid::new_v4()
}

/// Span wrapping one driver run
pub struct RunSpan {
    span: Span,
    start: Instant,
    run_id: Uuid,
}

impl RunSpan {
    pub fn new(run_id: Uuid, policy: &str) -> Self {
        let span = span!(
            Level::INFO,
            "sim_run",
            run_id = %run_id,
            policy = policy,
            outcome = tracing::field::Empty,
            final_time = tracing::field::Empty,
        );

        Self {
            span,
            start: Instant::now(),
            run_id,
        }
    }

    /// Enter the span on the current thread
    pub fn enter(&self) -> tracing::span::Entered<'_> {
        self.span.enter()
    }

    pub fn record_outcome(&self, outcome: RunOutcome, final_time: SimTime) {
        self.span.record("outcome", outcome.as_str());
        self.span.record("final_time", final_time);
    }
}

impl Drop for RunSpan {
    fn drop(&mut self) {
        let _entered = self.span.enter();
        debug!(
            run_id = %self.run_id,
            wall_ms = self.start.elapsed().as_millis() as u64,
            "run span closed"
        );
    }
}
