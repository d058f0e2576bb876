/*!
 * Monitoring
 * Structured tracing setup and per-run spans
 */

mod tracer;

pub use tracer::{generate_run_id, init_tracing, RunSpan};
