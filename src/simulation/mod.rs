/*!
 * Simulation Module
 * Step engine, admission staging, timeline recording and statistics
 */

pub mod admission;
pub mod engine;
pub mod runner;
pub mod stats;
pub mod summary;
pub mod timeline;

// Re-export for convenience
pub use admission::AdmissionQueue;
pub use engine::{Counters, Engine, ExecutedUnit, Step};
pub use runner::{run_offline, run_to_completion};
pub use stats::{ProcessStats, Statistics};
pub use summary::RunSummary;
pub use timeline::{Timeline, TimelineEntry};
