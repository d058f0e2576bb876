/*!
 * Execution Driver
 * Threaded, optionally paced simulation with pause, stop and dynamic admission
 */

mod builder;
pub mod config;
mod handle;
mod shared;
pub mod state;
mod task;

// Re-export public API
pub use builder::DriverBuilder;
pub use config::DriverConfig;
pub use handle::{DriverHandle, ExecutionDriver};
pub use state::DriverState;
