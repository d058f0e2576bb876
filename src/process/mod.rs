/*!
 * Process Module
 * Process records, admission validation and the driver-owned active set
 */

pub mod active_set;
pub mod record;
mod validation;

// Re-export for convenience
pub use active_set::ActiveSet;
pub use record::{LiveRow, ProcessRecord, ProcessSpec};
