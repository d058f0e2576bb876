/*!
 * Simulator Limits and Constants
 *
 * Centralized location for defaults and thresholds used by the driver,
 * the policies and the configuration layer.
 */

use std::time::Duration;

// =============================================================================
// TIMING
// =============================================================================

/// Default wall-clock length of one simulation unit in live mode (1s)
pub const DEFAULT_TIME_UNIT: Duration = Duration::from_secs(1);

/// Fixed presentation delay per unit when not running live (20ms)
pub const DEFAULT_IDLE_DELAY: Duration = Duration::from_millis(20);

// =============================================================================
// POLICIES
// =============================================================================

/// Driver-wide Round Robin quantum when neither the config nor the record
/// provides one
pub const DEFAULT_QUANTUM: u64 = 2;

// =============================================================================
// ADMISSION
// =============================================================================

/// First pid handed out in a run
pub const FIRST_PID: super::types::Pid = 1;

/// Initial capacity of the admission staging queue
pub const ADMISSION_QUEUE_CAPACITY: usize = 16;

// =============================================================================
// ENVIRONMENT OVERRIDES
// =============================================================================

pub const ENV_TIME_UNIT_MS: &str = "SIM_TIME_UNIT_MS";
pub const ENV_LIVE: &str = "SIM_LIVE";
pub const ENV_IDLE_DELAY_MS: &str = "SIM_IDLE_DELAY_MS";
pub const ENV_QUANTUM: &str = "SIM_QUANTUM";
pub const ENV_TRACE_JSON: &str = "SIM_TRACE_JSON";
pub const ENV_EVENTS_JSON: &str = "SIM_EVENTS_JSON";
