/*!
 * Core Types
 * Common types used across the simulator
 */

use serde::{Deserialize, Serialize};

/// Process ID type (submission sequence number, unique per run)
pub type Pid = u32;

/// Simulation time, counted in discrete time units since start
pub type SimTime = u64;

/// Priority level (lower value = higher priority)
pub type Priority = u32;

/// Common result type for simulator operations
pub type SimResult<T> = Result<T, super::errors::SimError>;

/// How a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunOutcome {
    /// Every admitted record completed and the admission queue drained
    Completed,
    /// `stop()` was requested before the run could drain
    Cancelled,
    /// The policy broke its contract and the run was halted
    Faulted,
}

impl RunOutcome {
    #[inline]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
            Self::Faulted => "faulted",
        }
    }
}

impl std::fmt::Display for RunOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
