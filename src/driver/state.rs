/*!
 * Driver State Machine
 */

use crate::core::errors::StateError;
use serde::{Deserialize, Serialize};

/// Lifecycle of an execution driver
///
/// ```text
/// Idle -> Running <-> Paused
///            |          |
///            v          |
///         Draining      |
///            |          |
///            v          v
///         Terminated (absorbing)
/// ```
///
/// `Running` and `Paused` may also go straight to `Terminated` on `stop()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DriverState {
    Idle,
    Running,
    Paused,
    Draining,
    Terminated,
}

impl DriverState {
    #[inline]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Running => "running",
            Self::Paused => "paused",
            Self::Draining => "draining",
            Self::Terminated => "terminated",
        }
    }

    /// New submissions are only taken before the run starts draining
    #[inline]
    pub const fn accepts_admission(&self) -> bool {
        matches!(self, Self::Idle | Self::Running | Self::Paused)
    }

    /// The run has finished or is finishing
    #[inline]
    pub const fn is_finished(&self) -> bool {
        matches!(self, Self::Draining | Self::Terminated)
    }

    pub const fn can_transition_to(&self, next: DriverState) -> bool {
        use DriverState::*;
        matches!(
            (self, next),
            (Idle, Running)
                | (Idle, Terminated)
                | (Running, Paused)
                | (Running, Draining)
                | (Running, Terminated)
                | (Paused, Running)
                | (Paused, Terminated)
                | (Draining, Terminated)
        )
    }

    pub fn transition(&mut self, next: DriverState) -> Result<(), StateError> {
        if !self.can_transition_to(next) {
            return Err(StateError::InvalidTransition {
                from: *self,
                to: next,
            });
        }
        *self = next;
        Ok(())
    }
}

impl std::fmt::Display for DriverState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
