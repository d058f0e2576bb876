/*!
 * Driver Configuration
 * Pacing and policy defaults for a run, with environment overrides
 */

use crate::core::errors::ConfigError;
use crate::core::limits::{
    DEFAULT_IDLE_DELAY, DEFAULT_QUANTUM, DEFAULT_TIME_UNIT, ENV_IDLE_DELAY_MS, ENV_LIVE,
    ENV_QUANTUM, ENV_TIME_UNIT_MS,
};
use std::time::Duration;

/// Driver configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DriverConfig {
    /// Wall-clock length of one unit when `live`
    pub time_unit: Duration,
    /// Pace units by `time_unit` instead of `idle_delay`
    pub live: bool,
    /// Presentation delay per unit when not `live`; may be zero
    pub idle_delay: Duration,
    /// Round Robin quantum used by records without an override
    pub default_quantum: u64,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            time_unit: DEFAULT_TIME_UNIT,
            live: true,
            idle_delay: DEFAULT_IDLE_DELAY,
            default_quantum: DEFAULT_QUANTUM,
        }
    }
}

impl DriverConfig {
    /// No pacing at all; used by tests and batch runs
    pub const fn instant() -> Self {
        Self {
            time_unit: DEFAULT_TIME_UNIT,
            live: false,
            idle_delay: Duration::ZERO,
            default_quantum: DEFAULT_QUANTUM,
        }
    }

    /// Live pacing with the given unit length
    pub const fn live(time_unit: Duration) -> Self {
        Self {
            time_unit,
            live: true,
            idle_delay: DEFAULT_IDLE_DELAY,
            default_quantum: DEFAULT_QUANTUM,
        }
    }

    pub fn with_time_unit(mut self, time_unit: Duration) -> Self {
        self.time_unit = time_unit;
        self
    }

    pub fn with_live(mut self, live: bool) -> Self {
        self.live = live;
        self
    }

    pub fn with_idle_delay(mut self, idle_delay: Duration) -> Self {
        self.idle_delay = idle_delay;
        self
    }

    pub fn with_default_quantum(mut self, quantum: u64) -> Self {
        self.default_quantum = quantum.max(1);
        self
    }

    /// Delay applied after every unit, executed or idle
    #[inline]
    pub fn unit_delay(&self) -> Duration {
        if self.live {
            self.time_unit
        } else {
            self.idle_delay
        }
    }

    /// Default configuration with process environment overrides applied
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::default().apply_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from `lookup`, which maps an env key to its value
    pub fn apply_overrides<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(ms) = lookup(ENV_TIME_UNIT_MS) {
            self.time_unit = Duration::from_millis(parse_u64(ENV_TIME_UNIT_MS, &ms)?);
        }
        if let Some(live) = lookup(ENV_LIVE) {
            self.live = parse_bool(ENV_LIVE, &live)?;
        }
        if let Some(ms) = lookup(ENV_IDLE_DELAY_MS) {
            self.idle_delay = Duration::from_millis(parse_u64(ENV_IDLE_DELAY_MS, &ms)?);
        }
        if let Some(q) = lookup(ENV_QUANTUM) {
            let quantum = parse_u64(ENV_QUANTUM, &q)?;
            if quantum == 0 {
                return Err(ConfigError::InvalidEnv {
                    key: ENV_QUANTUM,
                    value: q,
                    reason: "quantum must be at least 1".to_string(),
                });
            }
            self.default_quantum = quantum;
        }
        Ok(self)
    }
}

fn parse_u64(key: &'static str, value: &str) -> Result<u64, ConfigError> {
    value
        .trim()
        .parse::<u64>()
        .map_err(|e| ConfigError::InvalidEnv {
            key,
            value: value.to_string(),
            reason: e.to_string(),
        })
}

fn parse_bool(key: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidEnv {
            key,
            value: value.to_string(),
            reason: "expected a boolean".to_string(),
        }),
    }
}
