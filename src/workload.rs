/*!
 * Workload Files
 * JSON description of a simulation: policy, pacing, processes and timed
 * dynamic submissions
 *
 * ```json
 * {
 *   "policy": "round_robin",
 *   "quantum": 2,
 *   "live": false,
 *   "processes": [{ "name": "P1", "arrival": 0, "burst": 5 }],
 *   "submissions": [{ "at": 3, "process": { "name": "P2", "arrival": 3, "burst": 2 } }]
 * }
 * ```
 */

use crate::core::errors::ConfigError;
use crate::core::types::SimTime;
use crate::driver::DriverConfig;
use crate::process::ProcessSpec;
use crate::scheduler::PolicyKind;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// A process submitted once the simulation clock reaches `at`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimedSubmission {
    pub at: SimTime,
    pub process: ProcessSpec,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Workload {
    pub policy: PolicyKind,
    #[serde(default)]
    pub quantum: Option<u64>,
    #[serde(default)]
    pub time_unit_ms: Option<u64>,
    #[serde(default)]
    pub live: Option<bool>,
    #[serde(default)]
    pub processes: Vec<ProcessSpec>,
    #[serde(default)]
    pub submissions: Vec<TimedSubmission>,
}

impl Workload {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    /// `base` with the settings this workload specifies layered on top
    pub fn driver_config(&self, base: DriverConfig) -> DriverConfig {
        let mut config = base;
        if let Some(ms) = self.time_unit_ms {
            config = config.with_time_unit(Duration::from_millis(ms));
        }
        if let Some(live) = self.live {
            config = config.with_live(live);
        }
        if let Some(quantum) = self.quantum {
            config = config.with_default_quantum(quantum);
        }
        config
    }

    /// Submissions as `(time, spec)` pairs, in file order
    pub fn timed_specs(&self) -> Vec<(SimTime, ProcessSpec)> {
        self.submissions
            .iter()
            .map(|s| (s.at, s.process.clone()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SAMPLE: &str = r#"{
        "policy": "rr",
        "quantum": 3,
        "live": false,
        "processes": [
            { "name": "P1", "arrival": 0, "burst": 5 },
            { "name": "P2", "arrival": 1, "burst": 2, "quantum": 1 }
        ],
        "submissions": [
            { "at": 4, "process": { "name": "P3", "arrival": 4, "burst": 1 } }
        ]
    }"#;

    #[test]
    fn test_parse_sample() {
        let workload = Workload::from_json_str(SAMPLE).unwrap();
        assert_eq!(workload.policy, PolicyKind::RoundRobin);
        assert_eq!(workload.processes.len(), 2);
        assert_eq!(workload.processes[1].quantum, Some(1));
        assert_eq!(workload.timed_specs()[0].0, 4);
    }

    #[test]
    fn test_driver_config_overrides() {
        let workload = Workload::from_json_str(SAMPLE).unwrap();
        let config = workload.driver_config(DriverConfig::default());
        assert!(!config.live);
        assert_eq!(config.default_quantum, 3);
        assert_eq!(config.time_unit, Duration::from_secs(1));
    }

    #[test]
    fn test_minimal_workload() {
        let workload = Workload::from_json_str(r#"{ "policy": "fcfs" }"#).unwrap();
        assert!(workload.processes.is_empty());
        assert_eq!(
            workload.driver_config(DriverConfig::instant()),
            DriverConfig::instant()
        );
    }

    #[test]
    fn test_unknown_policy_rejected() {
        let err = Workload::from_json_str(r#"{ "policy": "lottery" }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
        assert!(err.to_string().contains("lottery"));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();

        let workload = Workload::load(file.path()).unwrap();
        assert_eq!(workload.submissions[0].process.name, "P3");
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = Workload::load(dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
