/*!
 * Run Statistics
 * Waiting and turnaround times over completed records
 */

use crate::core::types::SimTime;
use crate::process::ProcessRecord;
use serde::{Deserialize, Serialize};

/// Per-process figures for a completed record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessStats {
    pub name: String,
    pub arrival: SimTime,
    pub burst: u64,
    pub completion: SimTime,
    pub turnaround: u64,
    pub waiting: u64,
}

/// Aggregate statistics of a run
///
/// Records without a completion time are excluded rather than counted as
/// zero. Both averages are zero when nothing completed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Statistics {
    pub avg_waiting: f64,
    pub avg_turnaround: f64,
    pub completed: usize,
    pub total: usize,
    pub per_process: Vec<ProcessStats>,
}

impl Statistics {
    pub fn compute(records: &[ProcessRecord]) -> Self {
        let per_process: Vec<ProcessStats> = records
            .iter()
            .filter_map(|r| {
                Some(ProcessStats {
                    name: r.name().to_string(),
                    arrival: r.arrival(),
                    burst: r.burst(),
                    completion: r.completion()?,
                    turnaround: r.turnaround()?,
                    waiting: r.waiting()?,
                })
            })
            .collect();

        let completed = per_process.len();
        let (avg_waiting, avg_turnaround) = if completed == 0 {
            (0.0, 0.0)
        } else {
            let waiting: u64 = per_process.iter().map(|p| p.waiting).sum();
            let turnaround: u64 = per_process.iter().map(|p| p.turnaround).sum();
            (
                waiting as f64 / completed as f64,
                turnaround as f64 / completed as f64,
            )
        };

        Self {
            avg_waiting,
            avg_turnaround,
            completed,
            total: records.len(),
            per_process,
        }
    }
}
