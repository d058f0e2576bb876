/*!
 * Property Tests
 * Invariants that hold for every built-in policy on random workloads
 */

use proptest::prelude::*;
use sched_sim::simulation::AdmissionQueue;
use sched_sim::{run_to_completion, PolicyKind, ProcessSpec, Statistics};

fn workload() -> impl Strategy<Value = Vec<ProcessSpec>> {
    prop::collection::vec((0i64..12, 1i64..7, 0i64..5), 1..9).prop_map(|rows| {
        rows.into_iter()
            .enumerate()
            .map(|(i, (arrival, burst, priority))| {
                ProcessSpec::new(format!("P{}", i + 1), arrival, burst).with_priority(priority)
            })
            .collect()
    })
}

fn policy() -> impl Strategy<Value = PolicyKind> {
    prop::sample::select(PolicyKind::ALL.to_vec())
}

proptest! {
    #[test]
    fn prop_every_record_completes_no_earlier_than_possible(
        specs in workload(),
        kind in policy(),
        quantum in 1u64..5,
    ) {
        let summary = run_to_completion(kind.build(quantum), &specs).unwrap();

        prop_assert_eq!(summary.statistics.completed, specs.len());
        for record in &summary.records {
            let completion = record.completion().unwrap();
            prop_assert!(completion >= record.arrival() + record.burst());
            prop_assert_eq!(record.executed(), record.burst());
            prop_assert_eq!(
                record.waiting() == Some(0),
                completion == record.arrival() + record.burst()
            );
        }
    }

    #[test]
    fn prop_timeline_accounts_for_all_time(
        specs in workload(),
        kind in policy(),
        quantum in 1u64..5,
    ) {
        let summary = run_to_completion(kind.build(quantum), &specs).unwrap();
        let total_burst: u64 = specs.iter().map(|s| s.burst as u64).sum();
        let last_arrival = specs.iter().map(|s| s.arrival as u64).max().unwrap_or(0);

        prop_assert_eq!(summary.timeline.total_units(), total_burst);
        prop_assert_eq!(summary.final_time, total_burst + summary.counters.idle_ticks);
        prop_assert!(summary.final_time <= last_arrival + total_burst);

        let entries = summary.timeline.entries();
        for pair in entries.windows(2) {
            prop_assert!(pair[0].end() <= pair[1].start);
        }
        for entry in entries {
            prop_assert!(entry.duration >= 1);
            prop_assert!(entry.start >= entry.arrival);
            if kind == PolicyKind::RoundRobin {
                prop_assert!(entry.duration <= quantum);
            }
        }
    }

    #[test]
    fn prop_statistics_are_idempotent(specs in workload(), kind in policy()) {
        let summary = run_to_completion(kind.build(2), &specs).unwrap();
        let first = Statistics::compute(&summary.records);
        let second = Statistics::compute(&summary.records);
        prop_assert_eq!(&first, &second);
        prop_assert_eq!(&first, &summary.statistics);
    }

    #[test]
    fn prop_duplicate_admission_leaves_queue_unchanged(specs in workload(), pick in 0usize..8) {
        let mut queue = AdmissionQueue::new(None);
        queue.admit_batch(&specs).unwrap();
        let before = queue.len();

        let dup = specs[pick % specs.len()].clone();
        prop_assert!(queue.admit(&dup).is_err());
        prop_assert_eq!(queue.len(), before);
    }
}
