/*!
 * Admission Queue
 * Staging area for processes submitted before or during a run
 *
 * The queue itself is plain data; the driver wraps it together with its
 * state in a single mutex so that the duplicate check, the closed-run check
 * and the merge into the active set all observe one consistent snapshot.
 */

use crate::core::errors::ValidationError;
use crate::core::limits::{ADMISSION_QUEUE_CAPACITY, FIRST_PID};
use crate::core::types::Pid;
use crate::process::{ProcessRecord, ProcessSpec};
use crate::scheduler::SchedulingPolicy;
use ahash::RandomState;
use std::collections::{HashSet, VecDeque};

#[derive(Debug)]
pub struct AdmissionQueue {
    pending: VecDeque<ProcessRecord>,
    /// Every name admitted in this run, queued or already merged
    names: HashSet<String, RandomState>,
    next_pid: Pid,
    /// Policy name when the policy orders by priority
    priority_policy: Option<&'static str>,
}

impl AdmissionQueue {
    pub fn new(priority_policy: Option<&'static str>) -> Self {
        Self {
            pending: VecDeque::with_capacity(ADMISSION_QUEUE_CAPACITY),
            names: HashSet::default(),
            next_pid: FIRST_PID,
            priority_policy,
        }
    }

    /// Queue configured with the requirements of `policy`
    pub fn for_policy(policy: &dyn SchedulingPolicy) -> Self {
        Self::new(policy.requires_priority().then(|| policy.name()))
    }

    /// Validate and enqueue one spec, returning its pid
    pub fn admit(&mut self, spec: &ProcessSpec) -> Result<Pid, ValidationError> {
        let record = ProcessRecord::from_spec(self.next_pid, spec, self.priority_policy)?;
        if self.names.contains(record.name()) {
            return Err(ValidationError::DuplicateName(record.name().to_string()));
        }
        Ok(self.push(record))
    }

    /// Validate a whole batch and enqueue it only if every spec is valid
    pub fn admit_batch(&mut self, specs: &[ProcessSpec]) -> Result<Vec<Pid>, ValidationError> {
        let mut batch_names: HashSet<&str, RandomState> = HashSet::default();
        let mut records = Vec::with_capacity(specs.len());

        for (offset, spec) in specs.iter().enumerate() {
            let pid = self.next_pid + offset as Pid;
            let record = ProcessRecord::from_spec(pid, spec, self.priority_policy)?;
            if self.names.contains(record.name()) || !batch_names.insert(spec.name.as_str()) {
                return Err(ValidationError::DuplicateName(record.name().to_string()));
            }
            records.push(record);
        }

        Ok(records.into_iter().map(|r| self.push(r)).collect())
    }

    fn push(&mut self, record: ProcessRecord) -> Pid {
        let pid = record.pid();
        self.next_pid = pid + 1;
        self.names.insert(record.name().to_string());
        self.pending.push_back(record);
        pid
    }

    /// Hand every waiting record to the caller, in admission order
    pub fn drain(&mut self) -> Vec<ProcessRecord> {
        self.pending.drain(..).collect()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// Whether `name` was ever admitted to this run
    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    /// Total records admitted, merged or not
    pub fn admitted(&self) -> usize {
        self.names.len()
    }
}
