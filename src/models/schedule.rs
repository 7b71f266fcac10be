//! Schedule (solution) model.
//!
//! A schedule records, for every operation, the machine interval it
//! occupies. Assignments are kept in commit order; lookups go by
//! `(job_id, operation_id)`.
//!
//! # Reference
//! Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems", Ch. 3

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A complete schedule produced by one scheduling run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Schedule {
    /// Operation assignments in commit order.
    pub assignments: Vec<Assignment>,
}

/// An operation-machine-time assignment.
///
/// The machine is occupied over `[start_time, end_time)`. The first
/// `setup_time` units of that interval are setup; processing follows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assignment {
    /// Owning job ID.
    pub job_id: String,
    /// Operation ID within the job.
    pub operation_id: String,
    /// Machine the operation runs on.
    pub machine_id: String,
    /// Start of the machine interval (setup begins here).
    pub start_time: f64,
    /// Setup portion of the interval.
    pub setup_time: f64,
    /// Processing portion of the interval.
    pub duration: f64,
    /// End of the machine interval (`start_time + setup_time + duration`).
    pub end_time: f64,
}

/// A broken schedule invariant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Violation {
    /// Type of violation.
    pub violation_type: ViolationType,
    /// Related entity ID (`job/operation` or machine).
    pub entity_id: String,
    /// Human-readable description.
    pub message: String,
}

/// Classification of schedule violations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ViolationType {
    /// An input operation has no assignment.
    MissingOperation,
    /// An operation is assigned more than once.
    DuplicateOperation,
    /// An assignment refers to an operation not present in the input.
    UnknownOperation,
    /// An operation starts before its job predecessor ends.
    PrecedenceViolation,
    /// Two assignments overlap on the same machine.
    MachineOverlap,
    /// An assignment starts before time 0.
    NegativeStart,
    /// `end_time` disagrees with `start_time + setup_time + duration`,
    /// or the assignment disagrees with its input operation.
    InconsistentTiming,
}

impl Assignment {
    /// Creates an assignment; `end_time` is derived.
    pub fn new(
        job_id: impl Into<String>,
        operation_id: impl Into<String>,
        machine_id: impl Into<String>,
        start_time: f64,
        setup_time: f64,
        duration: f64,
    ) -> Self {
        Self {
            job_id: job_id.into(),
            operation_id: operation_id.into(),
            machine_id: machine_id.into(),
            start_time,
            setup_time,
            duration,
            end_time: start_time + setup_time + duration,
        }
    }

    /// Time at which processing (after setup) begins.
    #[inline]
    pub fn processing_start(&self) -> f64 {
        self.start_time + self.setup_time
    }

    /// Total machine occupation (end - start).
    #[inline]
    pub fn occupied_time(&self) -> f64 {
        self.end_time - self.start_time
    }

    /// Whether this assignment belongs to the given operation.
    #[inline]
    pub fn is_for(&self, job_id: &str, operation_id: &str) -> bool {
        self.job_id == job_id && self.operation_id == operation_id
    }
}

impl Violation {
    /// Creates a violation.
    pub fn new(
        violation_type: ViolationType,
        entity_id: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            violation_type,
            entity_id: entity_id.into(),
            message: message.into(),
        }
    }
}

impl Schedule {
    /// Creates an empty schedule.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an assignment.
    pub fn add_assignment(&mut self, assignment: Assignment) {
        self.assignments.push(assignment);
    }

    /// Makespan: latest end time across all assignments, 0 when empty.
    pub fn makespan(&self) -> f64 {
        self.assignments
            .iter()
            .map(|a| a.end_time)
            .fold(0.0, f64::max)
    }

    /// Finds the assignment for `(job_id, operation_id)`.
    pub fn assignment(&self, job_id: &str, operation_id: &str) -> Option<&Assignment> {
        self.assignments
            .iter()
            .find(|a| a.is_for(job_id, operation_id))
    }

    /// Assignments of one job, in commit order (which is also job order).
    pub fn assignments_for_job(&self, job_id: &str) -> Vec<&Assignment> {
        self.assignments
            .iter()
            .filter(|a| a.job_id == job_id)
            .collect()
    }

    /// Assignments on one machine, sorted by start time.
    pub fn assignments_for_machine(&self, machine_id: &str) -> Vec<&Assignment> {
        let mut on_machine: Vec<&Assignment> = self
            .assignments
            .iter()
            .filter(|a| a.machine_id == machine_id)
            .collect();
        on_machine.sort_by(|a, b| a.start_time.total_cmp(&b.start_time));
        on_machine
    }

    /// Completion time of a job (latest end of its assignments).
    pub fn job_completion_time(&self, job_id: &str) -> Option<f64> {
        self.assignments
            .iter()
            .filter(|a| a.job_id == job_id)
            .map(|a| a.end_time)
            .reduce(f64::max)
    }

    /// Total occupied time (setup + processing) of a machine.
    pub fn machine_busy_time(&self, machine_id: &str) -> f64 {
        self.assignments
            .iter()
            .filter(|a| a.machine_id == machine_id)
            .map(Assignment::occupied_time)
            .sum()
    }

    /// Machine utilization: busy time / horizon.
    ///
    /// Returns `None` if `horizon` is not positive.
    pub fn machine_utilization(&self, machine_id: &str, horizon: f64) -> Option<f64> {
        if horizon <= 0.0 {
            return None;
        }
        Some(self.machine_busy_time(machine_id) / horizon)
    }

    /// Utilization of every machine that has assignments, over the makespan.
    pub fn all_utilizations(&self) -> BTreeMap<String, f64> {
        let horizon = self.makespan();
        if horizon <= 0.0 {
            return BTreeMap::new();
        }

        let mut busy: BTreeMap<String, f64> = BTreeMap::new();
        for a in &self.assignments {
            *busy.entry(a.machine_id.clone()).or_insert(0.0) += a.occupied_time();
        }

        busy.into_iter()
            .map(|(id, time)| (id, time / horizon))
            .collect()
    }

    /// Number of assignments.
    pub fn assignment_count(&self) -> usize {
        self.assignments.len()
    }

    /// Whether nothing was scheduled.
    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }
}
