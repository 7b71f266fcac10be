//! Readiness tracker: per-job precedence cursors.
//!
//! Each job has a cursor at the next operation to dispatch. Only the
//! cursor operation of a job is eligible, and it becomes eligible only
//! after the previous operation of the same job has been committed. This
//! is what enforces intra-job precedence.

use std::collections::HashMap;

use crate::error::InvariantViolation;
use crate::models::{Job, Operation};

/// An operation whose job predecessor (if any) has been committed.
#[derive(Debug, Clone, Copy)]
pub struct EligibleOperation<'a> {
    /// Position of the job in the input sequence.
    pub job_index: usize,
    /// Owning job ID.
    pub job_id: &'a str,
    /// Position of the operation within its job.
    pub operation_index: usize,
    /// The operation itself.
    pub operation: &'a Operation,
    /// End time of the job's last committed operation (0 for the first).
    pub ready_time: f64,
}

/// Tracks which operation of each job is next.
#[derive(Debug)]
pub struct ReadinessTracker<'a> {
    jobs: &'a [Job],
    positions: HashMap<&'a str, usize>,
    cursors: Vec<usize>,
    ready_times: Vec<f64>,
}

impl<'a> ReadinessTracker<'a> {
    /// Creates a tracker with every cursor at the first operation.
    pub fn new(jobs: &'a [Job]) -> Self {
        let mut positions = HashMap::with_capacity(jobs.len());
        for (idx, job) in jobs.iter().enumerate() {
            positions.entry(job.job_id.as_str()).or_insert(idx);
        }
        Self {
            jobs,
            positions,
            cursors: vec![0; jobs.len()],
            ready_times: vec![0.0; jobs.len()],
        }
    }

    /// Eligible operations, one per unfinished job, in job insertion order.
    pub fn eligible(&self) -> impl Iterator<Item = EligibleOperation<'a>> + '_ {
        let jobs = self.jobs;
        jobs.iter().enumerate().filter_map(move |(job_index, job)| {
            let operation_index = self.cursors[job_index];
            job.operations
                .get(operation_index)
                .map(|operation| EligibleOperation {
                    job_index,
                    job_id: job.job_id.as_str(),
                    operation_index,
                    operation,
                    ready_time: self.ready_times[job_index],
                })
        })
    }

    /// Moves a job's cursor past its current operation, which ended at
    /// `end_time`.
    pub fn advance(&mut self, job_id: &str, end_time: f64) -> Result<(), InvariantViolation> {
        let idx = self.position(job_id)?;
        if self.cursors[idx] >= self.jobs[idx].operations.len() {
            return Err(InvariantViolation::new(format!(
                "job '{job_id}' advanced past its last operation"
            )));
        }
        if end_time < self.ready_times[idx] {
            return Err(InvariantViolation::new(format!(
                "job '{job_id}' operation ends at {end_time}, before its predecessor ({})",
                self.ready_times[idx]
            )));
        }
        self.cursors[idx] += 1;
        self.ready_times[idx] = end_time;
        Ok(())
    }

    /// Whether every operation of the job has been committed.
    ///
    /// Unknown jobs count as exhausted.
    pub fn is_exhausted(&self, job_id: &str) -> bool {
        match self.positions.get(job_id) {
            Some(&idx) => self.cursors[idx] >= self.jobs[idx].operations.len(),
            None => true,
        }
    }

    /// End time of the job's last committed operation.
    pub fn ready_time(&self, job_id: &str) -> Option<f64> {
        self.positions.get(job_id).map(|&idx| self.ready_times[idx])
    }

    /// Number of operations not yet committed.
    pub fn remaining(&self) -> usize {
        self.jobs
            .iter()
            .zip(&self.cursors)
            .map(|(job, &cursor)| job.operations.len().saturating_sub(cursor))
            .sum()
    }

    /// Whether all jobs are exhausted.
    pub fn is_complete(&self) -> bool {
        self.remaining() == 0
    }

    fn position(&self, job_id: &str) -> Result<usize, InvariantViolation> {
        self.positions
            .get(job_id)
            .copied()
            .ok_or_else(|| InvariantViolation::new(format!("unknown job '{job_id}'")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn jobs() -> Vec<Job> {
        vec![
            Job::new("J1")
                .with_operation(Operation::new("O1", "m1", 1.0))
                .with_operation(Operation::new("O2", "m2", 1.0)),
            Job::new("J2").with_operation(Operation::new("O1", "m2", 2.0)),
        ]
    }

    fn eligible_keys(tracker: &ReadinessTracker<'_>) -> Vec<(String, String)> {
        tracker
            .eligible()
            .map(|e| (e.job_id.to_string(), e.operation.operation_id.clone()))
            .collect()
    }

    #[test]
    fn test_initially_first_operations_in_job_order() {
        let jobs = jobs();
        let tracker = ReadinessTracker::new(&jobs);
        assert_eq!(
            eligible_keys(&tracker),
            vec![("J1".into(), "O1".into()), ("J2".into(), "O1".into())]
        );
        assert!(tracker.eligible().all(|e| e.ready_time == 0.0));
        assert_eq!(tracker.remaining(), 3);
    }

    #[test]
    fn test_advance_exposes_successor() {
        let jobs = jobs();
        let mut tracker = ReadinessTracker::new(&jobs);
        tracker.advance("J1", 1.5).unwrap();

        let first = tracker.eligible().next().unwrap();
        assert_eq!(first.operation.operation_id, "O2");
        assert_eq!(first.operation_index, 1);
        assert_eq!(first.ready_time, 1.5);
        assert_eq!(tracker.ready_time("J1"), Some(1.5));
    }

    #[test]
    fn test_exhaustion() {
        let jobs = jobs();
        let mut tracker = ReadinessTracker::new(&jobs);
        assert!(!tracker.is_exhausted("J2"));
        tracker.advance("J2", 2.0).unwrap();
        assert!(tracker.is_exhausted("J2"));
        assert_eq!(eligible_keys(&tracker), vec![("J1".into(), "O1".into())]);

        // Advancing again would report an operation twice.
        assert!(tracker.advance("J2", 3.0).is_err());
    }

    #[test]
    fn test_unknown_job() {
        let jobs = jobs();
        let mut tracker = ReadinessTracker::new(&jobs);
        assert!(tracker.advance("J9", 1.0).is_err());
        assert!(tracker.is_exhausted("J9"));
        assert_eq!(tracker.ready_time("J9"), None);
    }

    #[test]
    fn test_end_before_predecessor_is_rejected() {
        let jobs = jobs();
        let mut tracker = ReadinessTracker::new(&jobs);
        tracker.advance("J1", 4.0).unwrap();
        assert!(tracker.advance("J1", 3.0).is_err());
    }

    #[test]
    fn test_complete_after_all_commits() {
        let jobs = jobs();
        let mut tracker = ReadinessTracker::new(&jobs);
        tracker.advance("J1", 1.0).unwrap();
        tracker.advance("J2", 2.0).unwrap();
        tracker.advance("J1", 3.0).unwrap();
        assert!(tracker.is_complete());
        assert_eq!(tracker.eligible().count(), 0);
    }

    #[test]
    fn test_empty_job_is_exhausted_immediately() {
        let jobs = vec![Job::new("E"), Job::new("J1").with_operation(Operation::new("O1", "m1", 1.0))];
        let tracker = ReadinessTracker::new(&jobs);
        assert!(tracker.is_exhausted("E"));
        assert_eq!(tracker.eligible().count(), 1);
    }
}
