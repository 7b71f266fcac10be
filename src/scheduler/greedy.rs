//! Greedy list scheduler.
//!
//! # Algorithm
//!
//! 1. Validate the input; reject it as a whole if anything is wrong.
//! 2. Put a cursor on the first operation of every job; every machine is
//!    free from its availability time.
//! 3. Among the eligible operations (one per unfinished job), pick the one
//!    with the smallest earliest feasible start
//!    `max(job predecessor end, machine free time)`. Ties go to the job
//!    that appears first in the input.
//! 4. Commit it over `[start, start + setup + duration)`, advance the job,
//!    and repeat until every job is exhausted.
//!
//! Committed times are final; the scheduler never backtracks.
//!
//! # Complexity
//! O(n * j) where n = total operations, j = jobs.
//!
//! # Reference
//! Pinedo (2016), "Scheduling", Ch. 4: Priority Dispatching

use tracing::{debug, error, trace, warn};

use super::readiness::{EligibleOperation, ReadinessTracker};
use super::timeline::{MachineTimeline, SequencedOperation};
use super::SchedulerConfig;
use crate::error::{InvariantViolation, ScheduleError};
use crate::models::{Assignment, Job, Machine, Schedule};
use crate::validation::validate_input;

/// An eligible operation with its computed start.
#[derive(Debug, Clone, Copy)]
struct Candidate<'a> {
    eligible: EligibleOperation<'a>,
    start: f64,
}

/// Deterministic greedy job-shop scheduler.
///
/// Holds only configuration; each call to [`schedule`](Self::schedule)
/// builds its own tracker and timeline, so one scheduler can serve
/// concurrent callers.
///
/// # Example
///
/// ```
/// use jobshop_dispatch::models::{Job, Machine, Operation};
/// use jobshop_dispatch::scheduler::GreedyScheduler;
///
/// let jobs = vec![
///     Job::new("job-1")
///         .with_operation(Operation::new("op-1", "m1", 3.0).with_setup_time(0.5))
///         .with_operation(Operation::new("op-2", "m2", 2.0)),
/// ];
/// let machines = vec![Machine::new("m1"), Machine::new("m2")];
///
/// let schedule = GreedyScheduler::new().schedule(&jobs, &machines).unwrap();
/// assert_eq!(schedule.assignment("job-1", "op-2").unwrap().start_time, 3.5);
/// assert_eq!(schedule.makespan(), 5.5);
/// ```
#[derive(Debug, Clone, Default)]
pub struct GreedyScheduler {
    config: SchedulerConfig,
}

impl GreedyScheduler {
    /// Creates a scheduler with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the configuration.
    pub fn with_config(mut self, config: SchedulerConfig) -> Self {
        self.config = config;
        self
    }

    /// Current configuration.
    pub fn config(&self) -> &SchedulerConfig {
        &self.config
    }

    /// Schedules `jobs` on `machines`.
    ///
    /// # Errors
    /// - [`ScheduleError::Configuration`] if the input is invalid (unknown
    ///   machine, bad duration or setup time, duplicate IDs, empty job,
    ///   bad tie tolerance).
    /// - [`ScheduleError::InvariantViolation`] if an internal check fails.
    pub fn schedule(&self, jobs: &[Job], machines: &[Machine]) -> Result<Schedule, ScheduleError> {
        if let Err(errors) = validate_input(jobs, machines, &self.config) {
            warn!(problems = errors.len(), "rejecting scheduling input");
            return Err(ScheduleError::Configuration(errors));
        }

        let mut tracker = ReadinessTracker::new(jobs);
        let mut timeline = MachineTimeline::new(machines);
        let mut schedule = Schedule::new();
        let total = tracker.remaining();

        debug!(
            jobs = jobs.len(),
            machines = timeline.machine_count(),
            operations = total,
            "scheduling started"
        );

        while let Some(candidate) = self.select(&tracker, &timeline).map_err(report)? {
            let eligible = candidate.eligible;
            let op = eligible.operation;
            let start = candidate.start;
            let end = start + op.setup_time + op.duration;

            timeline
                .commit(
                    &op.machine_id,
                    start,
                    end,
                    SequencedOperation {
                        job_id: eligible.job_id,
                        operation_id: &op.operation_id,
                    },
                )
                .map_err(report)?;
            tracker.advance(eligible.job_id, end).map_err(report)?;

            trace!(
                job = eligible.job_id,
                operation = %op.operation_id,
                machine = %op.machine_id,
                start,
                end,
                "committed"
            );

            schedule.add_assignment(Assignment::new(
                eligible.job_id,
                &op.operation_id,
                &op.machine_id,
                start,
                op.setup_time,
                op.duration,
            ));
        }

        debug_assert_eq!(schedule.assignment_count(), total);
        debug!(
            operations = schedule.assignment_count(),
            makespan = schedule.makespan(),
            "scheduling finished"
        );

        Ok(schedule)
    }

    /// Picks the eligible operation with the smallest feasible start.
    ///
    /// Eligible operations arrive in job insertion order with one per job,
    /// so keeping the first strictly-better candidate breaks ties by job
    /// order and then by operation index.
    fn select<'a>(
        &self,
        tracker: &ReadinessTracker<'a>,
        timeline: &MachineTimeline<'a>,
    ) -> Result<Option<Candidate<'a>>, InvariantViolation> {
        let mut best: Option<Candidate<'a>> = None;

        for eligible in tracker.eligible() {
            let machine_id = eligible.operation.machine_id.as_str();
            let free = timeline.free_time(machine_id).ok_or_else(|| {
                InvariantViolation::new(format!(
                    "operation '{}/{}' refers to untracked machine '{machine_id}'",
                    eligible.job_id, eligible.operation.operation_id
                ))
            })?;
            let start = eligible.ready_time.max(free);

            let better = match &best {
                None => true,
                Some(current) => start < current.start - self.config.tie_epsilon,
            };
            if better {
                best = Some(Candidate { eligible, start });
            }
        }

        Ok(best)
    }
}

fn report(violation: InvariantViolation) -> ScheduleError {
    error!(%violation, "scheduler invariant violated");
    ScheduleError::InvariantViolation(violation)
}

/// Schedules with the default configuration.
///
/// Shorthand for `GreedyScheduler::new().schedule(jobs, machines)`.
pub fn schedule(jobs: &[Job], machines: &[Machine]) -> Result<Schedule, ScheduleError> {
    GreedyScheduler::new().schedule(jobs, machines)
}
