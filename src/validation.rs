//! Input validation and schedule verification.
//!
//! `validate_input` checks a plan before scheduling and reports every
//! problem found:
//! - Unknown machine references
//! - Non-positive durations, negative setup or availability times
//! - Duplicate job, operation (within a job), or machine IDs
//! - Empty jobs (unless allowed by configuration)
//! - A negative or non-finite tie tolerance in the configuration
//!
//! `verify_schedule` re-checks a finished schedule against its input jobs:
//! completeness, precedence, machine capacity, non-negative starts and
//! consistent timing. It is useful for schedules that were edited or
//! imported from outside the dispatcher.

use std::collections::{HashMap, HashSet};

use crate::error::{ConfigurationError, ConfigurationErrorKind};
use crate::models::{Assignment, Job, Machine, Schedule, Violation, ViolationType};
use crate::scheduler::SchedulerConfig;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ConfigurationError>>;

/// Absolute tolerance used when comparing times in `verify_schedule`.
const TIME_TOLERANCE: f64 = 1e-9;

/// Validates the input of a scheduling run.
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_input(jobs: &[Job], machines: &[Machine], config: &SchedulerConfig) -> ValidationResult {
    let mut errors = Vec::new();

    if !config.tie_epsilon.is_finite() || config.tie_epsilon < 0.0 {
        errors.push(ConfigurationError::new(
            ConfigurationErrorKind::InvalidTieEpsilon,
            format!(
                "Tie tolerance must be a non-negative finite number, got {}",
                config.tie_epsilon
            ),
        ));
    }

    let mut machine_ids = HashSet::new();
    for m in machines {
        if !machine_ids.insert(m.machine_id.as_str()) {
            errors.push(ConfigurationError::new(
                ConfigurationErrorKind::DuplicateId,
                format!("Duplicate machine ID: {}", m.machine_id),
            ));
        }
        if !m.available_from.is_finite() || m.available_from < 0.0 {
            errors.push(ConfigurationError::new(
                ConfigurationErrorKind::InvalidAvailability,
                format!(
                    "Machine '{}' has invalid availability time {}",
                    m.machine_id, m.available_from
                ),
            ));
        }
    }

    let mut job_ids = HashSet::new();
    for job in jobs {
        if !job_ids.insert(job.job_id.as_str()) {
            errors.push(ConfigurationError::new(
                ConfigurationErrorKind::DuplicateId,
                format!("Duplicate job ID: {}", job.job_id),
            ));
        }

        if job.operations.is_empty() && !config.allow_empty_jobs {
            errors.push(ConfigurationError::new(
                ConfigurationErrorKind::EmptyJob,
                format!("Job '{}' has no operations", job.job_id),
            ));
        }

        let mut operation_ids = HashSet::new();
        for op in &job.operations {
            let key = format!("{}/{}", job.job_id, op.operation_id);

            if !operation_ids.insert(op.operation_id.as_str()) {
                errors.push(ConfigurationError::new(
                    ConfigurationErrorKind::DuplicateId,
                    format!("Duplicate operation ID: {key}"),
                ));
            }

            if !machine_ids.contains(op.machine_id.as_str()) {
                errors.push(ConfigurationError::new(
                    ConfigurationErrorKind::UnknownMachine,
                    format!(
                        "Operation '{key}' references unknown machine '{}'",
                        op.machine_id
                    ),
                ));
            }

            if !op.duration.is_finite() || op.duration <= 0.0 {
                errors.push(ConfigurationError::new(
                    ConfigurationErrorKind::InvalidDuration,
                    format!("Operation '{key}' must have a positive duration, got {}", op.duration),
                ));
            }

            if !op.setup_time.is_finite() || op.setup_time < 0.0 {
                errors.push(ConfigurationError::new(
                    ConfigurationErrorKind::InvalidSetupTime,
                    format!(
                        "Operation '{key}' must have a non-negative setup time, got {}",
                        op.setup_time
                    ),
                ));
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Checks a schedule against the jobs it was built from.
///
/// Returns every violation found; an empty vector means the schedule is
/// complete and feasible.
pub fn verify_schedule(schedule: &Schedule, jobs: &[Job]) -> Vec<Violation> {
    let mut violations = Vec::new();

    let mut by_key: HashMap<(&str, &str), Vec<&Assignment>> = HashMap::new();
    for a in &schedule.assignments {
        by_key
            .entry((a.job_id.as_str(), a.operation_id.as_str()))
            .or_default()
            .push(a);

        let entity = format!("{}/{}", a.job_id, a.operation_id);
        if a.start_time < 0.0 {
            violations.push(Violation::new(
                ViolationType::NegativeStart,
                entity.clone(),
                format!("Operation '{entity}' starts at {}", a.start_time),
            ));
        }
        let expected_end = a.start_time + a.setup_time + a.duration;
        if (a.end_time - expected_end).abs() > TIME_TOLERANCE {
            violations.push(Violation::new(
                ViolationType::InconsistentTiming,
                entity.clone(),
                format!(
                    "Operation '{entity}' ends at {} but start + setup + duration = {expected_end}",
                    a.end_time
                ),
            ));
        }
    }

    let mut known = HashSet::new();
    for job in jobs {
        let mut previous: Option<&Assignment> = None;
        for op in &job.operations {
            let key = (job.job_id.as_str(), op.operation_id.as_str());
            known.insert(key);
            let entity = format!("{}/{}", job.job_id, op.operation_id);

            let found = by_key.get(&key).map(Vec::as_slice).unwrap_or(&[]);
            let current = match found {
                [] => {
                    violations.push(Violation::new(
                        ViolationType::MissingOperation,
                        entity.clone(),
                        format!("Operation '{entity}' is not scheduled"),
                    ));
                    None
                }
                [single] => Some(*single),
                [first, ..] => {
                    violations.push(Violation::new(
                        ViolationType::DuplicateOperation,
                        entity.clone(),
                        format!("Operation '{entity}' is scheduled {} times", found.len()),
                    ));
                    Some(*first)
                }
            };

            if let Some(a) = current {
                if a.machine_id != op.machine_id
                    || a.setup_time != op.setup_time
                    || a.duration != op.duration
                {
                    violations.push(Violation::new(
                        ViolationType::InconsistentTiming,
                        entity.clone(),
                        format!("Assignment of '{entity}' does not match its operation"),
                    ));
                }
                if let Some(prev) = previous {
                    if prev.end_time > a.start_time + TIME_TOLERANCE {
                        violations.push(Violation::new(
                            ViolationType::PrecedenceViolation,
                            entity.clone(),
                            format!(
                                "Operation '{entity}' starts at {} before its predecessor '{}' ends at {}",
                                a.start_time, prev.operation_id, prev.end_time
                            ),
                        ));
                    }
                }
            }
            // A missing operation breaks the chain; later ones are compared
            // against the last scheduled predecessor.
            previous = current.or(previous);
        }
    }

    for a in &schedule.assignments {
        if !known.contains(&(a.job_id.as_str(), a.operation_id.as_str())) {
            let entity = format!("{}/{}", a.job_id, a.operation_id);
            violations.push(Violation::new(
                ViolationType::UnknownOperation,
                entity.clone(),
                format!("Assignment '{entity}' has no matching input operation"),
            ));
        }
    }

    let mut by_machine: HashMap<&str, Vec<&Assignment>> = HashMap::new();
    for a in &schedule.assignments {
        by_machine.entry(a.machine_id.as_str()).or_default().push(a);
    }
    let mut machine_ids: Vec<&str> = by_machine.keys().copied().collect();
    machine_ids.sort_unstable();
    for machine_id in machine_ids {
        let mut intervals = by_machine.remove(machine_id).unwrap_or_default();
        intervals.sort_by(|a, b| a.start_time.total_cmp(&b.start_time));
        for pair in intervals.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            if a.end_time > b.start_time + TIME_TOLERANCE {
                violations.push(Violation::new(
                    ViolationType::MachineOverlap,
                    machine_id,
                    format!(
                        "'{}/{}' [{}, {}) overlaps '{}/{}' [{}, {}) on machine '{machine_id}'",
                        a.job_id,
                        a.operation_id,
                        a.start_time,
                        a.end_time,
                        b.job_id,
                        b.operation_id,
                        b.start_time,
                        b.end_time
                    ),
                ));
            }
        }
    }

    violations
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Operation;

    fn sample_machines() -> Vec<Machine> {
        vec![Machine::new("m1"), Machine::new("m2")]
    }

    fn sample_jobs() -> Vec<Job> {
        vec![
            Job::new("J1")
                .with_operation(Operation::new("O1", "m1", 1.0))
                .with_operation(Operation::new("O2", "m2", 2.0).with_setup_time(0.5)),
            Job::new("J2").with_operation(Operation::new("O1", "m1", 1.5)),
        ]
    }

    fn kinds(errors: &[ConfigurationError]) -> Vec<ConfigurationErrorKind> {
        errors.iter().map(|e| e.kind).collect()
    }

    #[test]
    fn test_valid_input() {
        let config = SchedulerConfig::default();
        assert!(validate_input(&sample_jobs(), &sample_machines(), &config).is_ok());
    }

    #[test]
    fn test_empty_input_is_valid() {
        assert!(validate_input(&[], &[], &SchedulerConfig::default()).is_ok());
    }

    #[test]
    fn test_unknown_machine() {
        let jobs = vec![Job::new("J1").with_operation(Operation::new("O1", "m9", 1.0))];
        let errors = validate_input(&jobs, &sample_machines(), &SchedulerConfig::default()).unwrap_err();
        assert_eq!(kinds(&errors), vec![ConfigurationErrorKind::UnknownMachine]);
        assert!(errors[0].message.contains("m9"));
    }

    #[test]
    fn test_invalid_durations() {
        let jobs = vec![Job::new("J1")
            .with_operation(Operation::new("O1", "m1", 0.0))
            .with_operation(Operation::new("O2", "m1", -1.0))
            .with_operation(Operation::new("O3", "m1", f64::NAN))];
        let errors = validate_input(&jobs, &sample_machines(), &SchedulerConfig::default()).unwrap_err();
        assert_eq!(errors.len(), 3);
        assert!(errors
            .iter()
            .all(|e| e.kind == ConfigurationErrorKind::InvalidDuration));
    }

    #[test]
    fn test_negative_setup_time() {
        let jobs = vec![Job::new("J1").with_operation(Operation::new("O1", "m1", 1.0).with_setup_time(-0.5))];
        let errors = validate_input(&jobs, &sample_machines(), &SchedulerConfig::default()).unwrap_err();
        assert_eq!(kinds(&errors), vec![ConfigurationErrorKind::InvalidSetupTime]);
    }

    #[test]
    fn test_duplicate_ids() {
        let jobs = vec![
            Job::new("J1")
                .with_operation(Operation::new("O1", "m1", 1.0))
                .with_operation(Operation::new("O1", "m2", 1.0)),
            Job::new("J1").with_operation(Operation::new("O1", "m1", 1.0)),
        ];
        let machines = vec![Machine::new("m1"), Machine::new("m2"), Machine::new("m1")];
        let errors = validate_input(&jobs, &machines, &SchedulerConfig::default()).unwrap_err();

        assert_eq!(errors.len(), 3);
        assert!(errors
            .iter()
            .all(|e| e.kind == ConfigurationErrorKind::DuplicateId));
        assert!(errors.iter().any(|e| e.message.contains("machine")));
        assert!(errors.iter().any(|e| e.message.contains("job")));
        assert!(errors.iter().any(|e| e.message.contains("operation")));
    }

    #[test]
    fn test_same_operation_id_in_different_jobs_is_fine() {
        let config = SchedulerConfig::default();
        // Both jobs use "O1".
        assert!(validate_input(&sample_jobs(), &sample_machines(), &config).is_ok());
    }

    #[test]
    fn test_empty_job() {
        let jobs = vec![Job::new("empty")];
        let errors = validate_input(&jobs, &sample_machines(), &SchedulerConfig::default()).unwrap_err();
        assert_eq!(kinds(&errors), vec![ConfigurationErrorKind::EmptyJob]);

        let permissive = SchedulerConfig::default().with_allow_empty_jobs(true);
        assert!(validate_input(&jobs, &sample_machines(), &permissive).is_ok());
    }

    #[test]
    fn test_invalid_availability() {
        let machines = vec![Machine::new("m1").with_available_from(-2.0)];
        let errors = validate_input(&[], &machines, &SchedulerConfig::default()).unwrap_err();
        assert_eq!(kinds(&errors), vec![ConfigurationErrorKind::InvalidAvailability]);
    }

    #[test]
    fn test_invalid_tie_epsilon() {
        for bad in [-5.0, f64::NAN, f64::INFINITY] {
            let config = SchedulerConfig::default().with_tie_epsilon(bad);
            let errors = validate_input(&sample_jobs(), &sample_machines(), &config).unwrap_err();
            assert_eq!(kinds(&errors), vec![ConfigurationErrorKind::InvalidTieEpsilon]);
        }

        let zero = SchedulerConfig::default().with_tie_epsilon(0.0);
        assert!(validate_input(&sample_jobs(), &sample_machines(), &zero).is_ok());
    }

    #[test]
    fn test_multiple_errors() {
        let jobs = vec![
            Job::new("empty"),
            Job::new("J1").with_operation(Operation::new("O1", "UNKNOWN", -3.0)),
        ];
        let errors = validate_input(&jobs, &[], &SchedulerConfig::default()).unwrap_err();
        assert_eq!(errors.len(), 3);
    }

    fn feasible_schedule() -> Schedule {
        let mut s = Schedule::new();
        s.add_assignment(Assignment::new("J1", "O1", "m1", 0.0, 0.0, 1.0));
        s.add_assignment(Assignment::new("J2", "O1", "m1", 1.0, 0.0, 1.5));
        s.add_assignment(Assignment::new("J1", "O2", "m2", 1.0, 0.5, 2.0));
        s
    }

    fn violation_types(violations: &[Violation]) -> Vec<ViolationType> {
        violations.iter().map(|v| v.violation_type.clone()).collect()
    }

    #[test]
    fn test_verify_feasible_schedule() {
        assert!(verify_schedule(&feasible_schedule(), &sample_jobs()).is_empty());
    }

    #[test]
    fn test_verify_missing_and_unknown() {
        let mut s = feasible_schedule();
        s.assignments.retain(|a| !a.is_for("J2", "O1"));
        s.add_assignment(Assignment::new("J3", "O1", "m2", 10.0, 0.0, 1.0));

        let types = violation_types(&verify_schedule(&s, &sample_jobs()));
        assert!(types.contains(&ViolationType::MissingOperation));
        assert!(types.contains(&ViolationType::UnknownOperation));
    }

    #[test]
    fn test_verify_duplicate() {
        let mut s = feasible_schedule();
        s.add_assignment(Assignment::new("J2", "O1", "m1", 20.0, 0.0, 1.5));
        let types = violation_types(&verify_schedule(&s, &sample_jobs()));
        assert_eq!(types, vec![ViolationType::DuplicateOperation]);
    }

    #[test]
    fn test_verify_precedence_violation() {
        let mut s = Schedule::new();
        s.add_assignment(Assignment::new("J1", "O1", "m1", 0.0, 0.0, 1.0));
        s.add_assignment(Assignment::new("J1", "O2", "m2", 0.5, 0.5, 2.0));
        s.add_assignment(Assignment::new("J2", "O1", "m1", 1.0, 0.0, 1.5));

        let types = violation_types(&verify_schedule(&s, &sample_jobs()));
        assert_eq!(types, vec![ViolationType::PrecedenceViolation]);
    }

    #[test]
    fn test_verify_machine_overlap() {
        let mut s = Schedule::new();
        s.add_assignment(Assignment::new("J1", "O1", "m1", 0.0, 0.0, 1.0));
        s.add_assignment(Assignment::new("J2", "O1", "m1", 0.5, 0.0, 1.5));
        s.add_assignment(Assignment::new("J1", "O2", "m2", 1.0, 0.5, 2.0));

        let violations = verify_schedule(&s, &sample_jobs());
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].violation_type, ViolationType::MachineOverlap);
        assert_eq!(violations[0].entity_id, "m1");
    }

    #[test]
    fn test_verify_touching_intervals_do_not_overlap() {
        // [0, 1) and [1, 2.5) share only the boundary.
        let violations = verify_schedule(&feasible_schedule(), &sample_jobs());
        assert!(!violation_types(&violations).contains(&ViolationType::MachineOverlap));
    }

    #[test]
    fn test_verify_negative_start_and_bad_timing() {
        let jobs = vec![Job::new("J1").with_operation(Operation::new("O1", "m1", 1.0))];
        let mut s = Schedule::new();
        let mut a = Assignment::new("J1", "O1", "m1", -1.0, 0.0, 1.0);
        a.end_time = 3.0;
        s.add_assignment(a);

        let types = violation_types(&verify_schedule(&s, &jobs));
        assert!(types.contains(&ViolationType::NegativeStart));
        assert!(types.contains(&ViolationType::InconsistentTiming));
    }

    #[test]
    fn test_verify_assignment_on_wrong_machine() {
        let jobs = vec![Job::new("J1").with_operation(Operation::new("O1", "m1", 1.0))];
        let mut s = Schedule::new();
        s.add_assignment(Assignment::new("J1", "O1", "m2", 0.0, 0.0, 1.0));

        let types = violation_types(&verify_schedule(&s, &jobs));
        assert_eq!(types, vec![ViolationType::InconsistentTiming]);
    }
}
