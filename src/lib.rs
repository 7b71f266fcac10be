//! Deterministic greedy scheduling for job-shop production plans.
//!
//! Given jobs (ordered operations, each bound to one machine, with a
//! processing duration and a fixed setup time) and a machine set, the
//! scheduler assigns a start time to every operation such that:
//! - operations of a job run in order,
//! - a machine runs at most one operation at a time,
//! - no operation starts before time 0,
//!
//! and reports the resulting makespan.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Job`, `Operation`, `Machine`, `Schedule`,
//!   `Assignment`, `Violation`
//! - **`scheduler`**: `GreedyScheduler` with its readiness tracker and
//!   machine timeline, `SchedulerConfig`, `ScheduleKpi`
//! - **`validation`**: Input checks (unknown machines, bad times, duplicate
//!   IDs) and schedule verification
//! - **`error`**: `ScheduleError` and its parts
//!
//! # Example
//!
//! ```
//! use jobshop_dispatch::models::{Job, Machine, Operation};
//!
//! let jobs = vec![
//!     Job::new("job-1")
//!         .with_operation(Operation::new("op-1", "m1", 3.0).with_setup_time(0.5))
//!         .with_operation(Operation::new("op-2", "m2", 2.0)),
//!     Job::new("job-2")
//!         .with_operation(Operation::new("op-1", "m2", 4.0))
//!         .with_operation(Operation::new("op-2", "m1", 1.0)),
//! ];
//! let machines = vec![Machine::new("m1"), Machine::new("m2")];
//!
//! let schedule = jobshop_dispatch::schedule(&jobs, &machines).unwrap();
//! assert_eq!(schedule.makespan(), 6.0);
//! ```
//!
//! # References
//!
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems"
//! - Baker & Trietsch (2019), "Principles of Sequencing and Scheduling"

pub mod error;
pub mod models;
pub mod scheduler;
pub mod validation;

pub use error::{ConfigurationError, ConfigurationErrorKind, InvariantViolation, ScheduleError};
pub use scheduler::{schedule, GreedyScheduler, SchedulerConfig};
