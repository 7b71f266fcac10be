//! Greedy dispatcher, its per-run state, and KPI evaluation.
//!
//! # Components
//!
//! - `ReadinessTracker`: per-job cursors; yields the eligible operations.
//! - `MachineTimeline`: per-machine free time and last sequenced operation.
//! - `GreedyScheduler`: list-scheduling loop driving both.
//! - `ScheduleKpi`: makespan, utilization, setup, idle and flow-time metrics.
//!
//! The tracker and timeline are created fresh by every `schedule` call and
//! owned by it; nothing is shared between runs.
//!
//! # References
//!
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems", Ch. 3-4
//! - Baker & Trietsch (2019), "Principles of Sequencing and Scheduling"

mod config;
mod greedy;
mod kpi;
mod readiness;
mod timeline;

pub use config::SchedulerConfig;
pub use greedy::{schedule, GreedyScheduler};
pub use kpi::ScheduleKpi;
pub use readiness::{EligibleOperation, ReadinessTracker};
pub use timeline::{MachineTimeline, SequencedOperation};
