//! Schedule quality metrics (KPIs).
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Makespan (C_max) | Latest completion time |
//! | Utilization | Busy time / makespan, per machine |
//! | Total Setup | Sum of setup time over all operations |
//! | Total Idle | Sum over machines of makespan - busy time |
//! | Avg Flow Time | Mean job completion time (all jobs released at 0) |
//!
//! # Reference
//! Pinedo (2016), "Scheduling", Ch. 1.2: Performance Measures

use std::collections::BTreeMap;

use crate::models::{Machine, Schedule};

/// Schedule performance indicators.
#[derive(Debug, Clone, PartialEq)]
pub struct ScheduleKpi {
    /// Latest completion time.
    pub makespan: f64,
    /// Busy time (setup + processing) per machine.
    pub busy_time_by_machine: BTreeMap<String, f64>,
    /// Busy time / makespan per machine (0 when makespan is 0).
    pub utilization_by_machine: BTreeMap<String, f64>,
    /// Mean of `utilization_by_machine`.
    pub avg_utilization: f64,
    /// Sum of setup time over all assignments.
    pub total_setup_time: f64,
    /// Sum over machines of (makespan - busy time).
    pub total_idle_time: f64,
    /// Completion time per job.
    pub completion_by_job: BTreeMap<String, f64>,
    /// Mean job completion time.
    pub avg_flow_time: f64,
}

impl ScheduleKpi {
    /// Computes KPIs for a schedule over the given machine set.
    ///
    /// Machines without assignments count with zero busy time.
    pub fn calculate(schedule: &Schedule, machines: &[Machine]) -> Self {
        let makespan = schedule.makespan();

        let mut busy_time_by_machine: BTreeMap<String, f64> = machines
            .iter()
            .map(|m| (m.machine_id.clone(), 0.0))
            .collect();
        let mut completion_by_job: BTreeMap<String, f64> = BTreeMap::new();
        let mut total_setup_time = 0.0;

        for a in &schedule.assignments {
            *busy_time_by_machine.entry(a.machine_id.clone()).or_insert(0.0) += a.occupied_time();
            let completion = completion_by_job.entry(a.job_id.clone()).or_insert(0.0);
            *completion = completion.max(a.end_time);
            total_setup_time += a.setup_time;
        }

        let utilization_by_machine: BTreeMap<String, f64> = busy_time_by_machine
            .iter()
            .map(|(id, &busy)| {
                let util = if makespan > 0.0 { busy / makespan } else { 0.0 };
                (id.clone(), util)
            })
            .collect();

        let avg_utilization = mean(utilization_by_machine.values().copied());
        let total_idle_time = busy_time_by_machine
            .values()
            .map(|&busy| (makespan - busy).max(0.0))
            .sum();
        let avg_flow_time = mean(completion_by_job.values().copied());

        Self {
            makespan,
            busy_time_by_machine,
            utilization_by_machine,
            avg_utilization,
            total_setup_time,
            total_idle_time,
            completion_by_job,
            avg_flow_time,
        }
    }

    /// Whether the schedule meets the given quality thresholds.
    pub fn meets_thresholds(&self, max_makespan: f64, min_utilization: f64) -> bool {
        self.makespan <= max_makespan && self.avg_utilization >= min_utilization
    }
}

fn mean(values: impl Iterator<Item = f64>) -> f64 {
    let (sum, count) = values.fold((0.0, 0usize), |(s, c), v| (s + v, c + 1));
    if count == 0 {
        0.0
    } else {
        sum / count as f64
    }
}
