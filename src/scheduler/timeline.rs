//! Machine timeline: per-machine free time.
//!
//! Each machine keeps the time at which it becomes free and the last
//! operation sequenced on it. Commits may only move free time forward;
//! anything else would mean two operations overlap on one machine.

use std::collections::HashMap;

use crate::error::InvariantViolation;
use crate::models::Machine;

/// The last operation sequenced on a machine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SequencedOperation<'a> {
    /// Owning job ID.
    pub job_id: &'a str,
    /// Operation ID within the job.
    pub operation_id: &'a str,
}

#[derive(Debug, Clone)]
struct MachineState<'a> {
    free_time: f64,
    last: Option<SequencedOperation<'a>>,
}

/// Free-time bookkeeping for every machine of one scheduling run.
#[derive(Debug)]
pub struct MachineTimeline<'a> {
    states: HashMap<&'a str, MachineState<'a>>,
}

impl<'a> MachineTimeline<'a> {
    /// Creates a timeline where each machine is free from its
    /// `available_from` time.
    pub fn new(machines: &'a [Machine]) -> Self {
        let mut states = HashMap::with_capacity(machines.len());
        for m in machines {
            states.entry(m.machine_id.as_str()).or_insert(MachineState {
                free_time: m.available_from,
                last: None,
            });
        }
        Self { states }
    }

    /// Time at which the machine can start its next operation.
    pub fn free_time(&self, machine_id: &str) -> Option<f64> {
        self.states.get(machine_id).map(|s| s.free_time)
    }

    /// Last operation sequenced on the machine.
    pub fn last_operation(&self, machine_id: &str) -> Option<SequencedOperation<'a>> {
        self.states.get(machine_id).and_then(|s| s.last)
    }

    /// Occupies `[start, end)` on the machine.
    ///
    /// Fails if the interval starts before the machine is free or ends
    /// before it starts.
    pub fn commit(
        &mut self,
        machine_id: &str,
        start: f64,
        end: f64,
        operation: SequencedOperation<'a>,
    ) -> Result<(), InvariantViolation> {
        let state = self
            .states
            .get_mut(machine_id)
            .ok_or_else(|| InvariantViolation::new(format!("unknown machine '{machine_id}'")))?;

        if start < state.free_time || end < start {
            return Err(InvariantViolation::new(format!(
                "commit of '{}/{}' [{start}, {end}) on machine '{machine_id}' overlaps work ending at {}",
                operation.job_id, operation.operation_id, state.free_time
            )));
        }

        state.free_time = end;
        state.last = Some(operation);
        Ok(())
    }

    /// Number of machines tracked.
    pub fn machine_count(&self) -> usize {
        self.states.len()
    }
}
