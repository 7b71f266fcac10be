//! Operation model.
//!
//! An operation is the smallest schedulable unit of work. It belongs to
//! exactly one job, runs on exactly one machine, and occupies that machine
//! for `setup_time + duration`.
//!
//! # Time Model
//!
//! - **Setup**: fixed preparation time, incurred every time the operation is
//!   sequenced, immediately before processing.
//! - **Duration**: core processing time.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// An operation to be scheduled.
///
/// Identified within the plan by `(job_id, operation_id)`; the job id is
/// supplied by the owning [`Job`](super::Job).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Operation {
    /// Operation identifier, unique within its job.
    pub operation_id: String,
    /// Machine this operation must run on.
    pub machine_id: String,
    /// Processing time (time units, must be positive).
    pub duration: f64,
    /// Setup time before processing (time units, non-negative).
    #[serde(default)]
    pub setup_time: f64,
    /// Domain-specific metadata.
    #[serde(default)]
    pub attributes: BTreeMap<String, String>,
}

impl Operation {
    /// Creates an operation with zero setup time.
    pub fn new(operation_id: impl Into<String>, machine_id: impl Into<String>, duration: f64) -> Self {
        Self {
            operation_id: operation_id.into(),
            machine_id: machine_id.into(),
            duration,
            setup_time: 0.0,
            attributes: BTreeMap::new(),
        }
    }

    /// Sets the setup time.
    pub fn with_setup_time(mut self, setup_time: f64) -> Self {
        self.setup_time = setup_time;
        self
    }

    /// Adds a metadata attribute.
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    /// Machine occupation time (setup + duration).
    #[inline]
    pub fn total_time(&self) -> f64 {
        self.setup_time + self.duration
    }
}
