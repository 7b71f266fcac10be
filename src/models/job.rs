//! Job model.
//!
//! A job is an ordered sequence of operations. The order is the mandatory
//! precedence order: operation `i + 1` cannot start before operation `i`
//! completes.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::Operation;

/// A job (routing) to be scheduled.
///
/// # Example
/// ```
/// use jobshop_dispatch::models::{Job, Operation};
///
/// let job = Job::new("job-1")
///     .with_operation(Operation::new("op-1", "m1", 3.0).with_setup_time(0.5))
///     .with_operation(Operation::new("op-2", "m2", 2.0));
///
/// assert_eq!(job.operation_count(), 2);
/// assert_eq!(job.total_work(), 5.5);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Job {
    /// Unique job identifier.
    pub job_id: String,
    /// Operations in precedence order.
    pub operations: Vec<Operation>,
    /// Domain-specific metadata.
    #[serde(default)]
    pub attributes: BTreeMap<String, String>,
}

impl Job {
    /// Creates a job with no operations.
    pub fn new(job_id: impl Into<String>) -> Self {
        Self {
            job_id: job_id.into(),
            operations: Vec::new(),
            attributes: BTreeMap::new(),
        }
    }

    /// Appends an operation to the end of the routing.
    pub fn with_operation(mut self, operation: Operation) -> Self {
        self.operations.push(operation);
        self
    }

    /// Replaces the routing.
    pub fn with_operations(mut self, operations: Vec<Operation>) -> Self {
        self.operations = operations;
        self
    }

    /// Adds a metadata attribute.
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    /// Number of operations.
    pub fn operation_count(&self) -> usize {
        self.operations.len()
    }

    /// Sum of setup and processing time over all operations.
    pub fn total_work(&self) -> f64 {
        self.operations.iter().map(Operation::total_time).sum()
    }

    /// Finds an operation by id.
    pub fn operation(&self, operation_id: &str) -> Option<&Operation> {
        self.operations
            .iter()
            .find(|op| op.operation_id == operation_id)
    }
}
