//! Machine model.
//!
//! A machine processes at most one operation at a time. The value itself
//! carries no dynamic state; free time is tracked per scheduling run by the
//! machine timeline.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A machine resource.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Machine {
    /// Unique machine identifier.
    pub machine_id: String,
    /// Earliest time the machine can start work (default 0).
    #[serde(default)]
    pub available_from: f64,
    /// Domain-specific metadata.
    #[serde(default)]
    pub attributes: BTreeMap<String, String>,
}

impl Machine {
    /// Creates a machine available from time 0.
    pub fn new(machine_id: impl Into<String>) -> Self {
        Self {
            machine_id: machine_id.into(),
            available_from: 0.0,
            attributes: BTreeMap::new(),
        }
    }

    /// Sets the time from which the machine is available.
    pub fn with_available_from(mut self, available_from: f64) -> Self {
        self.available_from = available_from;
        self
    }

    /// Adds a metadata attribute.
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }
}
