//! Scheduler configuration.

use serde::{Deserialize, Serialize};

/// Tuning knobs for [`GreedyScheduler`](super::GreedyScheduler).
///
/// Deserializable so it can be embedded in a caller's own config file;
/// missing fields take their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchedulerConfig {
    /// Feasible starts closer than this are treated as tied, so the
    /// job-order tie-break decides. Must be finite and non-negative;
    /// scheduling rejects anything else as a configuration error.
    pub tie_epsilon: f64,
    /// Accept jobs without operations instead of rejecting them.
    pub allow_empty_jobs: bool,
}

impl SchedulerConfig {
    /// Creates the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the tie tolerance.
    pub fn with_tie_epsilon(mut self, tie_epsilon: f64) -> Self {
        self.tie_epsilon = tie_epsilon;
        self
    }

    /// Allows or rejects empty jobs.
    pub fn with_allow_empty_jobs(mut self, allow: bool) -> Self {
        self.allow_empty_jobs = allow;
        self
    }
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            tie_epsilon: 1e-9,
            allow_empty_jobs: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let c = SchedulerConfig::default();
        assert_eq!(c.tie_epsilon, 1e-9);
        assert!(!c.allow_empty_jobs);
    }

    #[test]
    fn test_builder() {
        let c = SchedulerConfig::new()
            .with_tie_epsilon(1e-3)
            .with_allow_empty_jobs(true);
        assert_eq!(c.tie_epsilon, 1e-3);
        assert!(c.allow_empty_jobs);
    }

    #[test]
    fn test_deserialize_partial() {
        let c: SchedulerConfig = serde_json::from_str(r#"{"allow_empty_jobs":true}"#).unwrap();
        assert!(c.allow_empty_jobs);
        assert_eq!(c.tie_epsilon, 1e-9);
    }
}
