//! Error types for scheduling runs.
//!
//! Two failure families exist:
//! - **Configuration**: the input plan is invalid. Every detected problem is
//!   reported at once, before any operation is dispatched.
//! - **Invariant violation**: the tracker or timeline caught an internal
//!   defect (e.g. a machine commit that would overlap). Never caused by input.
//!
//! Either way the run is aborted and no partial schedule is returned.

use thiserror::Error;

/// A single problem found in the scheduling input.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{message}")]
pub struct ConfigurationError {
    /// Error category.
    pub kind: ConfigurationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of configuration errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigurationErrorKind {
    /// An operation references a machine that is not in the machine set.
    UnknownMachine,
    /// An operation duration is not a positive finite number.
    InvalidDuration,
    /// An operation setup time is negative or not finite.
    InvalidSetupTime,
    /// A machine availability time is negative or not finite.
    InvalidAvailability,
    /// Two jobs, two operations of one job, or two machines share an ID.
    DuplicateId,
    /// A job has no operations (and empty jobs are not allowed).
    EmptyJob,
    /// The scheduler tie tolerance is negative or not finite.
    InvalidTieEpsilon,
}

impl ConfigurationError {
    pub(crate) fn new(kind: ConfigurationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// An internal consistency check failed.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{message}")]
pub struct InvariantViolation {
    /// What was violated.
    pub message: String,
}

impl InvariantViolation {
    pub(crate) fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Failure of a scheduling run.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ScheduleError {
    /// The input plan is invalid.
    #[error("invalid scheduling input ({} problem(s)): {}", .0.len(), join_messages(.0))]
    Configuration(Vec<ConfigurationError>),

    /// Internal defect detected while dispatching.
    #[error("internal invariant violated: {0}")]
    InvariantViolation(#[from] InvariantViolation),
}

impl ScheduleError {
    /// Configuration problems, empty for other error kinds.
    pub fn configuration_errors(&self) -> &[ConfigurationError] {
        match self {
            Self::Configuration(errors) => errors.as_slice(),
            Self::InvariantViolation(_) => &[],
        }
    }

    /// Whether any configuration problem has the given kind.
    pub fn has_configuration_kind(&self, kind: ConfigurationErrorKind) -> bool {
        self.configuration_errors().iter().any(|e| e.kind == kind)
    }
}

fn join_messages(errors: &[ConfigurationError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Convenience alias for scheduling results.
pub type Result<T> = std::result::Result<T, ScheduleError>;
