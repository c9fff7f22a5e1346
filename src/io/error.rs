//! Error types for solver configuration and search invariants

use std::fmt;

/// Main error type for all solver operations
#[derive(Debug)]
pub enum SolverError {
    /// Solver parameter validation failed
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// A solve was started while another is still active
    ///
    /// A coordinator accepts a new solve only from the idle state; the active
    /// solve must finish or be stopped first.
    SolveInProgress,

    /// A search invariant was violated
    ///
    /// Indicates a corrupted backtracking sequence (for example a removal
    /// targeting cells that do not hold the expected piece) or a worker thread
    /// that terminated without reporting. Fatal for the affected solve and
    /// distinct from ordinary search exhaustion.
    InvariantViolation {
        /// Operation that detected the violation
        operation: &'static str,
        /// Description of the violated invariant
        reason: String,
    },

    /// Failed to spawn or join a worker thread
    Thread {
        /// Operation that failed
        operation: &'static str,
        /// Underlying I/O error
        source: std::io::Error,
    },
}

impl fmt::Display for SolverError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
            }
            Self::SolveInProgress => {
                write!(f, "A solve is already in progress on this coordinator")
            }
            Self::InvariantViolation { operation, reason } => {
                write!(f, "Search invariant violated during {operation}: {reason}")
            }
            Self::Thread { operation, source } => {
                write!(f, "Worker thread error during {operation}: {source}")
            }
        }
    }
}

impl std::error::Error for SolverError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        if let Self::Thread { source, .. } = self {
            Some(source)
        } else {
            None
        }
    }
}

/// Convenience type alias for solver results
pub type Result<T> = std::result::Result<T, SolverError>;

/// Create an invalid parameter error
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> SolverError {
    SolverError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Create an internal invariant violation error
pub fn invariant_violation(operation: &'static str, reason: &impl ToString) -> SolverError {
    SolverError::InvariantViolation {
        operation,
        reason: reason.to_string(),
    }
}
