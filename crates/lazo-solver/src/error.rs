//! Solver error types.
//!
//! Infeasible and unbounded outcomes are not errors; they come back as a
//! [`TerminateStatus`](crate::TerminateStatus).

/// Error type for solver operations.
#[derive(Debug, Clone, PartialEq)]
pub enum SolverError {
    /// Problem has no columns.
    EmptyProblem,
    /// A configuration option is out of range.
    InvalidOption { name: &'static str, reason: String },
    /// The backend cannot handle this problem shape.
    Unsupported(String),
    /// The backend failed.
    Backend(String),
}

impl SolverError {
    /// Returns a semantic error code for programmatic handling.
    pub fn code(&self) -> &'static str {
        match self {
            SolverError::EmptyProblem => "PROBLEM_EMPTY",
            SolverError::InvalidOption { .. } => "SOLVER_INVALID_OPTION",
            SolverError::Unsupported(_) => "SOLVER_UNSUPPORTED",
            SolverError::Backend(_) => "SOLVER_BACKEND",
        }
    }
}

impl std::fmt::Display for SolverError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SolverError::EmptyProblem => write!(f, "[{}] Problem has no variables", self.code()),
            SolverError::InvalidOption { name, reason } => {
                write!(f, "[{}] Option '{}' {}", self.code(), name, reason)
            }
            SolverError::Unsupported(msg) => {
                write!(f, "[{}] Unsupported problem: {}", self.code(), msg)
            }
            SolverError::Backend(msg) => write!(f, "[{}] Solver backend error: {}", self.code(), msg),
        }
    }
}

impl std::error::Error for SolverError {}
