//! Problem error types.

use lazo_solver::SolverError;

/// Errors that can occur while building, lowering or solving a problem.
#[derive(Debug, Clone, PartialEq)]
pub enum ProblemError {
    /// Two distinct variables share a name
    DuplicateVariableName { name: String },
    /// Variable bounds are NaN or crossed
    InvalidVariableBounds { name: String, lower: f64, upper: f64 },
    /// Constraint has terms above degree one
    NonLinearConstraint { index: usize, degree: usize },
    /// Objective degree not accepted by any backend
    UnsupportedObjectiveDegree { degree: usize },
    /// Solver rejected the problem or failed
    Solver(SolverError),
}

impl ProblemError {
    /// Returns a semantic error code for programmatic handling.
    pub fn code(&self) -> &'static str {
        match self {
            ProblemError::DuplicateVariableName { .. } => "VARIABLE_DUPLICATE_NAME",
            ProblemError::InvalidVariableBounds { .. } => "VARIABLE_INVALID_BOUNDS",
            ProblemError::NonLinearConstraint { .. } => "CONSTRAINT_NON_LINEAR",
            ProblemError::UnsupportedObjectiveDegree { .. } => "OBJECTIVE_UNSUPPORTED_DEGREE",
            ProblemError::Solver(err) => err.code(),
        }
    }
}

impl std::fmt::Display for ProblemError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProblemError::DuplicateVariableName { name } => write!(
                f,
                "[{}] Another variable named '{}' is already in the problem",
                self.code(),
                name
            ),
            ProblemError::InvalidVariableBounds { name, lower, upper } => write!(
                f,
                "[{}] Variable '{}' bounds invalid: lower ({}) > upper ({})",
                self.code(),
                name,
                lower,
                upper
            ),
            ProblemError::NonLinearConstraint { index, degree } => write!(
                f,
                "[{}] Constraint {} has degree {}; only linear constraints can be solved",
                self.code(),
                index,
                degree
            ),
            ProblemError::UnsupportedObjectiveDegree { degree } => write!(
                f,
                "[{}] Objective has degree {} (at most 2 supported)",
                self.code(),
                degree
            ),
            ProblemError::Solver(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for ProblemError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ProblemError::Solver(err) => Some(err),
            _ => None,
        }
    }
}

impl From<SolverError> for ProblemError {
    fn from(err: SolverError) -> Self {
        ProblemError::Solver(err)
    }
}
