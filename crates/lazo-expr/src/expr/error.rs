//! Expression construction errors.

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinearExprError {
    MixedInputs,
    MissingInputs,
    MismatchedLengths,
    DegreeOverflow { degree: usize },
}

impl LinearExprError {
    /// Returns a semantic error code for programmatic handling.
    pub fn code(&self) -> &'static str {
        match self {
            LinearExprError::MixedInputs => "EXPR_MIXED_INPUTS",
            LinearExprError::MissingInputs => "EXPR_MISSING_INPUTS",
            LinearExprError::MismatchedLengths => "EXPR_MISMATCHED_LENGTHS",
            LinearExprError::DegreeOverflow { .. } => "EXPR_DEGREE_OVERFLOW",
        }
    }
}

impl std::fmt::Display for LinearExprError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LinearExprError::MixedInputs => write!(
                f,
                "[{}] Use either terms or operands/coefficients, not both",
                self.code()
            ),
            LinearExprError::MissingInputs => write!(
                f,
                "[{}] operands and coefficients are required",
                self.code()
            ),
            LinearExprError::MismatchedLengths => write!(
                f,
                "[{}] operands and coefficients must have the same length",
                self.code()
            ),
            LinearExprError::DegreeOverflow { degree } => write!(
                f,
                "[{}] product has degree {} (at most 3 supported)",
                self.code(),
                degree
            ),
        }
    }
}

impl std::error::Error for LinearExprError {}
