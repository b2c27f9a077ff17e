//! Encoder error types.

use lazo_expr::Domain;

/// Errors raised when an encoder is configured or applied.
#[derive(Debug, Clone, PartialEq)]
pub enum EncodeError {
    /// A logical operator received a non-binary operand
    DomainMismatch {
        operator: &'static str,
        operand: String,
        domain: Domain,
    },
    /// Piecewise-linear domain or sample count is unusable
    InvalidDomain { xl: f64, xu: f64, num: usize },
}

impl EncodeError {
    /// Returns a semantic error code for programmatic handling.
    pub fn code(&self) -> &'static str {
        match self {
            EncodeError::DomainMismatch { .. } => "ENCODE_DOMAIN_MISMATCH",
            EncodeError::InvalidDomain { .. } => "ENCODE_INVALID_DOMAIN",
        }
    }
}

impl std::fmt::Display for EncodeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EncodeError::DomainMismatch {
                operator,
                operand,
                domain,
            } => write!(
                f,
                "[{}] {} requires binary operands, '{}' is {}",
                self.code(),
                operator,
                operand,
                domain.as_str()
            ),
            EncodeError::InvalidDomain { xl, xu, num } => write!(
                f,
                "[{}] Piecewise-linear domain needs xl < xu and num >= 2, got xl={}, xu={}, num={}",
                self.code(),
                xl,
                xu,
                num
            ),
        }
    }
}

impl std::error::Error for EncodeError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_domain_mismatch_display() {
        let err = EncodeError::DomainMismatch {
            operator: "And",
            operand: "x".to_string(),
            domain: Domain::Continuous,
        };
        assert_eq!(
            err.to_string(),
            "[ENCODE_DOMAIN_MISMATCH] And requires binary operands, 'x' is Continuous"
        );
    }

    #[test]
    fn test_invalid_domain_code() {
        let err = EncodeError::InvalidDomain {
            xl: 3.0,
            xu: 1.0,
            num: 10,
        };
        assert_eq!(err.code(), "ENCODE_INVALID_DOMAIN");
    }
}
