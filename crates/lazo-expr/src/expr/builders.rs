//! Builder functions for constructing expressions.

use crate::expr::core::Expr;
use crate::expr::error::LinearExprError;
use crate::operand::Operand;

/// Build an Expr from flexible inputs.
///
/// Accepts either:
/// - `terms`: pre-paired (Operand, f64) tuples
/// - `operands` + `coefficients`: separate vecs zipped together
///
/// Returns an error if both styles are mixed or if lengths mismatch.
pub fn linear_terms(
    terms: Option<Vec<(Operand, f64)>>,
    operands: Option<Vec<Operand>>,
    coefficients: Option<Vec<f64>>,
) -> Result<Expr, LinearExprError> {
    match (terms, operands, coefficients) {
        (Some(t), None, None) => {
            let filtered: Vec<_> = t.into_iter().filter(|(_, c)| *c != 0.0).collect();
            Ok(Expr::from_linear(filtered))
        }
        (None, Some(ops), Some(coeffs)) => dot(ops, coeffs),
        (None, None, None) => Err(LinearExprError::MissingInputs),
        (None, Some(_), None) | (None, None, Some(_)) => Err(LinearExprError::MissingInputs),
        (Some(_), Some(_), _) | (Some(_), _, Some(_)) => Err(LinearExprError::MixedInputs),
    }
}

/// Inner product `Σ coefficients[i] * operands[i]`.
pub fn dot(
    operands: impl IntoIterator<Item = Operand>,
    coefficients: impl IntoIterator<Item = f64>,
) -> Result<Expr, LinearExprError> {
    let operands: Vec<Operand> = operands.into_iter().collect();
    let coefficients: Vec<f64> = coefficients.into_iter().collect();
    if operands.len() != coefficients.len() {
        return Err(LinearExprError::MismatchedLengths);
    }
    let filtered: Vec<_> = operands
        .into_iter()
        .zip(coefficients)
        .filter(|(_, c)| *c != 0.0)
        .collect();
    Ok(Expr::from_linear(filtered))
}

/// Sum of expressions. Duplicate operand terms are NOT merged; use
/// `normalized_terms()` on the result if consolidation is needed.
pub fn linear_sum(exprs: impl IntoIterator<Item = Expr>) -> Expr {
    exprs
        .into_iter()
        .fold(Expr::new_empty(), |acc, expr| acc.add_expr(&expr))
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;
    use crate::types::Bounds;
    use crate::variable::Variable;

    #[test]
    fn dot_pairs_operands_with_coefficients() {
        let t: Vec<Variable> = (0..3)
            .map(|i| Variable::continuous(format!("t{i}"), Bounds::at_least(0.0)))
            .collect();
        let expr = dot(t.iter().map(Operand::from), [1.0, 0.0, 10.0]).unwrap();
        assert_eq!(expr.linear_terms().len(), 2);

        t[0].set_value(0.5);
        t[2].set_value(0.5);
        assert_eq!(expr.value(), 5.5);
    }

    #[test]
    fn dot_rejects_length_mismatch() {
        let t = Variable::binary("t");
        let err = dot([Operand::from(&t)], [1.0, 2.0]).unwrap_err();
        assert_eq!(err, LinearExprError::MismatchedLengths);
    }

    #[test]
    fn missing_inputs_are_rejected() {
        assert_eq!(
            linear_terms(None, None, Some(vec![1.0])).unwrap_err(),
            LinearExprError::MissingInputs
        );
    }
}
