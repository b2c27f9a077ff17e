//! Lowering a problem to the solver-facing standard form.

use std::collections::BTreeMap;

use lazo_expr::{ComparisonSense, VariableId};
use lazo_solver::{Column, QuadraticTerm, Row, StandardForm};

use super::{Problem, ProblemError};

impl Problem {
    /// Lower to a [`StandardForm`]: one column per registered variable (in
    /// id order), one row per constraint (in insertion order).
    ///
    /// Constraints must be linear; the objective may be quadratic.
    pub fn to_standard_form(&self) -> Result<StandardForm, ProblemError> {
        let degree = self.objective.degree();
        if degree > 2 {
            return Err(ProblemError::UnsupportedObjectiveDegree { degree });
        }

        let mut form = StandardForm::new(self.sense);
        let mut index: BTreeMap<VariableId, usize> = BTreeMap::new();
        for (id, variable) in &self.variables {
            let bounds = variable.bounds();
            if !bounds.is_valid() {
                return Err(ProblemError::InvalidVariableBounds {
                    name: variable.name().to_string(),
                    lower: bounds.lower,
                    upper: bounds.upper,
                });
            }
            index.insert(*id, form.columns.len());
            form.columns.push(Column {
                id: *id,
                name: variable.name().to_string(),
                bounds,
                is_integer: variable.domain().is_integral(),
                cost: 0.0,
            });
        }

        for (operand, coeff) in self.objective.normalized_terms() {
            if let Some(&col) = index.get(&operand.id()) {
                form.columns[col].cost = coeff;
            }
        }

        let mut quadratic: BTreeMap<(usize, usize), f64> = BTreeMap::new();
        for (a, b, coeff) in self.objective.quadratic_terms() {
            if let (Some(&i), Some(&j)) = (index.get(&a.id()), index.get(&b.id())) {
                *quadratic.entry((i.min(j), i.max(j))).or_insert(0.0) += coeff;
            }
        }
        form.quadratic = quadratic
            .into_iter()
            .filter(|(_, coeff)| *coeff != 0.0)
            .map(|((i, j), coeff)| QuadraticTerm { i, j, coeff })
            .collect();
        form.offset = self.objective.constant();

        for (position, constraint) in self.constraints.iter().enumerate() {
            let expr = constraint.expr();
            if !expr.is_linear() {
                return Err(ProblemError::NonLinearConstraint {
                    index: position,
                    degree: expr.degree(),
                });
            }
            let rhs = constraint.rhs() - expr.constant();
            let (lower, upper) = match constraint.sense() {
                ComparisonSense::LessEqual => (f64::NEG_INFINITY, rhs),
                ComparisonSense::GreaterEqual => (rhs, f64::INFINITY),
                ComparisonSense::Equal => (rhs, rhs),
            };
            let coefficients = expr
                .normalized_terms()
                .into_iter()
                .filter_map(|(operand, coeff)| index.get(&operand.id()).map(|&col| (col, coeff)))
                .collect();
            form.rows.push(Row {
                name: constraint.name().map(str::to_string),
                lower,
                upper,
                coefficients,
            });
        }

        tracing::debug!(
            component = "problem",
            operation = "lower",
            status = "success",
            problem = self.id.inner(),
            columns = form.num_columns(),
            rows = form.num_rows(),
            nnz = form.num_nonzeros(),
            quadratic = form.quadratic.len(),
            "Lowered problem to standard form"
        );
        Ok(form)
    }
}
