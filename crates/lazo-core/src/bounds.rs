//! Bound queries: the largest or smallest value an expression can take.
//!
//! The expression becomes the objective of a throwaway problem carrying
//! copies of its auxiliary constraints, and is solved by the linear or
//! quadratic backend depending on its degree. Variable values and the
//! auxiliaries' attachment sets are left untouched, so queries can be
//! repeated freely.
//!
//! A quadratic over integer or binary operands is still sent to the
//! quadratic backend. The HiGHS quadratic backend only handles continuous
//! columns and rejects such a problem, so the query yields [`Bound::Unknown`].

use std::fmt;

use lazo_expr::{Expr, Sense};
use lazo_solver::{Solve, SolverConfig, TerminateStatus};

use crate::problem::{Problem, ProblemError};

/// Result of a bound query. `Unbounded` and `Unknown` are ordinary results,
/// not failures.
///
/// `Unknown` covers expressions above degree two, backend errors (including
/// a quadratic backend refusing integer columns), and infeasible or
/// inconclusive solves.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Bound {
    Value(f64),
    Unbounded,
    Unknown,
}

impl Bound {
    pub fn value(self) -> Option<f64> {
        match self {
            Bound::Value(v) => Some(v),
            Bound::Unbounded | Bound::Unknown => None,
        }
    }
}

impl fmt::Display for Bound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Bound::Value(v) => write!(f, "{v}"),
            Bound::Unbounded => f.write_str("Unbounded"),
            Bound::Unknown => f.write_str("Unknown"),
        }
    }
}

/// Backends used by [`max_value`] and [`min_value`].
pub struct BoundSolvers<'a> {
    /// Used for expressions of degree one.
    pub linear: &'a mut dyn Solve,
    /// Used for expressions of degree two, whatever the operand domains.
    pub quadratic: &'a mut dyn Solve,
}

impl fmt::Debug for BoundSolvers<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BoundSolvers")
            .field("linear", &self.linear.name())
            .field("quadratic", &self.quadratic.name())
            .finish()
    }
}

/// Largest value `expr` can take.
pub fn max_value(expr: &Expr, solvers: &mut BoundSolvers<'_>) -> Bound {
    bound(expr, Sense::Maximize, solvers)
}

/// Smallest value `expr` can take.
pub fn min_value(expr: &Expr, solvers: &mut BoundSolvers<'_>) -> Bound {
    bound(expr, Sense::Minimize, solvers)
}

fn bound(expr: &Expr, sense: Sense, solvers: &mut BoundSolvers<'_>) -> Bound {
    let solver: &mut dyn Solve = match expr.degree() {
        0 => return Bound::Value(expr.constant()),
        1 => &mut *solvers.linear,
        2 => &mut *solvers.quadratic,
        degree => {
            tracing::debug!(
                component = "bounds",
                operation = sense.as_str(),
                status = "skipped",
                degree,
                "Expression degree has no backend"
            );
            return Bound::Unknown;
        }
    };

    match solve_bound(expr, sense, solver) {
        Ok(bound) => bound,
        Err(err) => {
            tracing::warn!(
                component = "bounds",
                operation = sense.as_str(),
                status = "error",
                code = err.code(),
                error = %err,
                "Bound query failed"
            );
            Bound::Unknown
        }
    }
}

fn solve_bound(expr: &Expr, sense: Sense, solver: &mut dyn Solve) -> Result<Bound, ProblemError> {
    let problem = Problem::scratch(expr, sense)?;
    let form = problem.to_standard_form()?;
    let solution = solver.solve(&form, &SolverConfig::new())?;

    let bound = match solution.status {
        TerminateStatus::Normal => Bound::Value(
            solution
                .objective_value
                .unwrap_or_else(|| form.objective_at(&solution.primal)),
        ),
        TerminateStatus::Unbounded => Bound::Unbounded,
        TerminateStatus::Infeasible | TerminateStatus::Unknown => Bound::Unknown,
    };
    tracing::debug!(
        component = "bounds",
        operation = sense.as_str(),
        status = "success",
        solver = solver.name(),
        terminate = solution.status.as_str(),
        bound = %bound,
        "Bound query finished"
    );
    Ok(bound)
}
