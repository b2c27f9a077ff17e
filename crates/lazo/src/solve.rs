//! Default HiGHS wiring.

use lazo_core::{Bound, BoundSolvers, Problem, ProblemError};
use lazo_expr::Expr;
use lazo_highs::{HighsQpSolver, HighsSolver};
use lazo_solver::{Solution, SolverConfig};

/// Solve `problem` with HiGHS: the QP backend for quadratic objectives,
/// the MILP backend otherwise.
pub fn solve(problem: &mut Problem, config: &SolverConfig) -> Result<Solution, ProblemError> {
    if problem.objective().degree() == 2 {
        problem.solve(&mut HighsQpSolver::new(), config)
    } else {
        problem.solve(&mut HighsSolver::new(), config)
    }
}

/// Run `query` with the HiGHS bound solvers.
pub fn bound_solvers<T>(query: impl FnOnce(&mut BoundSolvers<'_>) -> T) -> T {
    let mut linear = HighsSolver::new();
    let mut quadratic = HighsQpSolver::new();
    query(&mut BoundSolvers {
        linear: &mut linear,
        quadratic: &mut quadratic,
    })
}

/// Largest value `expr` can take, or [`Bound::Unbounded`] / [`Bound::Unknown`].
pub fn max_value(expr: &Expr) -> Bound {
    bound_solvers(|solvers| lazo_core::max_value(expr, solvers))
}

/// Smallest value `expr` can take, or [`Bound::Unbounded`] / [`Bound::Unknown`].
pub fn min_value(expr: &Expr) -> Bound {
    bound_solvers(|solvers| lazo_core::min_value(expr, solvers))
}
