//! lazo: logical, absolute-value and piecewise-linear terms for linear
//! models, solved with HiGHS.
//!
//! Encoders return auxiliary variables that carry their own constraints.
//! A [`Problem`] picks those constraints up the first time an objective or
//! constraint references the auxiliary, exactly once per problem.
//!
//! ```no_run
//! use lazo::{Problem, Sense, SolverConfig, Variable};
//!
//! let x = Variable::binary("x");
//! let y = Variable::binary("y");
//! let both = lazo::and(&x, &y)?;
//!
//! let mut problem = Problem::new(Some("and"), Sense::Minimize);
//! problem.set_objective(-&both)?;
//! lazo::solve(&mut problem, &SolverConfig::new())?;
//! assert!((problem.objective_value() + 1.0).abs() < 1e-6);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod encode;
pub mod logging;
mod solve;

pub use encode::{abs, and, or, piecewise, xor};
pub use solve::{bound_solvers, max_value, min_value, solve};

pub use lazo_core::{
    AuxiliaryFactory, Bound, BoundSolvers, EncodeError, PiecewiseLinear, Problem, ProblemError,
    ProblemSummary,
};
pub use lazo_expr::{
    AuxiliaryVariable, Bounds, ComparisonSense, Constraint, ConstraintId, Domain, Expr,
    HasDeferredConstraints, LinearExprError, Operand, ProblemId, Sense, Variable, VariableDef,
    VariableId, dot, linear_sum, linear_terms,
};
pub use lazo_highs::{HighsQpSolver, HighsSolver};
pub use lazo_solver::{Diagnostics, Solution, Solve, SolverConfig, SolverError, TerminateStatus};
