//! Solver trait for abstraction over different solver backends.

use crate::{Solution, SolverConfig, SolverError, StandardForm};

/// Trait for solver implementations.
///
/// A backend is handed a lowered [`StandardForm`] plus the recognized
/// options and reports a [`TerminateStatus`](crate::TerminateStatus).
/// Infeasible and unbounded problems are `Ok` with the matching status.
pub trait Solve {
    /// Backend name used in diagnostics.
    fn name(&self) -> &'static str;

    /// Whether quadratic objective terms are accepted.
    fn supports_quadratic(&self) -> bool;

    /// Solve the form with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns a `SolverError` if:
    /// - The form has no columns
    /// - The backend cannot handle the form (e.g. quadratic terms)
    /// - The backend itself fails
    fn solve(&mut self, form: &StandardForm, config: &SolverConfig)
    -> Result<Solution, SolverError>;
}
