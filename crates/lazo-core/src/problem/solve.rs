//! Solving a problem and writing values back.

use std::time::Instant;

use lazo_solver::{Solution, Solve, SolverConfig};

use super::{Problem, ProblemError};

impl Problem {
    /// Solve with `solver`.
    ///
    /// On return every registered variable whose column received a value has
    /// it assigned, and [`status`](Self::status) holds the outcome.
    /// Infeasible or unbounded problems are `Ok` with that status.
    pub fn solve(
        &mut self,
        solver: &mut dyn Solve,
        config: &SolverConfig,
    ) -> Result<Solution, ProblemError> {
        config.validate()?;
        let form = self.to_standard_form()?;

        let start = Instant::now();
        let solution = match solver.solve(&form, config) {
            Ok(solution) => solution,
            Err(err) => {
                tracing::warn!(
                    component = "problem",
                    operation = "solve",
                    status = "error",
                    problem = self.id.inner(),
                    solver = solver.name(),
                    code = err.code(),
                    "Solver rejected problem"
                );
                return Err(err.into());
            }
        };

        for (column, value) in form.columns.iter().zip(&solution.primal) {
            if let Some(variable) = self.variables.get(&column.id) {
                variable.set_value(*value);
            }
        }
        self.status = Some(solution.status);

        if solution.status.is_normal() {
            tracing::debug!(
                component = "problem",
                operation = "solve",
                status = "success",
                problem = self.id.inner(),
                solver = solver.name(),
                terminate = solution.status.as_str(),
                objective = self.objective_value(),
                elapsed_ms = start.elapsed().as_millis() as u64,
                "Solved problem"
            );
        } else {
            tracing::warn!(
                component = "problem",
                operation = "solve",
                status = "non_normal",
                problem = self.id.inner(),
                solver = solver.name(),
                terminate = solution.status.as_str(),
                elapsed_ms = start.elapsed().as_millis() as u64,
                "Solve finished without an optimal point"
            );
        }
        Ok(solution)
    }
}
