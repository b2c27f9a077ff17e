//! HiGHS MILP backend over the row-oriented model.

use crate::ffi::{HighsModel, HighsOption, HighsStatus, ObjectiveSense};
use crate::status::{highs_has_solution, highs_status_string, highs_to_terminate_status};
use lazo_expr::Sense;
use lazo_solver::{Diagnostics, Solution, Solve, SolverConfig, SolverError, StandardForm};
use std::time::Instant;
use tracing::{debug, trace, warn};

/// Solves linear and mixed-integer linear forms with HiGHS.
///
/// Quadratic objectives are rejected; use [`HighsQpSolver`](crate::HighsQpSolver).
#[derive(Debug, Default, Clone, Copy)]
pub struct HighsSolver;

impl HighsSolver {
    pub fn new() -> Self {
        HighsSolver
    }
}

impl Solve for HighsSolver {
    fn name(&self) -> &'static str {
        "highs"
    }

    fn supports_quadratic(&self) -> bool {
        false
    }

    fn solve(
        &mut self,
        form: &StandardForm,
        config: &SolverConfig,
    ) -> Result<Solution, SolverError> {
        solve_form(form, config)
    }
}

pub(crate) fn apply_solver_config(highs_model: &mut HighsModel, config: &SolverConfig) {
    highs_model.set_log_to_console(config.msg);

    if let Some(limit) = config.time_limit {
        highs_model.set_option("time_limit", HighsOption::Float(limit));
    }
    if let Some(gap) = config.mip_gap {
        highs_model.set_option("mip_rel_gap", HighsOption::Float(gap));
    }
    if let Some(presolve) = config.presolve {
        let presolve_str = if presolve { "on" } else { "off" };
        highs_model.set_option("presolve", HighsOption::Str(presolve_str.to_string()));
    }
    if let Some(threads) = config.threads {
        highs_model.set_option("threads", HighsOption::Int(threads as i32));
    }
    if let Some(tolerance) = config.tolerance {
        highs_model.set_option(
            "primal_feasibility_tolerance",
            HighsOption::Float(tolerance),
        );
        highs_model.set_option("dual_feasibility_tolerance", HighsOption::Float(tolerance));
    }
}

fn add_columns_to_highs(form: &StandardForm, highs_model: &mut HighsModel) {
    for (col_idx, column) in form.columns.iter().enumerate() {
        let lower = column.bounds.lower;
        let upper = column.bounds.upper;
        if column.is_integer {
            highs_model.add_integer_col(lower, upper, column.cost);
        } else {
            highs_model.add_col(lower, upper, column.cost);
        }
        trace!(
            component = "solver",
            operation = "add_variable",
            status = "success",
            var_id = column.id.inner(),
            name = %column.name,
            col_idx,
            lower,
            upper,
            obj_coeff = column.cost,
            is_integer = column.is_integer,
            "Added variable to HiGHS"
        );
    }

    debug!(
        component = "solver",
        operation = "add_variables",
        status = "success",
        num_variables = form.num_columns(),
        "Added all variables to HiGHS"
    );
}

fn add_rows_to_highs(form: &StandardForm, highs_model: &mut HighsModel) -> Result<(), SolverError> {
    for (row_idx, row) in form.rows.iter().enumerate() {
        highs_model
            .add_row(row.lower, row.upper, &row.coefficients)
            .map_err(|err| SolverError::Backend(err.to_string()))?;
        trace!(
            component = "solver",
            operation = "add_constraint",
            status = "success",
            row_idx,
            name = row.name.as_deref().unwrap_or(""),
            lower = row.lower,
            upper = row.upper,
            num_coeffs = row.coefficients.len(),
            "Added constraint to HiGHS"
        );
    }

    debug!(
        component = "solver",
        operation = "add_constraints",
        status = "success",
        num_constraints = form.num_rows(),
        "Added all constraints to HiGHS"
    );
    Ok(())
}

fn solve_form(form: &StandardForm, config: &SolverConfig) -> Result<Solution, SolverError> {
    if form.num_columns() == 0 {
        return Err(SolverError::EmptyProblem);
    }
    if form.is_quadratic() {
        warn!(
            component = "solver",
            operation = "solve",
            status = "error",
            solver = "highs",
            quadratic_terms = form.quadratic.len(),
            "Quadratic objective sent to the linear backend"
        );
        return Err(SolverError::Unsupported(
            "quadratic objective requires the QP backend".to_string(),
        ));
    }

    let solver_version = crate::ffi::highs_version().unwrap_or_else(|| "unknown".to_string());
    let solve_started = Instant::now();
    debug!(
        component = "solver",
        operation = "solve",
        status = "success",
        solver = "highs",
        solver_version = %solver_version,
        variables = form.num_columns() as u64,
        constraints = form.num_rows() as u64,
        nnz = form.num_nonzeros() as u64,
        "Starting solve process"
    );

    let mut highs_model = HighsModel::new();
    apply_solver_config(&mut highs_model, config);
    highs_model.set_objective_sense(match form.sense {
        Sense::Minimize => ObjectiveSense::Minimize,
        Sense::Maximize => ObjectiveSense::Maximize,
    });

    add_columns_to_highs(form, &mut highs_model);
    add_rows_to_highs(form, &mut highs_model)?;

    let status = highs_model.solve();
    let solve_seconds = solve_started.elapsed().as_secs_f64();
    let iterations = highs_model.simplex_iteration_count();
    let mip_gap = form
        .has_integer_columns()
        .then(|| highs_model.mip_gap())
        .filter(|gap| gap.is_finite());

    let diagnostics = Diagnostics {
        solver: format!("highs {solver_version}"),
        solve_time_seconds: solve_seconds,
        iterations: Some(iterations),
        mip_gap,
    };
    let terminate = highs_to_terminate_status(status);

    if !highs_has_solution(status) {
        log_finished(status, solve_seconds, None);
        return Ok(Solution::with_status(terminate, diagnostics));
    }

    let primal = highs_model
        .col_values()
        .map_err(|err| SolverError::Backend(err.to_string()))?;
    let objective_value = highs_model
        .objective_value()
        .map_err(|err| SolverError::Backend(err.to_string()))?
        + form.offset;
    log_finished(status, solve_seconds, Some(objective_value));

    Ok(Solution {
        status: terminate,
        objective_value: Some(objective_value),
        primal,
        diagnostics,
    })
}

fn log_finished(status: HighsStatus, solve_seconds: f64, objective_value: Option<f64>) {
    if status == HighsStatus::Optimal {
        debug!(
            component = "solver",
            operation = "solve",
            status = "success",
            solver = "highs",
            highs_status = highs_status_string(status),
            objective_value = ?objective_value,
            solve_ms = solve_seconds * 1000.0,
            "Solve completed"
        );
    } else {
        warn!(
            component = "solver",
            operation = "solve",
            status = "non_optimal",
            solver = "highs",
            highs_status = highs_status_string(status),
            objective_value = ?objective_value,
            solve_ms = solve_seconds * 1000.0,
            "Solve finished without an optimal point"
        );
    }
}
