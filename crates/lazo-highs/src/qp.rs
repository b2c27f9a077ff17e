//! HiGHS QP backend over the C API.
//!
//! The `highs` crate only builds linear models, so quadratic objectives go
//! through `Highs_passModel` with a lower-triangular Hessian. HiGHS solves
//! `min c'x + ½ x'Qx`; maximization is solved as minimization of the
//! negated objective.
#![allow(unsafe_code)]

use crate::ffi::{HighsOption, highs_version};
use lazo_expr::Sense;
use lazo_solver::{Diagnostics, Solution, Solve, SolverConfig, SolverError, StandardForm, TerminateStatus};
use std::ffi::{CString, c_void};
use std::ptr;
use std::time::Instant;
use tracing::{debug, trace, warn};

type HighsInt = highs_sys::HighsInt;

const STATUS_ERROR: HighsInt = -1;
const MATRIX_FORMAT_COLWISE: HighsInt = 1;
const HESSIAN_FORMAT_TRIANGULAR: HighsInt = 1;
const OBJ_SENSE_MINIMIZE: HighsInt = 1;

const MODEL_STATUS_OPTIMAL: HighsInt = 7;
const MODEL_STATUS_INFEASIBLE: HighsInt = 8;
const MODEL_STATUS_UNBOUNDED_OR_INFEASIBLE: HighsInt = 9;
const MODEL_STATUS_UNBOUNDED: HighsInt = 10;
const MODEL_STATUS_TIME_LIMIT: HighsInt = 13;
const MODEL_STATUS_ITERATION_LIMIT: HighsInt = 14;

/// Solves continuous forms with a convex quadratic objective.
#[derive(Debug, Default, Clone, Copy)]
pub struct HighsQpSolver;

impl HighsQpSolver {
    pub fn new() -> Self {
        HighsQpSolver
    }
}

impl Solve for HighsQpSolver {
    fn name(&self) -> &'static str {
        "highs-qp"
    }

    fn supports_quadratic(&self) -> bool {
        true
    }

    fn solve(
        &mut self,
        form: &StandardForm,
        config: &SolverConfig,
    ) -> Result<Solution, SolverError> {
        solve_qp(form, config)
    }
}

/// Owned `Highs` instance, destroyed on drop.
struct RawHighs(*mut c_void);

impl RawHighs {
    fn create() -> Result<Self, SolverError> {
        let handle = unsafe { highs_sys::Highs_create() };
        if handle.is_null() {
            return Err(SolverError::Backend("Highs_create returned null".to_string()));
        }
        Ok(RawHighs(handle))
    }

    fn set_option(&mut self, name: &str, value: &HighsOption) -> Result<(), SolverError> {
        let c_name = c_string(name)?;
        let status = unsafe {
            match value {
                HighsOption::Bool(val) => highs_sys::Highs_setBoolOptionValue(
                    self.0,
                    c_name.as_ptr(),
                    HighsInt::from(*val),
                ),
                HighsOption::Int(val) => {
                    highs_sys::Highs_setIntOptionValue(self.0, c_name.as_ptr(), *val as HighsInt)
                }
                HighsOption::Float(val) => {
                    highs_sys::Highs_setDoubleOptionValue(self.0, c_name.as_ptr(), *val)
                }
                HighsOption::Str(val) => {
                    let c_val = c_string(val)?;
                    highs_sys::Highs_setStringOptionValue(self.0, c_name.as_ptr(), c_val.as_ptr())
                }
            }
        };
        if status == STATUS_ERROR {
            return Err(SolverError::Backend(format!("HiGHS rejected option '{name}'")));
        }
        Ok(())
    }

    fn int_info(&self, name: &str) -> Option<u64> {
        let c_name = CString::new(name).ok()?;
        let mut value: HighsInt = 0;
        let status =
            unsafe { highs_sys::Highs_getIntInfoValue(self.0, c_name.as_ptr(), &raw mut value) };
        (status == highs_sys::STATUS_OK && value >= 0).then_some(value as u64)
    }
}

impl Drop for RawHighs {
    fn drop(&mut self) {
        unsafe { highs_sys::Highs_destroy(self.0) };
    }
}

fn c_string(value: &str) -> Result<CString, SolverError> {
    CString::new(value).map_err(|err| SolverError::Backend(err.to_string()))
}

fn to_highs_int(value: usize, what: &str) -> Result<HighsInt, SolverError> {
    HighsInt::try_from(value)
        .map_err(|_| SolverError::Backend(format!("{what} ({value}) exceeds the HiGHS index range")))
}

/// Lower-triangular column-wise Hessian `(starts, indices, values)` with
/// `num_columns` starts. A term `c x_i x_j` contributes `Q_ji = c` off the
/// diagonal and `Q_ii = 2c` on it, scaled by `scale`.
fn hessian(form: &StandardForm, scale: f64) -> (Vec<usize>, Vec<usize>, Vec<f64>) {
    let mut per_column: Vec<Vec<(usize, f64)>> = vec![Vec::new(); form.num_columns()];
    for term in &form.quadratic {
        let value = if term.i == term.j {
            2.0 * term.coeff
        } else {
            term.coeff
        };
        if let Some(column) = per_column.get_mut(term.i) {
            match column.iter_mut().find(|(row, _)| *row == term.j) {
                Some(entry) => entry.1 += scale * value,
                None => column.push((term.j, scale * value)),
            }
        }
    }

    let mut starts = Vec::with_capacity(per_column.len());
    let mut indices = Vec::new();
    let mut values = Vec::new();
    for mut column in per_column {
        starts.push(indices.len());
        column.sort_by_key(|(row, _)| *row);
        for (row, value) in column {
            indices.push(row);
            values.push(value);
        }
    }
    (starts, indices, values)
}

fn terminate_status(model_status: HighsInt) -> TerminateStatus {
    match model_status {
        MODEL_STATUS_OPTIMAL => TerminateStatus::Normal,
        MODEL_STATUS_INFEASIBLE => TerminateStatus::Infeasible,
        MODEL_STATUS_UNBOUNDED | MODEL_STATUS_UNBOUNDED_OR_INFEASIBLE => TerminateStatus::Unbounded,
        _ => TerminateStatus::Unknown,
    }
}

fn has_solution(model_status: HighsInt) -> bool {
    matches!(
        model_status,
        MODEL_STATUS_OPTIMAL | MODEL_STATUS_TIME_LIMIT | MODEL_STATUS_ITERATION_LIMIT
    )
}

fn apply_solver_config(highs: &mut RawHighs, config: &SolverConfig) -> Result<(), SolverError> {
    highs.set_option("output_flag", &HighsOption::Bool(config.msg))?;
    if let Some(limit) = config.time_limit {
        highs.set_option("time_limit", &HighsOption::Float(limit))?;
    }
    if let Some(presolve) = config.presolve {
        let presolve_str = if presolve { "on" } else { "off" };
        highs.set_option("presolve", &HighsOption::Str(presolve_str.to_string()))?;
    }
    if let Some(threads) = config.threads {
        highs.set_option("threads", &HighsOption::Int(threads as i32))?;
    }
    if let Some(tolerance) = config.tolerance {
        highs.set_option("primal_feasibility_tolerance", &HighsOption::Float(tolerance))?;
        highs.set_option("dual_feasibility_tolerance", &HighsOption::Float(tolerance))?;
    }
    Ok(())
}

fn solve_qp(form: &StandardForm, config: &SolverConfig) -> Result<Solution, SolverError> {
    if form.num_columns() == 0 {
        return Err(SolverError::EmptyProblem);
    }
    if form.has_integer_columns() {
        warn!(
            component = "solver",
            operation = "solve",
            status = "error",
            solver = "highs-qp",
            "Integer columns sent to the QP backend"
        );
        return Err(SolverError::Unsupported(
            "HiGHS cannot solve quadratic objectives over integer variables".to_string(),
        ));
    }

    let solver_version = highs_version().unwrap_or_else(|| "unknown".to_string());
    let solve_started = Instant::now();
    debug!(
        component = "solver",
        operation = "solve",
        status = "success",
        solver = "highs-qp",
        solver_version = %solver_version,
        variables = form.num_columns() as u64,
        constraints = form.num_rows() as u64,
        quadratic_terms = form.quadratic.len() as u64,
        "Starting solve process"
    );

    let scale = match form.sense {
        Sense::Minimize => 1.0,
        Sense::Maximize => -1.0,
    };
    let cost: Vec<f64> = form.columns.iter().map(|col| scale * col.cost).collect();
    let col_lower: Vec<f64> = form.columns.iter().map(|col| col.bounds.lower).collect();
    let col_upper: Vec<f64> = form.columns.iter().map(|col| col.bounds.upper).collect();
    let row_lower: Vec<f64> = form.rows.iter().map(|row| row.lower).collect();
    let row_upper: Vec<f64> = form.rows.iter().map(|row| row.upper).collect();

    let (a_start, a_index, a_value) = form.csc();
    let a_start = a_start[..form.num_columns()]
        .iter()
        .map(|&v| to_highs_int(v, "matrix start"))
        .collect::<Result<Vec<_>, _>>()?;
    let a_index = a_index
        .into_iter()
        .map(|v| to_highs_int(v, "row index"))
        .collect::<Result<Vec<_>, _>>()?;

    let (q_start, q_index, q_value) = hessian(form, scale);
    let q_start = q_start
        .into_iter()
        .map(|v| to_highs_int(v, "hessian start"))
        .collect::<Result<Vec<_>, _>>()?;
    let q_index = q_index
        .into_iter()
        .map(|v| to_highs_int(v, "hessian index"))
        .collect::<Result<Vec<_>, _>>()?;

    trace!(
        component = "solver",
        operation = "build_hessian",
        status = "success",
        hessian_nnz = q_value.len(),
        "Built triangular Hessian"
    );

    let num_col = to_highs_int(form.num_columns(), "column count")?;
    let num_row = to_highs_int(form.num_rows(), "row count")?;
    let num_nz = to_highs_int(a_value.len(), "matrix nonzeros")?;
    let q_num_nz = to_highs_int(q_value.len(), "hessian nonzeros")?;

    let mut highs = RawHighs::create()?;
    apply_solver_config(&mut highs, config)?;

    let pass_status = unsafe {
        highs_sys::Highs_passModel(
            highs.0,
            num_col,
            num_row,
            num_nz,
            q_num_nz,
            MATRIX_FORMAT_COLWISE,
            HESSIAN_FORMAT_TRIANGULAR,
            OBJ_SENSE_MINIMIZE,
            scale * form.offset,
            cost.as_ptr(),
            col_lower.as_ptr(),
            col_upper.as_ptr(),
            row_lower.as_ptr(),
            row_upper.as_ptr(),
            a_start.as_ptr(),
            a_index.as_ptr(),
            a_value.as_ptr(),
            q_start.as_ptr(),
            q_index.as_ptr(),
            q_value.as_ptr(),
            ptr::null(),
        )
    };
    if pass_status == STATUS_ERROR {
        return Err(SolverError::Backend("HiGHS rejected the QP model".to_string()));
    }

    let run_status = unsafe { highs_sys::Highs_run(highs.0) };
    if run_status == STATUS_ERROR {
        warn!(
            component = "solver",
            operation = "solve",
            status = "error",
            solver = "highs-qp",
            "HiGHS run failed"
        );
        return Err(SolverError::Backend(
            "HiGHS failed to solve the QP (is the objective convex?)".to_string(),
        ));
    }

    let model_status = unsafe { highs_sys::Highs_getModelStatus(highs.0) };
    let solve_seconds = solve_started.elapsed().as_secs_f64();
    let diagnostics = Diagnostics {
        solver: format!("highs-qp {solver_version}"),
        solve_time_seconds: solve_seconds,
        iterations: highs.int_info("qp_iteration_count"),
        mip_gap: None,
    };
    let terminate = terminate_status(model_status);

    if !has_solution(model_status) {
        warn!(
            component = "solver",
            operation = "solve",
            status = "non_optimal",
            solver = "highs-qp",
            model_status,
            solve_ms = solve_seconds * 1000.0,
            "Solve finished without a point"
        );
        return Ok(Solution::with_status(terminate, diagnostics));
    }

    let mut col_value = vec![0.0; form.num_columns()];
    let mut col_dual = vec![0.0; form.num_columns()];
    let mut row_value = vec![0.0; form.num_rows()];
    let mut row_dual = vec![0.0; form.num_rows()];
    let solution_status = unsafe {
        highs_sys::Highs_getSolution(
            highs.0,
            col_value.as_mut_ptr(),
            col_dual.as_mut_ptr(),
            row_value.as_mut_ptr(),
            row_dual.as_mut_ptr(),
        )
    };
    if solution_status == STATUS_ERROR {
        return Err(SolverError::Backend("HiGHS returned no solution".to_string()));
    }
    let objective_value = scale * unsafe { highs_sys::Highs_getObjectiveValue(highs.0) };

    debug!(
        component = "solver",
        operation = "solve",
        status = "success",
        solver = "highs-qp",
        model_status,
        objective_value,
        solve_ms = solve_seconds * 1000.0,
        "Solve completed"
    );

    Ok(Solution {
        status: terminate,
        objective_value: Some(objective_value),
        primal: col_value,
        diagnostics,
    })
}
