//! Safe wrapper around the `highs` row-oriented model.
//!
//! This module contains the unsafe info queries against the C library.
#![allow(unsafe_code)]

use highs::{Col, HighsModelStatus, RowProblem, Sense as HighsSense, SolvedModel};
use std::ffi::{CStr, CString};
use std::fmt;
use tracing::{debug, trace, warn};

/// Objective sense for optimization
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectiveSense {
    Minimize,
    Maximize,
}

/// Model status reported by HiGHS, narrowed to what callers branch on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HighsStatus {
    Optimal,
    Infeasible,
    Unbounded,
    UnboundedOrInfeasible,
    ReachedTimeLimit,
    ReachedIterationLimit,
    Unknown,
}

/// Errors returned by the HiGHS model wrapper.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HighsModelError {
    ColumnIndexOutOfBounds {
        column_index: usize,
        num_columns: usize,
    },
    SolveRequired {
        operation: &'static str,
    },
}

impl fmt::Display for HighsModelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HighsModelError::ColumnIndexOutOfBounds {
                column_index,
                num_columns,
            } => write!(
                f,
                "column index {} out of bounds (num_columns = {})",
                column_index, num_columns
            ),
            HighsModelError::SolveRequired { operation } => {
                write!(f, "solve must be called before {}", operation)
            }
        }
    }
}

impl std::error::Error for HighsModelError {}

/// Option value types for HiGHS solver configuration.
#[derive(Debug, Clone, PartialEq)]
pub enum HighsOption {
    Bool(bool),
    Int(i32),
    Float(f64),
    Str(String),
}

/// Mixed-integer linear model built column by column, then row by row.
pub struct HighsModel {
    problem: RowProblem,
    objective_sense: ObjectiveSense,
    solved: Option<SolvedModel>,
    columns: Vec<Col>,
    log_to_console: bool,
    options: Vec<(String, HighsOption)>,
}

impl HighsModel {
    pub fn new() -> Self {
        debug!(
            component = "highs",
            operation = "init_highs",
            status = "success",
            "Creating new HiGHS model"
        );
        HighsModel {
            problem: RowProblem::default(),
            objective_sense: ObjectiveSense::Minimize,
            solved: None,
            columns: Vec::new(),
            log_to_console: false,
            options: Vec::new(),
        }
    }

    /// Add a continuous column. Returns its index.
    pub fn add_col(&mut self, lower_bound: f64, upper_bound: f64, cost: f64) -> usize {
        self.add_col_with_integrality(lower_bound, upper_bound, cost, false)
    }

    /// Add an integer column. Returns its index.
    pub fn add_integer_col(&mut self, lower_bound: f64, upper_bound: f64, cost: f64) -> usize {
        self.add_col_with_integrality(lower_bound, upper_bound, cost, true)
    }

    fn add_col_with_integrality(
        &mut self,
        lower_bound: f64,
        upper_bound: f64,
        cost: f64,
        is_integer: bool,
    ) -> usize {
        trace!(
            lower_bound,
            upper_bound,
            cost,
            is_integer,
            component = "highs",
            operation = "add_column",
            status = "success",
            "Adding column"
        );
        self.solved = None;
        let col = if is_integer {
            self.problem
                .add_integer_column(cost, lower_bound..=upper_bound)
        } else {
            self.problem.add_column(cost, lower_bound..=upper_bound)
        };
        self.columns.push(col);
        self.columns.len() - 1
    }

    /// Add a row `lower <= Σ coeff * col <= upper`. Returns its index.
    ///
    /// # Errors
    ///
    /// Returns an error if any column index is out of bounds.
    pub fn add_row(
        &mut self,
        lower_bound: f64,
        upper_bound: f64,
        entries: &[(usize, f64)],
    ) -> Result<usize, HighsModelError> {
        self.solved = None;
        let num_columns = self.columns.len();
        let mut factors = Vec::with_capacity(entries.len());
        for &(col_idx, coeff) in entries {
            let col = *self.columns.get(col_idx).ok_or_else(|| {
                warn!(
                    component = "highs",
                    operation = "add_row",
                    status = "error",
                    col_idx,
                    num_columns,
                    "Column index out of bounds for row"
                );
                HighsModelError::ColumnIndexOutOfBounds {
                    column_index: col_idx,
                    num_columns,
                }
            })?;
            factors.push((col, coeff));
        }
        trace!(
            lower_bound,
            upper_bound,
            entries = entries.len(),
            component = "highs",
            operation = "add_row",
            status = "success",
            "Adding row"
        );
        self.problem.add_row(lower_bound..=upper_bound, factors);
        Ok(self.problem.num_rows().saturating_sub(1))
    }

    pub fn set_objective_sense(&mut self, sense: ObjectiveSense) {
        self.objective_sense = sense;
    }

    /// Enable or disable solver output for the next solve.
    pub fn set_log_to_console(&mut self, enabled: bool) {
        self.log_to_console = enabled;
    }

    /// Set a HiGHS option for the next solve.
    pub fn set_option(&mut self, option: impl Into<String>, value: HighsOption) {
        self.options.push((option.into(), value));
    }

    /// Solve the model. The built problem is consumed; columns and rows must
    /// be added again before another solve.
    pub fn solve(&mut self) -> HighsStatus {
        debug!(
            num_cols = self.problem.num_cols(),
            num_rows = self.problem.num_rows(),
            ?self.objective_sense,
            component = "highs",
            operation = "solve",
            status = "success",
            "Solving model"
        );

        let sense = match self.objective_sense {
            ObjectiveSense::Minimize => HighsSense::Minimise,
            ObjectiveSense::Maximize => HighsSense::Maximise,
        };

        let problem = std::mem::take(&mut self.problem);
        let mut model = problem.optimise(sense);
        if self.log_to_console {
            model.set_option("output_flag", true);
            model.set_option("log_to_console", true);
        } else {
            model.make_quiet();
        }
        for (option, value) in self.options.drain(..) {
            match value {
                HighsOption::Bool(val) => model.set_option(option.as_str(), val),
                HighsOption::Int(val) => model.set_option(option.as_str(), val),
                HighsOption::Float(val) => model.set_option(option.as_str(), val),
                HighsOption::Str(val) => model.set_option(option.as_str(), val.as_str()),
            }
        }
        let solution = model.solve();
        let status = map_status(solution.status());

        trace!(
            component = "highs",
            operation = "solve",
            status = "success",
            ?status,
            "Solution status received"
        );
        self.solved = Some(solution);
        self.columns.clear();
        status
    }

    /// Number of columns added since the last solve.
    pub fn columns(&self) -> usize {
        self.columns.len()
    }

    /// Objective value of the latest solve, without any constant offset.
    ///
    /// # Errors
    ///
    /// Returns an error if the model has not been solved yet.
    pub fn objective_value(&self) -> Result<f64, HighsModelError> {
        let solved = self.solved.as_ref().ok_or(HighsModelError::SolveRequired {
            operation: "objective_value",
        })?;
        Ok(solved.objective_value())
    }

    /// MIP gap of the latest solve (infinity for pure LPs).
    pub fn mip_gap(&self) -> f64 {
        match self.solved.as_ref() {
            Some(solved) => solved.mip_gap(),
            None => f64::NAN,
        }
    }

    /// Simplex iterations of the latest solve.
    pub fn simplex_iteration_count(&self) -> u64 {
        self.get_int_info("simplex_iteration_count").unwrap_or(0)
    }

    fn get_int_info(&self, name: &str) -> Option<u64> {
        let solved = self.solved.as_ref()?;
        let c_name = CString::new(name).ok()?;
        let mut value: highs_sys::HighsInt = 0;
        let status = unsafe {
            highs_sys::Highs_getIntInfoValue(solved.as_ptr(), c_name.as_ptr(), &raw mut value)
        };
        if status == highs_sys::STATUS_OK && value >= 0 {
            Some(value as u64)
        } else {
            debug!(
                component = "highs",
                operation = "solve_info",
                info = name,
                status_code = status,
                "Info value not available"
            );
            None
        }
    }

    /// Column values of the latest solve.
    ///
    /// # Errors
    ///
    /// Returns an error if the model has not been solved yet.
    pub fn col_values(&self) -> Result<Vec<f64>, HighsModelError> {
        let solved = self.solved.as_ref().ok_or(HighsModelError::SolveRequired {
            operation: "col_values",
        })?;
        Ok(solved.get_solution().columns().to_vec())
    }
}

impl Default for HighsModel {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for HighsModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let objective_value = self.solved.as_ref().map(|s| s.objective_value());
        f.debug_struct("HighsModel")
            .field("num_variables", &self.problem.num_cols())
            .field("num_constraints", &self.problem.num_rows())
            .field("objective_sense", &self.objective_sense)
            .field("objective_value", &objective_value)
            .finish_non_exhaustive()
    }
}

/// Return the HiGHS solver version string, if available.
pub fn highs_version() -> Option<String> {
    unsafe {
        let ptr = highs_sys::Highs_version();
        if ptr.is_null() {
            None
        } else {
            CStr::from_ptr(ptr).to_str().ok().map(|s| s.to_string())
        }
    }
}

fn map_status(status: HighsModelStatus) -> HighsStatus {
    match status {
        HighsModelStatus::Optimal => HighsStatus::Optimal,
        HighsModelStatus::Infeasible => HighsStatus::Infeasible,
        HighsModelStatus::Unbounded => HighsStatus::Unbounded,
        HighsModelStatus::UnboundedOrInfeasible => HighsStatus::UnboundedOrInfeasible,
        HighsModelStatus::ReachedTimeLimit => HighsStatus::ReachedTimeLimit,
        HighsModelStatus::ReachedIterationLimit => HighsStatus::ReachedIterationLimit,
        _ => HighsStatus::Unknown,
    }
}
