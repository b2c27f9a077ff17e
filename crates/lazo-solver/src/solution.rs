//! Result of a solve attempt.

use serde::Serialize;

use crate::TerminateStatus;

/// Diagnostics a backend may report alongside the status.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Diagnostics {
    pub solver: String,
    pub solve_time_seconds: f64,
    pub iterations: Option<u64>,
    pub mip_gap: Option<f64>,
}

/// Status, objective and primal values indexed like the form's columns.
/// `primal` is empty when the backend produced no point.
#[derive(Debug, Clone, PartialEq)]
pub struct Solution {
    pub status: TerminateStatus,
    pub objective_value: Option<f64>,
    pub primal: Vec<f64>,
    pub diagnostics: Diagnostics,
}

impl Solution {
    /// A solution carrying only a status.
    pub fn with_status(status: TerminateStatus, diagnostics: Diagnostics) -> Self {
        Self {
            status,
            objective_value: None,
            primal: Vec::new(),
            diagnostics,
        }
    }

    pub fn primal(&self, index: usize) -> Option<f64> {
        self.primal.get(index).copied()
    }

    pub fn has_point(&self) -> bool {
        !self.primal.is_empty()
    }
}
