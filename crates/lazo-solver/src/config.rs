//! Solver configuration types.

use crate::SolverError;

/// Recognized solver options.
///
/// Every backend builds its invocation from this one structure; options a
/// backend has no equivalent for are ignored by that backend.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SolverConfig {
    /// Print solver output. `false` keeps the backend quiet.
    pub msg: bool,
    /// Time limit in seconds. `None` means no limit.
    pub time_limit: Option<f64>,
    /// Relative MIP gap tolerance. `None` uses solver default.
    pub mip_gap: Option<f64>,
    /// Number of threads to use. `None` uses solver default.
    pub threads: Option<u32>,
    /// Enable/disable presolve. `None` uses solver default.
    pub presolve: Option<bool>,
    /// Feasibility tolerance. `None` uses solver default.
    pub tolerance: Option<f64>,
}

impl SolverConfig {
    /// Create a new configuration with all defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable solver output.
    pub fn with_msg(mut self, enabled: bool) -> Self {
        self.msg = enabled;
        self
    }

    /// Set the time limit in seconds.
    pub fn with_time_limit(mut self, seconds: f64) -> Self {
        self.time_limit = Some(seconds);
        self
    }

    /// Set the relative MIP gap tolerance.
    pub fn with_mip_gap(mut self, gap: f64) -> Self {
        self.mip_gap = Some(gap);
        self
    }

    /// Set the number of threads.
    pub fn with_threads(mut self, count: u32) -> Self {
        self.threads = Some(count);
        self
    }

    /// Enable or disable presolve.
    pub fn with_presolve(mut self, enabled: bool) -> Self {
        self.presolve = Some(enabled);
        self
    }

    /// Set the feasibility tolerance.
    pub fn with_tolerance(mut self, tol: f64) -> Self {
        self.tolerance = Some(tol);
        self
    }

    /// Check that every set option is in range.
    pub fn validate(&self) -> Result<(), SolverError> {
        if let Some(limit) = self.time_limit {
            if !limit.is_finite() || limit < 0.0 {
                return Err(SolverError::InvalidOption {
                    name: "time_limit",
                    reason: format!("must be a finite non-negative number of seconds, got {limit}"),
                });
            }
        }
        if let Some(gap) = self.mip_gap {
            if !(0.0..=1.0).contains(&gap) {
                return Err(SolverError::InvalidOption {
                    name: "mip_gap",
                    reason: format!("must lie in [0, 1], got {gap}"),
                });
            }
        }
        if let Some(tol) = self.tolerance {
            if !tol.is_finite() || tol <= 0.0 {
                return Err(SolverError::InvalidOption {
                    name: "tolerance",
                    reason: format!("must be finite and positive, got {tol}"),
                });
            }
        }
        if self.threads == Some(0) {
            return Err(SolverError::InvalidOption {
                name: "threads",
                reason: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}
