//! HiGHS backends for lazo.
//!
//! [`HighsSolver`] lowers a [`StandardForm`](lazo_solver::StandardForm) into
//! the `highs` row model and solves linear and mixed-integer problems.
//! [`HighsQpSolver`] passes continuous problems with a quadratic objective
//! straight to the HiGHS C API.

pub mod ffi;
pub mod qp;
pub mod solver;
mod status;

pub use ffi::{HighsModel, HighsModelError, HighsOption, HighsStatus, ObjectiveSense, highs_version};
pub use qp::HighsQpSolver;
pub use solver::HighsSolver;
