//! Shared solver abstractions for lazo.
//!
//! Backends (like `lazo-highs`) consume a lowered [`StandardForm`] and
//! report a [`TerminateStatus`] plus per-column values.
//!
//! # Overview
//!
//! - [`SolverConfig`]: the recognized solver options
//! - [`TerminateStatus`]: outcome classification of a solve
//! - [`SolverError`]: error types for solver operations
//! - [`StandardForm`]: columns, rows and objective handed to a backend
//! - [`Solution`]: primal values, objective and diagnostics
//! - [`Solve`]: trait for solver implementations

mod config;
mod error;
mod form;
mod solution;
mod status;
mod traits;

pub use config::SolverConfig;
pub use error::SolverError;
pub use form::{Column, QuadraticTerm, Row, StandardForm};
pub use solution::{Diagnostics, Solution};
pub use status::TerminateStatus;
pub use traits::Solve;
