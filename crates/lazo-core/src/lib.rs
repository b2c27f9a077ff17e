//! lazo core: problems with deferred constraint attachment, encoders for
//! logical and piecewise-linear terms, and bound queries.

pub mod bounds;
pub mod encode;
pub mod problem;

pub use bounds::{Bound, BoundSolvers, max_value, min_value};
pub use encode::{AuxiliaryFactory, EncodeError, PiecewiseLinear};
pub use problem::{Problem, ProblemError, ProblemSummary};
