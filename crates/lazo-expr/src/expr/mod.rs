//! Expression types for optimization modeling.
//!
//! - `core`      : Expr: operand terms by degree + constant
//! - `constraint`: Constraint: expression with comparison sense and RHS
//! - `builders`  : linear_terms / linear_sum / dot helpers
//! - `ops`       : arithmetic operator overloads
//! - `error`     : Expression construction errors

pub mod builders;
pub mod constraint;
pub mod core;
pub mod error;
mod ops;

pub use builders::{dot, linear_sum, linear_terms};
pub use constraint::{ComparisonSense, Constraint};
pub use core::Expr;
pub use error::LinearExprError;
