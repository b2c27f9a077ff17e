//! Expression layer for lazo: variables, auxiliary variables with deferred
//! constraints, polynomial expressions up to degree three, and constraints.

pub mod auxiliary;
pub mod expr;
pub mod ids;
pub mod operand;
pub mod types;
pub mod variable;

pub use auxiliary::{AuxiliaryVariable, HasDeferredConstraints};
pub use expr::{
    ComparisonSense, Constraint, Expr, LinearExprError, dot, linear_sum, linear_terms,
};
pub use ids::{ConstraintId, ProblemId, VariableId};
pub use operand::Operand;
pub use types::{Bounds, Domain, Sense, VariableDef};
pub use variable::Variable;
