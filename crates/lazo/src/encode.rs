//! Encoders backed by the process-wide [`AuxiliaryFactory`].

use lazo_core::{AuxiliaryFactory, EncodeError, PiecewiseLinear};
use lazo_expr::{AuxiliaryVariable, Expr, Operand};

/// Binary `z = x AND y`. Both operands must be binary.
pub fn and(x: impl Into<Operand>, y: impl Into<Operand>) -> Result<AuxiliaryVariable, EncodeError> {
    AuxiliaryFactory::shared().and(x, y)
}

/// Binary `z = x OR y`. Both operands must be binary.
pub fn or(x: impl Into<Operand>, y: impl Into<Operand>) -> Result<AuxiliaryVariable, EncodeError> {
    AuxiliaryFactory::shared().or(x, y)
}

/// Binary `z = x XOR y`. Both operands must be binary.
pub fn xor(x: impl Into<Operand>, y: impl Into<Operand>) -> Result<AuxiliaryVariable, EncodeError> {
    AuxiliaryFactory::shared().xor(x, y)
}

/// Continuous `y >= |x|`. Tight only when the model pushes `y` down.
pub fn abs(x: impl Into<Expr>) -> AuxiliaryVariable {
    AuxiliaryFactory::shared().abs(x)
}

/// Apply a configured piecewise-linear approximation to `x`.
pub fn piecewise<F>(approx: &PiecewiseLinear<F>, x: impl Into<Expr>) -> AuxiliaryVariable
where
    F: Fn(f64) -> f64,
{
    approx.apply(AuxiliaryFactory::shared(), x)
}
