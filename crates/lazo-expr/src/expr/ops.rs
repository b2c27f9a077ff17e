// ── Conversions and operator overloads ──────────────────────

use std::ops::{Add, Mul, Neg, Sub};

use crate::auxiliary::AuxiliaryVariable;
use crate::expr::core::Expr;
use crate::operand::Operand;
use crate::variable::Variable;

impl From<f64> for Expr {
    fn from(value: f64) -> Self {
        Expr::from_constant(value)
    }
}

impl From<Operand> for Expr {
    fn from(operand: Operand) -> Self {
        Expr::var(operand)
    }
}

impl From<&Operand> for Expr {
    fn from(operand: &Operand) -> Self {
        Expr::var(operand)
    }
}

impl From<Variable> for Expr {
    fn from(var: Variable) -> Self {
        Expr::var(var)
    }
}

impl From<&Variable> for Expr {
    fn from(var: &Variable) -> Self {
        Expr::var(var)
    }
}

impl From<AuxiliaryVariable> for Expr {
    fn from(aux: AuxiliaryVariable) -> Self {
        Expr::var(aux)
    }
}

impl From<&AuxiliaryVariable> for Expr {
    fn from(aux: &AuxiliaryVariable) -> Self {
        Expr::var(aux)
    }
}

impl From<&Expr> for Expr {
    fn from(expr: &Expr) -> Self {
        expr.clone()
    }
}

impl<R: Into<Expr>> Add<R> for Expr {
    type Output = Expr;

    fn add(self, rhs: R) -> Self::Output {
        self.add_expr(&rhs.into())
    }
}

impl<R: Into<Expr>> Sub<R> for Expr {
    type Output = Expr;

    fn sub(self, rhs: R) -> Self::Output {
        self.add_expr(&rhs.into().scale(-1.0))
    }
}

impl Mul<f64> for Expr {
    type Output = Expr;

    fn mul(self, rhs: f64) -> Self::Output {
        self.scale(rhs)
    }
}

impl Mul<Expr> for f64 {
    type Output = Expr;

    fn mul(self, rhs: Expr) -> Self::Output {
        rhs.scale(self)
    }
}

impl Neg for Expr {
    type Output = Expr;

    fn neg(self) -> Self::Output {
        self.scale(-1.0)
    }
}

/// Lifts a variable handle into expression arithmetic so `&x + &y` and
/// `2.0 * &x` read like the math.
macro_rules! handle_ops {
    ($handle:ty) => {
        impl<R: Into<Expr>> Add<R> for $handle {
            type Output = Expr;

            fn add(self, rhs: R) -> Self::Output {
                Expr::from(self) + rhs
            }
        }

        impl<R: Into<Expr>> Sub<R> for $handle {
            type Output = Expr;

            fn sub(self, rhs: R) -> Self::Output {
                Expr::from(self) - rhs
            }
        }

        impl Mul<f64> for $handle {
            type Output = Expr;

            fn mul(self, rhs: f64) -> Self::Output {
                Expr::term(self, rhs)
            }
        }

        impl Mul<$handle> for f64 {
            type Output = Expr;

            fn mul(self, rhs: $handle) -> Self::Output {
                Expr::term(rhs, self)
            }
        }

        impl Neg for $handle {
            type Output = Expr;

            fn neg(self) -> Self::Output {
                Expr::term(self, -1.0)
            }
        }
    };
}

handle_ops!(&Variable);
handle_ops!(&AuxiliaryVariable);

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use crate::expr::Expr;
    use crate::types::Bounds;
    use crate::variable::Variable;

    #[test]
    fn handle_arithmetic_builds_linear_terms() {
        let x = Variable::continuous("x", Bounds::free());
        let y = Variable::continuous("y", Bounds::free());
        x.set_value(2.0);
        y.set_value(5.0);

        let expr = &x + &y - 1.0;
        assert_eq!(expr.linear_terms().len(), 2);
        assert_eq!(expr.value(), 6.0);

        let scaled = 2.0 * &x - &y * 3.0;
        assert_eq!(scaled.value(), -11.0);
        assert_eq!((-&x).value(), -2.0);
    }

    #[test]
    fn expr_sub_and_neg() {
        let x = Variable::continuous("x", Bounds::free());
        x.set_value(3.0);
        let expr = -(Expr::var(&x) * 2.0) + 10.0;
        assert_eq!(expr.value(), 4.0);
        assert_eq!((expr - &x).value(), 1.0);
    }
}
