//! Absolute value encoder.
//!
//! `y = |x|` is encoded as `y >= x`, `y >= -x` with `y >= 0`. This is an
//! outer relaxation: it equals `|x|` at an optimum only when the objective
//! pushes `y` down (or other constraints bound it from above). Maximizing
//! an unconstrained `Abs` term leaves `y` free to exceed `|x|`.

use lazo_expr::{AuxiliaryVariable, Bounds, Expr, VariableDef};

use super::factory::AuxiliaryFactory;

impl AuxiliaryFactory {
    /// Continuous auxiliary `y` with `y >= |x|`.
    ///
    /// The initial value hint of `y` is `|x.value()|` at creation time.
    pub fn abs(&self, x: impl Into<Expr>) -> AuxiliaryVariable {
        let x = x.into();
        let def = VariableDef::continuous(Bounds::at_least(0.0)).with_initial_value(x.value().abs());
        self.create_auxiliary("abs", def, |y| {
            let y = Expr::var(y);
            vec![y.ge(&x), y.ge(-x.clone())]
        })
    }
}
