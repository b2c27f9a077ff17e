//! Piecewise-linear approximation of a scalar function.
//!
//! For breakpoints `x_0 < … < x_{n-1}` with `y_i = f(x_i)`, applying the
//! encoder to `x` adds weights `t_i >= 0`, selectors `z_j` (binary, `n - 1`
//! of them) and an output `y` with
//!
//! ```text
//! x = Σ t_i x_i     y = Σ t_i y_i     Σ t_i = 1     Σ z_j = 1
//! t_0 <= z_0        t_i <= z_{i-1} + z_i  (0 < i < n-1)     t_{n-1} <= z_{n-2}
//! ```
//!
//! The selector chain keeps at most two adjacent weights non-zero, so `y`
//! interpolates between neighbouring breakpoints only.
//!
//! Like `abs`, the encoding is only as tight as the surrounding model makes
//! it; no extra tightening is added.

use std::fmt;

use lazo_expr::{AuxiliaryVariable, Bounds, Expr, Operand, Variable, VariableDef, linear_sum};

use super::error::EncodeError;
use super::factory::AuxiliaryFactory;

const BASE_NAME: &str = "PL";

/// A configured approximator of `f` over `[xl, xu]` with `num` samples.
pub struct PiecewiseLinear<F> {
    f: F,
    xl: f64,
    xu: f64,
    num: usize,
}

impl<F> PiecewiseLinear<F>
where
    F: Fn(f64) -> f64,
{
    pub const DEFAULT_SAMPLES: usize = 10;

    /// Fails with [`EncodeError::InvalidDomain`] unless `xl < xu` and
    /// `num >= 2`.
    pub fn new(f: F, xl: f64, xu: f64, num: usize) -> Result<Self, EncodeError> {
        if !(xl < xu) || num < 2 {
            return Err(EncodeError::InvalidDomain { xl, xu, num });
        }
        Ok(Self { f, xl, xu, num })
    }

    /// [`new`](Self::new) with ten samples.
    pub fn with_default_samples(f: F, xl: f64, xu: f64) -> Result<Self, EncodeError> {
        Self::new(f, xl, xu, Self::DEFAULT_SAMPLES)
    }

    pub fn num_samples(&self) -> usize {
        self.num
    }

    /// Equally spaced `(x_i, f(x_i))`, first at `xl`, last at `xu`.
    pub fn breakpoints(&self) -> Vec<(f64, f64)> {
        let last = self.num - 1;
        let step = (self.xu - self.xl) / last as f64;
        (0..self.num)
            .map(|i| {
                let x = if i == last {
                    self.xu
                } else {
                    self.xl + step * i as f64
                };
                (x, (self.f)(x))
            })
            .collect()
    }

    /// Output auxiliary `y ≈ f(x)` with its interpolation constraints.
    pub fn apply(&self, factory: &AuxiliaryFactory, x: impl Into<Expr>) -> AuxiliaryVariable {
        let x = x.into();
        let points = self.breakpoints();
        let n = points.len();

        let aux = factory.create_auxiliary(
            &format!("y_{BASE_NAME}"),
            VariableDef::continuous(Bounds::free()),
            |y| {
                let t: Vec<Variable> = (0..n)
                    .map(|i| {
                        factory.create_variable(
                            &format!("t_{BASE_NAME}_{i}"),
                            VariableDef::continuous(Bounds::at_least(0.0)),
                        )
                    })
                    .collect();
                let z: Vec<Variable> = (0..n - 1)
                    .map(|j| factory.create_variable(&format!("z_{BASE_NAME}_{j}"), VariableDef::binary()))
                    .collect();

                let xs: Vec<f64> = points.iter().map(|(xi, _)| *xi).collect();
                let ys: Vec<f64> = points.iter().map(|(_, yi)| *yi).collect();

                let mut constraints = vec![
                    x.equal(weighted(&t, &xs)),
                    Expr::var(y).equal(weighted(&t, &ys)),
                    linear_sum(t.iter().map(Expr::var)).equal(1.0),
                    linear_sum(z.iter().map(Expr::var)).equal(1.0),
                    Expr::var(&t[0]).le(&z[0]),
                ];
                for i in 1..n - 1 {
                    constraints.push(Expr::var(&t[i]).le(&z[i - 1] + &z[i]));
                }
                constraints.push(Expr::var(&t[n - 1]).le(&z[n - 2]));
                constraints
            },
        );
        tracing::debug!(
            component = "encode",
            operation = "piecewise_linear",
            status = "success",
            output = aux.name(),
            samples = n,
            xl = self.xl,
            xu = self.xu,
            "Encoded piecewise-linear approximation"
        );
        aux
    }
}

fn weighted(weights: &[Variable], values: &[f64]) -> Expr {
    Expr::from_linear(
        weights
            .iter()
            .zip(values)
            .map(|(w, v)| (Operand::from(w), *v))
            .collect(),
    )
}

impl<F> fmt::Debug for PiecewiseLinear<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PiecewiseLinear")
            .field("xl", &self.xl)
            .field("xu", &self.xu)
            .field("num", &self.num)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use lazo_expr::{HasDeferredConstraints, VariableId};

    /// Index of the weight and selector variables by name suffix.
    fn named(aux: &AuxiliaryVariable, prefix: &str) -> Vec<VariableId> {
        let mut found: Vec<(usize, VariableId)> = aux
            .deferred_constraints()
            .iter()
            .flat_map(|c| c.expr().operands())
            .filter_map(|op| {
                let name = op.name().to_string();
                let (_, rest) = name.split_once(prefix)?;
                rest.parse::<usize>().ok().map(|i| (i, op.id()))
            })
            .collect();
        found.sort();
        found.dedup();
        found.into_iter().map(|(_, id)| id).collect()
    }

    fn feasible(aux: &AuxiliaryVariable, values: &HashMap<VariableId, f64>) -> bool {
        let lookup = |op: &Operand| values.get(&op.id()).copied().unwrap_or(0.0);
        aux.deferred_constraints()
            .iter()
            .all(|c| c.is_satisfied(&lookup, 1e-9))
    }

    fn assignment(
        x: &Variable,
        xv: f64,
        aux: &AuxiliaryVariable,
        yv: f64,
        t: &[(VariableId, f64)],
        z: &[(VariableId, f64)],
    ) -> HashMap<VariableId, f64> {
        let mut values: HashMap<VariableId, f64> = t.iter().chain(z).copied().collect();
        values.insert(x.id(), xv);
        values.insert(aux.id(), yv);
        values
    }

    #[test]
    fn rejects_invalid_domain() {
        assert!(matches!(
            PiecewiseLinear::new(f64::ln, 10.0, 1.0, 3),
            Err(EncodeError::InvalidDomain { .. })
        ));
        assert!(PiecewiseLinear::new(f64::ln, 1.0, 1.0, 3).is_err());
        assert!(PiecewiseLinear::new(f64::ln, 1.0, 10.0, 1).is_err());
        assert!(PiecewiseLinear::new(f64::ln, f64::NAN, 10.0, 3).is_err());
    }

    #[test]
    fn breakpoints_are_equally_spaced() {
        let pl = PiecewiseLinear::new(f64::ln, 1.0, 10.0, 3).unwrap();
        let points = pl.breakpoints();
        assert_eq!(points.len(), 3);
        assert_eq!(points[0], (1.0, 0.0));
        assert_eq!(points[1].0, 5.5);
        assert_eq!(points[2], (10.0, 10.0_f64.ln()));

        let default = PiecewiseLinear::with_default_samples(f64::ln, 1.0, 10.0).unwrap();
        assert_eq!(default.num_samples(), 10);
        assert_eq!(default.breakpoints()[9].0, 10.0);
    }

    #[test]
    fn variables_and_constraint_counts() {
        let factory = AuxiliaryFactory::new();
        let x = Variable::continuous("x", Bounds::new(1.0, 10.0));
        let pl = PiecewiseLinear::new(f64::ln, 1.0, 10.0, 4).unwrap();
        let y = pl.apply(&factory, &x);

        assert!(y.name().starts_with("__") && y.name().ends_with("_y_PL"));
        assert_eq!(named(&y, "t_PL_").len(), 4);
        assert_eq!(named(&y, "z_PL_").len(), 3);
        // 4 equalities + first + 2 interior + last adjacency rows
        assert_eq!(y.deferred_constraints().len(), 8);
        assert_eq!(factory.issued(), 1 + 4 + 3);
    }

    #[test]
    fn exact_at_breakpoint() {
        let factory = AuxiliaryFactory::new();
        let x = Variable::continuous("x", Bounds::new(1.0, 10.0));
        let y = PiecewiseLinear::new(f64::ln, 1.0, 10.0, 3)
            .unwrap()
            .apply(&factory, &x);
        let t = named(&y, "t_PL_");
        let z = named(&y, "z_PL_");

        let weights = [(t[0], 1.0), (t[1], 0.0), (t[2], 0.0)];
        let selectors = [(z[0], 1.0), (z[1], 0.0)];
        assert!(feasible(&y, &assignment(&x, 1.0, &y, 0.0, &weights, &selectors)));
        assert!(!feasible(&y, &assignment(&x, 1.0, &y, 0.1, &weights, &selectors)));

        let weights = [(t[0], 0.0), (t[1], 1.0), (t[2], 0.0)];
        let y_mid = 5.5_f64.ln();
        assert!(feasible(&y, &assignment(&x, 5.5, &y, y_mid, &weights, &selectors)));
    }

    #[test]
    fn interpolates_between_adjacent_breakpoints_only() {
        let factory = AuxiliaryFactory::new();
        let x = Variable::continuous("x", Bounds::new(1.0, 10.0));
        let y = PiecewiseLinear::new(f64::ln, 1.0, 10.0, 3)
            .unwrap()
            .apply(&factory, &x);
        let t = named(&y, "t_PL_");
        let z = named(&y, "z_PL_");

        let halfway = [(t[0], 0.5), (t[1], 0.5), (t[2], 0.0)];
        let first_segment = [(z[0], 1.0), (z[1], 0.0)];
        let interpolated = 0.5 * 5.5_f64.ln();
        assert!(feasible(&y, &assignment(&x, 3.25, &y, interpolated, &halfway, &first_segment)));

        let skip_middle = [(t[0], 0.5), (t[1], 0.0), (t[2], 0.5)];
        let second_segment = [(z[0], 0.0), (z[1], 1.0)];
        let mixed = 0.5 * 10.0_f64.ln();
        assert!(!feasible(&y, &assignment(&x, 5.5, &y, mixed, &skip_middle, &first_segment)));
        assert!(!feasible(&y, &assignment(&x, 5.5, &y, mixed, &skip_middle, &second_segment)));
    }

    #[test]
    fn two_samples_have_no_interior_rows() {
        let factory = AuxiliaryFactory::new();
        let x = Variable::continuous("x", Bounds::new(0.0, 1.0));
        let y = PiecewiseLinear::new(|v| 2.0 * v, 0.0, 1.0, 2)
            .unwrap()
            .apply(&factory, &x);
        assert_eq!(y.deferred_constraints().len(), 6);
    }
}
