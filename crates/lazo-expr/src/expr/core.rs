//! Core expression type: terms by degree + constant.
//!
//! Terms are stored in separate Vecs per degree (linear, quadratic, cubic)
//! over [`Operand`] leaves. Degree partitioning lets callers classify an
//! expression without walking it; [`Expr::traverse`] walks every leaf.

use std::collections::BTreeMap;
use std::fmt;

use crate::expr::constraint::{ComparisonSense, Constraint};
use crate::expr::error::LinearExprError;
use crate::ids::VariableId;
use crate::operand::Operand;

const MAX_DEGREE: usize = 3;

#[derive(Debug, Clone, Default)]
pub struct Expr {
    constant: f64,
    linear: Vec<(Operand, f64)>,
    quadratic: Vec<(Operand, Operand, f64)>,
    cubic: Vec<(Operand, Operand, Operand, f64)>,
}

impl Expr {
    // ── Constructors ────────────────────────────────────────

    /// Empty expression (all zeros).
    pub fn new_empty() -> Self {
        Self::default()
    }

    /// Expression from linear terms and constant.
    pub fn new(linear: Vec<(Operand, f64)>, constant: f64) -> Self {
        Self {
            constant,
            linear,
            ..Default::default()
        }
    }

    /// Just a constant, no variable terms.
    pub fn from_constant(constant: f64) -> Self {
        Self {
            constant,
            ..Default::default()
        }
    }

    /// Single linear term: coeff * operand.
    pub fn term(operand: impl Into<Operand>, coeff: f64) -> Self {
        if coeff == 0.0 {
            return Self::default();
        }
        Self {
            linear: vec![(operand.into(), coeff)],
            ..Default::default()
        }
    }

    /// Single operand with coefficient 1.0.
    pub fn var(operand: impl Into<Operand>) -> Self {
        Self {
            linear: vec![(operand.into(), 1.0)],
            ..Default::default()
        }
    }

    /// From raw linear terms, no constant.
    pub fn from_linear(linear: Vec<(Operand, f64)>) -> Self {
        Self {
            linear,
            ..Default::default()
        }
    }

    // ── Accessors ───────────────────────────────────────────

    pub fn constant(&self) -> f64 {
        self.constant
    }

    pub fn linear_terms(&self) -> &[(Operand, f64)] {
        &self.linear
    }

    pub fn quadratic_terms(&self) -> &[(Operand, Operand, f64)] {
        &self.quadratic
    }

    pub fn cubic_terms(&self) -> &[(Operand, Operand, Operand, f64)] {
        &self.cubic
    }

    /// Max degree of any term (0 = constant only).
    pub fn degree(&self) -> usize {
        if !self.cubic.is_empty() {
            3
        } else if !self.quadratic.is_empty() {
            2
        } else {
            usize::from(!self.linear.is_empty())
        }
    }

    pub fn is_linear(&self) -> bool {
        self.degree() <= 1
    }

    /// True for expressions of degree two or less, linear ones included.
    pub fn is_quadratic(&self) -> bool {
        self.degree() <= 2
    }

    // ── Traversal ───────────────────────────────────────────

    /// Visit every operand occurrence, linear terms first, then quadratic
    /// and cubic factors. Each call starts a fresh walk.
    pub fn traverse(&self) -> impl Iterator<Item = &Operand> + '_ {
        let linear = self.linear.iter().map(|(op, _)| op);
        let quadratic = self.quadratic.iter().flat_map(|(a, b, _)| [a, b]);
        let cubic = self.cubic.iter().flat_map(|(a, b, c, _)| [a, b, c]);
        linear.chain(quadratic).chain(cubic)
    }

    /// Distinct operands referenced by this expression, in ID order.
    pub fn operands(&self) -> Vec<Operand> {
        let mut seen: BTreeMap<VariableId, &Operand> = BTreeMap::new();
        for operand in self.traverse() {
            seen.entry(operand.id()).or_insert(operand);
        }
        seen.into_values().cloned().collect()
    }

    // ── Evaluation ──────────────────────────────────────────

    /// Evaluate using the operands' current values.
    pub fn value(&self) -> f64 {
        self.evaluate(|operand| operand.value())
    }

    /// Evaluate with values supplied by `lookup`.
    pub fn evaluate(&self, lookup: impl Fn(&Operand) -> f64) -> f64 {
        let linear: f64 = self.linear.iter().map(|(a, c)| c * lookup(a)).sum();
        let quadratic: f64 = self
            .quadratic
            .iter()
            .map(|(a, b, c)| c * lookup(a) * lookup(b))
            .sum();
        let cubic: f64 = self
            .cubic
            .iter()
            .map(|(a, b, d, c)| c * lookup(a) * lookup(b) * lookup(d))
            .sum();
        self.constant + linear + quadratic + cubic
    }

    // ── Operations (degree-agnostic) ────────────────────────

    /// Scale all terms and constant by a factor.
    pub fn scale(&self, by: f64) -> Self {
        Self {
            constant: self.constant * by,
            linear: self
                .linear
                .iter()
                .map(|(v, c)| (v.clone(), *c * by))
                .filter(|(_, c)| *c != 0.0)
                .collect(),
            quadratic: self
                .quadratic
                .iter()
                .map(|(a, b, c)| (a.clone(), b.clone(), *c * by))
                .filter(|(_, _, c)| *c != 0.0)
                .collect(),
            cubic: self
                .cubic
                .iter()
                .map(|(a, b, c, d)| (a.clone(), b.clone(), c.clone(), *d * by))
                .filter(|(_, _, _, d)| *d != 0.0)
                .collect(),
        }
    }

    /// Add another expression (merges all degree terms + constants).
    pub fn add_expr(&self, other: &Expr) -> Self {
        let mut linear = Vec::with_capacity(self.linear.len() + other.linear.len());
        linear.extend_from_slice(&self.linear);
        linear.extend_from_slice(&other.linear);

        let mut quadratic = Vec::with_capacity(self.quadratic.len() + other.quadratic.len());
        quadratic.extend_from_slice(&self.quadratic);
        quadratic.extend_from_slice(&other.quadratic);

        let mut cubic = Vec::with_capacity(self.cubic.len() + other.cubic.len());
        cubic.extend_from_slice(&self.cubic);
        cubic.extend_from_slice(&other.cubic);

        Self {
            constant: self.constant + other.constant,
            linear,
            quadratic,
            cubic,
        }
    }

    /// Add a constant offset.
    pub fn add_constant(&self, value: f64) -> Self {
        let mut out = self.clone();
        out.constant += value;
        out
    }

    /// Copy with constant set to zero.
    pub fn without_constant(&self) -> Self {
        let mut out = self.clone();
        out.constant = 0.0;
        out
    }

    /// Product of two expressions.
    ///
    /// Fails with [`LinearExprError::DegreeOverflow`] when the product has a
    /// term above degree three.
    pub fn mul_expr(&self, other: &Expr) -> Result<Expr, LinearExprError> {
        let degree = self.degree() + other.degree();
        if degree > MAX_DEGREE {
            return Err(LinearExprError::DegreeOverflow { degree });
        }

        let rights = other.monomials();
        let mut out = Expr::default();
        for (left, lc) in self.monomials() {
            for (right, rc) in &rights {
                let coeff = lc * rc;
                if coeff == 0.0 {
                    continue;
                }
                let mut factors = left.clone();
                factors.extend(right.iter().cloned());
                out.push_monomial(factors, coeff);
            }
        }
        Ok(out)
    }

    /// Merged linear terms with duplicates combined, in ID order.
    pub fn normalized_terms(&self) -> Vec<(Operand, f64)> {
        let mut merged: BTreeMap<VariableId, (Operand, f64)> = BTreeMap::new();
        for (operand, coeff) in &self.linear {
            if *coeff == 0.0 {
                continue;
            }
            merged
                .entry(operand.id())
                .or_insert_with(|| (operand.clone(), 0.0))
                .1 += *coeff;
        }
        merged.into_values().filter(|(_, c)| *c != 0.0).collect()
    }

    fn monomials(&self) -> Vec<(Vec<Operand>, f64)> {
        let mut out = Vec::with_capacity(
            1 + self.linear.len() + self.quadratic.len() + self.cubic.len(),
        );
        if self.constant != 0.0 {
            out.push((Vec::new(), self.constant));
        }
        out.extend(self.linear.iter().map(|(a, c)| (vec![a.clone()], *c)));
        out.extend(
            self.quadratic
                .iter()
                .map(|(a, b, c)| (vec![a.clone(), b.clone()], *c)),
        );
        out.extend(
            self.cubic
                .iter()
                .map(|(a, b, d, c)| (vec![a.clone(), b.clone(), d.clone()], *c)),
        );
        out
    }

    fn push_monomial(&mut self, factors: Vec<Operand>, coeff: f64) {
        let mut factors = factors.into_iter();
        match (factors.next(), factors.next(), factors.next()) {
            (None, _, _) => self.constant += coeff,
            (Some(a), None, _) => self.linear.push((a, coeff)),
            (Some(a), Some(b), None) => self.quadratic.push((a, b, coeff)),
            (Some(a), Some(b), Some(c)) => self.cubic.push((a, b, c, coeff)),
        }
    }

    // ── Comparison methods (produce Constraint) ─────────────

    pub fn compare(&self, rhs: impl Into<Expr>, sense: ComparisonSense) -> Constraint {
        let rhs = rhs.into();
        let combined = self.add_expr(&rhs.scale(-1.0));
        Constraint::new(combined.without_constant(), sense, -combined.constant)
    }

    /// `self <= rhs`
    pub fn le(&self, rhs: impl Into<Expr>) -> Constraint {
        self.compare(rhs, ComparisonSense::LessEqual)
    }

    /// `self >= rhs`
    pub fn ge(&self, rhs: impl Into<Expr>) -> Constraint {
        self.compare(rhs, ComparisonSense::GreaterEqual)
    }

    /// `self == rhs`
    pub fn equal(&self, rhs: impl Into<Expr>) -> Constraint {
        self.compare(rhs, ComparisonSense::Equal)
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (factors, coeff) in self.monomials() {
            if factors.is_empty() {
                continue;
            }
            let magnitude = coeff.abs();
            if first {
                if coeff < 0.0 {
                    f.write_str("-")?;
                }
            } else if coeff < 0.0 {
                f.write_str(" - ")?;
            } else {
                f.write_str(" + ")?;
            }
            if magnitude != 1.0 {
                write!(f, "{magnitude}*")?;
            }
            let names: Vec<&str> = factors.iter().map(Operand::name).collect();
            f.write_str(&names.join("*"))?;
            first = false;
        }
        if first {
            write!(f, "{}", self.constant)
        } else if self.constant > 0.0 {
            write!(f, " + {}", self.constant)
        } else if self.constant < 0.0 {
            write!(f, " - {}", -self.constant)
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use crate::expr::{ComparisonSense, Constraint, Expr, LinearExprError, linear_sum, linear_terms};
    use crate::operand::Operand;
    use crate::types::Bounds;
    use crate::variable::Variable;

    fn x() -> Variable {
        Variable::continuous("x", Bounds::free())
    }

    fn y() -> Variable {
        Variable::continuous("y", Bounds::free())
    }

    #[test]
    fn from_constant() {
        let e = Expr::from_constant(5.0);
        assert_eq!(e.constant(), 5.0);
        assert!(e.linear_terms().is_empty());
        assert_eq!(e.degree(), 0);
    }

    #[test]
    fn add_constant() {
        let e = Expr::var(&x()).add_constant(3.0);
        assert_eq!(e.constant(), 3.0);
        assert_eq!(e.linear_terms().len(), 1);
    }

    #[test]
    fn scale_with_constant() {
        let e = Expr::new(vec![(Operand::from(x()), 2.0)], 3.0);
        let scaled = e.scale(2.0);
        assert_eq!(scaled.constant(), 6.0);
        assert_eq!(scaled.linear_terms()[0].1, 4.0);
    }

    #[test]
    fn le_moves_constants_to_rhs() {
        let e = Expr::new(vec![(Operand::from(x()), 1.0)], 3.0);
        let c = e.le(10.0);
        assert_eq!(c.sense(), ComparisonSense::LessEqual);
        assert_eq!(c.rhs(), 7.0);
        assert_eq!(c.expr().constant(), 0.0);
    }

    #[test]
    fn ge_between_expressions() {
        let lhs = Expr::new(vec![(Operand::from(x()), 1.0)], 3.0);
        let rhs = Expr::new(vec![(Operand::from(y()), 1.0)], 7.0);
        let c = lhs.ge(rhs);
        assert_eq!(c.sense(), ComparisonSense::GreaterEqual);
        assert_eq!(c.rhs(), 4.0);
        assert_eq!(c.expr().linear_terms().len(), 2);
    }

    #[test]
    fn degree_classification() {
        let a = x();
        let b = y();
        let linear = Expr::var(&a) + Expr::var(&b);
        assert!(linear.is_linear());
        assert!(linear.is_quadratic());

        let product = Expr::var(&a).mul_expr(&Expr::var(&b)).unwrap();
        assert_eq!(product.degree(), 2);
        assert!(!product.is_linear());
        assert!(product.is_quadratic());

        let cubic = product.mul_expr(&Expr::var(&a)).unwrap();
        assert_eq!(cubic.degree(), 3);
        assert!(!cubic.is_quadratic());
    }

    #[test]
    fn mul_expr_rejects_degree_overflow() {
        let a = x();
        let square = Expr::var(&a).mul_expr(&Expr::var(&a)).unwrap();
        let err = square.mul_expr(&square).unwrap_err();
        assert_eq!(err, LinearExprError::DegreeOverflow { degree: 4 });
    }

    #[test]
    fn mul_expr_distributes_constants() {
        let a = x();
        a.set_value(2.0);
        let left = Expr::var(&a).add_constant(1.0);
        let right = Expr::var(&a).add_constant(-1.0);
        let product = left.mul_expr(&right).unwrap();
        assert_eq!(product.constant(), -1.0);
        assert_eq!(product.value(), 3.0);
    }

    #[test]
    fn traverse_visits_every_occurrence_and_restarts() {
        let a = x();
        let b = y();
        let expr = (Expr::var(&a) + Expr::var(&b))
            .mul_expr(&Expr::var(&a))
            .unwrap()
            + Expr::var(&b);
        assert_eq!(expr.traverse().count(), 5);
        assert_eq!(expr.traverse().count(), 5);
        assert_eq!(expr.operands().len(), 2);
    }

    #[test]
    fn value_uses_current_assignments() {
        let a = x();
        let b = y();
        a.set_value(2.0);
        b.set_value(-1.0);
        let expr = Expr::term(&a, 3.0) + Expr::term(&b, 4.0) + 1.0;
        assert_eq!(expr.value(), 3.0);
    }

    #[test]
    fn display_renders_terms() {
        let a = x();
        let b = y();
        let expr = Expr::var(&a) - Expr::term(&b, 2.0) - 1.0;
        assert_eq!(expr.to_string(), "x - 2*y - 1");
        assert_eq!(Expr::from_constant(4.0).to_string(), "4");
    }

    #[test]
    fn linear_terms_rejects_mixed_inputs() {
        let a = x();
        let result = linear_terms(
            Some(vec![(Operand::from(&a), 1.0)]),
            Some(vec![Operand::from(&a)]),
            None,
        );
        assert_eq!(result.unwrap_err(), LinearExprError::MixedInputs);
    }

    #[test]
    fn linear_terms_rejects_mismatched_lengths() {
        let result = linear_terms(
            None,
            Some(vec![Operand::from(x()), Operand::from(y())]),
            Some(vec![1.0]),
        );
        assert_eq!(result.unwrap_err(), LinearExprError::MismatchedLengths);
    }

    #[test]
    fn linear_terms_filters_zero_coefficients() {
        let a = x();
        let b = y();
        let expr = linear_terms(
            Some(vec![(Operand::from(&a), 0.0), (Operand::from(&b), 3.5)]),
            None,
            None,
        )
        .expect("linear_terms should succeed");

        assert_eq!(expr.linear_terms().len(), 1);
        assert_eq!(expr.linear_terms()[0].0.id(), b.id());
        assert_eq!(expr.linear_terms()[0].1, 3.5);
    }

    #[test]
    fn normalized_terms_merges_duplicates() {
        let a = x();
        let b = y();
        let expr = Expr::term(&a, 2.0) + Expr::term(&a, -2.0) + Expr::term(&b, 4.0);

        let normalized = expr
            .normalized_terms()
            .into_iter()
            .map(|(op, coeff)| (op.id(), coeff))
            .collect::<Vec<_>>();
        assert_eq!(normalized, vec![(b.id(), 4.0)]);
    }

    #[test]
    fn constraint_exposes_parts() {
        let a = x();
        let constraint =
            Constraint::new(Expr::var(&a), ComparisonSense::LessEqual, 10.0).with_name("cap");

        assert_eq!(constraint.name(), Some("cap"));
        let (inner, sense, rhs) = constraint.into_parts();
        assert_eq!(sense, ComparisonSense::LessEqual);
        assert_eq!(rhs, 10.0);
        assert_eq!(inner.linear_terms().len(), 1);
    }

    #[test]
    fn linear_sum_concatenates_terms() {
        let a = x();
        let b = y();
        let summed = linear_sum(vec![Expr::term(&a, 1.0), Expr::term(&b, 2.0).add_constant(1.0)]);
        let terms = summed
            .linear_terms()
            .iter()
            .map(|(op, coeff)| (op.id(), *coeff))
            .collect::<Vec<_>>();
        assert_eq!(terms, vec![(a.id(), 1.0), (b.id(), 2.0)]);
        assert_eq!(summed.constant(), 1.0);
    }
}
