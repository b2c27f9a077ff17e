//! Constraints: expression with comparison sense, RHS and optional label.

use std::fmt;

use crate::expr::core::Expr;
use crate::operand::Operand;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComparisonSense {
    LessEqual,
    GreaterEqual,
    Equal,
}

impl ComparisonSense {
    pub fn as_str(self) -> &'static str {
        match self {
            ComparisonSense::LessEqual => "le",
            ComparisonSense::GreaterEqual => "ge",
            ComparisonSense::Equal => "eq",
        }
    }

    fn symbol(self) -> &'static str {
        match self {
            ComparisonSense::LessEqual => "<=",
            ComparisonSense::GreaterEqual => ">=",
            ComparisonSense::Equal => "==",
        }
    }
}

/// `expr (<= | >= | ==) rhs`, with the constant of `expr` folded into `rhs`.
#[derive(Debug, Clone)]
pub struct Constraint {
    expr: Expr,
    sense: ComparisonSense,
    rhs: f64,
    name: Option<String>,
}

impl Constraint {
    pub fn new(expr: Expr, sense: ComparisonSense, rhs: f64) -> Self {
        Self {
            expr,
            sense,
            rhs,
            name: None,
        }
    }

    /// Attach a human-readable label.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn expr(&self) -> &Expr {
        &self.expr
    }

    pub fn sense(&self) -> ComparisonSense {
        self.sense
    }

    pub fn rhs(&self) -> f64 {
        self.rhs
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn into_parts(self) -> (Expr, ComparisonSense, f64) {
        (self.expr, self.sense, self.rhs)
    }

    /// How far the constraint is from holding under `lookup` (0 when it holds).
    pub fn violation(&self, lookup: impl Fn(&Operand) -> f64) -> f64 {
        let lhs = self.expr.evaluate(lookup);
        match self.sense {
            ComparisonSense::LessEqual => (lhs - self.rhs).max(0.0),
            ComparisonSense::GreaterEqual => (self.rhs - lhs).max(0.0),
            ComparisonSense::Equal => (lhs - self.rhs).abs(),
        }
    }

    /// Whether the constraint holds under `lookup` within `tolerance`.
    pub fn is_satisfied(&self, lookup: impl Fn(&Operand) -> f64, tolerance: f64) -> bool {
        self.violation(lookup) <= tolerance
    }
}

impl fmt::Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(name) = &self.name {
            write!(f, "{name}: ")?;
        }
        write!(f, "{} {} {}", self.expr, self.sense.symbol(), self.rhs)
    }
}
