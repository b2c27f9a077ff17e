/// Optimization sense
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sense {
    Minimize,
    Maximize,
}

impl Sense {
    pub fn as_str(self) -> &'static str {
        match self {
            Sense::Minimize => "Minimize",
            Sense::Maximize => "Maximize",
        }
    }
}

/// Domain kind of a decision variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Domain {
    Continuous,
    Integer,
    Binary,
}

impl Domain {
    pub fn as_str(self) -> &'static str {
        match self {
            Domain::Continuous => "Continuous",
            Domain::Integer => "Integer",
            Domain::Binary => "Binary",
        }
    }

    /// Whether the solver must treat the variable as integral.
    pub fn is_integral(self) -> bool {
        matches!(self, Domain::Integer | Domain::Binary)
    }
}

/// Bounds for a variable or constraint. Missing bounds are infinite.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub lower: f64,
    pub upper: f64,
}

impl Bounds {
    pub fn new(lower: f64, upper: f64) -> Self {
        Self { lower, upper }
    }

    /// No bound on either side.
    pub fn free() -> Self {
        Self::new(f64::NEG_INFINITY, f64::INFINITY)
    }

    /// Lower bound only.
    pub fn at_least(lower: f64) -> Self {
        Self::new(lower, f64::INFINITY)
    }

    /// Upper bound only.
    pub fn at_most(upper: f64) -> Self {
        Self::new(f64::NEG_INFINITY, upper)
    }

    pub fn is_valid(&self) -> bool {
        !self.lower.is_nan() && !self.upper.is_nan() && self.lower <= self.upper
    }

    /// The bound-feasible value closest to zero.
    pub fn default_value(&self) -> f64 {
        let (lower, upper) = (self.lower, self.upper);
        if lower.is_finite() && upper.is_finite() {
            if lower <= 0.0 && 0.0 <= upper {
                0.0
            } else if 0.0 < lower {
                lower
            } else {
                upper
            }
        } else if lower.is_finite() {
            if 0.0 < lower { lower } else { 0.0 }
        } else if upper.is_finite() {
            if 0.0 > upper { upper } else { 0.0 }
        } else {
            0.0
        }
    }
}

impl Default for Bounds {
    fn default() -> Self {
        Self::free()
    }
}

/// Definition of a decision variable: domain, bounds and an optional
/// initial value hint.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VariableDef {
    pub domain: Domain,
    pub bounds: Bounds,
    pub initial_value: Option<f64>,
}

impl VariableDef {
    /// Binary variable with bounds [0, 1].
    pub fn binary() -> Self {
        Self {
            domain: Domain::Binary,
            bounds: Bounds::new(0.0, 1.0),
            initial_value: None,
        }
    }

    /// Continuous variable with the given bounds.
    pub fn continuous(bounds: Bounds) -> Self {
        Self {
            domain: Domain::Continuous,
            bounds,
            initial_value: None,
        }
    }

    /// Integer variable with the given bounds.
    pub fn integer(bounds: Bounds) -> Self {
        Self {
            domain: Domain::Integer,
            bounds,
            initial_value: None,
        }
    }

    /// Attach an initial value hint. Hints are diagnostic only and never
    /// forwarded to a solver.
    pub fn with_initial_value(mut self, value: f64) -> Self {
        self.initial_value = Some(value);
        self
    }
}
