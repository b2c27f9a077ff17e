//! Decision variable handles.
//!
//! A [`Variable`] is created once and shared by reference count between any
//! number of expressions and problems. Its identity is its [`VariableId`];
//! its current value is updated in place after each solve.

use std::sync::{Arc, Mutex, PoisonError};

use crate::ids::VariableId;
use crate::types::{Bounds, Domain, VariableDef};

#[derive(Debug)]
struct VariableData {
    id: VariableId,
    name: String,
    def: VariableDef,
    value: Mutex<Option<f64>>,
}

/// Shared handle to a named decision variable.
#[derive(Debug, Clone)]
pub struct Variable(Arc<VariableData>);

impl Variable {
    /// Create a new variable with a process-unique ID.
    pub fn new(name: impl Into<String>, def: VariableDef) -> Self {
        Self(Arc::new(VariableData {
            id: VariableId::allocate(),
            name: name.into(),
            def,
            value: Mutex::new(None),
        }))
    }

    /// Binary variable with bounds [0, 1].
    pub fn binary(name: impl Into<String>) -> Self {
        Self::new(name, VariableDef::binary())
    }

    /// Continuous variable with the given bounds.
    pub fn continuous(name: impl Into<String>, bounds: Bounds) -> Self {
        Self::new(name, VariableDef::continuous(bounds))
    }

    /// Integer variable with the given bounds.
    pub fn integer(name: impl Into<String>, bounds: Bounds) -> Self {
        Self::new(name, VariableDef::integer(bounds))
    }

    pub fn id(&self) -> VariableId {
        self.0.id
    }

    pub fn name(&self) -> &str {
        &self.0.name
    }

    pub fn def(&self) -> &VariableDef {
        &self.0.def
    }

    pub fn domain(&self) -> Domain {
        self.0.def.domain
    }

    pub fn bounds(&self) -> Bounds {
        self.0.def.bounds
    }

    pub fn initial_value(&self) -> Option<f64> {
        self.0.def.initial_value
    }

    /// Current value: the last assigned value, else the initial hint, else
    /// the bound-feasible value closest to zero.
    pub fn value(&self) -> f64 {
        let assigned = *self.0.value.lock().unwrap_or_else(PoisonError::into_inner);
        assigned
            .or(self.0.def.initial_value)
            .unwrap_or_else(|| self.0.def.bounds.default_value())
    }

    /// Assign a value, typically from a solver solution.
    pub fn set_value(&self, value: f64) {
        *self.0.value.lock().unwrap_or_else(PoisonError::into_inner) = Some(value);
    }

    /// Drop any assigned value.
    pub fn clear_value(&self) {
        *self.0.value.lock().unwrap_or_else(PoisonError::into_inner) = None;
    }

    /// Whether two handles refer to the same variable.
    pub fn same(&self, other: &Variable) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}
