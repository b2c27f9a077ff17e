//! Expression leaves.

use std::fmt;

use crate::auxiliary::{AuxiliaryVariable, HasDeferredConstraints};
use crate::ids::VariableId;
use crate::types::Domain;
use crate::variable::Variable;

/// A variable reference inside an expression: either a plain decision
/// variable or an auxiliary variable carrying deferred constraints.
#[derive(Debug, Clone)]
pub enum Operand {
    Variable(Variable),
    Auxiliary(AuxiliaryVariable),
}

impl Operand {
    pub fn id(&self) -> VariableId {
        self.variable().id()
    }

    pub fn name(&self) -> &str {
        self.variable().name()
    }

    pub fn domain(&self) -> Domain {
        self.variable().domain()
    }

    pub fn value(&self) -> f64 {
        self.variable().value()
    }

    /// The decision variable behind this operand.
    pub fn variable(&self) -> &Variable {
        match self {
            Operand::Variable(var) => var,
            Operand::Auxiliary(aux) => aux.variable(),
        }
    }

    /// The deferred-constraint capability, if this operand has one.
    pub fn deferred(&self) -> Option<&dyn HasDeferredConstraints> {
        match self {
            Operand::Variable(_) => None,
            Operand::Auxiliary(aux) => Some(aux),
        }
    }
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl From<Variable> for Operand {
    fn from(var: Variable) -> Self {
        Operand::Variable(var)
    }
}

impl From<&Variable> for Operand {
    fn from(var: &Variable) -> Self {
        Operand::Variable(var.clone())
    }
}

impl From<AuxiliaryVariable> for Operand {
    fn from(aux: AuxiliaryVariable) -> Self {
        Operand::Auxiliary(aux)
    }
}

impl From<&AuxiliaryVariable> for Operand {
    fn from(aux: &AuxiliaryVariable) -> Self {
        Operand::Auxiliary(aux.clone())
    }
}

impl From<&Operand> for Operand {
    fn from(operand: &Operand) -> Self {
        operand.clone()
    }
}
