//! Auxiliary variables: variables that own constraints which are attached to
//! a problem lazily, the first time the problem references them.

use std::collections::BTreeSet;
use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};

use crate::expr::Constraint;
use crate::ids::{ProblemId, VariableId};
use crate::types::Domain;
use crate::variable::Variable;

/// Capability of a node that carries constraints deferred until it is
/// referenced by a problem.
pub trait HasDeferredConstraints {
    /// The owned constraints, in insertion order.
    fn deferred_constraints(&self) -> &[Constraint];

    /// Whether the constraints were already attached to `problem`.
    fn is_attached_to(&self, problem: ProblemId) -> bool;

    /// Record `problem` as attached. Returns `true` only for the call that
    /// inserted it; the check and the insert happen under one lock.
    fn mark_attached(&self, problem: ProblemId) -> bool;
}

struct AuxiliaryData {
    variable: Variable,
    constraints: Vec<Constraint>,
    attached: Mutex<BTreeSet<ProblemId>>,
}

/// A variable introduced by an encoder, together with the constraints that
/// define it. The constraint list is fixed at construction; only the set of
/// problems it has been attached to grows.
#[derive(Clone)]
pub struct AuxiliaryVariable(Arc<AuxiliaryData>);

impl AuxiliaryVariable {
    pub fn new(variable: Variable, constraints: Vec<Constraint>) -> Self {
        Self(Arc::new(AuxiliaryData {
            variable,
            constraints,
            attached: Mutex::new(BTreeSet::new()),
        }))
    }

    /// The underlying decision variable.
    pub fn variable(&self) -> &Variable {
        &self.0.variable
    }

    pub fn id(&self) -> VariableId {
        self.0.variable.id()
    }

    pub fn name(&self) -> &str {
        self.0.variable.name()
    }

    pub fn domain(&self) -> Domain {
        self.0.variable.domain()
    }

    pub fn value(&self) -> f64 {
        self.0.variable.value()
    }

    /// Problems this variable has been attached to, in ID order.
    pub fn attached_problems(&self) -> Vec<ProblemId> {
        self.0
            .attached
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .copied()
            .collect()
    }
}

impl HasDeferredConstraints for AuxiliaryVariable {
    fn deferred_constraints(&self) -> &[Constraint] {
        &self.0.constraints
    }

    fn is_attached_to(&self, problem: ProblemId) -> bool {
        self.0
            .attached
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(&problem)
    }

    fn mark_attached(&self, problem: ProblemId) -> bool {
        let inserted = self
            .0
            .attached
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(problem);
        tracing::trace!(
            component = "auxiliary",
            operation = "mark_attached",
            status = "success",
            variable = self.name(),
            problem = problem.inner(),
            inserted,
            "Checked auxiliary attachment"
        );
        inserted
    }
}

impl fmt::Debug for AuxiliaryVariable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuxiliaryVariable")
            .field("id", &self.id())
            .field("name", &self.name())
            .field("domain", &self.domain())
            .field("constraints", &self.0.constraints.len())
            .finish_non_exhaustive()
    }
}
