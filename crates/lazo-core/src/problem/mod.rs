//! Problem container.
//!
//! A [`Problem`] owns an objective, an ordered constraint list and the
//! registry of variables reachable from them. Registering an expression
//! (objective or constraint) attaches the deferred constraints of every
//! auxiliary variable it references, once per problem.
//!
//! # Module Organization
//!
//! - [`error`]: Problem error types
//! - `attach`: Deferred constraint attachment
//! - `lower`: Lowering to [`StandardForm`](lazo_solver::StandardForm)
//! - `solve`: Solving and value write-back
//! - `summary`: Problem summary and `show` output

mod attach;
mod error;
mod lower;
mod solve;
mod summary;

use std::collections::BTreeMap;

use lazo_expr::{Constraint, ConstraintId, Expr, ProblemId, Sense, Variable, VariableId};
use lazo_solver::TerminateStatus;

pub use error::ProblemError;
pub use summary::ProblemSummary;

/// An optimization problem under construction.
#[derive(Debug)]
pub struct Problem {
    id: ProblemId,
    name: Option<String>,
    sense: Sense,
    objective: Expr,
    constraints: Vec<Constraint>,
    variables: BTreeMap<VariableId, Variable>,
    names: BTreeMap<String, VariableId>,
    status: Option<TerminateStatus>,
}

impl Problem {
    /// Create an empty problem with a process-unique id.
    pub fn new(name: Option<&str>, sense: Sense) -> Self {
        Self {
            id: ProblemId::allocate(),
            name: name.map(str::to_string),
            sense,
            objective: Expr::new_empty(),
            constraints: Vec::new(),
            variables: BTreeMap::new(),
            names: BTreeMap::new(),
            status: None,
        }
    }

    pub fn id(&self) -> ProblemId {
        self.id
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn sense(&self) -> Sense {
        self.sense
    }

    pub fn set_sense(&mut self, sense: Sense) {
        self.sense = sense;
    }

    pub fn objective(&self) -> &Expr {
        &self.objective
    }

    /// Constraints in insertion order; attached auxiliary constraints follow
    /// the constraint that first referenced them.
    pub fn constraints(&self) -> &[Constraint] {
        &self.constraints
    }

    pub fn num_constraints(&self) -> usize {
        self.constraints.len()
    }

    /// Variables reachable from the objective and constraints, in id order.
    pub fn variables(&self) -> impl Iterator<Item = &Variable> + '_ {
        self.variables.values()
    }

    pub fn num_variables(&self) -> usize {
        self.variables.len()
    }

    pub fn variable_by_name(&self, name: &str) -> Option<&Variable> {
        self.names.get(name).and_then(|id| self.variables.get(id))
    }

    /// Objective evaluated at the variables' current values.
    pub fn objective_value(&self) -> f64 {
        self.objective.value()
    }

    /// Status of the last solve, `None` before the first one.
    pub fn status(&self) -> Option<TerminateStatus> {
        self.status
    }

    /// Replace the objective.
    ///
    /// The variable registry is rebuilt from the new objective and the
    /// existing constraints, then deferred constraints of any auxiliary
    /// variable in the objective are attached. On error the problem is left
    /// as it was.
    pub fn set_objective(&mut self, objective: impl Into<Expr>) -> Result<(), ProblemError> {
        let objective = objective.into();
        let mut variables = BTreeMap::new();
        let mut names = BTreeMap::new();
        for expr in std::iter::once(&objective).chain(self.constraints.iter().map(Constraint::expr))
        {
            collect_variables(expr, &mut variables, &mut names)?;
        }
        self.check_attachments([&objective], &names)?;

        self.variables = variables;
        self.names = names;
        self.objective = objective;
        tracing::debug!(
            component = "problem",
            operation = "set_objective",
            status = "success",
            problem = self.id.inner(),
            sense = self.sense.as_str(),
            degree = self.objective.degree(),
            variables = self.variables.len(),
            "Set objective"
        );

        let objective = self.objective.clone();
        self.attach_from(&objective)?;
        Ok(())
    }

    /// Append a constraint and attach the deferred constraints it brings in.
    ///
    /// Returns the constraint's position in [`constraints`](Self::constraints).
    /// On error nothing is appended or attached.
    pub fn add_constraint(&mut self, constraint: Constraint) -> Result<ConstraintId, ProblemError> {
        self.check_attachments([constraint.expr()], &self.names)?;
        self.push_constraint(constraint)
    }

    /// [`add_constraint`](Self::add_constraint) once its attachments are checked.
    fn push_constraint(&mut self, constraint: Constraint) -> Result<ConstraintId, ProblemError> {
        self.register(constraint.expr())?;

        let id = ConstraintId::new(self.constraints.len() as u32);
        tracing::trace!(
            component = "problem",
            operation = "add_constraint",
            status = "success",
            problem = self.id.inner(),
            constraint = id.inner(),
            name = constraint.name().unwrap_or(""),
            "Added constraint"
        );
        let expr = constraint.expr().clone();
        self.constraints.push(constraint);

        self.attach_from(&expr)?;
        Ok(id)
    }

    /// Append several constraints in order.
    pub fn add_constraints(
        &mut self,
        constraints: impl IntoIterator<Item = Constraint>,
    ) -> Result<Vec<ConstraintId>, ProblemError> {
        constraints
            .into_iter()
            .map(|constraint| self.add_constraint(constraint))
            .collect()
    }

    /// Add the variables of `expr` to the registry. Checks every name before
    /// inserting any.
    fn register(&mut self, expr: &Expr) -> Result<(), ProblemError> {
        let mut fresh = BTreeMap::new();
        let mut fresh_names = BTreeMap::new();
        collect_variables(expr, &mut fresh, &mut fresh_names)?;
        for (name, id) in &fresh_names {
            if self.names.get(name).is_some_and(|existing| existing != id) {
                return Err(ProblemError::DuplicateVariableName { name: name.clone() });
            }
        }
        self.variables.extend(fresh);
        self.names.extend(fresh_names);
        Ok(())
    }
}

fn collect_variables(
    expr: &Expr,
    variables: &mut BTreeMap<VariableId, Variable>,
    names: &mut BTreeMap<String, VariableId>,
) -> Result<(), ProblemError> {
    for operand in expr.traverse() {
        let variable = operand.variable();
        match names.get(variable.name()) {
            Some(existing) if *existing != variable.id() => {
                return Err(ProblemError::DuplicateVariableName {
                    name: variable.name().to_string(),
                });
            }
            Some(_) => {}
            None => {
                names.insert(variable.name().to_string(), variable.id());
                variables.insert(variable.id(), variable.clone());
            }
        }
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;
    use lazo_expr::{Bounds, Expr};

    mod attach;
    mod lower_solve;
    mod support;

    #[test]
    fn test_new_problem_is_empty() {
        let problem = Problem::new(Some("empty"), Sense::Minimize);
        assert_eq!(problem.name(), Some("empty"));
        assert_eq!(problem.num_constraints(), 0);
        assert_eq!(problem.num_variables(), 0);
        assert_eq!(problem.status(), None);
    }

    #[test]
    fn test_problem_ids_are_distinct() {
        let a = Problem::new(None, Sense::Minimize);
        let b = Problem::new(None, Sense::Minimize);
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn test_add_constraint_returns_positions() {
        let x = Variable::continuous("x", Bounds::new(0.0, 10.0));
        let mut problem = Problem::new(None, Sense::Minimize);
        let first = problem.add_constraint(Expr::var(&x).le(5.0)).unwrap();
        let second = problem.add_constraint(Expr::var(&x).ge(1.0)).unwrap();
        assert_eq!(first.inner(), 0);
        assert_eq!(second.inner(), 1);
        assert_eq!(problem.num_variables(), 1);
    }

    #[test]
    fn test_duplicate_names_rejected() {
        let a = Variable::binary("x");
        let b = Variable::binary("x");
        let mut problem = Problem::new(None, Sense::Minimize);
        problem.add_constraint(Expr::var(&a).le(1.0)).unwrap();

        let err = problem.add_constraint(Expr::var(&b).le(1.0)).unwrap_err();
        assert_eq!(err.code(), "VARIABLE_DUPLICATE_NAME");
        assert_eq!(problem.num_constraints(), 1);

        let err = problem.set_objective(&a + &b).unwrap_err();
        assert!(matches!(err, ProblemError::DuplicateVariableName { .. }));
    }

    #[test]
    fn test_set_objective_rebuilds_registry() {
        let x = Variable::continuous("x", Bounds::free());
        let y = Variable::continuous("y", Bounds::free());
        let mut problem = Problem::new(None, Sense::Maximize);

        problem.set_objective(&x + &y).unwrap();
        assert_eq!(problem.num_variables(), 2);

        problem.set_objective(&x).unwrap();
        assert_eq!(problem.num_variables(), 1);
        assert!(problem.variable_by_name("y").is_none());
    }

    #[test]
    fn test_objective_value_uses_current_values() {
        let x = Variable::continuous("x", Bounds::free());
        x.set_value(3.0);
        let mut problem = Problem::new(None, Sense::Minimize);
        problem.set_objective(2.0 * &x + 1.0).unwrap();
        assert_eq!(problem.objective_value(), 7.0);
    }
}
