//! Deferred constraint attachment.
//!
//! Attachment marks are never removed, so every name an attachment would
//! register is checked before the first mark is taken. A rejected call leaves
//! both the problem and the auxiliaries untouched.

use std::collections::{BTreeMap, BTreeSet};

use lazo_expr::{Expr, HasDeferredConstraints, Operand, Sense, VariableId};

use super::{Problem, ProblemError, collect_variables};

impl Problem {
    /// A problem minimizing or maximizing `objective` that carries copies of
    /// every deferred constraint it reaches, transitively. The auxiliaries
    /// are not told about it, so their attachment sets do not grow.
    pub(crate) fn scratch(objective: &Expr, sense: Sense) -> Result<Problem, ProblemError> {
        let mut problem = Problem::new(None, sense);
        collect_variables(objective, &mut problem.variables, &mut problem.names)?;
        problem.objective = objective.clone();

        let mut pending: Vec<Operand> = objective
            .traverse()
            .filter(|operand| operand.deferred().is_some())
            .cloned()
            .collect();
        let mut copied = BTreeSet::new();
        while let Some(operand) = pending.pop() {
            let Some(deferred) = operand.deferred() else {
                continue;
            };
            if !copied.insert(operand.id()) {
                continue;
            }
            for constraint in deferred.deferred_constraints() {
                problem.register(constraint.expr())?;
                problem.constraints.push(constraint.clone());
                pending.extend(
                    constraint
                        .expr()
                        .traverse()
                        .filter(|operand| operand.deferred().is_some())
                        .cloned(),
                );
            }
        }
        tracing::trace!(
            component = "problem",
            operation = "scratch",
            status = "success",
            problem = problem.id.inner(),
            constraints = problem.constraints.len(),
            variables = problem.variables.len(),
            "Built scratch problem"
        );
        Ok(problem)
    }

    /// Attach the constraints owned by `deferred` unless this problem already
    /// has them. Returns `true` when constraints were appended.
    ///
    /// Auxiliaries referenced by those constraints are attached as well.
    pub fn attach(&mut self, deferred: &dyn HasDeferredConstraints) -> Result<bool, ProblemError> {
        if deferred.is_attached_to(self.id) {
            return Ok(false);
        }
        let exprs = deferred.deferred_constraints().iter().map(|c| c.expr());
        self.check_attachments(exprs, &self.names)?;
        self.attach_checked(deferred)
    }

    /// Attach every auxiliary variable occurring in `expr`. Returns how many
    /// were newly attached. Callers run [`check_attachments`](Self::check_attachments)
    /// on `expr` first.
    pub(super) fn attach_from(&mut self, expr: &Expr) -> Result<usize, ProblemError> {
        let pending: Vec<Operand> = expr
            .traverse()
            .filter(|operand| operand.deferred().is_some())
            .cloned()
            .collect();

        let mut attached = 0;
        for operand in &pending {
            if let Some(deferred) = operand.deferred() {
                if self.attach_checked(deferred)? {
                    attached += 1;
                }
            }
        }
        Ok(attached)
    }

    fn attach_checked(&mut self, deferred: &dyn HasDeferredConstraints) -> Result<bool, ProblemError> {
        if !deferred.mark_attached(self.id) {
            return Ok(false);
        }
        let constraints = deferred.deferred_constraints();
        tracing::debug!(
            component = "problem",
            operation = "attach",
            status = "success",
            problem = self.id.inner(),
            constraints = constraints.len(),
            "Attaching deferred constraints"
        );
        for constraint in constraints {
            self.push_constraint(constraint.clone())?;
        }
        Ok(true)
    }

    /// Walk `exprs` and the constraints of every auxiliary not yet attached
    /// here, transitively, and fail if any two variables share a name.
    /// `names` is the registry the walked variables would join.
    pub(super) fn check_attachments<'a>(
        &self,
        exprs: impl IntoIterator<Item = &'a Expr>,
        names: &BTreeMap<String, VariableId>,
    ) -> Result<(), ProblemError> {
        let mut pending: Vec<&Operand> = exprs.into_iter().flat_map(|expr| expr.traverse()).collect();
        let mut seen: BTreeMap<&str, VariableId> = BTreeMap::new();
        let mut expanded = BTreeSet::new();

        while let Some(operand) = pending.pop() {
            let variable = operand.variable();
            let known = names
                .get(variable.name())
                .or_else(|| seen.get(variable.name()))
                .copied();
            match known {
                Some(id) if id != variable.id() => {
                    tracing::warn!(
                        component = "problem",
                        operation = "attach",
                        status = "error",
                        problem = self.id.inner(),
                        name = variable.name(),
                        "Rejected attachment with clashing variable name"
                    );
                    return Err(ProblemError::DuplicateVariableName {
                        name: variable.name().to_string(),
                    });
                }
                Some(_) => {}
                None => {
                    seen.insert(variable.name(), variable.id());
                }
            }

            if let Some(deferred) = operand.deferred() {
                if !deferred.is_attached_to(self.id) && expanded.insert(variable.id()) {
                    pending.extend(
                        deferred
                            .deferred_constraints()
                            .iter()
                            .flat_map(|constraint| constraint.expr().traverse()),
                    );
                }
            }
        }
        Ok(())
    }
}
