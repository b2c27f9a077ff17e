use lazo_expr::{Bounds, Variable};
use lazo_solver::{
    Diagnostics, Solution, Solve, SolverConfig, SolverError, StandardForm, TerminateStatus,
};

pub(super) fn unit_continuous(name: &str) -> Variable {
    Variable::continuous(name, Bounds::new(0.0, 1.0))
}

/// Reports `status` and assigns each column the value its name maps to in
/// `values` (zero otherwise).
pub(super) struct FixedPointSolver {
    pub status: TerminateStatus,
    pub values: Vec<(String, f64)>,
    pub forms: Vec<StandardForm>,
}

impl FixedPointSolver {
    pub(super) fn new(status: TerminateStatus, values: Vec<(&str, f64)>) -> Self {
        Self {
            status,
            values: values
                .into_iter()
                .map(|(name, v)| (name.to_string(), v))
                .collect(),
            forms: Vec::new(),
        }
    }
}

impl Solve for FixedPointSolver {
    fn name(&self) -> &'static str {
        "fixed_point"
    }

    fn supports_quadratic(&self) -> bool {
        false
    }

    fn solve(
        &mut self,
        form: &StandardForm,
        _config: &SolverConfig,
    ) -> Result<Solution, SolverError> {
        self.forms.push(form.clone());
        let primal: Vec<f64> = form
            .columns
            .iter()
            .map(|col| {
                self.values
                    .iter()
                    .find(|(name, _)| *name == col.name)
                    .map_or(0.0, |(_, v)| *v)
            })
            .collect();
        Ok(Solution {
            status: self.status,
            objective_value: Some(form.objective_at(&primal)),
            primal,
            diagnostics: Diagnostics {
                solver: self.name().to_string(),
                ..Diagnostics::default()
            },
        })
    }
}
