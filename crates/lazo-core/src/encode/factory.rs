//! Auxiliary variable factory.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, OnceLock};

use lazo_expr::{AuxiliaryVariable, Constraint, Variable, VariableDef};

/// Creates encoder variables named `__{counter}_{base}`.
///
/// Every factory draws its numbers from one process-wide counter, so names
/// are unique no matter which factory issued them. A factory only tracks how
/// many names it (and its clones) issued. [`AuxiliaryFactory::shared`] is the
/// instance used by the free encoder functions.
#[derive(Debug, Clone, Default)]
pub struct AuxiliaryFactory {
    issued: Arc<AtomicU64>,
}

static NEXT_SUFFIX: AtomicU64 = AtomicU64::new(0);
static SHARED: OnceLock<AuxiliaryFactory> = OnceLock::new();

impl AuxiliaryFactory {
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide factory.
    pub fn shared() -> &'static AuxiliaryFactory {
        SHARED.get_or_init(AuxiliaryFactory::new)
    }

    /// How many names this factory (and its clones) has issued.
    pub fn issued(&self) -> u64 {
        self.issued.load(Ordering::Relaxed)
    }

    fn next_name(&self, base: &str) -> String {
        let n = NEXT_SUFFIX.fetch_add(1, Ordering::Relaxed);
        self.issued.fetch_add(1, Ordering::Relaxed);
        format!("__{n}_{base}")
    }

    /// A plain helper variable (weights, selectors) with a unique name.
    pub fn create_variable(&self, base: &str, def: VariableDef) -> Variable {
        Variable::new(self.next_name(base), def)
    }

    /// An auxiliary variable whose constraints are produced by `encode`
    /// from the freshly created variable.
    pub fn create_auxiliary(
        &self,
        base: &str,
        def: VariableDef,
        encode: impl FnOnce(&Variable) -> Vec<Constraint>,
    ) -> AuxiliaryVariable {
        let variable = self.create_variable(base, def);
        let constraints = encode(&variable);
        tracing::trace!(
            component = "factory",
            operation = "create_auxiliary",
            status = "success",
            name = variable.name(),
            domain = def.domain.as_str(),
            constraints = constraints.len(),
            "Created auxiliary variable"
        );
        AuxiliaryVariable::new(variable, constraints)
    }
}

#[cfg(test)]
pub(crate) fn name_counter(name: &str) -> Option<u64> {
    let (counter, _) = name.strip_prefix("__")?.split_once('_')?;
    counter.parse().ok()
}
