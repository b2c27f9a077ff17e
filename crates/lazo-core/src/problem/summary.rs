//! Problem summary, rendered like:
//!
//! ```text
//! Name: None
//!   Type         : Problem
//!   sense        : Maximize
//!   objective    : x*y
//!   #constraints : 0
//!   #variables   : 2 (Binary 2)
//! ```

use std::collections::BTreeMap;
use std::fmt;

use lazo_solver::TerminateStatus;
use serde::Serialize;

use super::Problem;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProblemSummary {
    pub name: Option<String>,
    pub sense: &'static str,
    pub objective: String,
    pub num_constraints: usize,
    pub num_variables: usize,
    /// Variable count per domain, keyed by domain name.
    pub domains: BTreeMap<&'static str, usize>,
    pub status: Option<TerminateStatus>,
}

impl ProblemSummary {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

impl fmt::Display for ProblemSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Name: {}", self.name.as_deref().unwrap_or("None"))?;
        writeln!(f, "  Type         : Problem")?;
        writeln!(f, "  sense        : {}", self.sense)?;
        writeln!(f, "  objective    : {}", self.objective)?;
        writeln!(f, "  #constraints : {}", self.num_constraints)?;
        let domains: Vec<String> = self
            .domains
            .iter()
            .map(|(domain, count)| format!("{domain} {count}"))
            .collect();
        if domains.is_empty() {
            write!(f, "  #variables   : {}", self.num_variables)
        } else {
            write!(
                f,
                "  #variables   : {} ({})",
                self.num_variables,
                domains.join(", ")
            )
        }
    }
}

impl Problem {
    pub fn summary(&self) -> ProblemSummary {
        let mut domains = BTreeMap::new();
        for variable in self.variables.values() {
            *domains.entry(variable.domain().as_str()).or_insert(0) += 1;
        }
        ProblemSummary {
            name: self.name.clone(),
            sense: self.sense.as_str(),
            objective: self.objective.to_string(),
            num_constraints: self.constraints.len(),
            num_variables: self.variables.len(),
            domains,
            status: self.status,
        }
    }

    /// Multi-line description of the problem.
    pub fn show(&self) -> String {
        self.summary().to_string()
    }
}
