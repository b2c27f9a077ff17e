//! Terminate status of a solve attempt.

use serde::Serialize;

/// Outcome classification a solver reports after a solve attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TerminateStatus {
    /// Optimal solution found.
    Normal,
    /// Problem is infeasible.
    Infeasible,
    /// Problem is unbounded.
    Unbounded,
    /// Anything else: limits reached, solver gave up, not yet solved.
    Unknown,
}

impl TerminateStatus {
    pub fn is_normal(self) -> bool {
        matches!(self, TerminateStatus::Normal)
    }

    pub fn is_infeasible(self) -> bool {
        matches!(self, TerminateStatus::Infeasible)
    }

    pub fn is_unbounded(self) -> bool {
        matches!(self, TerminateStatus::Unbounded)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TerminateStatus::Normal => "Normal",
            TerminateStatus::Infeasible => "Infeasible",
            TerminateStatus::Unbounded => "Unbounded",
            TerminateStatus::Unknown => "Unknown",
        }
    }
}

impl std::fmt::Display for TerminateStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_predicates() {
        assert!(TerminateStatus::Normal.is_normal());
        assert!(!TerminateStatus::Unknown.is_normal());
        assert!(TerminateStatus::Infeasible.is_infeasible());
        assert!(TerminateStatus::Unbounded.is_unbounded());
        assert!(!TerminateStatus::Normal.is_unbounded());
    }

    #[test]
    fn test_status_display() {
        assert_eq!(TerminateStatus::Normal.to_string(), "Normal");
        assert_eq!(TerminateStatus::Unbounded.to_string(), "Unbounded");
    }
}
