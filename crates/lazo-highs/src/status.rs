//! Status conversions for HiGHS integration.

use crate::ffi::HighsStatus;
use lazo_solver::TerminateStatus;

/// Only an optimal model status counts as `Normal`. Limits reached before
/// optimality are `Unknown` even when HiGHS has a feasible point.
pub(crate) fn highs_to_terminate_status(status: HighsStatus) -> TerminateStatus {
    match status {
        HighsStatus::Optimal => TerminateStatus::Normal,
        HighsStatus::Infeasible => TerminateStatus::Infeasible,
        HighsStatus::Unbounded | HighsStatus::UnboundedOrInfeasible => TerminateStatus::Unbounded,
        HighsStatus::ReachedTimeLimit
        | HighsStatus::ReachedIterationLimit
        | HighsStatus::Unknown => TerminateStatus::Unknown,
    }
}

pub(crate) fn highs_status_string(status: HighsStatus) -> &'static str {
    match status {
        HighsStatus::Optimal => "optimal",
        HighsStatus::Infeasible => "infeasible",
        HighsStatus::Unbounded => "unbounded",
        HighsStatus::UnboundedOrInfeasible => "unbounded_or_infeasible",
        HighsStatus::ReachedTimeLimit => "time_limit",
        HighsStatus::ReachedIterationLimit => "iteration_limit",
        HighsStatus::Unknown => "unknown",
    }
}

pub(crate) fn highs_has_solution(status: HighsStatus) -> bool {
    matches!(
        status,
        HighsStatus::Optimal | HighsStatus::ReachedTimeLimit | HighsStatus::ReachedIterationLimit
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_highs_to_terminate_mapping() {
        assert_eq!(
            highs_to_terminate_status(HighsStatus::Optimal),
            TerminateStatus::Normal
        );
        assert_eq!(
            highs_to_terminate_status(HighsStatus::Infeasible),
            TerminateStatus::Infeasible
        );
        assert_eq!(
            highs_to_terminate_status(HighsStatus::Unbounded),
            TerminateStatus::Unbounded
        );
        assert_eq!(
            highs_to_terminate_status(HighsStatus::UnboundedOrInfeasible),
            TerminateStatus::Unbounded
        );
        assert_eq!(
            highs_to_terminate_status(HighsStatus::ReachedTimeLimit),
            TerminateStatus::Unknown
        );
    }

    #[test]
    fn test_limits_keep_their_point() {
        assert!(highs_has_solution(HighsStatus::ReachedTimeLimit));
        assert!(!highs_has_solution(HighsStatus::Infeasible));
        assert_eq!(highs_status_string(HighsStatus::ReachedIterationLimit), "iteration_limit");
    }
}
