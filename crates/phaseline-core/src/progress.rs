//! # Progress Calculator
//!
//! Maps a solution's status and current phase to a 0-100 completion
//! percentage against the resolved phase ordering.
//!
//! Pure and total: every input maps to a percentage, never an error.
//! Integer arithmetic only (floats are denied workspace-wide).

use crate::types::{PhaseId, Solution, SolutionStatus};

/// Compute the completion percentage for a solution.
///
/// Rules, in order:
/// - `Complete` status is authoritative: returns 100 regardless of
///   phase data, including a null `current_phase`.
/// - An empty ordering, a missing `current_phase`, or a `current_phase`
///   not present in the ordering returns 0 ("not yet started").
/// - Otherwise the percentage is `(index + 1) / len`, rounded half-up,
///   where `index` is the 0-based position of the current phase. The
///   first enabled phase contributes 1/N, the last 100%.
#[must_use]
pub fn compute_progress(solution: &Solution, ordered: &[PhaseId]) -> u8 {
    if solution.status == SolutionStatus::Complete {
        return 100;
    }
    if ordered.is_empty() {
        return 0;
    }
    let Some(current) = &solution.current_phase else {
        return 0;
    };
    match ordered.iter().position(|id| id == current) {
        Some(index) => percent_of(index, ordered.len()),
        None => 0,
    }
}

/// Round-half-up of `((index + 1) * 100) / len` in integer arithmetic:
/// `round(a / b) = (2a + b) / (2b)` for non-negative operands.
fn percent_of(index: usize, len: usize) -> u8 {
    let numer = (index as u64 + 1) * 100;
    let denom = len as u64;
    ((2 * numer + denom) / (2 * denom)) as u8
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn ordering(ids: &[&str]) -> Vec<PhaseId> {
        ids.iter().copied().map(PhaseId::new).collect()
    }

    fn solution(status: SolutionStatus, current: Option<&str>) -> Solution {
        Solution {
            current_phase: current.map(PhaseId::new),
            status,
            ..Solution::new("s1", "Test")
        }
    }

    #[test]
    fn third_of_four_phases_is_75() {
        let order = ordering(&["p1", "p2", "p3", "p4"]);
        let sol = solution(SolutionStatus::Active, Some("p3"));
        assert_eq!(compute_progress(&sol, &order), 75);
    }

    #[test]
    fn empty_ordering_is_zero_unless_complete() {
        let sol = solution(SolutionStatus::OnHold, Some("p1"));
        assert_eq!(compute_progress(&sol, &[]), 0);
    }

    #[test]
    fn complete_status_overrides_phase_data() {
        let order = ordering(&["p1", "p2"]);
        assert_eq!(
            compute_progress(&solution(SolutionStatus::Complete, Some("p1")), &order),
            100
        );
        assert_eq!(
            compute_progress(&solution(SolutionStatus::Complete, None), &order),
            100
        );
        assert_eq!(compute_progress(&solution(SolutionStatus::Complete, None), &[]), 100);
    }

    #[test]
    fn missing_current_phase_is_zero() {
        let order = ordering(&["p1", "p2"]);
        assert_eq!(compute_progress(&solution(SolutionStatus::Active, None), &order), 0);
    }

    #[test]
    fn current_phase_outside_ordering_is_zero() {
        let order = ordering(&["p1", "p2"]);
        let sol = solution(SolutionStatus::Active, Some("elsewhere"));
        assert_eq!(compute_progress(&sol, &order), 0);
    }

    #[test]
    fn first_and_last_phase_bounds() {
        let order = ordering(&["p1", "p2", "p3"]);
        assert_eq!(
            compute_progress(&solution(SolutionStatus::Active, Some("p1")), &order),
            33
        );
        assert_eq!(
            compute_progress(&solution(SolutionStatus::Active, Some("p3")), &order),
            100
        );
    }

    #[test]
    fn rounds_half_up() {
        // 3/8 = 37.5 -> 38
        let order = ordering(&["a", "b", "c", "d", "e", "f", "g", "h"]);
        assert_eq!(
            compute_progress(&solution(SolutionStatus::Active, Some("c")), &order),
            38
        );
    }

    #[test]
    fn percentage_is_monotone_along_the_ordering() {
        let order = ordering(&["p1", "p2", "p3", "p4", "p5", "p6", "p7"]);
        let mut last = 0;
        for id in &order {
            let sol = solution(SolutionStatus::Active, Some(id.as_str()));
            let pct = compute_progress(&sol, &order);
            assert!(pct >= last, "progress regressed at {id}");
            last = pct;
        }
        assert_eq!(last, 100);
    }
}
