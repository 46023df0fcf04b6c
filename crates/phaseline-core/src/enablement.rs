//! # Enablement Mutation (bulk set)
//!
//! Computes the full per-solution link set from a desired-state request.
//! The request carries the complete desired state, not a delta: every
//! catalog phase omitted from it becomes a disabled link. Applying the
//! same request twice yields the same link set.
//!
//! This function is pure; persisting the links and reconciling the
//! solution's `current_phase` against the new enabled set belongs to
//! the store layer.

use crate::catalog::PhaseCatalog;
use crate::types::{PhaseId, PhaseState, PhaselineError, SolutionId, SolutionPhaseLink};
use std::collections::BTreeMap;

/// Materialize the link set for one solution from the desired states.
///
/// Every phase in the catalog produces exactly one link, in catalog
/// order. Desired entries supply `is_enabled` and `sequence_override`;
/// phases omitted from `desired` are disabled. When the same phase
/// appears twice in `desired`, the last entry wins.
///
/// # Errors
///
/// Returns [`PhaselineError::UnknownPhase`] when a desired entry names
/// a phase absent from the catalog.
pub fn set_enablement(
    solution_id: &SolutionId,
    catalog: &PhaseCatalog,
    desired: &[PhaseState],
) -> Result<Vec<SolutionPhaseLink>, PhaselineError> {
    let mut by_id: BTreeMap<&PhaseId, &PhaseState> = BTreeMap::new();
    for state in desired {
        if !catalog.contains(&state.phase_id) {
            return Err(PhaselineError::UnknownPhase(state.phase_id.clone()));
        }
        by_id.insert(&state.phase_id, state);
    }

    Ok(catalog
        .iter()
        .map(|phase| match by_id.get(&phase.phase_id) {
            Some(state) => SolutionPhaseLink {
                solution_id: solution_id.clone(),
                phase_id: phase.phase_id.clone(),
                is_enabled: state.is_enabled,
                sequence_override: state.sequence_override,
            },
            None => SolutionPhaseLink::disabled(solution_id.clone(), phase.phase_id.clone()),
        })
        .collect())
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Phase;

    fn catalog() -> PhaseCatalog {
        PhaseCatalog::new(vec![
            Phase::new("p1", "One", "G", 1),
            Phase::new("p2", "Two", "G", 2),
            Phase::new("p3", "Three", "G", 3),
        ])
    }

    fn sid() -> SolutionId {
        SolutionId::new("s1")
    }

    #[test]
    fn omitted_phases_become_disabled_links() {
        let desired = vec![PhaseState::enabled("p2")];
        let links = set_enablement(&sid(), &catalog(), &desired).expect("set");

        assert_eq!(links.len(), 3);
        assert!(!links[0].is_enabled);
        assert!(links[1].is_enabled);
        assert!(!links[2].is_enabled);
        assert!(links.iter().all(|l| l.solution_id == sid()));
    }

    #[test]
    fn override_is_carried_through() {
        let desired = vec![PhaseState {
            phase_id: PhaseId::new("p1"),
            is_enabled: true,
            sequence_override: Some(9),
        }];
        let links = set_enablement(&sid(), &catalog(), &desired).expect("set");
        assert_eq!(links[0].sequence_override, Some(9));
        assert_eq!(links[1].sequence_override, None);
    }

    #[test]
    fn applying_twice_yields_the_same_link_set() {
        let desired = vec![PhaseState::enabled("p1"), PhaseState::enabled("p3")];
        let first = set_enablement(&sid(), &catalog(), &desired).expect("set");
        let second = set_enablement(&sid(), &catalog(), &desired).expect("set");
        assert_eq!(first, second);
    }

    #[test]
    fn unknown_phase_is_rejected() {
        let desired = vec![PhaseState::enabled("ghost")];
        let err = set_enablement(&sid(), &catalog(), &desired).expect_err("must reject");
        assert!(matches!(err, PhaselineError::UnknownPhase(id) if id.as_str() == "ghost"));
    }

    #[test]
    fn duplicate_desired_entries_last_wins() {
        let desired = vec![
            PhaseState::enabled("p1"),
            PhaseState {
                phase_id: PhaseId::new("p1"),
                is_enabled: false,
                sequence_override: None,
            },
        ];
        let links = set_enablement(&sid(), &catalog(), &desired).expect("set");
        assert!(!links[0].is_enabled);
    }

    #[test]
    fn empty_desired_state_disables_everything() {
        let links = set_enablement(&sid(), &catalog(), &[]).expect("set");
        assert_eq!(links.len(), 3);
        assert!(links.iter().all(|l| !l.is_enabled));
    }
}
