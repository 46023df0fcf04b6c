//! # Built-in Phase Catalog
//!
//! The default lifecycle phases shipped with Phaseline, in order:
//! `(phase_id, phase_group, phase_name)`. Sequences are assigned
//! 1..=N from list position.

use crate::catalog::PhaseCatalog;
use crate::types::Phase;

/// Default phase list: `(phase_id, phase_group, phase_name)`.
pub const DEFAULT_PHASES: &[(&str, &str, &str)] = &[
    ("backlog", "Backlog", "Backlog"),
    ("requirements", "Planning", "Requirements"),
    ("controls_scoping", "Planning", "Controls & Scoping"),
    ("resourcing_timeline", "Planning", "Resourcing & Timeline"),
    ("poc", "Planning", "Proof of Concept"),
    ("delivery_success", "Planning", "Delivery and Success Criteria"),
    ("design", "Development", "Design"),
    ("build_docs", "Development", "Build & Documentation"),
    ("sandbox_deploy", "Development", "Sandbox Deployment"),
    ("socialization_signoff", "Development", "Socialization & Signoff"),
    ("deployment_prep", "Deployment & Testing", "Deployment Preparation"),
    ("dev_deploy", "Deployment & Testing", "DEV Deployment"),
    ("uat_deploy", "Deployment & Testing", "UAT Deployment"),
    ("prod_deploy", "Deployment & Testing", "PROD Deployment"),
    ("go_live", "Closure", "Go Live"),
    ("closure_signoff", "Closure", "Closure and Signoff"),
    ("handoff_offboarding", "Closure", "Handoff and offboarding"),
];

/// The built-in phases with sequences 1..=N in list order.
#[must_use]
pub fn default_phases() -> Vec<Phase> {
    DEFAULT_PHASES
        .iter()
        .enumerate()
        .map(|(i, (phase_id, phase_group, phase_name))| {
            Phase::new(*phase_id, *phase_name, *phase_group, i as i64 + 1)
        })
        .collect()
}

/// A catalog snapshot of the built-in phases.
#[must_use]
pub fn default_catalog() -> PhaseCatalog {
    PhaseCatalog::new(default_phases())
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PhaseId;

    #[test]
    fn seventeen_phases_with_contiguous_sequences() {
        let phases = default_phases();
        assert_eq!(phases.len(), 17);
        for (i, phase) in phases.iter().enumerate() {
            assert_eq!(phase.sequence, i as i64 + 1);
        }
        assert_eq!(phases[0].phase_id.as_str(), "backlog");
        assert_eq!(phases[16].phase_id.as_str(), "handoff_offboarding");
    }

    #[test]
    fn default_catalog_groups_are_pipeline_columns() {
        assert_eq!(
            default_catalog().groups(),
            vec![
                "Backlog",
                "Planning",
                "Development",
                "Deployment & Testing",
                "Closure"
            ]
        );
    }

    #[test]
    fn poc_phase_displays_its_alias() {
        let cat = default_catalog();
        assert_eq!(cat.display_name(&PhaseId::new("poc")), "Proof of Concept");
    }
}
