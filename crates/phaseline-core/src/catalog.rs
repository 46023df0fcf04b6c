//! # Phase Catalog
//!
//! An immutable snapshot of the global phase catalog with an indexed
//! `phase_id -> position` lookup map built once at construction.
//!
//! The resolver and progress calculator take the catalog as an explicit
//! parameter; nothing in this module reads ambient state. Repeated
//! lookups go through the index instead of scanning the phase list.

use crate::types::{Phase, PhaseId};
use std::collections::BTreeMap;

/// Display label used for any phase whose id or stored name is "poc",
/// case-insensitively. Applied at lookup time, never stored.
const POC_DISPLAY_NAME: &str = "Proof of Concept";

/// Snapshot of the global phase catalog.
///
/// Catalog order is the order phases were supplied in; it is the
/// tie-breaker wherever two phases share a `sequence`. Duplicate
/// `phase_id`s are dropped (first occurrence wins).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PhaseCatalog {
    /// Phases in catalog order.
    phases: Vec<Phase>,
    /// Index: phase_id -> position in `phases`.
    index: BTreeMap<PhaseId, usize>,
}

impl PhaseCatalog {
    /// Build a catalog snapshot from a list of phases.
    ///
    /// The input order becomes the catalog order. A `phase_id` seen more
    /// than once keeps its first entry.
    #[must_use]
    pub fn new(phases: Vec<Phase>) -> Self {
        let mut deduped: Vec<Phase> = Vec::with_capacity(phases.len());
        let mut index = BTreeMap::new();
        for phase in phases {
            if index.contains_key(&phase.phase_id) {
                continue;
            }
            index.insert(phase.phase_id.clone(), deduped.len());
            deduped.push(phase);
        }
        Self {
            phases: deduped,
            index,
        }
    }

    /// Number of phases in the catalog.
    #[must_use]
    pub fn len(&self) -> usize {
        self.phases.len()
    }

    /// Whether the catalog is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.phases.is_empty()
    }

    /// Look up a phase by id.
    #[must_use]
    pub fn get(&self, id: &PhaseId) -> Option<&Phase> {
        self.index.get(id).map(|&pos| &self.phases[pos])
    }

    /// Position of a phase in catalog order, if present.
    #[must_use]
    pub fn position(&self, id: &PhaseId) -> Option<usize> {
        self.index.get(id).copied()
    }

    /// Whether the catalog contains a phase with the given id.
    #[must_use]
    pub fn contains(&self, id: &PhaseId) -> bool {
        self.index.contains_key(id)
    }

    /// Iterate phases in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = &Phase> {
        self.phases.iter()
    }

    /// Phases sorted by default `sequence`, ties broken by catalog order.
    #[must_use]
    pub fn ordered(&self) -> Vec<&Phase> {
        let mut out: Vec<&Phase> = self.phases.iter().collect();
        out.sort_by_key(|p| p.sequence);
        out
    }

    /// Distinct phase groups in the order their first phase appears in
    /// the sequence-ordered catalog. These are the kanban columns.
    #[must_use]
    pub fn groups(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for phase in self.ordered() {
            if !seen.contains(&phase.phase_group.as_str()) {
                seen.push(&phase.phase_group);
            }
        }
        seen
    }

    /// Display name for a phase id.
    ///
    /// Falls back to the raw id string when the phase is not in the
    /// catalog. A phase whose id or name is "poc" (case-insensitive)
    /// always displays as "Proof of Concept".
    #[must_use]
    pub fn display_name(&self, id: &PhaseId) -> String {
        let name = self
            .get(id)
            .map(|p| p.phase_name.as_str())
            .unwrap_or_else(|| id.as_str());
        if id.as_str().eq_ignore_ascii_case("poc") || name.eq_ignore_ascii_case("poc") {
            POC_DISPLAY_NAME.to_string()
        } else {
            name.to_string()
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> PhaseCatalog {
        PhaseCatalog::new(vec![
            Phase::new("p1", "Requirements", "Planning", 1),
            Phase::new("p2", "Design", "Development", 2),
            Phase::new("p3", "Build", "Development", 3),
        ])
    }

    #[test]
    fn index_lookup_matches_position() {
        let cat = catalog();
        assert_eq!(cat.position(&PhaseId::new("p2")), Some(1));
        assert_eq!(cat.get(&PhaseId::new("p3")).map(|p| p.sequence), Some(3));
        assert!(!cat.contains(&PhaseId::new("missing")));
    }

    #[test]
    fn duplicate_ids_keep_first_entry() {
        let cat = PhaseCatalog::new(vec![
            Phase::new("p1", "First", "A", 1),
            Phase::new("p1", "Second", "B", 9),
        ]);
        assert_eq!(cat.len(), 1);
        assert_eq!(cat.display_name(&PhaseId::new("p1")), "First");
    }

    #[test]
    fn ordered_breaks_sequence_ties_by_catalog_order() {
        let cat = PhaseCatalog::new(vec![
            Phase::new("b", "B", "G", 5),
            Phase::new("a", "A", "G", 5),
            Phase::new("c", "C", "G", 1),
        ]);
        let ids: Vec<&str> = cat.ordered().iter().map(|p| p.phase_id.as_str()).collect();
        assert_eq!(ids, vec!["c", "b", "a"]);
    }

    #[test]
    fn groups_follow_sequence_order() {
        let cat = catalog();
        assert_eq!(cat.groups(), vec!["Planning", "Development"]);
    }

    #[test]
    fn display_name_falls_back_to_raw_id() {
        let cat = catalog();
        assert_eq!(cat.display_name(&PhaseId::new("unknown")), "unknown");
    }

    #[test]
    fn poc_alias_applies_to_id_and_name_case_insensitively() {
        // Catalog stores a different name for the "poc" id on purpose.
        let cat = PhaseCatalog::new(vec![
            Phase::new("poc", "Pilot", "Planning", 1),
            Phase::new("x1", "POC", "Planning", 2),
        ]);
        assert_eq!(cat.display_name(&PhaseId::new("poc")), "Proof of Concept");
        assert_eq!(cat.display_name(&PhaseId::new("POC")), "Proof of Concept");
        // Stored name "POC" triggers the alias too.
        assert_eq!(cat.display_name(&PhaseId::new("x1")), "Proof of Concept");
    }
}
