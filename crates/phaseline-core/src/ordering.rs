//! # Ordering Resolver
//!
//! Computes the effective ordered sequence of enabled phases for one
//! solution, applying per-solution sequence overrides.
//!
//! This is a pure function over snapshots: same inputs, same output,
//! regardless of the input order of the links. It has no error
//! conditions and degrades gracefully on links whose phase is missing
//! from the catalog.

use crate::catalog::PhaseCatalog;
use crate::types::{PhaseId, SolutionPhaseLink};

/// Resolve the effective phase ordering for a solution.
///
/// Only links with `is_enabled` participate. The effective sequence of
/// a link is its `sequence_override` when present, else the catalog
/// phase's default `sequence`, else `0` when the phase is absent from
/// the catalog (defensive fallback; the catalog is expected to be a
/// superset of all referenced phase ids).
///
/// Sorting is ascending by effective sequence; ties are broken by the
/// phase's position in catalog order. Links referencing unknown phases
/// order after known ones on equal sequence, by phase id, so the output
/// is deterministic for identical inputs however the links are ordered.
///
/// Returns one entry per enabled link; empty if no phase is enabled.
#[must_use]
pub fn resolve_order(catalog: &PhaseCatalog, links: &[SolutionPhaseLink]) -> Vec<PhaseId> {
    let mut enabled: Vec<(i64, usize, &PhaseId)> = links
        .iter()
        .filter(|link| link.is_enabled)
        .map(|link| {
            let sequence = link
                .sequence_override
                .or_else(|| catalog.get(&link.phase_id).map(|p| p.sequence))
                .unwrap_or(0);
            let position = catalog.position(&link.phase_id).unwrap_or(usize::MAX);
            (sequence, position, &link.phase_id)
        })
        .collect();

    enabled.sort_by(|a, b| a.0.cmp(&b.0).then(a.1.cmp(&b.1)).then(a.2.cmp(b.2)));
    enabled.into_iter().map(|(_, _, id)| id.clone()).collect()
}

// =============================================================================
// TESTS
// =============================================================================
