//! # Phase Store
//!
//! Persistence for the phase catalog, solutions, and per-solution
//! links. Two backends implement the [`PhaseStore`] trait:
//!
//! - [`MemoryStore`]: `BTreeMap`-backed, fast, volatile
//! - [`RedbStore`]: disk-backed ACID storage via redb
//!
//! All data structures use `BTreeMap` for deterministic ordering.

pub mod redb_store;

pub use redb_store::RedbStore;

use crate::types::{Phase, PhaseId, PhaselineError, Solution, SolutionId, SolutionPhaseLink};
use std::collections::BTreeMap;

// =============================================================================
// PHASESTORE TRAIT
// =============================================================================

/// Storage operations over the tracker's three record kinds.
///
/// All fallible operations return `Result<T, PhaselineError>` to
/// support both in-memory and persistent backends uniformly.
pub trait PhaseStore {
    /// Insert or replace a catalog phase.
    fn insert_phase(&mut self, phase: Phase) -> Result<(), PhaselineError>;

    /// Look up a catalog phase by id.
    fn get_phase(&self, id: &PhaseId) -> Result<Option<Phase>, PhaselineError>;

    /// All catalog phases in catalog order: ascending `(sequence,
    /// phase_id)`. This is the order `PhaseCatalog` snapshots are
    /// built from, so it is also the ordering tie-breaker.
    fn phases(&self) -> Result<Vec<Phase>, PhaselineError>;

    /// Number of catalog phases.
    fn phase_count(&self) -> Result<usize, PhaselineError>;

    /// Insert or replace a solution record.
    fn upsert_solution(&mut self, solution: Solution) -> Result<(), PhaselineError>;

    /// Look up a solution by id.
    fn get_solution(&self, id: &SolutionId) -> Result<Option<Solution>, PhaselineError>;

    /// All solutions, ordered by id.
    fn solutions(&self) -> Result<Vec<Solution>, PhaselineError>;

    /// Remove a solution and its links. Returns whether it existed.
    fn remove_solution(&mut self, id: &SolutionId) -> Result<bool, PhaselineError>;

    /// Number of solutions.
    fn solution_count(&self) -> Result<usize, PhaselineError>;

    /// All links for one solution, ordered by phase id. Callers apply
    /// the effective ordering themselves.
    fn links_for(&self, solution_id: &SolutionId)
    -> Result<Vec<SolutionPhaseLink>, PhaselineError>;

    /// Replace the full link set for one solution.
    fn put_links(
        &mut self,
        solution_id: &SolutionId,
        links: Vec<SolutionPhaseLink>,
    ) -> Result<(), PhaselineError>;

    /// Total number of links across all solutions.
    fn link_count(&self) -> Result<usize, PhaselineError>;
}

/// Sort phases into catalog order: ascending `(sequence, phase_id)`.
pub(crate) fn sort_catalog(phases: &mut [Phase]) {
    phases.sort_by(|a, b| {
        a.sequence
            .cmp(&b.sequence)
            .then_with(|| a.phase_id.cmp(&b.phase_id))
    });
}

// =============================================================================
// MEMORY STORE
// =============================================================================

/// Volatile in-memory store.
///
/// Uses `BTreeMap` exclusively for deterministic iteration. No
/// `HashMap` allowed.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    phases: BTreeMap<PhaseId, Phase>,
    solutions: BTreeMap<SolutionId, Solution>,
    links: BTreeMap<SolutionId, BTreeMap<PhaseId, SolutionPhaseLink>>,
}

impl MemoryStore {
    /// Create a new empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl PhaseStore for MemoryStore {
    fn insert_phase(&mut self, phase: Phase) -> Result<(), PhaselineError> {
        self.phases.insert(phase.phase_id.clone(), phase);
        Ok(())
    }

    fn get_phase(&self, id: &PhaseId) -> Result<Option<Phase>, PhaselineError> {
        Ok(self.phases.get(id).cloned())
    }

    fn phases(&self) -> Result<Vec<Phase>, PhaselineError> {
        let mut out: Vec<Phase> = self.phases.values().cloned().collect();
        sort_catalog(&mut out);
        Ok(out)
    }

    fn phase_count(&self) -> Result<usize, PhaselineError> {
        Ok(self.phases.len())
    }

    fn upsert_solution(&mut self, solution: Solution) -> Result<(), PhaselineError> {
        self.solutions.insert(solution.solution_id.clone(), solution);
        Ok(())
    }

    fn get_solution(&self, id: &SolutionId) -> Result<Option<Solution>, PhaselineError> {
        Ok(self.solutions.get(id).cloned())
    }

    fn solutions(&self) -> Result<Vec<Solution>, PhaselineError> {
        Ok(self.solutions.values().cloned().collect())
    }

    fn remove_solution(&mut self, id: &SolutionId) -> Result<bool, PhaselineError> {
        self.links.remove(id);
        Ok(self.solutions.remove(id).is_some())
    }

    fn solution_count(&self) -> Result<usize, PhaselineError> {
        Ok(self.solutions.len())
    }

    fn links_for(
        &self,
        solution_id: &SolutionId,
    ) -> Result<Vec<SolutionPhaseLink>, PhaselineError> {
        Ok(self
            .links
            .get(solution_id)
            .map(|by_phase| by_phase.values().cloned().collect())
            .unwrap_or_default())
    }

    fn put_links(
        &mut self,
        solution_id: &SolutionId,
        links: Vec<SolutionPhaseLink>,
    ) -> Result<(), PhaselineError> {
        let by_phase: BTreeMap<PhaseId, SolutionPhaseLink> = links
            .into_iter()
            .map(|link| (link.phase_id.clone(), link))
            .collect();
        self.links.insert(solution_id.clone(), by_phase);
        Ok(())
    }

    fn link_count(&self) -> Result<usize, PhaselineError> {
        Ok(self.links.values().map(BTreeMap::len).sum())
    }
}

// =============================================================================
// TESTS
// =============================================================================
