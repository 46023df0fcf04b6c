//! # Tracker
//!
//! High-level facade combining a storage backend with the pure phase
//! engine. The API server and CLI talk to a `Tracker`; the resolver
//! and progress calculator stay pure functions over the snapshots it
//! loads.
//!
//! ## Storage Backends
//!
//! - `InMemory`: volatile `MemoryStore` (fast, useful for tests)
//! - `Persistent`: `RedbStore` for disk-backed ACID storage

use crate::catalog::PhaseCatalog;
use crate::enablement::set_enablement;
use crate::ordering::resolve_order;
use crate::progress::compute_progress;
use crate::seed::default_phases;
use crate::store::{MemoryStore, PhaseStore, RedbStore};
use crate::types::{
    Phase, PhaseId, PhaseState, PhaselineError, Solution, SolutionId, SolutionPhaseLink,
};
use std::path::Path;

/// Storage backend for a Tracker.
#[derive(Debug)]
pub enum StorageBackend {
    /// In-memory store (fast, volatile).
    InMemory(MemoryStore),
    /// Disk-backed store using redb (ACID, persistent).
    Persistent(RedbStore),
}

impl Default for StorageBackend {
    fn default() -> Self {
        Self::InMemory(MemoryStore::new())
    }
}

// NOTE: StorageBackend does NOT implement Clone.
// RedbStore (database handle) cannot be safely cloned.

/// Store counts reported by `status`-style surfaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrackerCounts {
    pub phases: usize,
    pub solutions: usize,
    pub links: usize,
}

/// A Tracker combines a storage backend with the pure phase engine.
#[derive(Debug, Default)]
pub struct Tracker {
    backend: StorageBackend,
}

impl Tracker {
    /// Create a new tracker with volatile in-memory storage.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// Create a tracker over an existing in-memory store.
    #[must_use]
    pub fn with_store(store: MemoryStore) -> Self {
        Self {
            backend: StorageBackend::InMemory(store),
        }
    }

    /// Create a tracker with persistent redb storage.
    ///
    /// Opens or creates a database at the given path. All changes are
    /// persisted to disk automatically.
    pub fn with_redb(path: impl AsRef<Path>) -> Result<Self, PhaselineError> {
        Ok(Self {
            backend: StorageBackend::Persistent(RedbStore::open(path)?),
        })
    }

    /// Check if using persistent storage.
    #[must_use]
    pub fn is_persistent(&self) -> bool {
        matches!(self.backend, StorageBackend::Persistent(_))
    }

    fn store(&self) -> &dyn PhaseStore {
        match &self.backend {
            StorageBackend::InMemory(store) => store,
            StorageBackend::Persistent(store) => store,
        }
    }

    fn store_mut(&mut self) -> &mut dyn PhaseStore {
        match &mut self.backend {
            StorageBackend::InMemory(store) => store,
            StorageBackend::Persistent(store) => store,
        }
    }

    // =========================================================================
    // CATALOG
    // =========================================================================

    /// Snapshot the current phase catalog, indexed for lookups.
    pub fn catalog(&self) -> Result<PhaseCatalog, PhaselineError> {
        Ok(PhaseCatalog::new(self.store().phases()?))
    }

    /// Insert or replace a catalog phase.
    pub fn insert_phase(&mut self, phase: Phase) -> Result<(), PhaselineError> {
        self.store_mut().insert_phase(phase)
    }

    /// Idempotently seed the built-in phase catalog.
    ///
    /// Phases already present (by id) are left untouched. Returns the
    /// number of phases inserted.
    pub fn seed_default_catalog(&mut self) -> Result<usize, PhaselineError> {
        let mut inserted = 0;
        for phase in default_phases() {
            if self.store().get_phase(&phase.phase_id)?.is_none() {
                self.store_mut().insert_phase(phase)?;
                inserted += 1;
            }
        }
        Ok(inserted)
    }

    // =========================================================================
    // SOLUTIONS
    // =========================================================================

    /// Insert or replace a solution record.
    pub fn upsert_solution(&mut self, solution: Solution) -> Result<(), PhaselineError> {
        self.store_mut().upsert_solution(solution)
    }

    /// Look up a solution by id.
    pub fn get_solution(&self, id: &SolutionId) -> Result<Option<Solution>, PhaselineError> {
        self.store().get_solution(id)
    }

    /// All solutions, ordered by id.
    pub fn solutions(&self) -> Result<Vec<Solution>, PhaselineError> {
        self.store().solutions()
    }

    /// Remove a solution and its links. Returns whether it existed.
    pub fn remove_solution(&mut self, id: &SolutionId) -> Result<bool, PhaselineError> {
        self.store_mut().remove_solution(id)
    }

    fn require_solution(&self, id: &SolutionId) -> Result<Solution, PhaselineError> {
        self.get_solution(id)?
            .ok_or_else(|| PhaselineError::SolutionNotFound(id.clone()))
    }

    // =========================================================================
    // PHASE LINKS
    // =========================================================================

    /// All links for a solution, ordered the way the master table
    /// lists them: ascending by the coalesced sequence
    /// (`sequence_override` else catalog default), ties by catalog
    /// position. Disabled links are included.
    pub fn solution_phases(
        &self,
        id: &SolutionId,
    ) -> Result<Vec<SolutionPhaseLink>, PhaselineError> {
        self.require_solution(id)?;
        let catalog = self.catalog()?;
        let mut links = self.store().links_for(id)?;
        sort_by_effective_sequence(&catalog, &mut links);
        Ok(links)
    }

    /// Apply a bulk enablement request for one solution.
    ///
    /// Materializes one link per catalog phase (full desired state,
    /// phases omitted from `desired` become disabled), persists the
    /// set, and clears the solution's `current_phase` when it is no
    /// longer among the enabled phases. Returns the updated link list
    /// in effective-sequence order.
    pub fn set_solution_phases(
        &mut self,
        id: &SolutionId,
        desired: &[PhaseState],
    ) -> Result<Vec<SolutionPhaseLink>, PhaselineError> {
        let mut solution = self.require_solution(id)?;
        let catalog = self.catalog()?;

        let links = set_enablement(id, &catalog, desired)?;
        self.store_mut().put_links(id, links.clone())?;

        // Cross-entity consistency: a current phase that was just
        // disabled (or never linked) must not survive the update.
        if let Some(current) = &solution.current_phase {
            let still_enabled = links
                .iter()
                .any(|link| link.is_enabled && &link.phase_id == current);
            if !still_enabled {
                solution.current_phase = None;
                self.store_mut().upsert_solution(solution)?;
            }
        }

        self.solution_phases(id)
    }

    // =========================================================================
    // ORDERING & PROGRESS
    // =========================================================================

    /// Effective ordered sequence of enabled phase ids for a solution.
    pub fn ordered_phases(&self, id: &SolutionId) -> Result<Vec<PhaseId>, PhaselineError> {
        self.require_solution(id)?;
        let catalog = self.catalog()?;
        let links = self.store().links_for(id)?;
        Ok(resolve_order(&catalog, &links))
    }

    /// Completion percentage for a solution, 0..=100.
    pub fn progress(&self, id: &SolutionId) -> Result<u8, PhaselineError> {
        let solution = self.require_solution(id)?;
        let ordered = self.ordered_phases(id)?;
        Ok(compute_progress(&solution, &ordered))
    }

    // =========================================================================
    // METRICS
    // =========================================================================

    /// Record counts across the store.
    pub fn counts(&self) -> Result<TrackerCounts, PhaselineError> {
        Ok(TrackerCounts {
            phases: self.store().phase_count()?,
            solutions: self.store().solution_count()?,
            links: self.store().link_count()?,
        })
    }
}

/// Sort links ascending by `coalesce(sequence_override, catalog
/// sequence, 0)`, ties by catalog position then phase id.
fn sort_by_effective_sequence(catalog: &PhaseCatalog, links: &mut [SolutionPhaseLink]) {
    links.sort_by(|a, b| {
        let seq = |link: &SolutionPhaseLink| {
            link.sequence_override
                .or_else(|| catalog.get(&link.phase_id).map(|p| p.sequence))
                .unwrap_or(0)
        };
        let pos = |link: &SolutionPhaseLink| catalog.position(&link.phase_id).unwrap_or(usize::MAX);
        seq(a)
            .cmp(&seq(b))
            .then_with(|| pos(a).cmp(&pos(b)))
            .then_with(|| a.phase_id.cmp(&b.phase_id))
    });
}

// =============================================================================
// TESTS
// =============================================================================
