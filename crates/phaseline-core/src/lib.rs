//! # phaseline-core
//!
//! The deterministic phase engine for Phaseline - THE LOGIC.
//!
//! This crate implements the phase ordering and progress engine shared
//! by every surface of the tracker: the master table, the kanban
//! board, and the solution-detail form all consume the same resolved
//! ordering and percentage.
//!
//! ## Architectural Constraints
//!
//! The CORE:
//! - Computes over explicit snapshots passed in by the caller; the
//!   resolver and progress calculator are pure functions and never
//!   read ambient state
//! - Is deterministic: `BTreeMap` only, integer arithmetic only
//! - Degrades to safe defaults (progress 0, empty ordering, raw id as
//!   display name) instead of raising errors on partial snapshots
//! - Has NO async, NO network dependencies (pure Rust)

// =============================================================================
// MODULES
// =============================================================================

pub mod catalog;
pub mod enablement;
pub mod ordering;
pub mod progress;
pub mod seed;
pub mod store;
pub mod tracker;
pub mod types;

// =============================================================================
// RE-EXPORTS: Core Types (from types module)
// =============================================================================

pub use types::{
    MAX_ID_LENGTH, MAX_NAME_LENGTH, Phase, PhaseId, PhaseState, PhaselineError, Solution,
    SolutionId, SolutionPhaseLink, SolutionStatus,
};

// =============================================================================
// RE-EXPORTS: Phase Engine
// =============================================================================

pub use catalog::PhaseCatalog;
pub use enablement::set_enablement;
pub use ordering::resolve_order;
pub use progress::compute_progress;
pub use seed::{DEFAULT_PHASES, default_catalog, default_phases};

// =============================================================================
// RE-EXPORTS: Storage
// =============================================================================

pub use store::{MemoryStore, PhaseStore, RedbStore};
pub use tracker::{StorageBackend, Tracker, TrackerCounts};
