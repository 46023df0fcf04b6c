//! # Core Type Definitions
//!
//! This module contains all core types for the Phaseline phase engine:
//! - Identifiers (`PhaseId`, `SolutionId`)
//! - Catalog and link records (`Phase`, `SolutionPhaseLink`, `PhaseState`)
//! - Solution record (`Solution`, `SolutionStatus`)
//! - Error types (`PhaselineError`)
//!
//! ## Determinism Guarantees
//!
//! All types in this module:
//! - Use integer arithmetic only (no floating-point)
//! - Implement `Ord` where used as `BTreeMap` keys for deterministic ordering
//! - Serialize with stable snake_case field and variant names

use serde::{Deserialize, Serialize};
use thiserror::Error;

// =============================================================================
// LIMITS (enforced at the API boundary)
// =============================================================================

/// Maximum byte length of a display name (solution or phase).
pub const MAX_NAME_LENGTH: usize = 256;

/// Maximum byte length of an identifier string.
pub const MAX_ID_LENGTH: usize = 64;

// =============================================================================
// IDENTIFIERS
// =============================================================================

/// Unique identifier of a phase in the global catalog.
/// Immutable once the phase is created.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PhaseId(pub String);

impl PhaseId {
    /// Create a new phase id from a string.
    #[must_use]
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// Get the id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PhaseId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Unique identifier of a solution.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SolutionId(pub String);

impl SolutionId {
    /// Create a new solution id from a string.
    #[must_use]
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// Get the id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SolutionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

// =============================================================================
// PHASE (catalog entry)
// =============================================================================

/// One lifecycle stage available system-wide.
///
/// `sequence` is the default ordering among all phases. It is not
/// necessarily contiguous or unique; ties are broken by catalog order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Phase {
    /// Unique identifier, immutable once created.
    pub phase_id: PhaseId,
    /// Display label.
    pub phase_name: String,
    /// Grouping key used for kanban columns (e.g. "Planning").
    pub phase_group: String,
    /// Default integer ordering among all phases.
    pub sequence: i64,
}

impl Phase {
    /// Create a new catalog phase.
    #[must_use]
    pub fn new(
        phase_id: impl Into<String>,
        phase_name: impl Into<String>,
        phase_group: impl Into<String>,
        sequence: i64,
    ) -> Self {
        Self {
            phase_id: PhaseId::new(phase_id),
            phase_name: phase_name.into(),
            phase_group: phase_group.into(),
            sequence,
        }
    }
}

// =============================================================================
// SOLUTION PHASE LINK
// =============================================================================

/// Whether a catalog phase applies to a given solution.
///
/// Absence of a link is equivalent to a disabled link. Disabled phases
/// are excluded from ordering and progress.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolutionPhaseLink {
    pub solution_id: SolutionId,
    pub phase_id: PhaseId,
    /// Disabled links are excluded from ordering and progress.
    pub is_enabled: bool,
    /// When present, supersedes the phase's default `sequence` for this
    /// solution only.
    pub sequence_override: Option<i64>,
}

impl SolutionPhaseLink {
    /// Create a link in its default (disabled, no override) state.
    #[must_use]
    pub fn disabled(solution_id: SolutionId, phase_id: PhaseId) -> Self {
        Self {
            solution_id,
            phase_id,
            is_enabled: false,
            sequence_override: None,
        }
    }
}

/// Desired enablement state for one phase, as submitted by a bulk update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhaseState {
    pub phase_id: PhaseId,
    pub is_enabled: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sequence_override: Option<i64>,
}

impl PhaseState {
    /// Create an enabled desired state without an override.
    #[must_use]
    pub fn enabled(phase_id: impl Into<String>) -> Self {
        Self {
            phase_id: PhaseId::new(phase_id),
            is_enabled: true,
            sequence_override: None,
        }
    }
}

// =============================================================================
// SOLUTION
// =============================================================================

/// Lifecycle status of a solution.
///
/// `Complete` is authoritative for progress computation: a complete
/// solution is always at 100% regardless of phase data.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "snake_case")]
pub enum SolutionStatus {
    #[default]
    NotStarted,
    Active,
    OnHold,
    Complete,
    Abandoned,
}

impl SolutionStatus {
    /// Wire name of the status (snake_case, as serialized).
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            SolutionStatus::NotStarted => "not_started",
            SolutionStatus::Active => "active",
            SolutionStatus::OnHold => "on_hold",
            SolutionStatus::Complete => "complete",
            SolutionStatus::Abandoned => "abandoned",
        }
    }

    /// Human-readable label ("on_hold" -> "On Hold").
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            SolutionStatus::NotStarted => "Not Started",
            SolutionStatus::Active => "Active",
            SolutionStatus::OnHold => "On Hold",
            SolutionStatus::Complete => "Complete",
            SolutionStatus::Abandoned => "Abandoned",
        }
    }
}

impl std::fmt::Display for SolutionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A tracked solution.
///
/// The ordering resolver and progress calculator consume `status` and
/// `current_phase`; they never mutate the record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Solution {
    pub solution_id: SolutionId,
    pub solution_name: String,
    pub status: SolutionStatus,
    /// The phase the solution is presently in, if any.
    pub current_phase: Option<PhaseId>,
}

impl Solution {
    /// Create a new solution in its default state.
    #[must_use]
    pub fn new(solution_id: impl Into<String>, solution_name: impl Into<String>) -> Self {
        Self {
            solution_id: SolutionId::new(solution_id),
            solution_name: solution_name.into(),
            status: SolutionStatus::default(),
            current_phase: None,
        }
    }
}

// =============================================================================
// ERROR TYPES
// =============================================================================

/// Errors that can occur in the Phaseline system.
///
/// The pure engine functions (`resolve_order`, `compute_progress`,
/// `display_name`) never fail; they degrade to safe defaults instead.
/// Errors arise only from mutations and from the backing store.
#[derive(Debug, Error)]
pub enum PhaselineError {
    /// The referenced solution does not exist (or was deleted).
    #[error("Solution not found: {0}")]
    SolutionNotFound(SolutionId),

    /// A bulk enablement request referenced a phase absent from the catalog.
    #[error("Phase {0} does not exist")]
    UnknownPhase(PhaseId),

    /// A request failed boundary validation.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A serialization or deserialization error occurred.
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// An I/O error occurred in the backing store.
    #[error("I/O error: {0}")]
    IoError(String),
}

// =============================================================================
// TESTS
// =============================================================================
