//! # API Request/Response Types
//!
//! This module defines the JSON structures for the HTTP API. Boundary
//! validation (name lengths, id lengths) happens here, before data
//! reaches the core engine.

use phaseline_core::{
    MAX_ID_LENGTH, MAX_NAME_LENGTH, PhaseId, PhaseState, PhaselineError, Solution, SolutionId,
    SolutionStatus,
};
use serde::{Deserialize, Deserializer, Serialize};

// =============================================================================
// HEALTH RESPONSE
// =============================================================================

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

impl Default for HealthResponse {
    fn default() -> Self {
        Self {
            status: "ok".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

// =============================================================================
// ERROR RESPONSE
// =============================================================================

/// Error payload returned with every non-2xx status.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(msg: impl Into<String>) -> Self {
        Self { error: msg.into() }
    }
}

// =============================================================================
// SOLUTION REQUESTS
// =============================================================================

/// Parse and validate a solution id from a request path.
pub fn parse_solution_id(raw: &str) -> Result<SolutionId, PhaselineError> {
    if raw.is_empty() {
        return Err(PhaselineError::InvalidInput(
            "solution id must not be empty".to_string(),
        ));
    }
    if raw.len() > MAX_ID_LENGTH {
        return Err(PhaselineError::InvalidInput(format!(
            "solution id length {} exceeds maximum {} bytes",
            raw.len(),
            MAX_ID_LENGTH
        )));
    }
    Ok(SolutionId::new(raw))
}

fn validate_name(name: &str) -> Result<String, PhaselineError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(PhaselineError::InvalidInput(
            "solution_name must not be empty".to_string(),
        ));
    }
    if trimmed.len() > MAX_NAME_LENGTH {
        return Err(PhaselineError::InvalidInput(format!(
            "solution_name length {} exceeds maximum {} bytes",
            trimmed.len(),
            MAX_NAME_LENGTH
        )));
    }
    Ok(trimmed.to_string())
}

/// Body of `POST /solutions`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateSolutionRequest {
    pub solution_name: String,
    #[serde(default)]
    pub status: Option<SolutionStatus>,
    #[serde(default)]
    pub current_phase: Option<PhaseId>,
}

impl CreateSolutionRequest {
    /// Convert to a Solution under a server-assigned id, validating
    /// fields at the API boundary.
    pub fn into_solution(self, solution_id: SolutionId) -> Result<Solution, PhaselineError> {
        Ok(Solution {
            solution_id,
            solution_name: validate_name(&self.solution_name)?,
            status: self.status.unwrap_or_default(),
            current_phase: self.current_phase,
        })
    }
}

/// Body of `PATCH /solutions/{id}`. Absent fields are left untouched;
/// an explicit `"current_phase": null` clears the phase.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateSolutionRequest {
    #[serde(default)]
    pub solution_name: Option<String>,
    #[serde(default)]
    pub status: Option<SolutionStatus>,
    #[serde(default, deserialize_with = "double_option")]
    pub current_phase: Option<Option<PhaseId>>,
}

/// Distinguishes an absent field (`None`) from an explicit JSON null
/// (`Some(None)`).
fn double_option<'de, D>(deserializer: D) -> Result<Option<Option<PhaseId>>, D::Error>
where
    D: Deserializer<'de>,
{
    Deserialize::deserialize(deserializer).map(Some)
}

impl UpdateSolutionRequest {
    /// Apply the patch to an existing solution record.
    pub fn apply_to(&self, solution: &mut Solution) -> Result<(), PhaselineError> {
        if let Some(name) = &self.solution_name {
            solution.solution_name = validate_name(name)?;
        }
        if let Some(status) = self.status {
            solution.status = status;
        }
        if let Some(current_phase) = &self.current_phase {
            solution.current_phase = current_phase.clone();
        }
        Ok(())
    }
}

// =============================================================================
// PHASE ENABLEMENT REQUEST
// =============================================================================

/// Body of `POST /solutions/{id}/phases`:
/// `{ "phases": [{ "phase_id": "...", "is_enabled": true, "sequence_override": 2 }] }`
///
/// This is the full desired state, not a delta; catalog phases omitted
/// from the list are disabled.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SetPhasesRequest {
    pub phases: Vec<PhaseState>,
}

// =============================================================================
// PROGRESS RESPONSE
// =============================================================================

/// Response of `GET /solutions/{id}/progress`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressResponse {
    pub solution_id: SolutionId,
    /// Completion percentage, 0..=100.
    pub percent: u8,
    /// Effective ordered sequence of enabled phase ids.
    pub ordered_phases: Vec<PhaseId>,
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_request_rejects_blank_name() {
        let request = CreateSolutionRequest {
            solution_name: "   ".to_string(),
            status: None,
            current_phase: None,
        };
        let err = request
            .into_solution(SolutionId::new("s1"))
            .expect_err("must reject");
        assert!(matches!(err, PhaselineError::InvalidInput(_)));
    }

    #[test]
    fn create_request_defaults_status() {
        let request: CreateSolutionRequest =
            serde_json::from_str(r#"{"solution_name":"Access Controls"}"#).expect("parse");
        let solution = request
            .into_solution(SolutionId::new("s1"))
            .expect("convert");
        assert_eq!(solution.status, SolutionStatus::NotStarted);
        assert!(solution.current_phase.is_none());
    }

    #[test]
    fn patch_distinguishes_null_from_absent() {
        let absent: UpdateSolutionRequest =
            serde_json::from_str(r#"{"status":"active"}"#).expect("parse");
        assert!(absent.current_phase.is_none());

        let null: UpdateSolutionRequest =
            serde_json::from_str(r#"{"current_phase":null}"#).expect("parse");
        assert_eq!(null.current_phase, Some(None));

        let set: UpdateSolutionRequest =
            serde_json::from_str(r#"{"current_phase":"design"}"#).expect("parse");
        assert_eq!(set.current_phase, Some(Some(PhaseId::new("design"))));
    }

    #[test]
    fn solution_id_length_is_bounded() {
        assert!(parse_solution_id("s1").is_ok());
        assert!(parse_solution_id("").is_err());
        assert!(parse_solution_id(&"x".repeat(MAX_ID_LENGTH + 1)).is_err());
    }
}
