//! Wire-shape tests for the API JSON types.
//!
//! The browser client and the CSV tooling both consume these payloads;
//! field and variant names must stay stable.

#![allow(clippy::unwrap_used, clippy::panic)]

use phaseline::api::{CreateSolutionRequest, ProgressResponse, SetPhasesRequest};
use phaseline_core::{Phase, PhaseId, SolutionId, SolutionPhaseLink, SolutionStatus};
use serde_json::json;

#[test]
fn set_phases_request_parses_the_documented_payload() {
    let request: SetPhasesRequest = serde_json::from_value(json!({
        "phases": [
            { "phase_id": "backlog", "is_enabled": true },
            { "phase_id": "requirements", "is_enabled": false, "sequence_override": 2 },
        ]
    }))
    .unwrap();

    assert_eq!(request.phases.len(), 2);
    assert_eq!(request.phases[0].phase_id.as_str(), "backlog");
    assert_eq!(request.phases[0].sequence_override, None);
    assert!(!request.phases[1].is_enabled);
    assert_eq!(request.phases[1].sequence_override, Some(2));
}

#[test]
fn create_request_accepts_snake_case_status() {
    let request: CreateSolutionRequest = serde_json::from_value(json!({
        "solution_name": "Access Controls",
        "status": "on_hold",
        "current_phase": "poc"
    }))
    .unwrap();

    assert_eq!(request.status, Some(SolutionStatus::OnHold));
    assert_eq!(request.current_phase, Some(PhaseId::new("poc")));
}

#[test]
fn solution_status_round_trips_all_variants() {
    for (status, wire) in [
        (SolutionStatus::NotStarted, "not_started"),
        (SolutionStatus::Active, "active"),
        (SolutionStatus::OnHold, "on_hold"),
        (SolutionStatus::Complete, "complete"),
        (SolutionStatus::Abandoned, "abandoned"),
    ] {
        let serialized = serde_json::to_value(status).unwrap();
        assert_eq!(serialized, json!(wire));
        let parsed: SolutionStatus = serde_json::from_value(serialized).unwrap();
        assert_eq!(parsed, status);
    }
}

#[test]
fn phase_serializes_expected_field_names() {
    let phase = Phase::new("backlog", "Backlog", "Backlog", 1);
    let value = serde_json::to_value(&phase).unwrap();

    assert_eq!(
        value,
        json!({
            "phase_id": "backlog",
            "phase_name": "Backlog",
            "phase_group": "Backlog",
            "sequence": 1
        })
    );
}

#[test]
fn link_serializes_expected_field_names() {
    let link = SolutionPhaseLink {
        solution_id: SolutionId::new("s1"),
        phase_id: PhaseId::new("design"),
        is_enabled: true,
        sequence_override: Some(4),
    };
    let value = serde_json::to_value(&link).unwrap();

    assert_eq!(
        value,
        json!({
            "solution_id": "s1",
            "phase_id": "design",
            "is_enabled": true,
            "sequence_override": 4
        })
    );
}

#[test]
fn progress_response_round_trips() {
    let response = ProgressResponse {
        solution_id: SolutionId::new("s1"),
        percent: 75,
        ordered_phases: vec![PhaseId::new("backlog"), PhaseId::new("design")],
    };

    let value = serde_json::to_value(&response).unwrap();
    assert_eq!(value["percent"], json!(75));
    assert_eq!(value["ordered_phases"], json!(["backlog", "design"]));

    let parsed: ProgressResponse = serde_json::from_value(value).unwrap();
    assert_eq!(parsed.percent, response.percent);
    assert_eq!(parsed.ordered_phases, response.ordered_phases);
}
