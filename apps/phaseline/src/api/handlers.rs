//! # API Endpoint Handlers
//!
//! This module implements the actual HTTP endpoint handlers.

use super::{
    AppState,
    types::{
        CreateSolutionRequest, ErrorResponse, HealthResponse, ProgressResponse, SetPhasesRequest,
        UpdateSolutionRequest, parse_solution_id,
    },
};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use phaseline_core::{Phase, PhaselineError, SolutionId};

// =============================================================================
// ERROR MAPPING
// =============================================================================

/// Map a core error onto an HTTP status with an `{error}` body.
fn error_response(error: &PhaselineError) -> Response {
    let status = match error {
        PhaselineError::SolutionNotFound(_) => StatusCode::NOT_FOUND,
        PhaselineError::UnknownPhase(_) | PhaselineError::InvalidInput(_) => {
            StatusCode::BAD_REQUEST
        }
        PhaselineError::SerializationError(_) | PhaselineError::IoError(_) => {
            tracing::error!("Store failure: {}", error);
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };
    (status, Json(ErrorResponse::new(error.to_string()))).into_response()
}

// =============================================================================
// HEALTH HANDLER
// =============================================================================

/// Health check endpoint.
pub async fn health_handler() -> impl IntoResponse {
    Json(HealthResponse::default())
}

// =============================================================================
// PHASE CATALOG HANDLERS
// =============================================================================

/// Full phase catalog, ordered by default sequence.
pub async fn list_phases_handler(State(state): State<AppState>) -> Response {
    let tracker = state.tracker.read().await;
    match tracker.catalog() {
        Ok(catalog) => {
            let phases: Vec<Phase> = catalog.ordered().into_iter().cloned().collect();
            (StatusCode::OK, Json(phases)).into_response()
        }
        Err(e) => error_response(&e),
    }
}

// =============================================================================
// SOLUTION HANDLERS
// =============================================================================

/// All solutions.
pub async fn list_solutions_handler(State(state): State<AppState>) -> Response {
    let tracker = state.tracker.read().await;
    match tracker.solutions() {
        Ok(solutions) => (StatusCode::OK, Json(solutions)).into_response(),
        Err(e) => error_response(&e),
    }
}

/// Create a solution under a server-assigned id.
pub async fn create_solution_handler(
    State(state): State<AppState>,
    Json(request): Json<CreateSolutionRequest>,
) -> Response {
    let solution_id = SolutionId::new(uuid::Uuid::new_v4().to_string());
    let solution = match request.into_solution(solution_id) {
        Ok(solution) => solution,
        Err(e) => return error_response(&e),
    };

    let mut tracker = state.tracker.write().await;
    match tracker.upsert_solution(solution.clone()) {
        Ok(()) => (StatusCode::CREATED, Json(solution)).into_response(),
        Err(e) => error_response(&e),
    }
}

/// One solution record, including `status` and `current_phase`.
pub async fn get_solution_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Response {
    let solution_id = match parse_solution_id(&id) {
        Ok(sid) => sid,
        Err(e) => return error_response(&e),
    };

    let tracker = state.tracker.read().await;
    match tracker.get_solution(&solution_id) {
        Ok(Some(solution)) => (StatusCode::OK, Json(solution)).into_response(),
        Ok(None) => error_response(&PhaselineError::SolutionNotFound(solution_id)),
        Err(e) => error_response(&e),
    }
}

/// Partial update of a solution. `"current_phase": null` clears the
/// phase; absent fields are untouched.
pub async fn update_solution_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<UpdateSolutionRequest>,
) -> Response {
    let solution_id = match parse_solution_id(&id) {
        Ok(sid) => sid,
        Err(e) => return error_response(&e),
    };

    let mut tracker = state.tracker.write().await;
    let mut solution = match tracker.get_solution(&solution_id) {
        Ok(Some(solution)) => solution,
        Ok(None) => return error_response(&PhaselineError::SolutionNotFound(solution_id)),
        Err(e) => return error_response(&e),
    };

    if let Err(e) = request.apply_to(&mut solution) {
        return error_response(&e);
    }
    match tracker.upsert_solution(solution.clone()) {
        Ok(()) => (StatusCode::OK, Json(solution)).into_response(),
        Err(e) => error_response(&e),
    }
}

// =============================================================================
// PHASE LINK HANDLERS
// =============================================================================

/// All links for one solution in effective-sequence order.
pub async fn get_solution_phases_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Response {
    let solution_id = match parse_solution_id(&id) {
        Ok(sid) => sid,
        Err(e) => return error_response(&e),
    };

    let tracker = state.tracker.read().await;
    match tracker.solution_phases(&solution_id) {
        Ok(links) => (StatusCode::OK, Json(links)).into_response(),
        Err(e) => error_response(&e),
    }
}

/// Apply a bulk enablement request and return the updated link list.
pub async fn set_solution_phases_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<SetPhasesRequest>,
) -> Response {
    let solution_id = match parse_solution_id(&id) {
        Ok(sid) => sid,
        Err(e) => return error_response(&e),
    };

    let mut tracker = state.tracker.write().await;
    match tracker.set_solution_phases(&solution_id, &request.phases) {
        Ok(links) => (StatusCode::OK, Json(links)).into_response(),
        Err(e) => error_response(&e),
    }
}

// =============================================================================
// PROGRESS HANDLER
// =============================================================================

/// Resolved ordering plus completion percentage for one solution.
pub async fn progress_handler(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    let solution_id = match parse_solution_id(&id) {
        Ok(sid) => sid,
        Err(e) => return error_response(&e),
    };

    let tracker = state.tracker.read().await;
    let ordered_phases = match tracker.ordered_phases(&solution_id) {
        Ok(ordered) => ordered,
        Err(e) => return error_response(&e),
    };
    match tracker.progress(&solution_id) {
        Ok(percent) => (
            StatusCode::OK,
            Json(ProgressResponse {
                solution_id,
                percent,
                ordered_phases,
            }),
        )
            .into_response(),
        Err(e) => error_response(&e),
    }
}

// =============================================================================
// DELETE HANDLER
// =============================================================================

/// Delete a solution and its links.
pub async fn delete_solution_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Response {
    let solution_id = match parse_solution_id(&id) {
        Ok(sid) => sid,
        Err(e) => return error_response(&e),
    };

    let mut tracker = state.tracker.write().await;
    match tracker.remove_solution(&solution_id) {
        Ok(true) => StatusCode::NO_CONTENT.into_response(),
        Ok(false) => error_response(&PhaselineError::SolutionNotFound(solution_id)),
        Err(e) => error_response(&e),
    }
}
