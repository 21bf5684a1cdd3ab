//! AI strategy insight for a project.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::get,
};
use tracing::instrument;

use estate_pulse_core::ProjectId;
use estate_pulse_core::insight::InsightStatus;

use crate::error::AppError;
use crate::state::AppState;

/// Build the insight router.
pub fn router() -> Router<AppState> {
    Router::new().route(
        "/project/{id}/insight",
        get(insight_status).post(request_insight),
    )
}

/// Start an insight request on a snapshot of the project.
///
/// Answers immediately with `pending`; poll `GET` for the result.
///
/// # Errors
///
/// Returns `NotFound` for an unknown project.
#[instrument(skip(state))]
async fn request_insight(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<(StatusCode, Json<InsightStatus>), AppError> {
    let id = ProjectId::new(id);
    let snapshot = state
        .portfolio()
        .await
        .project(&id)
        .cloned()
        .ok_or_else(|| AppError::NotFound(format!("project {id}")))?;

    // The spawned task is detached; its result lands in the tracker.
    let _task = state
        .insights()
        .request(state.insight_provider(), snapshot)
        .await;

    Ok((StatusCode::ACCEPTED, Json(InsightStatus::Pending)))
}

/// Latest insight status for the project.
///
/// # Errors
///
/// Returns `NotFound` if no insight was requested for this project.
#[instrument(skip(state))]
async fn insight_status(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<InsightStatus>, AppError> {
    let id = ProjectId::new(id);
    state
        .insights()
        .status(&id)
        .await
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("insight for project {id}")))
}
