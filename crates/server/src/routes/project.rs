//! Project detail view and the unit/interaction commands issued from it.

use axum::{
    Json, Router,
    extract::{Path, State},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::Deserialize;
use tracing::instrument;

use estate_pulse_core::{
    EnquiryStatus, InstrumentId, InteractionId, NewInstrument, NewInteraction, ProjectId,
};

use crate::error::AppError;
use crate::portfolio::{Command, Outcome, Portfolio};
use crate::state::AppState;

use super::views::{CommandResponse, ProjectDetailView};

/// Build the project detail router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/project/{id}", get(project_detail))
        .route("/project/{id}/units", post(add_unit))
        .route(
            "/project/{id}/units/{unit}/interactions",
            post(log_interaction),
        )
        .route(
            "/project/{id}/units/{unit}/interactions/{interaction}/status",
            post(set_interaction_status),
        )
        .route(
            "/project/{id}/units/{unit}/interactions/{interaction}/delete",
            post(delete_interaction),
        )
}

/// Request for changing an interaction's status.
#[derive(Debug, Deserialize)]
pub struct StatusUpdate {
    pub status: EnquiryStatus,
}

fn detail_response(
    portfolio: &Portfolio,
    id: &ProjectId,
    outcome: Option<Outcome>,
) -> Result<Response, AppError> {
    let project = portfolio
        .project(id)
        .ok_or_else(|| AppError::NotFound(format!("project {id}")))?;
    let view = ProjectDetailView::of(portfolio, project);
    Ok(match outcome {
        Some(outcome) => Json(CommandResponse { outcome, view }).into_response(),
        None => Json(view).into_response(),
    })
}

/// Project header, statistics, and units with their current status.
///
/// # Errors
///
/// Returns `NotFound` for an unknown project.
#[instrument(skip(state))]
async fn project_detail(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    let portfolio = state.portfolio().await;
    detail_response(&portfolio, &ProjectId::new(id), None)
}

/// Run `command` and answer with the refreshed detail view of `id`.
async fn execute_for_project(
    state: &AppState,
    id: &ProjectId,
    command: Command,
) -> Result<Response, AppError> {
    let mut portfolio = state.portfolio().await;
    if portfolio.project(id).is_none() {
        return Err(AppError::NotFound(format!("project {id}")));
    }
    let outcome = portfolio.execute(command)?;
    detail_response(&portfolio, id, Some(outcome))
}

/// Append a unit. Ignored unless the session is admin.
///
/// # Errors
///
/// Returns `NotFound` for an unknown project, or an error if the change
/// cannot be persisted.
#[instrument(skip(state, draft))]
async fn add_unit(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(draft): Json<NewInstrument>,
) -> Result<Response, AppError> {
    let project_id = ProjectId::new(id);
    let command = Command::AddInstrument {
        project_id: project_id.clone(),
        draft,
    };
    execute_for_project(&state, &project_id, command).await
}

/// Log an enquiry against a unit. Open to both roles.
///
/// # Errors
///
/// Returns `NotFound` for an unknown project, or an error if the change
/// cannot be persisted.
#[instrument(skip(state, draft))]
async fn log_interaction(
    State(state): State<AppState>,
    Path((id, unit)): Path<(String, String)>,
    Json(draft): Json<NewInteraction>,
) -> Result<Response, AppError> {
    let project_id = ProjectId::new(id);
    let command = Command::LogInteraction {
        project_id: project_id.clone(),
        instrument_id: InstrumentId::new(unit),
        draft,
    };
    execute_for_project(&state, &project_id, command).await
}

/// Move an interaction to any status. Ignored unless the session is admin.
///
/// # Errors
///
/// Returns `NotFound` for an unknown project, or an error if the change
/// cannot be persisted.
#[instrument(skip(state, body), fields(status = %body.status))]
async fn set_interaction_status(
    State(state): State<AppState>,
    Path((id, unit, interaction)): Path<(String, String, String)>,
    Json(body): Json<StatusUpdate>,
) -> Result<Response, AppError> {
    let project_id = ProjectId::new(id);
    let command = Command::SetInteractionStatus {
        project_id: project_id.clone(),
        instrument_id: InstrumentId::new(unit),
        interaction_id: InteractionId::new(interaction),
        status: body.status,
    };
    execute_for_project(&state, &project_id, command).await
}

/// Remove an interaction. Ignored unless the session is admin.
///
/// # Errors
///
/// Returns `NotFound` for an unknown project, or an error if the change
/// cannot be persisted.
#[instrument(skip(state))]
async fn delete_interaction(
    State(state): State<AppState>,
    Path((id, unit, interaction)): Path<(String, String, String)>,
) -> Result<Response, AppError> {
    let project_id = ProjectId::new(id);
    let command = Command::DeleteInteraction {
        project_id: project_id.clone(),
        instrument_id: InstrumentId::new(unit),
        interaction_id: InteractionId::new(interaction),
    };
    execute_for_project(&state, &project_id, command).await
}
