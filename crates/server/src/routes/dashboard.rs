//! Dashboard: project list plus project create/delete.

use axum::{
    Json, Router,
    extract::{Path, State},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use tracing::instrument;

use estate_pulse_core::{NewProject, ProjectId};

use crate::error::AppError;
use crate::portfolio::Command;
use crate::state::AppState;

use super::views::{CommandResponse, DashboardView};

/// Build the dashboard router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(dashboard))
        .route("/projects", post(create_project))
        .route("/projects/{id}/delete", post(delete_project))
}

/// Project list with unit and interaction counts.
#[instrument(skip(state))]
async fn dashboard(State(state): State<AppState>) -> Response {
    let portfolio = state.portfolio().await;
    Json(DashboardView::of(&portfolio)).into_response()
}

/// Create a project. Ignored unless the session is admin.
///
/// # Errors
///
/// Returns an error if the change cannot be persisted.
#[instrument(skip(state, draft), fields(name = %draft.name))]
async fn create_project(
    State(state): State<AppState>,
    Json(draft): Json<NewProject>,
) -> Result<Response, AppError> {
    let mut portfolio = state.portfolio().await;
    let outcome = portfolio.execute(Command::CreateProject(draft))?;
    Ok(Json(CommandResponse {
        outcome,
        view: DashboardView::of(&portfolio),
    })
    .into_response())
}

/// Delete a project with all its units and interactions.
///
/// # Errors
///
/// Returns an error if the change cannot be persisted.
#[instrument(skip(state))]
async fn delete_project(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    let id = ProjectId::new(id);
    let mut portfolio = state.portfolio().await;
    let outcome = portfolio.execute(Command::DeleteProject(id.clone()))?;
    if outcome.is_applied() {
        state.insights().forget(&id).await;
    }
    Ok(Json(CommandResponse {
        outcome,
        view: DashboardView::of(&portfolio),
    })
    .into_response())
}
