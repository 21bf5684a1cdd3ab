//! Unit enrollment: pick a project, pick one of its units, log an enquiry.

use axum::{
    Json, Router,
    extract::{Query, State},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use estate_pulse_core::ProjectId;

use crate::error::AppError;
use crate::portfolio::{Enrollment, Outcome};
use crate::state::AppState;

use super::views::UnitOption;

/// Build the enrollment router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/enrollment", post(enroll))
        .route("/enrollment/units", get(available_units))
}

/// Query for the dependent unit selector.
#[derive(Debug, Deserialize)]
pub struct UnitsQuery {
    #[serde(default)]
    pub project_id: Option<String>,
}

/// Response to an enrollment submission.
#[derive(Debug, Serialize)]
pub struct EnrollmentResponse {
    pub outcome: Outcome,
}

/// Units of the selected project; empty when none is selected.
#[instrument(skip(state))]
async fn available_units(
    State(state): State<AppState>,
    Query(query): Query<UnitsQuery>,
) -> Response {
    let project_id = query
        .project_id
        .filter(|id| !id.is_empty())
        .map(ProjectId::new);
    let portfolio = state.portfolio().await;
    let units: Vec<UnitOption<'_>> = portfolio
        .available_units(project_id.as_ref())
        .iter()
        .map(UnitOption::from)
        .collect();
    Json(units).into_response()
}

/// Submit an enrollment. Ignored unless both project and unit are chosen.
///
/// # Errors
///
/// Returns an error if the change cannot be persisted.
#[instrument(skip_all)]
async fn enroll(
    State(state): State<AppState>,
    Json(form): Json<Enrollment>,
) -> Result<Json<EnrollmentResponse>, AppError> {
    let Some(command) = form.into_command() else {
        tracing::debug!("Enrollment without project or unit selection");
        return Ok(Json(EnrollmentResponse {
            outcome: Outcome::Ignored,
        }));
    };
    let outcome = state.portfolio().await.execute(command)?;
    Ok(Json(EnrollmentResponse { outcome }))
}
