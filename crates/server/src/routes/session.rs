//! Session identity and role switch.

use axum::{
    Json, Router,
    extract::State,
    routing::{get, post},
};
use tracing::instrument;

use estate_pulse_core::User;

use crate::error::AppError;
use crate::portfolio::Command;
use crate::state::AppState;

/// Build the session router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/session", get(current_user))
        .route("/session/role", post(toggle_role))
}

async fn current_user(State(state): State<AppState>) -> Json<User> {
    Json(state.portfolio().await.user().clone())
}

/// Switch between the admin and editor identities.
///
/// # Errors
///
/// Never fails in practice; role switches do not touch storage.
#[instrument(skip(state))]
async fn toggle_role(State(state): State<AppState>) -> Result<Json<User>, AppError> {
    let mut portfolio = state.portfolio().await;
    portfolio.execute(Command::ToggleRole)?;
    Ok(Json(portfolio.user().clone()))
}
