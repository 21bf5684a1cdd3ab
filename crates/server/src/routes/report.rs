//! CSV export of the whole portfolio.

use axum::{
    Router,
    extract::State,
    http::header::{CONTENT_DISPOSITION, CONTENT_TYPE},
    response::IntoResponse,
    routing::get,
};
use chrono::Utc;
use tracing::instrument;

use estate_pulse_core::report::{REPORT_CONTENT_TYPE, render_csv, report_file_name};

use crate::state::AppState;

/// Build the report router.
pub fn router() -> Router<AppState> {
    Router::new().route("/export", get(export))
}

/// Download the full report as a dated CSV attachment.
#[instrument(skip(state))]
async fn export(State(state): State<AppState>) -> impl IntoResponse {
    let body = render_csv(state.portfolio().await.projects());
    let file_name = report_file_name(Utc::now().date_naive());
    tracing::info!(file_name = %file_name, bytes = body.len(), "Report exported");

    (
        [
            (CONTENT_TYPE, REPORT_CONTENT_TYPE.to_string()),
            (
                CONTENT_DISPOSITION,
                format!("attachment; filename=\"{file_name}\""),
            ),
        ],
        body,
    )
}
