//! HTTP route handlers.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                                   - Health check
//!
//! # Dashboard
//! GET  /                                         - Project list and session
//! POST /projects                                 - Create project (admin)
//! POST /projects/{id}/delete                     - Delete project (admin)
//!
//! # Project detail
//! GET  /project/{id}                             - Project, stats and units
//! POST /project/{id}/units                       - Add unit (admin)
//! POST /project/{id}/units/{unit}/interactions   - Log enquiry
//! POST /project/{id}/units/{unit}/interactions/{interaction}/status - Set status (admin)
//! POST /project/{id}/units/{unit}/interactions/{interaction}/delete - Delete enquiry (admin)
//! POST /project/{id}/insight                     - Request AI insight
//! GET  /project/{id}/insight                     - Insight status
//!
//! # Enrollment
//! GET  /enrollment/units?project_id=             - Units of the selected project
//! POST /enrollment                               - Log enquiry for a selected unit
//!
//! # Search and export
//! GET  /search?q=                                - Search results
//! GET  /export                                   - CSV report download
//!
//! # Session
//! GET  /session                                  - Current identity
//! POST /session/role                             - Switch admin/editor
//! ```
//!
//! Admin-only commands from an editor session answer `200` with outcome
//! `ignored` and the unchanged view.

pub mod dashboard;
pub mod enrollment;
pub mod insight;
pub mod project;
pub mod report;
pub mod search;
pub mod session;
pub mod views;

use axum::Router;

use crate::state::AppState;

/// Build the complete application router (without state or middleware).
pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(dashboard::router())
        .merge(project::router())
        .merge(insight::router())
        .merge(enrollment::router())
        .merge(search::router())
        .merge(report::router())
        .merge(session::router())
}
