//! Portfolio-wide search.

use axum::{
    Json, Router,
    extract::{Query, State},
    response::{IntoResponse, Response},
    routing::get,
};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use estate_pulse_core::search::{SearchHit, search};

use crate::state::AppState;

/// Build the search router.
pub fn router() -> Router<AppState> {
    Router::new().route("/search", get(search_view))
}

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: String,
}

/// `GET /search?q=`
#[derive(Debug, Serialize)]
pub struct SearchView<'a> {
    pub query: &'a str,
    pub count: usize,
    pub results: Vec<SearchHit<'a>>,
}

#[instrument(skip(state))]
async fn search_view(State(state): State<AppState>, Query(query): Query<SearchQuery>) -> Response {
    let portfolio = state.portfolio().await;
    let results = search(portfolio.projects(), &query.q);
    tracing::debug!(hits = results.len(), "Search complete");
    Json(SearchView {
        query: &query.q,
        count: results.len(),
        results,
    })
    .into_response()
}
