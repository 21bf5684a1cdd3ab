//! Integration test harness for EstatePulse.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p estate-pulse-integration-tests
//! ```
//!
//! No external services are needed: the router is driven in-process with
//! `tower::ServiceExt::oneshot`, storage is a [`MemoryStore`] or a
//! [`FileStore`](estate_pulse_server::store::FileStore) in a temp dir, and the
//! insight provider is a stub.
//!
//! # Test Categories
//!
//! - `portfolio_properties` - state container behavior
//! - `persistence` - storage round trips and failure handling
//! - `api_routes` - JSON views and commands over HTTP

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::sync::Arc;

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Method, Request, StatusCode, header};
use serde_json::Value;
use tower::ServiceExt;

use estate_pulse_core::{NewInstrument, NewProject, User};
use estate_pulse_server::insight::{InsightError, InsightProvider};
use estate_pulse_server::portfolio::{Command, Portfolio};
use estate_pulse_server::state::AppState;
use estate_pulse_server::store::{MemoryStore, ProjectRepository};

/// Insight provider that always answers with fixed text.
#[derive(Debug, Clone)]
pub struct CannedInsight(pub String);

#[async_trait::async_trait]
impl InsightProvider for CannedInsight {
    async fn generate(&self, _prompt: &str) -> Result<String, InsightError> {
        Ok(self.0.clone())
    }
}

/// Portfolio over a fresh in-memory store.
///
/// # Panics
///
/// Never in practice; the memory store cannot fail to load.
#[must_use]
pub fn memory_portfolio(user: User) -> (Arc<MemoryStore>, Portfolio) {
    let store = Arc::new(MemoryStore::new());
    let portfolio =
        Portfolio::open(ProjectRepository::new(store.clone()), user).expect("open portfolio");
    (store, portfolio)
}

/// Project draft with the given name, located in Pune.
#[must_use]
pub fn project_draft(name: &str) -> NewProject {
    NewProject {
        name: name.to_string(),
        location: "Pune".to_string(),
        description: String::new(),
    }
}

/// Create "Lakeview" with unit `#A1` (PLOT, 5000) as admin.
///
/// # Panics
///
/// Panics if the session is not admin or storage fails.
pub fn seed_lakeview(portfolio: &mut Portfolio) {
    let created = portfolio
        .execute(Command::CreateProject(project_draft("Lakeview")))
        .expect("create");
    assert!(created.is_applied(), "seeding requires an admin session");
    let project_id = portfolio.projects()[0].id.clone();
    portfolio
        .execute(Command::AddInstrument {
            project_id,
            draft: NewInstrument {
                number: "#A1".to_string(),
                base_rate: 5000_u32.into(),
                ..NewInstrument::default()
            },
        })
        .expect("add unit");
}

/// In-process application with its backing store.
pub struct TestApp {
    pub store: Arc<MemoryStore>,
    pub state: AppState,
    router: Router,
}

impl TestApp {
    /// App over an empty store, session starting as `user`.
    #[must_use]
    pub fn new(user: User) -> Self {
        Self::with_portfolio(memory_portfolio(user))
    }

    /// App over an existing portfolio.
    #[must_use]
    pub fn with_portfolio((store, portfolio): (Arc<MemoryStore>, Portfolio)) -> Self {
        let provider = Arc::new(CannedInsight("Sell the corner plots first.".to_string()));
        let state = AppState::new(portfolio, provider);
        let router = estate_pulse_server::app(state.clone());
        Self {
            store,
            state,
            router,
        }
    }

    /// Send a request and return status, headers' content type, and raw body.
    ///
    /// # Panics
    ///
    /// Panics if the request cannot be built or the body cannot be read.
    pub async fn send(
        &self,
        method: Method,
        uri: &str,
        body: Option<Value>,
    ) -> (StatusCode, Option<String>, String) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string())),
            None => builder.body(Body::empty()),
        }
        .expect("build request");

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("infallible router");

        let status = response.status();
        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned);
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("read body");
        let text = String::from_utf8(bytes.to_vec()).expect("utf-8 body");
        (status, content_type, text)
    }

    /// `GET` a JSON view.
    ///
    /// # Panics
    ///
    /// Panics if the body is not JSON.
    pub async fn get_json(&self, uri: &str) -> (StatusCode, Value) {
        let (status, _, body) = self.send(Method::GET, uri, None).await;
        (status, serde_json::from_str(&body).unwrap_or(Value::String(body)))
    }

    /// `POST` a JSON body and parse the JSON answer.
    ///
    /// # Panics
    ///
    /// Panics if the request cannot be sent.
    pub async fn post_json(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        let (status, _, body) = self.send(Method::POST, uri, Some(body)).await;
        (status, serde_json::from_str(&body).unwrap_or(Value::String(body)))
    }
}
