//! Application state shared across handlers.

use std::sync::Arc;

use tokio::sync::{Mutex, MutexGuard};

use crate::insight::{InsightProvider, InsightTracker};
use crate::portfolio::Portfolio;

/// Application state shared across all handlers.
///
/// Cheap to clone: everything lives behind one `Arc`.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    portfolio: Mutex<Portfolio>,
    insight_provider: Arc<dyn InsightProvider>,
    insights: InsightTracker,
}

impl AppState {
    pub fn new(portfolio: Portfolio, insight_provider: Arc<dyn InsightProvider>) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                portfolio: Mutex::new(portfolio),
                insight_provider,
                insights: InsightTracker::new(),
            }),
        }
    }

    /// Lock the portfolio for the duration of one command or view.
    pub async fn portfolio(&self) -> MutexGuard<'_, Portfolio> {
        self.inner.portfolio.lock().await
    }

    pub fn insight_provider(&self) -> Arc<dyn InsightProvider> {
        Arc::clone(&self.inner.insight_provider)
    }

    pub fn insights(&self) -> &InsightTracker {
        &self.inner.insights
    }
}
