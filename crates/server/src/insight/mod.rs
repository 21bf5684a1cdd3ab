//! AI sales-strategy insights.
//!
//! The provider is a narrow port: prompt in, text or failure out. Callers
//! never see provider errors; [`generate_insight`] logs them and settles the
//! request with the fallback text instead.

mod client;
mod error;
mod tracker;
mod types;

use estate_pulse_core::Project;
use estate_pulse_core::insight::{InsightStatus, insight_prompt};

pub use client::GeminiClient;
pub use error::InsightError;
pub use tracker::InsightTracker;
pub use types::{GenerateContentRequest, GenerateContentResponse};

/// Something that turns a prompt into text.
#[async_trait::async_trait]
pub trait InsightProvider: Send + Sync {
    /// Generate text for `prompt`.
    async fn generate(&self, prompt: &str) -> Result<String, InsightError>;
}

#[async_trait::async_trait]
impl InsightProvider for GeminiClient {
    async fn generate(&self, prompt: &str) -> Result<String, InsightError> {
        GeminiClient::generate(self, prompt).await
    }
}

/// Provider used when no API key is configured; every request fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct Unconfigured;

#[async_trait::async_trait]
impl InsightProvider for Unconfigured {
    async fn generate(&self, _prompt: &str) -> Result<String, InsightError> {
        Err(InsightError::NotConfigured)
    }
}

/// Ask `provider` for a strategy insight on `project`.
///
/// Always settles: any provider failure becomes [`InsightStatus::Failed`]
/// carrying the fallback text.
#[tracing::instrument(skip_all, fields(project_id = %project.id))]
pub async fn generate_insight(provider: &dyn InsightProvider, project: &Project) -> InsightStatus {
    let prompt = insight_prompt(project);
    match provider.generate(&prompt).await {
        Ok(text) => {
            tracing::info!(chars = text.len(), "Insight generated");
            InsightStatus::Ready { text }
        }
        Err(e) => {
            tracing::warn!(error = %e, "Insight request failed");
            InsightStatus::failed()
        }
    }
}
