//! AI sales-strategy insight: prompt construction and request status.
//!
//! The provider itself lives outside this crate; here we only decide what to
//! ask and how a request's outcome is represented.

use serde::{Deserialize, Serialize};

use crate::models::Project;
use crate::stats::ProjectStats;

/// Text shown when the insight provider fails or is not configured.
pub const INSIGHT_FALLBACK: &str = "AI insight service currently unavailable.";

/// Build the analysis prompt for `project`.
#[must_use]
pub fn insight_prompt(project: &Project) -> String {
    let stats = ProjectStats::of(project);
    format!(
        "Perform a high-level real estate market analysis for project: {} in {}. \
         Stats: {} total units, {} client interactions. \
         Recommend a sales strategy. Concise, under 120 words.",
        project.name, project.location, stats.total_units, stats.total_interactions
    )
}

/// Status of one insight request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum InsightStatus {
    /// The provider has not answered yet.
    Pending,
    /// The provider answered.
    Ready { text: String },
    /// The provider failed; `text` is the fallback message.
    Failed { text: String },
}

impl InsightStatus {
    /// Outcome for a failed request.
    #[must_use]
    pub fn failed() -> Self {
        Self::Failed {
            text: INSIGHT_FALLBACK.to_owned(),
        }
    }

    /// Whether the request has finished, successfully or not.
    #[must_use]
    pub const fn is_settled(&self) -> bool {
        !matches!(self, Self::Pending)
    }

    /// Text to display, if any.
    #[must_use]
    pub fn text(&self) -> Option<&str> {
        match self {
            Self::Pending => None,
            Self::Ready { text } | Self::Failed { text } => Some(text),
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::models::{Instrument, NewInstrument, NewProject};

    #[test]
    fn test_prompt_mentions_project_and_counts() {
        let project = Project::create(
            NewProject {
                name: "Sapphire Gardens".to_string(),
                location: "Mumbai, IN".to_string(),
                description: String::new(),
            },
            Utc::now(),
        );
        let unit = Instrument::create(project.id.clone(), NewInstrument::default());
        let project = project.with_instrument(unit);

        let prompt = insight_prompt(&project);
        assert!(prompt.contains("project: Sapphire Gardens in Mumbai, IN."));
        assert!(prompt.contains("1 total units, 0 client interactions"));
        assert!(prompt.ends_with("under 120 words."));
    }

    #[test]
    fn test_failed_status_carries_fallback() {
        let status = InsightStatus::failed();
        assert!(status.is_settled());
        assert_eq!(status.text(), Some(INSIGHT_FALLBACK));
        assert!(!InsightStatus::Pending.is_settled());

        let json = serde_json::to_value(&status).expect("serialize");
        assert_eq!(json["state"], "failed");
    }
}
