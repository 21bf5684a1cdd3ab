//! Per-project insight request bookkeeping.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;

use estate_pulse_core::insight::InsightStatus;
use estate_pulse_core::{Project, ProjectId};

use super::{InsightProvider, generate_insight};

/// Latest insight status per project.
///
/// Requests run on spawned tasks against a snapshot of the project, so they
/// never hold the portfolio lock. A request that panics settles as failed.
/// When requests for one project overlap, whichever settles last wins.
#[derive(Clone, Default)]
pub struct InsightTracker {
    statuses: Arc<RwLock<HashMap<ProjectId, InsightStatus>>>,
}

impl std::fmt::Debug for InsightTracker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InsightTracker").finish_non_exhaustive()
    }
}

impl InsightTracker {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark `project` pending and start a request in the background.
    ///
    /// Returns the handle of the spawned task.
    pub async fn request(
        &self,
        provider: Arc<dyn InsightProvider>,
        project: Project,
    ) -> tokio::task::JoinHandle<()> {
        let id = project.id.clone();
        self.statuses
            .write()
            .await
            .insert(id.clone(), InsightStatus::Pending);

        let statuses = Arc::clone(&self.statuses);
        tokio::spawn(async move {
            let generation =
                tokio::spawn(async move { generate_insight(provider.as_ref(), &project).await });
            let status = match generation.await {
                Ok(status) => status,
                Err(e) => {
                    tracing::error!(project_id = %id, error = %e, "Insight task aborted");
                    InsightStatus::failed()
                }
            };
            statuses.write().await.insert(id, status);
        })
    }

    /// Current status for `project_id`, if an insight was ever requested.
    pub async fn status(&self, project_id: &ProjectId) -> Option<InsightStatus> {
        self.statuses.read().await.get(project_id).cloned()
    }

    /// Drop any status kept for `project_id`.
    pub async fn forget(&self, project_id: &ProjectId) {
        self.statuses.write().await.remove(project_id);
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use estate_pulse_core::{
        Instrument, Interaction, NewInstrument, NewInteraction, NewProject, Rate,
    };

    use super::*;
    use crate::insight::{InsightError, Unconfigured};

    struct Exploding;

    #[async_trait::async_trait]
    impl InsightProvider for Exploding {
        async fn generate(&self, _prompt: &str) -> Result<String, InsightError> {
            panic!("provider blew up");
        }
    }

    fn project_with_offers(offers: &[&str]) -> Project {
        let project = Project::create(NewProject::default(), Utc::now());
        let unit = Instrument::create(project.id.clone(), NewInstrument::default());
        let unit_id = unit.id.clone();
        offers.iter().fold(project.with_instrument(unit), |project, offer| {
            let interaction = Interaction::create(
                NewInteraction {
                    offered_rate: offer.parse::<Rate>().expect("rate"),
                    ..NewInteraction::default()
                },
                Utc::now(),
            );
            project
                .with_interaction_logged(&unit_id, interaction)
                .expect("unit exists")
        })
    }

    #[tokio::test]
    async fn test_request_settles() {
        let tracker = InsightTracker::new();
        let project = Project::create(NewProject::default(), Utc::now());
        let id = project.id.clone();

        assert_eq!(tracker.status(&id).await, None);

        let handle = tracker.request(Arc::new(Unconfigured), project).await;
        handle.await.expect("task");

        assert_eq!(tracker.status(&id).await, Some(InsightStatus::failed()));

        tracker.forget(&id).await;
        assert_eq!(tracker.status(&id).await, None);
    }

    #[tokio::test]
    async fn test_huge_offered_rates_still_settle() {
        let tracker = InsightTracker::new();
        let max = "79228162514264337593543950335";
        let project = project_with_offers(&[max, max]);
        let id = project.id.clone();

        tracker
            .request(Arc::new(Unconfigured), project)
            .await
            .await
            .expect("task");

        assert_eq!(tracker.status(&id).await, Some(InsightStatus::failed()));
    }

    #[tokio::test]
    async fn test_panicking_provider_settles_as_failed() {
        let tracker = InsightTracker::new();
        let project = project_with_offers(&["4800"]);
        let id = project.id.clone();

        tracker
            .request(Arc::new(Exploding), project)
            .await
            .await
            .expect("outer task");

        assert_eq!(tracker.status(&id).await, Some(InsightStatus::failed()));
    }
}
