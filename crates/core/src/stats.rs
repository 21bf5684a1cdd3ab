//! Per-project aggregate statistics.

use serde::Serialize;

use crate::models::Project;
use crate::types::Rate;

/// Headline numbers for a project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectStats {
    pub total_units: usize,
    pub total_interactions: usize,
    /// Mean offered rate across every interaction; zero when there are none.
    pub average_offered_rate: Rate,
}

impl ProjectStats {
    /// Compute statistics for `project`.
    #[must_use]
    pub fn of(project: &Project) -> Self {
        Self {
            total_units: project.instruments.len(),
            total_interactions: project.interaction_count(),
            average_offered_rate: Rate::mean(project.interactions().map(|i| &i.offered_rate)),
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::models::{Instrument, Interaction, NewInstrument, NewInteraction, NewProject};

    #[test]
    fn test_empty_project() {
        let project = Project::create(NewProject::default(), Utc::now());
        let stats = ProjectStats::of(&project);
        assert_eq!(stats.total_units, 0);
        assert_eq!(stats.total_interactions, 0);
        assert_eq!(stats.average_offered_rate, Rate::ZERO);
    }

    #[test]
    fn test_average_spans_units() {
        let project = Project::create(NewProject::default(), Utc::now());
        let a = Instrument::create(project.id.clone(), NewInstrument::default());
        let b = Instrument::create(project.id.clone(), NewInstrument::default());
        let (a_id, b_id) = (a.id.clone(), b.id.clone());
        let offer = |rate: u32| {
            Interaction::create(
                NewInteraction {
                    offered_rate: Rate::from(rate),
                    ..NewInteraction::default()
                },
                Utc::now(),
            )
        };

        let project = project
            .with_instrument(a)
            .with_instrument(b)
            .with_interaction_logged(&a_id, offer(4000))
            .and_then(|p| p.with_interaction_logged(&b_id, offer(6000)))
            .expect("units exist");

        let stats = ProjectStats::of(&project);
        assert_eq!(stats.total_units, 2);
        assert_eq!(stats.total_interactions, 2);
        assert_eq!(stats.average_offered_rate.to_string(), "5000");
    }

    #[test]
    fn test_huge_offers_do_not_overflow() {
        let project = Project::create(NewProject::default(), Utc::now());
        let unit = Instrument::create(project.id.clone(), NewInstrument::default());
        let unit_id = unit.id.clone();
        let offer = || {
            Interaction::create(
                NewInteraction {
                    offered_rate: "79228162514264337593543950335".parse().expect("rate"),
                    ..NewInteraction::default()
                },
                Utc::now(),
            )
        };

        let project = project
            .with_instrument(unit)
            .with_interaction_logged(&unit_id, offer())
            .and_then(|p| p.with_interaction_logged(&unit_id, offer()))
            .expect("unit exists");

        let stats = ProjectStats::of(&project);
        assert_eq!(stats.total_interactions, 2);
        assert!(stats.average_offered_rate > Rate::ZERO);
    }
}
