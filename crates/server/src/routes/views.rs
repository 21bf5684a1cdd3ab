//! JSON view models.
//!
//! Views borrow from the locked [`Portfolio`] and are serialized before the
//! lock is released.

use chrono::{DateTime, Utc};
use serde::Serialize;

use estate_pulse_core::stats::ProjectStats;
use estate_pulse_core::{
    Instrument, InstrumentId, InstrumentType, Interaction, Project, ProjectId, Rate, UnitStatus,
    User,
};

use crate::portfolio::{Outcome, Portfolio};

/// Project as listed on the dashboard.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectSummary<'a> {
    pub id: &'a ProjectId,
    pub name: &'a str,
    pub location: &'a str,
    pub description: &'a str,
    pub created_at: DateTime<Utc>,
    pub unit_count: usize,
    pub interaction_count: usize,
}

impl<'a> From<&'a Project> for ProjectSummary<'a> {
    fn from(project: &'a Project) -> Self {
        Self {
            id: &project.id,
            name: &project.name,
            location: &project.location,
            description: &project.description,
            created_at: project.created_at,
            unit_count: project.instruments.len(),
            interaction_count: project.interaction_count(),
        }
    }
}

/// `GET /`
#[derive(Debug, Serialize)]
pub struct DashboardView<'a> {
    pub session: &'a User,
    pub projects: Vec<ProjectSummary<'a>>,
}

impl<'a> DashboardView<'a> {
    pub fn of(portfolio: &'a Portfolio) -> Self {
        Self {
            session: portfolio.user(),
            projects: portfolio.projects().iter().map(ProjectSummary::from).collect(),
        }
    }
}

/// A unit with its derived status.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UnitView<'a> {
    pub id: &'a InstrumentId,
    pub number: &'a str,
    #[serde(rename = "type")]
    pub kind: InstrumentType,
    pub base_rate: Rate,
    pub status: UnitStatus,
    pub latest_interaction: Option<&'a Interaction>,
    /// Newest first.
    pub interactions: &'a [Interaction],
}

impl<'a> From<&'a Instrument> for UnitView<'a> {
    fn from(unit: &'a Instrument) -> Self {
        Self {
            id: &unit.id,
            number: &unit.number,
            kind: unit.kind,
            base_rate: unit.base_rate,
            status: unit.current_status(),
            latest_interaction: unit.latest_interaction(),
            interactions: &unit.interactions,
        }
    }
}

/// `GET /project/{id}`
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectDetailView<'a> {
    pub session: &'a User,
    pub project: ProjectSummary<'a>,
    pub stats: ProjectStats,
    pub units: Vec<UnitView<'a>>,
}

impl<'a> ProjectDetailView<'a> {
    pub fn of(portfolio: &'a Portfolio, project: &'a Project) -> Self {
        Self {
            session: portfolio.user(),
            project: ProjectSummary::from(project),
            stats: ProjectStats::of(project),
            units: project.instruments.iter().map(UnitView::from).collect(),
        }
    }
}

/// Unit option for the enrollment selector.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UnitOption<'a> {
    pub id: &'a InstrumentId,
    pub number: &'a str,
    #[serde(rename = "type")]
    pub kind: InstrumentType,
}

impl<'a> From<&'a Instrument> for UnitOption<'a> {
    fn from(unit: &'a Instrument) -> Self {
        Self {
            id: &unit.id,
            number: &unit.number,
            kind: unit.kind,
        }
    }
}

/// Response to a command: what happened plus the refreshed view.
#[derive(Debug, Serialize)]
pub struct CommandResponse<V> {
    pub outcome: Outcome,
    #[serde(flatten)]
    pub view: V,
}
