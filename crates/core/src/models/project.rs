//! Real-estate projects: the root of the ownership tree.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{Instrument, Interaction};
use crate::types::{EnquiryStatus, InstrumentId, InteractionId, ProjectId};

/// A real-estate development containing sellable units.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: ProjectId,
    pub name: String,
    pub location: String,
    #[serde(default)]
    pub description: String,
    pub created_at: DateTime<Utc>,
    /// In insertion order.
    #[serde(default)]
    pub instruments: Vec<Instrument>,
}

/// Form data for creating a project.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NewProject {
    pub name: String,
    pub location: String,
    pub description: String,
}

impl NewProject {
    /// Name and location are both required.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        !self.name.trim().is_empty() && !self.location.trim().is_empty()
    }
}

impl Project {
    /// Build a project with a fresh ID and no units.
    #[must_use]
    pub fn create(draft: NewProject, now: DateTime<Utc>) -> Self {
        Self {
            id: ProjectId::generate(),
            name: draft.name,
            location: draft.location,
            description: draft.description,
            created_at: now,
            instruments: Vec::new(),
        }
    }

    /// Look up a unit by ID.
    #[must_use]
    pub fn instrument(&self, id: &InstrumentId) -> Option<&Instrument> {
        self.instruments.iter().find(|i| &i.id == id)
    }

    /// Total interactions across all units.
    #[must_use]
    pub fn interaction_count(&self) -> usize {
        self.instruments.iter().map(|i| i.interactions.len()).sum()
    }

    /// Every interaction in traversal order.
    pub fn interactions(&self) -> impl Iterator<Item = &Interaction> {
        self.instruments.iter().flat_map(|i| i.interactions.iter())
    }

    /// Copy of this project with `instrument` appended.
    #[must_use]
    pub fn with_instrument(&self, instrument: Instrument) -> Self {
        let mut updated = self.clone();
        updated.instruments.push(instrument);
        updated
    }

    /// Copy of this project with `interaction` prepended to a unit's list.
    ///
    /// Returns `None` if the unit does not exist.
    #[must_use]
    pub fn with_interaction_logged(
        &self,
        instrument_id: &InstrumentId,
        interaction: Interaction,
    ) -> Option<Self> {
        self.with_instrument_updated(instrument_id, |inst| {
            inst.interactions.insert(0, interaction);
            true
        })
    }

    /// Copy of this project with one interaction's status replaced.
    ///
    /// Any status may follow any other. Returns `None` if the unit or the
    /// interaction does not exist.
    #[must_use]
    pub fn with_interaction_status(
        &self,
        instrument_id: &InstrumentId,
        interaction_id: &InteractionId,
        status: EnquiryStatus,
    ) -> Option<Self> {
        self.with_instrument_updated(instrument_id, |inst| {
            let Some(interaction) = inst
                .interactions
                .iter_mut()
                .find(|i| &i.id == interaction_id)
            else {
                return false;
            };
            interaction.status = status;
            true
        })
    }

    /// Copy of this project with one interaction removed.
    ///
    /// Returns `None` if the unit or the interaction does not exist.
    #[must_use]
    pub fn without_interaction(
        &self,
        instrument_id: &InstrumentId,
        interaction_id: &InteractionId,
    ) -> Option<Self> {
        self.with_instrument_updated(instrument_id, |inst| {
            let before = inst.interactions.len();
            inst.interactions.retain(|i| &i.id != interaction_id);
            inst.interactions.len() != before
        })
    }

    fn with_instrument_updated(
        &self,
        instrument_id: &InstrumentId,
        update: impl FnOnce(&mut Instrument) -> bool,
    ) -> Option<Self> {
        let mut updated = self.clone();
        let inst = updated
            .instruments
            .iter_mut()
            .find(|i| &i.id == instrument_id)?;
        update(inst).then_some(updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{NewInstrument, NewInteraction};
    use crate::types::UnitStatus;

    fn project_with_unit() -> (Project, InstrumentId) {
        let project = Project::create(
            NewProject {
                name: "Lakeview".to_string(),
                location: "Pune".to_string(),
                description: String::new(),
            },
            Utc::now(),
        );
        let unit = Instrument::create(project.id.clone(), NewInstrument::default());
        let unit_id = unit.id.clone();
        (project.with_instrument(unit), unit_id)
    }

    #[test]
    fn test_draft_requires_name_and_location() {
        let mut draft = NewProject {
            name: "X".to_string(),
            ..NewProject::default()
        };
        assert!(!draft.is_complete());
        draft.location = "Goa".to_string();
        assert!(draft.is_complete());
    }

    #[test]
    fn test_logged_interactions_are_prepended() {
        let (project, unit_id) = project_with_unit();
        let first = Interaction::create(NewInteraction::default(), Utc::now());
        let second = Interaction::create(
            NewInteraction {
                status: EnquiryStatus::Sold,
                ..NewInteraction::default()
            },
            Utc::now(),
        );
        let second_id = second.id.clone();

        let project = project
            .with_interaction_logged(&unit_id, first)
            .and_then(|p| p.with_interaction_logged(&unit_id, second))
            .expect("unit exists");

        let unit = project.instrument(&unit_id).expect("unit exists");
        assert_eq!(unit.interactions.len(), 2);
        assert_eq!(unit.interactions[0].id, second_id);
        assert_eq!(unit.current_status(), UnitStatus::Enquiry(EnquiryStatus::Sold));
        assert_eq!(project.interaction_count(), 2);
    }

    #[test]
    fn test_unknown_unit_yields_none() {
        let (project, _) = project_with_unit();
        let interaction = Interaction::create(NewInteraction::default(), Utc::now());
        assert!(
            project
                .with_interaction_logged(&InstrumentId::new("missing"), interaction)
                .is_none()
        );
    }

    #[test]
    fn test_status_can_jump_and_revert() {
        let (project, unit_id) = project_with_unit();
        let interaction = Interaction::create(NewInteraction::default(), Utc::now());
        let interaction_id = interaction.id.clone();
        let project = project
            .with_interaction_logged(&unit_id, interaction)
            .expect("unit exists");

        let sold = project
            .with_interaction_status(&unit_id, &interaction_id, EnquiryStatus::Sold)
            .expect("interaction exists");
        let reopened = sold
            .with_interaction_status(&unit_id, &interaction_id, EnquiryStatus::Active)
            .expect("interaction exists");

        let status = |p: &Project| p.instrument(&unit_id).map(Instrument::current_status);
        assert_eq!(status(&sold), Some(UnitStatus::Enquiry(EnquiryStatus::Sold)));
        assert_eq!(status(&reopened), Some(UnitStatus::Enquiry(EnquiryStatus::Active)));
    }

    #[test]
    fn test_without_interaction() {
        let (project, unit_id) = project_with_unit();
        let interaction = Interaction::create(NewInteraction::default(), Utc::now());
        let interaction_id = interaction.id.clone();
        let project = project
            .with_interaction_logged(&unit_id, interaction)
            .expect("unit exists");

        let removed = project
            .without_interaction(&unit_id, &interaction_id)
            .expect("interaction exists");
        assert_eq!(removed.interaction_count(), 0);
        assert!(
            removed
                .without_interaction(&unit_id, &interaction_id)
                .is_none()
        );
    }
}
