//! Sellable units ("instruments") within a project.

use serde::{Deserialize, Serialize};

use crate::models::Interaction;
use crate::types::{InstrumentId, InstrumentType, ProjectId, Rate, UnitStatus};

/// A single sellable unit: a plot, flat, or house.
///
/// Units are never edited or deleted after creation; only their interaction
/// list grows and shrinks. `number` is free text and not unique.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Instrument {
    pub id: InstrumentId,
    pub project_id: ProjectId,
    pub number: String,
    #[serde(rename = "type")]
    pub kind: InstrumentType,
    pub base_rate: Rate,
    /// Newest first.
    #[serde(default)]
    pub interactions: Vec<Interaction>,
}

/// Form data for adding a unit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NewInstrument {
    pub number: String,
    #[serde(rename = "type")]
    pub kind: InstrumentType,
    pub base_rate: Rate,
}

impl Instrument {
    /// Build a unit with a fresh ID and no interactions.
    #[must_use]
    pub fn create(project_id: ProjectId, draft: NewInstrument) -> Self {
        Self {
            id: InstrumentId::generate(),
            project_id,
            number: draft.number,
            kind: draft.kind,
            base_rate: draft.base_rate,
            interactions: Vec::new(),
        }
    }

    /// The most recently logged interaction.
    #[must_use]
    pub fn latest_interaction(&self) -> Option<&Interaction> {
        self.interactions.first()
    }

    /// Status shown for the unit: that of the latest interaction, or
    /// `AVAILABLE` when nothing has been logged.
    #[must_use]
    pub fn current_status(&self) -> UnitStatus {
        self.latest_interaction()
            .map_or(UnitStatus::Available, |i| UnitStatus::Enquiry(i.status))
    }
}
