//! Mutations accepted by the [`Portfolio`](super::Portfolio).

use serde::{Deserialize, Serialize};

use estate_pulse_core::{
    EnquiryStatus, InstrumentId, InteractionId, NewInstrument, NewInteraction, NewProject,
    Project, ProjectId,
};

/// A state change requested by a view.
#[derive(Debug, Clone)]
pub enum Command {
    /// Prepend a new project. Admin only.
    CreateProject(NewProject),
    /// Remove a project and everything under it. Admin only.
    DeleteProject(ProjectId),
    /// Swap in an updated project record with the same ID.
    ReplaceProject(Project),
    /// Append a unit to a project. Admin only.
    AddInstrument {
        project_id: ProjectId,
        draft: NewInstrument,
    },
    /// Prepend an interaction to a unit's history.
    LogInteraction {
        project_id: ProjectId,
        instrument_id: InstrumentId,
        draft: NewInteraction,
    },
    /// Overwrite one interaction's status. Admin only.
    SetInteractionStatus {
        project_id: ProjectId,
        instrument_id: InstrumentId,
        interaction_id: InteractionId,
        status: EnquiryStatus,
    },
    /// Remove one interaction. Admin only.
    DeleteInteraction {
        project_id: ProjectId,
        instrument_id: InstrumentId,
        interaction_id: InteractionId,
    },
    /// Swap the session between the admin and editor identities.
    ToggleRole,
}

impl Command {
    /// Short name for logs.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::CreateProject(_) => "create_project",
            Self::DeleteProject(_) => "delete_project",
            Self::ReplaceProject(_) => "replace_project",
            Self::AddInstrument { .. } => "add_instrument",
            Self::LogInteraction { .. } => "log_interaction",
            Self::SetInteractionStatus { .. } => "set_interaction_status",
            Self::DeleteInteraction { .. } => "delete_interaction",
            Self::ToggleRole => "toggle_role",
        }
    }

    /// Whether the command is dropped for an editor session.
    #[must_use]
    pub const fn requires_privilege(&self) -> bool {
        matches!(
            self,
            Self::CreateProject(_)
                | Self::DeleteProject(_)
                | Self::AddInstrument { .. }
                | Self::SetInteractionStatus { .. }
                | Self::DeleteInteraction { .. }
        )
    }
}

/// Result of executing a [`Command`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    /// State changed and was persisted.
    Applied,
    /// Nothing changed: insufficient role, incomplete input, or unknown target.
    Ignored,
}

impl Outcome {
    #[must_use]
    pub const fn is_applied(self) -> bool {
        matches!(self, Self::Applied)
    }
}

/// Unit enrollment form: a new interaction aimed at a chosen project and unit.
///
/// Both selections are optional in the form; submitting without either is a
/// no-op.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Enrollment {
    #[serde(default)]
    pub project_id: Option<ProjectId>,
    #[serde(default)]
    pub unit_id: Option<InstrumentId>,
    #[serde(flatten)]
    pub interaction: NewInteraction,
}

impl Enrollment {
    /// The command this form submits, or `None` if a selection is missing.
    #[must_use]
    pub fn into_command(self) -> Option<Command> {
        let project_id = self.project_id.filter(|id| !id.as_str().is_empty())?;
        let instrument_id = self.unit_id.filter(|id| !id.as_str().is_empty())?;
        Some(Command::LogInteraction {
            project_id,
            instrument_id,
            draft: self.interaction,
        })
    }
}
