//! `ep-cli enquiry ...`

use std::io::Write;

use estate_pulse_core::{EnquiryStatus, InstrumentId, InteractionId, NewInteraction, ProjectId};
use estate_pulse_server::portfolio::{Command, Portfolio};

use super::{CliError, find_project, report_outcome};

/// Target of an enquiry command.
#[derive(Debug, Clone)]
pub struct Target<'a> {
    pub project: &'a str,
    pub unit: &'a str,
}

impl Target<'_> {
    fn check(&self, portfolio: &Portfolio) -> Result<(ProjectId, InstrumentId), CliError> {
        let project = find_project(portfolio, self.project)?;
        let unit_id = InstrumentId::new(self.unit);
        if project.instrument(&unit_id).is_none() {
            return Err(CliError::NotFound(format!("unit {}", self.unit)));
        }
        Ok((project.id.clone(), unit_id))
    }
}

/// Log an enquiry. Open to both roles.
///
/// Blank agent details are filled in from the session identity.
///
/// # Errors
///
/// Returns `NotFound` for an unknown project or unit, or an error if the
/// change cannot be persisted.
pub fn log(
    portfolio: &mut Portfolio,
    target: &Target<'_>,
    mut draft: NewInteraction,
    out: &mut impl Write,
) -> Result<(), CliError> {
    let (project_id, instrument_id) = target.check(portfolio)?;

    let user = portfolio.user();
    if draft.agent_name.trim().is_empty() {
        draft.agent_name.clone_from(&user.name);
    }
    if draft.agent_phone.trim().is_empty() {
        draft.agent_phone = user.phone.clone().unwrap_or_default();
    }

    let outcome = portfolio.execute(Command::LogInteraction {
        project_id: project_id.clone(),
        instrument_id: instrument_id.clone(),
        draft,
    })?;
    let logged = portfolio
        .project(&project_id)
        .and_then(|p| p.instrument(&instrument_id))
        .and_then(|u| u.latest_interaction())
        .map(|i| format!("logged {}", i.id))
        .unwrap_or_default();
    report_outcome(out, outcome, &logged)?;
    Ok(())
}

/// Set an enquiry's status. Admin only.
///
/// # Errors
///
/// Returns `NotFound` for an unknown project or unit, or an error if the
/// change cannot be persisted.
pub fn set_status(
    portfolio: &mut Portfolio,
    target: &Target<'_>,
    interaction: &str,
    status: EnquiryStatus,
    out: &mut impl Write,
) -> Result<(), CliError> {
    let (project_id, instrument_id) = target.check(portfolio)?;
    let outcome = portfolio.execute(Command::SetInteractionStatus {
        project_id,
        instrument_id,
        interaction_id: InteractionId::new(interaction),
        status,
    })?;
    report_outcome(out, outcome, &format!("{interaction} is now {status}"))?;
    Ok(())
}

/// Delete an enquiry. Admin only.
///
/// # Errors
///
/// Returns `NotFound` for an unknown project or unit, or an error if the
/// change cannot be persisted.
pub fn delete(
    portfolio: &mut Portfolio,
    target: &Target<'_>,
    interaction: &str,
    out: &mut impl Write,
) -> Result<(), CliError> {
    let (project_id, instrument_id) = target.check(portfolio)?;
    let outcome = portfolio.execute(Command::DeleteInteraction {
        project_id,
        instrument_id,
        interaction_id: InteractionId::new(interaction),
    })?;
    report_outcome(out, outcome, &format!("deleted {interaction}"))?;
    Ok(())
}
