//! `ep-cli unit ...`

use std::io::Write;

use estate_pulse_core::{NewInstrument, ProjectId};
use estate_pulse_server::portfolio::{Command, Portfolio};

use super::{CliError, find_project, report_outcome};

/// List the units of a project, as offered by the enrollment selector.
///
/// # Errors
///
/// Returns `NotFound` for an unknown project.
pub fn list(portfolio: &Portfolio, project: &str, out: &mut impl Write) -> Result<(), CliError> {
    find_project(portfolio, project)?;
    let units = portfolio.available_units(Some(&ProjectId::new(project)));
    if units.is_empty() {
        writeln!(out, "no units")?;
    }
    for unit in units {
        writeln!(
            out,
            "{}  {}  {}  {}",
            unit.id,
            unit.number,
            unit.kind,
            unit.current_status()
        )?;
    }
    Ok(())
}

/// Append a unit to a project. Admin only.
///
/// # Errors
///
/// Returns `NotFound` for an unknown project, or an error if the change
/// cannot be persisted.
pub fn add(
    portfolio: &mut Portfolio,
    project: &str,
    draft: NewInstrument,
    out: &mut impl Write,
) -> Result<(), CliError> {
    find_project(portfolio, project)?;
    let project_id = ProjectId::new(project);
    let outcome = portfolio.execute(Command::AddInstrument {
        project_id: project_id.clone(),
        draft,
    })?;
    let added = portfolio
        .available_units(Some(&project_id))
        .last()
        .map(|u| format!("added {}", u.id))
        .unwrap_or_default();
    report_outcome(out, outcome, &added)?;
    Ok(())
}
