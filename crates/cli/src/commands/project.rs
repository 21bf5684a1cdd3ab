//! `ep-cli project ...`

use std::io::Write;

use estate_pulse_core::stats::ProjectStats;
use estate_pulse_core::{NewProject, ProjectId};
use estate_pulse_server::portfolio::{Command, Portfolio};

use super::{CliError, find_project, report_outcome};

/// List every project, newest first.
///
/// # Errors
///
/// Returns an error if output cannot be written.
pub fn list(portfolio: &Portfolio, out: &mut impl Write) -> Result<(), CliError> {
    if portfolio.projects().is_empty() {
        writeln!(out, "no projects")?;
        return Ok(());
    }
    for project in portfolio.projects() {
        writeln!(
            out,
            "{}  {} ({})  units: {}  enquiries: {}",
            project.id,
            project.name,
            project.location,
            project.instruments.len(),
            project.interaction_count()
        )?;
    }
    Ok(())
}

/// Print one project with statistics and unit statuses.
///
/// # Errors
///
/// Returns `NotFound` for an unknown project.
pub fn show(portfolio: &Portfolio, id: &str, out: &mut impl Write) -> Result<(), CliError> {
    let project = find_project(portfolio, id)?;
    let stats = ProjectStats::of(project);

    writeln!(out, "{} ({})", project.name, project.location)?;
    if !project.description.is_empty() {
        writeln!(out, "{}", project.description)?;
    }
    writeln!(
        out,
        "units: {}  enquiries: {}  avg offered rate: {}",
        stats.total_units, stats.total_interactions, stats.average_offered_rate
    )?;
    for unit in &project.instruments {
        writeln!(
            out,
            "  {}  {}  {}  base {}  {}",
            unit.id,
            unit.number,
            unit.kind,
            unit.base_rate,
            unit.current_status()
        )?;
    }
    Ok(())
}

/// Create a project. Admin only.
///
/// # Errors
///
/// Returns an error if the change cannot be persisted.
pub fn create(
    portfolio: &mut Portfolio,
    draft: NewProject,
    out: &mut impl Write,
) -> Result<(), CliError> {
    let outcome = portfolio.execute(Command::CreateProject(draft))?;
    let created = portfolio
        .projects()
        .first()
        .map(|p| format!("created {}", p.id))
        .unwrap_or_default();
    report_outcome(out, outcome, &created)?;
    Ok(())
}

/// Delete a project and everything under it. Admin only.
///
/// # Errors
///
/// Returns `NotFound` for an unknown project, or an error if the change
/// cannot be persisted.
pub fn delete(portfolio: &mut Portfolio, id: &str, out: &mut impl Write) -> Result<(), CliError> {
    find_project(portfolio, id)?;
    let outcome = portfolio.execute(Command::DeleteProject(ProjectId::new(id)))?;
    report_outcome(out, outcome, &format!("deleted {id}"))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use estate_pulse_core::UserRole;

    use super::*;
    use crate::commands::open_portfolio;
    use crate::commands::test_support::{output, seeded};

    #[test]
    fn test_list_and_show() {
        let dir = tempfile::tempdir().expect("tempdir");
        let portfolio = seeded(dir.path());
        let id = portfolio.projects()[0].id.to_string();

        let mut buf = Vec::new();
        list(&portfolio, &mut buf).expect("list");
        assert!(output(buf).contains("Lakeview (Pune)  units: 1  enquiries: 0"));

        let mut buf = Vec::new();
        show(&portfolio, &id, &mut buf).expect("show");
        let text = output(buf);
        assert!(text.contains("Lake facing plots"));
        assert!(text.contains("#A1  PLOT  base 5000  AVAILABLE"));
    }

    #[test]
    fn test_editor_create_is_ignored() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut portfolio = open_portfolio(dir.path(), UserRole::Editor).expect("open");

        let mut buf = Vec::new();
        create(
            &mut portfolio,
            NewProject {
                name: "X".to_string(),
                location: "Goa".to_string(),
                description: String::new(),
            },
            &mut buf,
        )
        .expect("create");

        assert!(output(buf).starts_with("ignored"));
        assert!(portfolio.projects().is_empty());
    }

    #[test]
    fn test_delete_unknown_project() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut portfolio = seeded(dir.path());
        let result = delete(&mut portfolio, "missing", &mut Vec::new());
        assert!(matches!(result, Err(CliError::NotFound(_))));
    }
}
