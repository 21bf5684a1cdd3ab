//! `ep-cli insight <project>`

use std::io::Write;

use estate_pulse_core::insight::InsightStatus;
use estate_pulse_server::insight::{InsightProvider, generate_insight};
use estate_pulse_server::portfolio::Portfolio;

use super::{CliError, find_project};

/// Request a strategy insight and wait for it.
///
/// Provider failures are not errors; they print the fallback text.
///
/// # Errors
///
/// Returns `NotFound` for an unknown project.
pub async fn run(
    portfolio: &Portfolio,
    provider: &dyn InsightProvider,
    project: &str,
    out: &mut impl Write,
) -> Result<(), CliError> {
    let project = find_project(portfolio, project)?.clone();
    let status = generate_insight(provider, &project).await;
    if let InsightStatus::Failed { .. } = status {
        tracing::warn!(project_id = %project.id, "Insight unavailable");
    }
    writeln!(out, "{}", status.text().unwrap_or_default())?;
    Ok(())
}
