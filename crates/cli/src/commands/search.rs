//! `ep-cli search <query>`

use std::io::Write;

use estate_pulse_core::search::{SearchHit, search};
use estate_pulse_server::portfolio::Portfolio;

use super::CliError;

/// Print every match for `query` in traversal order.
///
/// # Errors
///
/// Returns an error if output cannot be written.
pub fn run(portfolio: &Portfolio, query: &str, out: &mut impl Write) -> Result<(), CliError> {
    let hits = search(portfolio.projects(), query);
    if hits.is_empty() {
        writeln!(out, "no results")?;
        return Ok(());
    }
    for hit in &hits {
        match *hit {
            SearchHit::Project { project } => {
                writeln!(out, "PROJECT      {} ({})  [{}]", project.name, project.location, project.id)?;
            }
            SearchHit::Unit { project, unit } => {
                writeln!(out, "UNIT         {} in {}  [{}]", unit.number, project.name, project.id)?;
            }
            SearchHit::Interaction {
                project,
                unit,
                interaction,
            } => {
                writeln!(
                    out,
                    "INTERACTION  {} {} via {} on {} in {}  [{}]",
                    interaction.customer_name,
                    interaction.customer_phone,
                    interaction.agent_name,
                    unit.number,
                    project.name,
                    project.id
                )?;
            }
        }
    }
    Ok(())
}
