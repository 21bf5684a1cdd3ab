//! `ep-cli export [--output PATH]`

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::Utc;

use estate_pulse_core::report::{render_csv, report_file_name};
use estate_pulse_server::portfolio::Portfolio;

use super::CliError;

/// Write the full CSV report.
///
/// Without `output`, the file lands in the current directory under the dated
/// report name. Passing `-` writes the report to `out` instead.
///
/// # Errors
///
/// Returns an error if the file or output cannot be written.
pub fn run(
    portfolio: &Portfolio,
    output: Option<&Path>,
    out: &mut impl Write,
) -> Result<(), CliError> {
    let csv = render_csv(portfolio.projects());

    if output == Some(Path::new("-")) {
        writeln!(out, "{csv}")?;
        return Ok(());
    }

    let path = output.map_or_else(
        || PathBuf::from(report_file_name(Utc::now().date_naive())),
        Path::to_path_buf,
    );
    fs::write(&path, &csv)?;
    tracing::info!(path = %path.display(), bytes = csv.len(), "Report written");
    writeln!(out, "wrote {}", path.display())?;
    Ok(())
}
