//! Subcommand implementations.
//!
//! Each command writes its human-readable output to the given writer and
//! returns a [`CliError`] on failure. Commands that the session role does not
//! permit report `ignored` and succeed, mirroring the server.

pub mod enquiry;
pub mod export;
pub mod insight;
pub mod project;
pub mod search;
pub mod unit;

use std::io::{self, Write};
use std::path::Path;
use std::sync::Arc;

use thiserror::Error;

use estate_pulse_core::{Project, ProjectId, User, UserRole};
use estate_pulse_server::config::ConfigError;
use estate_pulse_server::portfolio::{Outcome, Portfolio};
use estate_pulse_server::store::{FileStore, ProjectRepository, StoreError};

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Project store failed.
    #[error("Storage error: {0}")]
    Store(#[from] StoreError),

    /// Writing output failed.
    #[error("Output error: {0}")]
    Io(#[from] io::Error),

    /// Referenced entity does not exist.
    #[error("Not found: {0}")]
    NotFound(String),
}

/// Open the file-backed portfolio under `data_dir` with a session of `role`.
///
/// # Errors
///
/// Returns an error if the directory cannot be created or read.
pub fn open_portfolio(data_dir: &Path, role: UserRole) -> Result<Portfolio, CliError> {
    let store = FileStore::open(data_dir)?;
    let portfolio = Portfolio::open(
        ProjectRepository::new(Arc::new(store)),
        User::for_role(role),
    )?;
    Ok(portfolio)
}

fn find_project<'a>(portfolio: &'a Portfolio, id: &str) -> Result<&'a Project, CliError> {
    portfolio
        .project(&ProjectId::new(id))
        .ok_or_else(|| CliError::NotFound(format!("project {id}")))
}

fn report_outcome(out: &mut impl Write, outcome: Outcome, what: &str) -> io::Result<()> {
    match outcome {
        Outcome::Applied => writeln!(out, "{what}"),
        Outcome::Ignored => {
            tracing::warn!("Command ignored for the current session");
            writeln!(
                out,
                "ignored: not permitted for this session or nothing matched (try --admin)"
            )
        }
    }
}
