//! Flat CSV report of the whole portfolio.
//!
//! One row per interaction, in project → unit → interaction order
//! (interactions newest first, as stored). A unit with no interactions still
//! gets exactly one row, marked `AVAILABLE` with `N/A` placeholders.
//!
//! Fields are quoted only when they contain a comma, double quote, or line
//! break, so plain values come out exactly as typed.

use std::borrow::Cow;

use chrono::{DateTime, NaiveDate, Utc};

use crate::models::{Instrument, Interaction, Project};
use crate::types::UnitStatus;

/// Header row of the report.
pub const REPORT_HEADERS: [&str; 13] = [
    "Project",
    "Location",
    "Unit Number",
    "Unit Type",
    "Base Rate (INR/sqft)",
    "Customer Name",
    "Customer Phone",
    "Offered Rate (INR/sqft)",
    "Enquiry Status",
    "Agent Name",
    "Agent Phone",
    "Interaction Date",
    "Notes",
];

/// Placeholder used in interaction columns of an unsold, unvisited unit.
pub const NOT_APPLICABLE: &str = "N/A";

/// Notes cell of a unit with no interactions.
pub const NO_INTERACTIONS_NOTE: &str = "No interactions yet";

/// MIME type of the rendered report.
pub const REPORT_CONTENT_TYPE: &str = "text/csv; charset=utf-8";

/// One flattened report row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportRow {
    pub project: String,
    pub location: String,
    pub unit_number: String,
    pub unit_type: String,
    pub base_rate: String,
    pub customer_name: String,
    pub customer_phone: String,
    pub offered_rate: String,
    pub status: String,
    pub agent_name: String,
    pub agent_phone: String,
    pub date: String,
    pub notes: String,
}

impl ReportRow {
    fn for_interaction(project: &Project, unit: &Instrument, interaction: &Interaction) -> Self {
        Self {
            project: project.name.clone(),
            location: project.location.clone(),
            unit_number: unit.number.clone(),
            unit_type: unit.kind.to_string(),
            base_rate: unit.base_rate.to_string(),
            customer_name: interaction.customer_name.clone(),
            customer_phone: interaction.customer_phone.clone(),
            offered_rate: interaction.offered_rate.to_string(),
            status: interaction.status.to_string(),
            agent_name: interaction.agent_name.clone(),
            agent_phone: interaction.agent_phone.clone(),
            date: format_report_date(interaction.date),
            notes: interaction.notes_or_empty().to_owned(),
        }
    }

    fn for_available_unit(project: &Project, unit: &Instrument) -> Self {
        let na = || NOT_APPLICABLE.to_owned();
        Self {
            project: project.name.clone(),
            location: project.location.clone(),
            unit_number: unit.number.clone(),
            unit_type: unit.kind.to_string(),
            base_rate: unit.base_rate.to_string(),
            customer_name: na(),
            customer_phone: na(),
            offered_rate: na(),
            status: UnitStatus::Available.to_string(),
            agent_name: na(),
            agent_phone: na(),
            date: na(),
            notes: NO_INTERACTIONS_NOTE.to_owned(),
        }
    }

    /// Cells in header order.
    #[must_use]
    pub fn cells(&self) -> [&str; 13] {
        [
            &self.project,
            &self.location,
            &self.unit_number,
            &self.unit_type,
            &self.base_rate,
            &self.customer_name,
            &self.customer_phone,
            &self.offered_rate,
            &self.status,
            &self.agent_name,
            &self.agent_phone,
            &self.date,
            &self.notes,
        ]
    }
}

/// Flatten the portfolio into report rows.
#[must_use]
pub fn report_rows(projects: &[Project]) -> Vec<ReportRow> {
    let mut rows = Vec::new();
    for project in projects {
        for unit in &project.instruments {
            if unit.interactions.is_empty() {
                rows.push(ReportRow::for_available_unit(project, unit));
            } else {
                rows.extend(
                    unit.interactions
                        .iter()
                        .map(|interaction| ReportRow::for_interaction(project, unit, interaction)),
                );
            }
        }
    }
    rows
}

/// Render the full report: header plus one line per row, `\n` separated.
#[must_use]
pub fn render_csv(projects: &[Project]) -> String {
    let mut lines = Vec::with_capacity(1 + projects.len());
    lines.push(join_csv_line(&REPORT_HEADERS));
    lines.extend(report_rows(projects).iter().map(|row| join_csv_line(&row.cells())));
    lines.join("\n")
}

/// File name the report is delivered under, stamped with `date`.
#[must_use]
pub fn report_file_name(date: NaiveDate) -> String {
    format!("EstatePulse_Full_Report_{}.csv", date.format("%Y-%m-%d"))
}

/// Interaction date as shown in the report: `M/D/YYYY`.
#[must_use]
pub fn format_report_date(date: DateTime<Utc>) -> String {
    date.format("%-m/%-d/%Y").to_string()
}

fn join_csv_line(cells: &[&str]) -> String {
    cells
        .iter()
        .map(|cell| escape_csv_field(cell))
        .collect::<Vec<_>>()
        .join(",")
}

/// Quote a field if it contains a delimiter, quote, or line break.
#[must_use]
pub fn escape_csv_field(field: &str) -> Cow<'_, str> {
    if field.contains([',', '"', '\n', '\r']) {
        Cow::Owned(format!("\"{}\"", field.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(field)
    }
}
