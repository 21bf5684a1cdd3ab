//! Portfolio-wide search.
//!
//! A linear, case-insensitive substring scan over:
//! - project name and location
//! - unit number
//! - per interaction: customer name, customer phone, agent name, agent phone
//!
//! Results come back in project → unit → interaction traversal order with no
//! ranking. A blank query returns nothing rather than everything.

use serde::Serialize;

use crate::models::{Instrument, Interaction, Project};

/// What a search hit refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HitKind {
    Project,
    Unit,
    Interaction,
}

/// A single search match, borrowing from the searched collection.
///
/// Every hit carries its owning project so the caller can link to the
/// project detail view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SearchHit<'a> {
    Project {
        project: &'a Project,
    },
    Unit {
        project: &'a Project,
        unit: &'a Instrument,
    },
    Interaction {
        project: &'a Project,
        unit: &'a Instrument,
        interaction: &'a Interaction,
    },
}

impl<'a> SearchHit<'a> {
    /// Kind tag of the hit.
    #[must_use]
    pub const fn kind(&self) -> HitKind {
        match self {
            Self::Project { .. } => HitKind::Project,
            Self::Unit { .. } => HitKind::Unit,
            Self::Interaction { .. } => HitKind::Interaction,
        }
    }

    /// The project the hit belongs to.
    #[must_use]
    pub const fn project(&self) -> &'a Project {
        match *self {
            Self::Project { project }
            | Self::Unit { project, .. }
            | Self::Interaction { project, .. } => project,
        }
    }

    /// The unit the hit belongs to, if any.
    #[must_use]
    pub const fn unit(&self) -> Option<&'a Instrument> {
        match *self {
            Self::Project { .. } => None,
            Self::Unit { unit, .. } | Self::Interaction { unit, .. } => Some(unit),
        }
    }
}

/// Search `projects` for `query`.
///
/// The query is lowercased but otherwise used verbatim, so surrounding spaces
/// are part of the needle. Whitespace-only queries match nothing.
#[must_use]
pub fn search<'a>(projects: &'a [Project], query: &str) -> Vec<SearchHit<'a>> {
    if query.trim().is_empty() {
        return Vec::new();
    }

    let needle = query.to_lowercase();
    let matches = |haystack: &str| haystack.to_lowercase().contains(&needle);
    let mut hits = Vec::new();

    for project in projects {
        if matches(&project.name) || matches(&project.location) {
            hits.push(SearchHit::Project { project });
        }

        for unit in &project.instruments {
            if matches(&unit.number) {
                hits.push(SearchHit::Unit { project, unit });
            }

            for interaction in &unit.interactions {
                if matches(&interaction.customer_name)
                    || matches(&interaction.customer_phone)
                    || matches(&interaction.agent_name)
                    || matches(&interaction.agent_phone)
                {
                    hits.push(SearchHit::Interaction {
                        project,
                        unit,
                        interaction,
                    });
                }
            }
        }
    }

    hits
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::models::{NewInstrument, NewInteraction, NewProject};

    fn portfolio() -> Vec<Project> {
        let project = Project::create(
            NewProject {
                name: "Lakeview Residency".to_string(),
                location: "Pune".to_string(),
                description: String::new(),
            },
            Utc::now(),
        );
        let unit = Instrument::create(
            project.id.clone(),
            NewInstrument {
                number: "#A1".to_string(),
                ..NewInstrument::default()
            },
        );
        let unit_id = unit.id.clone();
        let interaction = Interaction::create(
            NewInteraction {
                agent_name: "Alex".to_string(),
                agent_phone: "9876543210".to_string(),
                customer_name: "Meera Shah".to_string(),
                customer_phone: "9123456780".to_string(),
                ..NewInteraction::default()
            },
            Utc::now(),
        );
        let project = project
            .with_instrument(unit)
            .with_interaction_logged(&unit_id, interaction)
            .expect("unit exists");

        let other = Project::create(
            NewProject {
                name: "Hilltop".to_string(),
                location: "Lakeside Road".to_string(),
                description: String::new(),
            },
            Utc::now(),
        );
        vec![project, other]
    }

    #[test]
    fn test_blank_query_returns_nothing() {
        let projects = portfolio();
        assert!(search(&projects, "").is_empty());
        assert!(search(&projects, "   ").is_empty());
    }

    #[test]
    fn test_case_insensitive_project_match_in_order() {
        let projects = portfolio();
        let hits = search(&projects, "LAKE");

        let kinds: Vec<HitKind> = hits.iter().map(SearchHit::kind).collect();
        assert_eq!(kinds, vec![HitKind::Project, HitKind::Project]);
        assert_eq!(hits[0].project().name, "Lakeview Residency");
        assert_eq!(hits[1].project().name, "Hilltop");
    }

    #[test]
    fn test_phone_substring_finds_interaction() {
        let projects = portfolio();
        let hits = search(&projects, "345678");

        assert_eq!(hits.len(), 1);
        let hit = hits[0];
        assert_eq!(hit.kind(), HitKind::Interaction);
        assert_eq!(hit.project().id, projects[0].id);
        assert_eq!(hit.unit().map(|u| u.number.as_str()), Some("#A1"));
    }

    #[test]
    fn test_unit_number_match() {
        let projects = portfolio();
        let hits = search(&projects, "#a1");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].kind(), HitKind::Unit);
    }

    #[test]
    fn test_hit_serializes_with_kind_tag() {
        let projects = portfolio();
        let hits = search(&projects, "meera");
        let json = serde_json::to_value(hits).expect("serialize");
        assert_eq!(json[0]["kind"], "INTERACTION");
        assert_eq!(json[0]["interaction"]["customerName"], "Meera Shah");
    }
}
