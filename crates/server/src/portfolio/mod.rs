//! The portfolio state container.
//!
//! [`Portfolio`] is the single owner of the project collection and the
//! session identity. Views read through its accessors and change state only
//! by executing a [`Command`]. Every applied command re-serializes the whole
//! collection to the [`ProjectRepository`]; ignored commands write nothing.
//!
//! Privileged commands issued from an editor session are dropped silently
//! and reported as [`Outcome::Ignored`].

mod command;

use chrono::Utc;
use tracing::instrument;

use estate_pulse_core::{
    Instrument, Interaction, NewInstrument, NewProject, Project, ProjectId, User,
};

use crate::store::{ProjectRepository, StoreError};

pub use command::{Command, Enrollment, Outcome};

/// Project collection plus session user, bridged to storage.
#[derive(Debug)]
pub struct Portfolio {
    projects: Vec<Project>,
    user: User,
    repository: ProjectRepository,
}

impl Portfolio {
    /// Load the stored collection and start a session as `user`.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read. Malformed stored data is
    /// not an error; it loads as an empty collection.
    pub fn open(repository: ProjectRepository, user: User) -> Result<Self, StoreError> {
        let projects = repository.load()?;
        tracing::info!(
            projects = projects.len(),
            role = %user.role,
            "Portfolio opened"
        );
        Ok(Self {
            projects,
            user,
            repository,
        })
    }

    /// All projects, newest first.
    #[must_use]
    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    #[must_use]
    pub fn project(&self, id: &ProjectId) -> Option<&Project> {
        self.projects.iter().find(|p| &p.id == id)
    }

    /// The session identity.
    #[must_use]
    pub const fn user(&self) -> &User {
        &self.user
    }

    /// Units selectable for enrollment under `project_id`.
    ///
    /// Recomputed from current state on every call; empty when nothing is
    /// selected or the project is unknown.
    #[must_use]
    pub fn available_units(&self, project_id: Option<&ProjectId>) -> &[Instrument] {
        project_id
            .and_then(|id| self.project(id))
            .map(|p| p.instruments.as_slice())
            .unwrap_or_default()
    }

    /// Execute `command` against the collection.
    ///
    /// # Errors
    ///
    /// Returns an error if persisting an applied change fails. The in-memory
    /// change is kept in that case.
    #[instrument(skip_all, fields(command = command.name(), role = %self.user.role))]
    pub fn execute(&mut self, command: Command) -> Result<Outcome, StoreError> {
        if command.requires_privilege() && !self.user.is_privileged() {
            tracing::debug!("Dropping privileged command for unprivileged session");
            return Ok(Outcome::Ignored);
        }

        let outcome = match command {
            Command::CreateProject(draft) => self.create_project(draft)?,
            Command::DeleteProject(id) => self.delete_project(&id)?,
            Command::ReplaceProject(project) => self.replace_project(project)?,
            Command::AddInstrument { project_id, draft } => {
                self.add_instrument(&project_id, draft)?
            }
            Command::LogInteraction {
                project_id,
                instrument_id,
                draft,
            } => self.update_project(&project_id, |p| {
                p.with_interaction_logged(&instrument_id, Interaction::create(draft, Utc::now()))
            })?,
            Command::SetInteractionStatus {
                project_id,
                instrument_id,
                interaction_id,
                status,
            } => self.update_project(&project_id, |p| {
                p.with_interaction_status(&instrument_id, &interaction_id, status)
            })?,
            Command::DeleteInteraction {
                project_id,
                instrument_id,
                interaction_id,
            } => self.update_project(&project_id, |p| {
                p.without_interaction(&instrument_id, &interaction_id)
            })?,
            Command::ToggleRole => {
                self.user = self.user.toggled();
                tracing::info!(role = %self.user.role, "Session role switched");
                Outcome::Applied
            }
        };

        tracing::debug!(?outcome, "Command executed");
        Ok(outcome)
    }

    /// Prepend a new project. Admin only; a draft without name or location
    /// is ignored.
    ///
    /// # Errors
    ///
    /// Returns an error if persisting fails.
    pub fn create_project(&mut self, draft: NewProject) -> Result<Outcome, StoreError> {
        if !self.user.is_privileged() || !draft.is_complete() {
            return Ok(Outcome::Ignored);
        }
        let project = Project::create(draft, Utc::now());
        tracing::info!(project_id = %project.id, name = %project.name, "Project created");
        self.projects.insert(0, project);
        self.persist()
    }

    /// Remove a project and all its units and interactions. Admin only.
    ///
    /// # Errors
    ///
    /// Returns an error if persisting fails.
    pub fn delete_project(&mut self, id: &ProjectId) -> Result<Outcome, StoreError> {
        if !self.user.is_privileged() {
            return Ok(Outcome::Ignored);
        }
        let before = self.projects.len();
        self.projects.retain(|p| &p.id != id);
        if self.projects.len() == before {
            return Ok(Outcome::Ignored);
        }
        tracing::info!(project_id = %id, "Project deleted");
        self.persist()
    }

    /// Swap in `updated` for the project with the same ID.
    ///
    /// Open to every role; a no-op when no project matches.
    ///
    /// # Errors
    ///
    /// Returns an error if persisting fails.
    pub fn replace_project(&mut self, updated: Project) -> Result<Outcome, StoreError> {
        let Some(slot) = self.projects.iter_mut().find(|p| p.id == updated.id) else {
            return Ok(Outcome::Ignored);
        };
        *slot = updated;
        self.persist()
    }

    fn add_instrument(
        &mut self,
        project_id: &ProjectId,
        draft: NewInstrument,
    ) -> Result<Outcome, StoreError> {
        self.update_project(project_id, |p| {
            Some(p.with_instrument(Instrument::create(p.id.clone(), draft)))
        })
    }

    /// Build an updated copy of one project and route it through
    /// [`replace_project`](Self::replace_project).
    fn update_project(
        &mut self,
        project_id: &ProjectId,
        update: impl FnOnce(&Project) -> Option<Project>,
    ) -> Result<Outcome, StoreError> {
        let Some(updated) = self.project(project_id).and_then(update) else {
            return Ok(Outcome::Ignored);
        };
        self.replace_project(updated)
    }

    fn persist(&self) -> Result<Outcome, StoreError> {
        if let Err(e) = self.repository.save(&self.projects) {
            tracing::error!(error = %e, "Failed to persist projects");
            return Err(e);
        }
        Ok(Outcome::Applied)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use estate_pulse_core::{EnquiryStatus, NewInteraction, UnitStatus};

    use super::*;
    use crate::store::MemoryStore;

    fn portfolio(user: User) -> (Arc<MemoryStore>, Portfolio) {
        let store = Arc::new(MemoryStore::new());
        let repo = ProjectRepository::new(store.clone());
        let portfolio = Portfolio::open(repo, user).expect("open");
        (store, portfolio)
    }

    fn draft(name: &str) -> NewProject {
        NewProject {
            name: name.to_string(),
            location: "Pune".to_string(),
            description: String::new(),
        }
    }

    #[test]
    fn test_editor_cannot_create_or_delete() {
        let (store, mut admin) = portfolio(User::admin());
        admin.create_project(draft("Lakeview")).expect("create");
        let id = admin.projects()[0].id.clone();
        drop(admin);

        let mut editor = Portfolio::open(ProjectRepository::new(store.clone()), User::editor())
            .expect("open");
        let writes = store.write_count();

        assert_eq!(
            editor.execute(Command::CreateProject(draft("X"))).expect("execute"),
            Outcome::Ignored
        );
        assert_eq!(
            editor.execute(Command::DeleteProject(id)).expect("execute"),
            Outcome::Ignored
        );
        assert_eq!(editor.projects().len(), 1);
        assert_eq!(store.write_count(), writes);
    }

    #[test]
    fn test_admin_create_prepends_and_persists() {
        let (store, mut portfolio) = portfolio(User::admin());
        portfolio.create_project(draft("First")).expect("create");
        portfolio.create_project(draft("X")).expect("create");

        assert_eq!(portfolio.projects().len(), 2);
        assert_eq!(portfolio.projects()[0].name, "X");
        assert_eq!(store.write_count(), 2);
    }

    #[test]
    fn test_incomplete_draft_is_ignored() {
        let (store, mut portfolio) = portfolio(User::admin());
        let outcome = portfolio
            .create_project(NewProject {
                name: "Nameless place".to_string(),
                ..NewProject::default()
            })
            .expect("create");
        assert_eq!(outcome, Outcome::Ignored);
        assert_eq!(store.write_count(), 0);
    }

    #[test]
    fn test_editor_can_log_but_not_add_units() {
        let (store, mut admin) = portfolio(User::admin());
        admin.create_project(draft("Lakeview")).expect("create");
        let project_id = admin.projects()[0].id.clone();
        admin
            .execute(Command::AddInstrument {
                project_id: project_id.clone(),
                draft: NewInstrument::default(),
            })
            .expect("add");
        admin.execute(Command::ToggleRole).expect("toggle");
        assert!(!admin.user().is_privileged());
        let mut editor = admin;
        let writes = store.write_count();

        let outcome = editor
            .execute(Command::AddInstrument {
                project_id: project_id.clone(),
                draft: NewInstrument::default(),
            })
            .expect("add");
        assert_eq!(outcome, Outcome::Ignored);
        assert_eq!(store.write_count(), writes);

        let unit_id = editor.available_units(Some(&project_id))[0].id.clone();
        let outcome = editor
            .execute(Command::LogInteraction {
                project_id: project_id.clone(),
                instrument_id: unit_id.clone(),
                draft: NewInteraction {
                    status: EnquiryStatus::Booked,
                    ..NewInteraction::default()
                },
            })
            .expect("log");
        assert_eq!(outcome, Outcome::Applied);

        let unit = editor
            .project(&project_id)
            .and_then(|p| p.instrument(&unit_id))
            .expect("unit");
        assert_eq!(unit.current_status(), UnitStatus::Enquiry(EnquiryStatus::Booked));
    }

    #[test]
    fn test_replace_unknown_project_is_noop() {
        let (store, mut portfolio) = portfolio(User::editor());
        let stray = Project::create(draft("Stray"), Utc::now());
        assert_eq!(
            portfolio.replace_project(stray).expect("replace"),
            Outcome::Ignored
        );
        assert!(portfolio.projects().is_empty());
        assert_eq!(store.write_count(), 0);
    }

    #[test]
    fn test_available_units_without_selection() {
        let (_, portfolio) = portfolio(User::editor());
        assert!(portfolio.available_units(None).is_empty());
        assert!(
            portfolio
                .available_units(Some(&ProjectId::new("missing")))
                .is_empty()
        );
    }
}
