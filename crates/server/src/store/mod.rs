//! Persistence port for the project collection.
//!
//! Storage is a plain string blob store: the whole collection is serialized
//! as JSON under [`PROJECTS_KEY`] and rewritten on every successful mutation.
//! Only [`ProjectRepository`] knows the key and the encoding.

mod file;
mod memory;

use std::sync::Arc;

use thiserror::Error;

use estate_pulse_core::Project;

pub use file::FileStore;
pub use memory::MemoryStore;

/// Storage key of the serialized project collection.
pub const PROJECTS_KEY: &str = "estate_projects";

/// Errors raised by a blob store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Reading or writing the backing medium failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Collection could not be encoded.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Key contains characters the store cannot address.
    #[error("invalid storage key: {0}")]
    InvalidKey(String),
}

/// A synchronous string key-value store.
pub trait BlobStore: Send + Sync {
    /// Read the value stored under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing medium cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing medium cannot be written.
    fn put(&self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// Loads and saves the project collection through a [`BlobStore`].
#[derive(Clone)]
pub struct ProjectRepository {
    store: Arc<dyn BlobStore>,
}

impl std::fmt::Debug for ProjectRepository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProjectRepository").finish_non_exhaustive()
    }
}

impl ProjectRepository {
    pub fn new(store: Arc<dyn BlobStore>) -> Self {
        Self { store }
    }

    /// Load the stored collection.
    ///
    /// An absent key yields an empty collection. So does a blob that is not a
    /// valid collection; that case is logged and the bad blob is left in place
    /// until the next save overwrites it.
    ///
    /// # Errors
    ///
    /// Returns an error only if the store itself cannot be read.
    pub fn load(&self) -> Result<Vec<Project>, StoreError> {
        let Some(raw) = self.store.get(PROJECTS_KEY)? else {
            tracing::debug!(key = PROJECTS_KEY, "No stored projects, starting empty");
            return Ok(Vec::new());
        };

        match serde_json::from_str::<Vec<Project>>(&raw) {
            Ok(projects) => {
                tracing::debug!(count = projects.len(), "Loaded projects");
                Ok(projects)
            }
            Err(e) => {
                tracing::warn!(
                    key = PROJECTS_KEY,
                    error = %e,
                    "Stored projects are malformed, starting empty"
                );
                Ok(Vec::new())
            }
        }
    }

    /// Serialize and store the full collection.
    ///
    /// # Errors
    ///
    /// Returns an error if encoding or writing fails.
    pub fn save(&self, projects: &[Project]) -> Result<(), StoreError> {
        let raw = serde_json::to_string(projects)?;
        self.store.put(PROJECTS_KEY, &raw)
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use estate_pulse_core::NewProject;

    use super::*;

    fn repository() -> (Arc<MemoryStore>, ProjectRepository) {
        let store = Arc::new(MemoryStore::new());
        let repo = ProjectRepository::new(store.clone());
        (store, repo)
    }

    #[test]
    fn test_absent_key_loads_empty() {
        let (_, repo) = repository();
        assert!(repo.load().expect("load").is_empty());
    }

    #[test]
    fn test_malformed_blob_loads_empty() {
        let (store, repo) = repository();
        store.put(PROJECTS_KEY, "{not json").expect("put");
        assert!(repo.load().expect("load").is_empty());
    }

    #[test]
    fn test_save_then_load_is_equal() {
        let (store, repo) = repository();
        let projects = vec![Project::create(
            NewProject {
                name: "Lakeview".to_string(),
                location: "Pune".to_string(),
                description: "Lake facing plots".to_string(),
            },
            Utc::now(),
        )];

        repo.save(&projects).expect("save");
        assert_eq!(store.write_count(), 1);
        assert_eq!(repo.load().expect("load"), projects);
    }
}
