//! Application state shared by every handler.
//!
//! [`AppState`] holds the [`DirectoryService`], which in turn owns the
//! pooled [`Database`](usergroups_storage::Database) handle opened at
//! startup. The handle is cloned into each request; nothing reaches for a
//! global.

use std::sync::Arc;

use tempfile::TempDir;

use usergroups_storage::{Database, DatabaseConfig};

use crate::error::ApiError;
use crate::service::DirectoryService;

#[derive(Clone)]
pub struct AppState {
    pub service: DirectoryService,
    /// Directory holding a throwaway database; removed when the last clone
    /// of the state is dropped.
    scratch: Option<Arc<TempDir>>,
}

impl AppState {
    /// Opens the database described by `config`, initializing the schema.
    pub fn new(config: DatabaseConfig) -> Result<Self, ApiError> {
        Ok(AppState {
            service: DirectoryService::new(open(config)?),
            scratch: None,
        })
    }

    /// Creates state over a fresh throwaway database (for testing).
    ///
    /// Backed by a file in its own temp directory, not `:memory:`: every
    /// pooled connection must see the same data.
    pub fn in_memory() -> Result<Self, ApiError> {
        let dir = tempfile::Builder::new()
            .prefix("usergroups_test_")
            .tempdir()
            .map_err(|e| ApiError::InternalError(format!("failed to create temp dir: {}", e)))?;
        let db = open(DatabaseConfig::new(dir.path().join("directory.db")))?;
        Ok(AppState {
            service: DirectoryService::new(db),
            scratch: Some(Arc::new(dir)),
        })
    }
}

fn open(config: DatabaseConfig) -> Result<Database, ApiError> {
    Database::open(config)
        .map_err(|e| ApiError::InternalError(format!("failed to open database: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn throwaway_database_is_removed_with_last_clone() {
        let state = AppState::in_memory().unwrap();
        let dir = state.scratch.as_deref().unwrap().path().to_path_buf();
        assert!(dir.join("directory.db").exists());

        let clone = state.clone();
        drop(state);
        assert!(dir.exists());

        drop(clone);
        assert!(!dir.exists());
    }

    #[test]
    fn opened_state_owns_no_scratch_dir() {
        let dir = tempfile::tempdir().unwrap();
        let state = AppState::new(DatabaseConfig::new(dir.path().join("kept.db"))).unwrap();
        assert!(state.scratch.is_none());
        drop(state);
        assert!(dir.path().join("kept.db").exists());
    }
}
