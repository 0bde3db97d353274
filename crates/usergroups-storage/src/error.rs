//! Storage error types for usergroups-storage.
//!
//! [`StorageError`] carries the raw backing-store failure. Its `Display` is
//! the underlying message unchanged, since the API surfaces it verbatim on
//! internal errors.

use thiserror::Error;

/// Errors produced by storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The SQLite engine rejected a statement or could not be reached.
    #[error("{0}")]
    Sqlite(#[from] rusqlite::Error),

    /// No pooled connection could be opened or checked out.
    #[error("connection pool error: {0}")]
    Pool(#[from] r2d2::Error),

    /// Applying the embedded schema migrations failed.
    #[error("migration error: {0}")]
    Migration(String),
}
