//! Schema initialization and connection setup for the SQLite backend.
//!
//! Uses `rusqlite_migration` to track applied migrations via SQLite's
//! `user_version` pragma. Migrations are embedded at compile time via
//! `include_str!`.

use std::time::Duration;

use rusqlite::Connection;
use rusqlite_migration::{Migrations, M};

use crate::error::StorageError;

/// All schema migrations, applied in order via `user_version` tracking.
fn migrations() -> Migrations<'static> {
    Migrations::new(vec![
        M::up(include_str!("migrations/001_initial_schema.sql")),
    ])
}

/// Brings the schema up to date. Safe to run against a database that already
/// has the tables.
pub fn initialize(conn: &mut Connection) -> Result<(), StorageError> {
    migrations()
        .to_latest(conn)
        .map_err(|e| StorageError::Migration(e.to_string()))
}

/// Applies the per-connection pragmas. Runs once for every connection the
/// pool opens.
pub fn configure(conn: &Connection, busy_timeout: Duration) -> rusqlite::Result<()> {
    // Set first so the pragmas below also wait on a busy database.
    conn.busy_timeout(busy_timeout)?;
    // journal_mode answers with the resulting mode, so it needs the checked form.
    conn.pragma_update_and_check(None, "journal_mode", "WAL", |row| row.get::<_, String>(0))?;
    conn.pragma_update(None, "synchronous", "NORMAL")?;
    conn.pragma_update(None, "foreign_keys", "ON")?;
    Ok(())
}
