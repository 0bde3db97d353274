//! [`GroupStore`]: typed access to the `groups` table.
//!
//! Groups carry nothing but their name. They are created explicitly or as a
//! side effect of assigning a user to a name that does not exist yet, which
//! is why creation ignores conflicts.

use rusqlite::{params, Connection};

use usergroups_core::{GroupName, GroupSet};

use crate::error::StorageError;

/// Store over the `groups` table, borrowing a connection or transaction.
pub struct GroupStore<'c> {
    conn: &'c Connection,
}

impl<'c> GroupStore<'c> {
    pub fn new(conn: &'c Connection) -> Self {
        GroupStore { conn }
    }

    /// Inserts `name`; returns 0 without writing if it already exists.
    pub fn create(&self, name: &GroupName) -> Result<usize, StorageError> {
        let mut stmt = self
            .conn
            .prepare_cached("INSERT INTO \"groups\" (GroupName) VALUES (?1) ON CONFLICT DO NOTHING")?;
        Ok(stmt.execute(params![name.as_str()])?)
    }

    /// Ensures every name exists. Returns how many were newly created.
    pub fn create_many(&self, names: &GroupSet) -> Result<usize, StorageError> {
        let mut created = 0;
        for name in names {
            created += self.create(name)?;
        }
        Ok(created)
    }

    pub fn exists(&self, name: &GroupName) -> Result<bool, StorageError> {
        let exists: bool = self.conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM \"groups\" WHERE GroupName = ?1)",
            params![name.as_str()],
            |row| row.get(0),
        )?;
        Ok(exists)
    }

    pub fn delete(&self, name: &GroupName) -> Result<usize, StorageError> {
        let deleted = self
            .conn
            .execute("DELETE FROM \"groups\" WHERE GroupName = ?1", params![name.as_str()])?;
        Ok(deleted)
    }
}
