//! [`UserStore`]: typed access to the `users` table.
//!
//! Each method is a single statement. Writes report rows affected rather than
//! failing on a missing or duplicate key; callers read `0` as "no such user"
//! (update, delete) or "already exists" (create).

use rusqlite::{params, Connection, OptionalExtension, Row};

use usergroups_core::{User, UserId};

use crate::error::StorageError;

/// Store over the `users` table, borrowing a connection or transaction.
pub struct UserStore<'c> {
    conn: &'c Connection,
}

impl<'c> UserStore<'c> {
    pub fn new(conn: &'c Connection) -> Self {
        UserStore { conn }
    }

    /// All users in table scan order.
    pub fn list(&self) -> Result<Vec<User>, StorageError> {
        let mut stmt = self
            .conn
            .prepare_cached("SELECT FirstName, LastName, UserID FROM users")?;
        let rows = stmt.query_map([], user_from_row)?;
        let mut users = Vec::new();
        for row in rows {
            users.push(row?);
        }
        Ok(users)
    }

    pub fn get(&self, user_id: &UserId) -> Result<Option<User>, StorageError> {
        let user = self
            .conn
            .query_row(
                "SELECT FirstName, LastName, UserID FROM users WHERE UserID = ?1",
                params![user_id.as_str()],
                user_from_row,
            )
            .optional()?;
        Ok(user)
    }

    /// Inserts `user`; returns 0 without writing if the id is taken.
    pub fn create(&self, user: &User) -> Result<usize, StorageError> {
        let inserted = self.conn.execute(
            "INSERT INTO users (FirstName, LastName, UserID) VALUES (?1, ?2, ?3)
             ON CONFLICT (UserID) DO NOTHING",
            params![user.first_name, user.last_name, user.user_id.as_str()],
        )?;
        Ok(inserted)
    }

    /// Overwrites the names of the user keyed by `user.user_id`.
    pub fn update(&self, user: &User) -> Result<usize, StorageError> {
        let updated = self.conn.execute(
            "UPDATE users SET FirstName = ?1, LastName = ?2 WHERE UserID = ?3",
            params![user.first_name, user.last_name, user.user_id.as_str()],
        )?;
        Ok(updated)
    }

    pub fn delete(&self, user_id: &UserId) -> Result<usize, StorageError> {
        let deleted = self
            .conn
            .execute("DELETE FROM users WHERE UserID = ?1", params![user_id.as_str()])?;
        Ok(deleted)
    }
}

fn user_from_row(row: &Row<'_>) -> rusqlite::Result<User> {
    // Name columns are nullable in the persisted schema.
    let first_name: Option<String> = row.get(0)?;
    let last_name: Option<String> = row.get(1)?;
    let user_id: String = row.get(2)?;
    Ok(User {
        user_id: UserId::stored(user_id),
        first_name: first_name.unwrap_or_default(),
        last_name: last_name.unwrap_or_default(),
    })
}
