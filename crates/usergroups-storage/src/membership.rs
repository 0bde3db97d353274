//! [`MembershipStore`]: the `userGroups` relation between users and groups.
//!
//! Membership has no identity of its own; a row is a `(UserID, GroupName)`
//! pair and the primary key keeps pairs unique. Besides projections and bulk
//! deletes, the store owns the two reconciliation operations:
//!
//! - [`MembershipStore::reconcile_groups_for_user`] replaces a user's group
//!   set with the desired one.
//! - [`MembershipStore::reconcile_users_for_group`] only adds; it never removes
//!   members missing from the desired list.
//!
//! Both issue several statements. Run them inside
//! [`Database::write`](crate::Database::write) to make them atomic.

use rusqlite::{params, params_from_iter, Connection};

use usergroups_core::{GroupName, GroupSet, UserId, UserSet};

use crate::error::StorageError;

const INSERT_EDGE: &str =
    "INSERT INTO userGroups (UserID, GroupName) VALUES (?1, ?2) ON CONFLICT DO NOTHING";

/// Store over the `userGroups` table, borrowing a connection or transaction.
pub struct MembershipStore<'c> {
    conn: &'c Connection,
}

impl<'c> MembershipStore<'c> {
    pub fn new(conn: &'c Connection) -> Self {
        MembershipStore { conn }
    }

    pub fn list_groups_for_user(&self, user_id: &UserId) -> Result<Vec<GroupName>, StorageError> {
        let mut stmt = self
            .conn
            .prepare_cached("SELECT GroupName FROM userGroups WHERE UserID = ?1")?;
        let rows = stmt.query_map(params![user_id.as_str()], |row| row.get::<_, String>(0))?;
        let mut names = Vec::new();
        for row in rows {
            names.push(GroupName::stored(row?));
        }
        Ok(names)
    }

    pub fn list_users_for_group(&self, name: &GroupName) -> Result<Vec<UserId>, StorageError> {
        let mut stmt = self
            .conn
            .prepare_cached("SELECT UserID FROM userGroups WHERE GroupName = ?1")?;
        let rows = stmt.query_map(params![name.as_str()], |row| row.get::<_, String>(0))?;
        let mut ids = Vec::new();
        for row in rows {
            ids.push(UserId::stored(row?));
        }
        Ok(ids)
    }

    /// Makes the groups of `user_id` exactly `desired`.
    ///
    /// Inserts every missing pair, then deletes every pair whose group is not
    /// in `desired`. Returns rows inserted plus rows deleted.
    pub fn reconcile_groups_for_user(
        &self,
        user_id: &UserId,
        desired: &GroupSet,
    ) -> Result<usize, StorageError> {
        let mut inserted = 0;
        {
            let mut stmt = self.conn.prepare_cached(INSERT_EDGE)?;
            for name in desired {
                inserted += stmt.execute(params![user_id.as_str(), name.as_str()])?;
            }
        }

        // `NOT IN ()` is not valid SQL; an empty desired set removes everything.
        let deleted = if desired.is_empty() {
            self.delete_for_user(user_id)?
        } else {
            let sql = format!(
                "DELETE FROM userGroups WHERE UserID = ?1 AND GroupName NOT IN ({})",
                placeholders(2, desired.len())
            );
            let values =
                std::iter::once(user_id.as_str()).chain(desired.iter().map(GroupName::as_str));
            self.conn.execute(&sql, params_from_iter(values))?
        };

        tracing::debug!(user = %user_id, inserted, deleted, "reconciled groups for user");
        Ok(inserted + deleted)
    }

    /// Adds every `(user, name)` pair for `desired`. Existing members that are
    /// not listed stay in the group.
    pub fn reconcile_users_for_group(
        &self,
        name: &GroupName,
        desired: &UserSet,
    ) -> Result<usize, StorageError> {
        let mut stmt = self.conn.prepare_cached(INSERT_EDGE)?;
        let mut inserted = 0;
        for user_id in desired {
            inserted += stmt.execute(params![user_id.as_str(), name.as_str()])?;
        }
        tracing::debug!(group = %name, inserted, "added users to group");
        Ok(inserted)
    }

    pub fn delete_for_user(&self, user_id: &UserId) -> Result<usize, StorageError> {
        let deleted = self
            .conn
            .execute("DELETE FROM userGroups WHERE UserID = ?1", params![user_id.as_str()])?;
        Ok(deleted)
    }

    pub fn delete_for_group(&self, name: &GroupName) -> Result<usize, StorageError> {
        let deleted = self
            .conn
            .execute("DELETE FROM userGroups WHERE GroupName = ?1", params![name.as_str()])?;
        Ok(deleted)
    }
}

/// `?first, ?first+1, ...` for `count` bound parameters.
fn placeholders(first: usize, count: usize) -> String {
    (first..first + count)
        .map(|i| format!("?{i}"))
        .collect::<Vec<_>>()
        .join(", ")
}
