//! Directory records and the aggregate views built from them.
//!
//! [`User`] mirrors a row of the `users` table. [`UserProfile`] and
//! [`GroupRoster`] are the two compositions the API returns: a user bundled
//! with its group names, and a group bundled with its member ids. Membership
//! itself has no record type; it only exists as the `groups`/`members` lists.

use crate::error::CoreError;
use crate::id::{GroupName, UserId};

/// A row of the `users` table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub user_id: UserId,
    pub first_name: String,
    pub last_name: String,
}

impl User {
    pub fn new(user_id: UserId, first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        User {
            user_id,
            first_name: first_name.into(),
            last_name: last_name.into(),
        }
    }

    /// Builds the record for an update addressed to `addressed`.
    ///
    /// The identity is immutable: a `supplied` id that is empty or equal to
    /// `addressed` is accepted, anything else is an [`CoreError::IdentityMismatch`].
    pub fn for_update(
        addressed: UserId,
        supplied: &str,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
    ) -> Result<Self, CoreError> {
        if !supplied.is_empty() && supplied != addressed.as_str() {
            return Err(CoreError::IdentityMismatch {
                expected: addressed.into_inner(),
                supplied: supplied.to_string(),
            });
        }
        Ok(User::new(addressed, first_name, last_name))
    }
}

/// A user together with the names of every group it belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserProfile {
    pub user: User,
    pub groups: Vec<GroupName>,
}

/// A group together with the ids of its members.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupRoster {
    pub name: GroupName,
    pub members: Vec<UserId>,
}
