//! Identifier newtypes for directory entities.
//!
//! [`UserId`] and [`GroupName`] are distinct wrappers over `String`, so a
//! group name cannot be passed where a user identifier is expected. Both are
//! non-empty when built through `new`; `stored` wraps values read back from
//! the database, which were validated on the way in.

use std::fmt;

use serde::Serialize;

use crate::error::CoreError;

/// Primary identity of a user (`users.UserID`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct UserId(String);

/// Primary identity of a group (`groups.GroupName`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct GroupName(String);

impl UserId {
    /// Builds a user id, rejecting the empty string.
    pub fn new(raw: impl Into<String>) -> Result<Self, CoreError> {
        let raw = raw.into();
        if raw.is_empty() {
            return Err(CoreError::EmptyUserId);
        }
        Ok(UserId(raw))
    }

    /// Wraps a value read back from the store without re-validating it.
    pub fn stored(raw: String) -> Self {
        UserId(raw)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl GroupName {
    /// Builds a group name, rejecting the empty string.
    pub fn new(raw: impl Into<String>) -> Result<Self, CoreError> {
        let raw = raw.into();
        if raw.is_empty() {
            return Err(CoreError::EmptyGroupName);
        }
        Ok(GroupName(raw))
    }

    /// Wraps a value read back from the store without re-validating it.
    pub fn stored(raw: String) -> Self {
        GroupName(raw)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Display for GroupName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_user_id_rejected() {
        assert_eq!(UserId::new(""), Err(CoreError::EmptyUserId));
    }

    #[test]
    fn empty_group_name_rejected() {
        assert_eq!(GroupName::new(String::new()), Err(CoreError::EmptyGroupName));
    }

    #[test]
    fn whitespace_is_a_valid_identifier() {
        // Only emptiness is rejected; names are otherwise opaque.
        assert_eq!(UserId::new(" ").unwrap().as_str(), " ");
    }

    #[test]
    fn display_prints_inner_value() {
        assert_eq!(format!("{}", UserId::new("u1").unwrap()), "u1");
        assert_eq!(format!("{}", GroupName::new("admins").unwrap()), "admins");
    }

    #[test]
    fn serializes_as_bare_string() {
        let json = serde_json::to_string(&GroupName::new("ops").unwrap()).unwrap();
        assert_eq!(json, "\"ops\"");
    }

    #[test]
    fn quotes_survive_unchanged() {
        // Names are bound as SQL parameters, never spliced into statements.
        let name = GroupName::new("o'brien's team").unwrap();
        assert_eq!(name.into_inner(), "o'brien's team");
    }
}
