//! Core error types for usergroups-core.
//!
//! Uses `thiserror` for structured, matchable variants covering the ways an
//! identifier or record can be rejected before it reaches storage.

use thiserror::Error;

/// Validation errors produced by the usergroups-core crate.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// A user identifier was empty.
    #[error("user id must not be empty")]
    EmptyUserId,

    /// A group name was empty.
    #[error("group name must not be empty")]
    EmptyGroupName,

    /// A record tried to change the identity it is addressed by.
    #[error("user id '{supplied}' does not match '{expected}'")]
    IdentityMismatch { expected: String, supplied: String },
}
