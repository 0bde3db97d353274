//! Domain model for the users/groups directory.
//!
//! This crate holds the types every other crate speaks in: validated
//! identifier newtypes, the [`User`] record, the two aggregate views
//! ([`UserProfile`] and [`GroupRoster`]), and the desired-set normalization
//! that membership reconciliation relies on. It performs no I/O.
//!
//! # Modules
//!
//! - [`error`]: CoreError for identifier validation failures
//! - [`id`]: UserId and GroupName newtypes
//! - [`model`]: User, UserProfile, GroupRoster
//! - [`desired`]: duplicate-free desired sets for reconciliation

pub mod desired;
pub mod error;
pub mod id;
pub mod model;

// Re-export commonly used types
pub use desired::{desired_group_names, desired_user_ids, GroupSet, UserSet};
pub use error::CoreError;
pub use id::{GroupName, UserId};
pub use model::{GroupRoster, User, UserProfile};
