//! Relational storage for the users/groups directory.
//!
//! Provides the [`Database`] handle that owns schema initialization and
//! transaction scoping, plus three stores that each map one table to typed
//! operations:
//!
//! - [`UserStore`]: CRUD over `users`, keyed by user id
//! - [`GroupStore`]: create/exists/delete over `groups`, keyed by group name
//! - [`MembershipStore`]: the `userGroups` relation, including the two
//!   reconciliation operations
//!
//! Stores borrow a `rusqlite::Connection`; a `Transaction` derefs to one, so
//! the same store code runs standalone or inside [`Database::write`].
//!
//! # Modules
//!
//! - [`error`]: StorageError
//! - [`schema`]: embedded migrations and connection pragmas
//! - [`database`]: pooled Database handle with scoped read/write transactions
//! - [`users`], [`groups`], [`membership`]: the stores

pub mod database;
pub mod error;
pub mod groups;
pub mod membership;
pub mod schema;
pub mod users;

// Re-export key types for ergonomic use.
pub use database::{Database, DatabaseConfig};
pub use error::StorageError;
pub use groups::GroupStore;
pub use membership::MembershipStore;
pub use users::UserStore;
