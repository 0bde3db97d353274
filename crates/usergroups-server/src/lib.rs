//! HTTP/JSON API server for the users/groups directory.
//!
//! Exposes CRUD over users and groups with a many-to-many membership
//! relation. This crate contains the aggregation service that composes the
//! storage-layer stores, the API schema types, error handling, configuration,
//! and route definitions.

pub mod config;
pub mod error;
pub mod handlers;
pub mod router;
pub mod schema;
pub mod service;
pub mod state;
