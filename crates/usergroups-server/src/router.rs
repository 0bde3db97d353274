//! Router assembly for the directory HTTP API.
//!
//! [`build_router`] wires all handler functions to their routes with a
//! tracing middleware layer. Each path registers an explicit method set; any
//! other method gets a JSON 405. That includes `HEAD`, which axum would
//! otherwise answer through the `GET` handler, and `OPTIONS`.

use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

/// Builds the complete axum router with all API routes.
///
/// Routes use axum 0.8 `/{param}` path syntax.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Users
        .route(
            "/users",
            get(handlers::users::list_users)
                .head(handlers::method_not_allowed)
                .post(handlers::users::create_user)
                .fallback(handlers::method_not_allowed),
        )
        .route(
            "/users/{userid}",
            get(handlers::users::get_user)
                .head(handlers::method_not_allowed)
                .put(handlers::users::update_user)
                .delete(handlers::users::delete_user)
                .fallback(handlers::method_not_allowed),
        )
        // Groups
        .route(
            "/groups",
            post(handlers::groups::create_group).fallback(handlers::method_not_allowed),
        )
        .route(
            "/groups/{groupname}",
            get(handlers::groups::get_group)
                .head(handlers::method_not_allowed)
                .put(handlers::groups::update_group)
                .delete(handlers::groups::delete_group)
                .fallback(handlers::method_not_allowed),
        )
        .fallback(handlers::not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
