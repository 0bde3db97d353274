//! HTTP handler modules for the directory API.
//!
//! Handlers are thin: they decode the path and body, hand the work to
//! [`DirectoryService`](crate::service::DirectoryService) on the blocking
//! pool, and encode the result. No business logic lives in handlers.

pub mod groups;
pub mod users;

use axum::extract::rejection::PathRejection;
use axum::extract::Path;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};

use crate::error::ApiError;

/// Runs blocking store work off the async workers.
pub(crate) async fn run_blocking<T, F>(work: F) -> Result<T, ApiError>
where
    F: FnOnce() -> Result<T, ApiError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(work)
        .await
        .map_err(|e| ApiError::InternalError(format!("request task failed: {}", e)))?
}

/// The decoded `{param}` segment, or `None` when it does not decode to UTF-8.
/// Such a segment cannot name anything stored.
pub(crate) fn path_key(path: Result<Path<String>, PathRejection>) -> Option<String> {
    path.ok().map(|Path(key)| key)
}

/// A success status with a zero-length JSON-typed body.
pub(crate) fn empty_json(status: StatusCode) -> Response {
    (status, [(header::CONTENT_TYPE, "application/json")]).into_response()
}

/// Fallback for methods a path does not register.
pub async fn method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed
}

/// Fallback for paths outside the API.
pub async fn not_found() -> ApiError {
    ApiError::NotFound("Not found".to_string())
}
