//! Group handlers (create, get, update membership, delete).

use axum::body::Bytes;
use axum::extract::rejection::PathRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Response;
use axum::Json;

use usergroups_core::{desired_user_ids, GroupName};

use crate::error::ApiError;
use crate::handlers::{empty_json, path_key, run_blocking};
use crate::schema::decode_body;
use crate::schema::groups::{GroupMembersRequest, GroupWithUsers};
use crate::service::GROUP_NOT_FOUND;
use crate::state::AppState;

/// The group addressed by the path, if the segment can name one at all.
fn addressed_group(path: Result<Path<String>, PathRejection>) -> Option<GroupName> {
    path_key(path).and_then(|key| GroupName::new(key).ok())
}

fn group_not_found() -> ApiError {
    ApiError::NotFound(GROUP_NOT_FOUND.to_string())
}

/// Creates a group from a bare JSON string body.
///
/// `POST /groups`
pub async fn create_group(State(state): State<AppState>, body: Bytes) -> Result<Response, ApiError> {
    let invalid = || ApiError::BadRequest("Invalid group data".to_string());
    let raw: String = decode_body(&body).map_err(|_| invalid())?;
    let name = GroupName::new(raw).map_err(|_| invalid())?;

    let service = state.service.clone();
    run_blocking(move || service.create_group(&name)).await?;
    Ok(empty_json(StatusCode::CREATED))
}

/// Returns a group with its member ids.
///
/// `GET /groups/{groupname}`
pub async fn get_group(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> Result<Json<GroupWithUsers>, ApiError> {
    let name = addressed_group(path).ok_or_else(group_not_found)?;
    let service = state.service.clone();
    let roster = run_blocking(move || service.get_group(&name)).await?;
    Ok(Json(roster.into()))
}

/// Adds users to a group. Existing members not in the body are kept.
///
/// `PUT /groups/{groupname}`
pub async fn update_group(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
    body: Bytes,
) -> Result<Response, ApiError> {
    let name = addressed_group(path).ok_or_else(group_not_found)?;
    let service = state.service.clone();
    run_blocking(move || {
        // A missing group is reported before the body is looked at.
        service.ensure_group_exists(&name)?;
        let invalid = || ApiError::BadRequest("Invalid group membership data".to_string());
        let req: GroupMembersRequest = decode_body(&body).map_err(|_| invalid())?;
        let user_ids = desired_user_ids(req.userids.unwrap_or_default()).map_err(|_| invalid())?;
        service.add_group_members(&name, user_ids)
    })
    .await?;
    Ok(empty_json(StatusCode::ACCEPTED))
}

/// Deletes a group and its memberships, whether or not it existed.
///
/// `DELETE /groups/{groupname}`
pub async fn delete_group(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> Result<Response, ApiError> {
    // Nothing can be stored under an empty or undecodable name.
    if let Some(name) = addressed_group(path) {
        let service = state.service.clone();
        run_blocking(move || service.delete_group(&name)).await?;
    }
    Ok(empty_json(StatusCode::ACCEPTED))
}
