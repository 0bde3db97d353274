//! User handlers (list, create, get, update, delete).

use axum::body::Bytes;
use axum::extract::rejection::PathRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Response;
use axum::Json;

use usergroups_core::{desired_group_names, GroupSet, User, UserId};

use crate::error::ApiError;
use crate::handlers::{empty_json, path_key, run_blocking};
use crate::schema::decode_body;
use crate::schema::users::{UserWithGroups, UserWithGroupsRequest};
use crate::service::USER_NOT_FOUND;
use crate::state::AppState;

const INVALID_USER: &str = "Invalid user data";

fn invalid_user() -> ApiError {
    ApiError::BadRequest(INVALID_USER.to_string())
}

/// The user addressed by the path. An empty or undecodable segment can never
/// have been stored.
fn addressed_user(path: Result<Path<String>, PathRejection>) -> Result<UserId, ApiError> {
    path_key(path)
        .and_then(|key| UserId::new(key).ok())
        .ok_or_else(|| ApiError::NotFound(USER_NOT_FOUND.to_string()))
}

/// Splits a decoded body into its names and validated group set.
fn parts(req: UserWithGroupsRequest) -> Result<(String, String, String, GroupSet), ApiError> {
    let groups = desired_group_names(req.groups.unwrap_or_default()).map_err(|_| invalid_user())?;
    Ok((
        req.userid.unwrap_or_default(),
        req.first_name.unwrap_or_default(),
        req.last_name.unwrap_or_default(),
        groups,
    ))
}

/// Lists every user with its groups.
///
/// `GET /users`
pub async fn list_users(State(state): State<AppState>) -> Result<Json<Vec<UserWithGroups>>, ApiError> {
    let service = state.service.clone();
    let profiles = run_blocking(move || service.list_users()).await?;
    Ok(Json(profiles.into_iter().map(UserWithGroups::from).collect()))
}

/// Creates a user and attaches its groups, creating missing groups.
///
/// `POST /users`
pub async fn create_user(State(state): State<AppState>, body: Bytes) -> Result<Response, ApiError> {
    let req: UserWithGroupsRequest = decode_body(&body).map_err(|_| invalid_user())?;
    let (userid, first_name, last_name, groups) = parts(req)?;
    let user_id = UserId::new(userid).map_err(|_| invalid_user())?;
    let user = User::new(user_id, first_name, last_name);

    let service = state.service.clone();
    run_blocking(move || service.create_user(user, groups)).await?;
    Ok(empty_json(StatusCode::CREATED))
}

/// Returns one user with its groups.
///
/// `GET /users/{userid}`
pub async fn get_user(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> Result<Json<UserWithGroups>, ApiError> {
    let user_id = addressed_user(path)?;
    let service = state.service.clone();
    let profile = run_blocking(move || service.get_user(&user_id)).await?;
    Ok(Json(profile.into()))
}

/// Updates a user's names and replaces its group set.
///
/// `PUT /users/{userid}`
pub async fn update_user(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
    body: Bytes,
) -> Result<Response, ApiError> {
    let req: UserWithGroupsRequest = decode_body(&body).map_err(|_| invalid_user())?;
    let (supplied, first_name, last_name, groups) = parts(req)?;
    let addressed = addressed_user(path)?;
    let user = User::for_update(addressed, &supplied, first_name, last_name).map_err(|_| invalid_user())?;

    let service = state.service.clone();
    run_blocking(move || service.update_user(user, groups)).await?;
    Ok(empty_json(StatusCode::ACCEPTED))
}

/// Deletes a user and its memberships.
///
/// `DELETE /users/{userid}`
pub async fn delete_user(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> Result<Response, ApiError> {
    let user_id = addressed_user(path)?;
    let service = state.service.clone();
    run_blocking(move || service.delete_user(&user_id)).await?;
    Ok(empty_json(StatusCode::ACCEPTED))
}
