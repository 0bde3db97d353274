//! Concurrent requests against one AppState.
//!
//! Many `PUT /users/{userid}` requests race to replace the same user's group
//! set. Each runs in its own write transaction, so afterwards the user's
//! groups must equal exactly one request's list.

use std::collections::BTreeSet;

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use usergroups_server::router::build_router;
use usergroups_server::state::AppState;

fn test_app() -> Router {
    let state = AppState::in_memory().expect("failed to create in-memory AppState");
    build_router(state)
}

async fn request_json(app: &Router, method: Method, path: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(path);
    let body = match body {
        Some(v) => {
            builder = builder.header("content-type", "application/json");
            Body::from(serde_json::to_vec(&v).unwrap())
        }
        None => Body::empty(),
    };
    let response = app.clone().oneshot(builder.body(body).unwrap()).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = serde_json::from_slice(&bytes).unwrap_or(json!(null));
    (status, json)
}

fn desired(writer: usize) -> Vec<String> {
    (writer..writer + 3).map(|g| format!("g{g}")).collect()
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn racing_updates_leave_one_requested_set() {
    const WRITERS: usize = 8;

    let app = test_app();
    let (status, body) = request_json(
        &app,
        Method::POST,
        "/users",
        Some(json!({ "userid": "u1", "first_name": "A", "last_name": "B", "groups": ["seed"] })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "create failed: {body:?}");

    let tasks: Vec<_> = (0..WRITERS)
        .map(|w| {
            let app = app.clone();
            tokio::spawn(async move {
                request_json(
                    &app,
                    Method::PUT,
                    "/users/u1",
                    Some(json!({ "first_name": "A", "last_name": "B", "groups": desired(w) })),
                )
                .await
            })
        })
        .collect();

    for task in tasks {
        let (status, body) = task.await.unwrap();
        assert_eq!(status, StatusCode::ACCEPTED, "update failed: {body:?}");
    }

    let (status, body) = request_json(&app, Method::GET, "/users/u1", None).await;
    assert_eq!(status, StatusCode::OK);
    let survivor: BTreeSet<String> = body["groups"]
        .as_array()
        .unwrap()
        .iter()
        .map(|g| g.as_str().unwrap().to_string())
        .collect();

    let candidates: Vec<BTreeSet<String>> =
        (0..WRITERS).map(|w| desired(w).into_iter().collect()).collect();
    assert!(
        candidates.contains(&survivor),
        "groups {survivor:?} mix several requests"
    );
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_creates_of_one_group_yield_one_winner() {
    const WRITERS: usize = 6;

    let app = test_app();
    let tasks: Vec<_> = (0..WRITERS)
        .map(|_| {
            let app = app.clone();
            tokio::spawn(async move {
                request_json(&app, Method::POST, "/groups", Some(json!("shared"))).await.0
            })
        })
        .collect();

    let mut statuses = Vec::new();
    for task in tasks {
        statuses.push(task.await.unwrap());
    }
    let created = statuses.iter().filter(|s| **s == StatusCode::CREATED).count();
    let conflicts = statuses.iter().filter(|s| **s == StatusCode::CONFLICT).count();
    assert_eq!(created, 1);
    assert_eq!(conflicts, WRITERS - 1);
}
