//! Shared test helpers for API integration tests.
#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use mythicloom_core::clock::Clock;
use mythicloom_story::application::store::StoryStore;
use mythicloom_story::domain::aggregates::{StoryEngine, StoryOptions};
use mythicloom_test_support::{ManualClock, SequenceIdGenerator, fixed_now};
use tower::ServiceExt;

use mythicloom_api::auth::AdminToken;
use mythicloom_api::build_router;
use mythicloom_api::state::AppState;

/// Admin secret configured for every test app.
pub const ADMIN_SECRET: &str = "integration-admin-secret";

/// A test app plus the clock driving it, so tests can move time forward.
pub struct TestApp {
    pub router: Router,
    pub clock: Arc<ManualClock>,
}

/// Build the full app router with a manual clock starting at
/// 2026-01-15T10:00:00Z, sequential submission ids and a two-hour first day.
pub fn build_test_app() -> TestApp {
    let clock = Arc::new(ManualClock::new(fixed_now()));
    let options = StoryOptions {
        initial_prompt: "Test prompt".to_owned(),
        initial_deadline_minutes: 120,
    };
    let story = StoryStore::new(StoryEngine::new(&options, clock.as_ref()));
    let shared_clock: Arc<dyn Clock + Send + Sync> = clock.clone();
    let app_state = AppState::new(
        story,
        shared_clock,
        Arc::new(SequenceIdGenerator::new()),
        Some(AdminToken::new(ADMIN_SECRET)),
    );

    TestApp {
        router: build_router(app_state),
        clock,
    }
}

/// Send a POST request with a JSON body and return the response.
pub async fn post_json(
    app: &Router,
    uri: &str,
    body: &serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(body).unwrap()))
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let body_bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body_bytes).unwrap();

    (status, json)
}

/// Send a GET request and return the response.
pub async fn get_json(app: &Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let body_bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body_bytes).unwrap();

    (status, json)
}

/// Submit a branch and return its id.
pub async fn submit(app: &Router, author: &str, text: &str) -> String {
    let (status, json) = post_json(
        app,
        "/api/story/submit",
        &serde_json::json!({ "authorId": author, "branchText": text }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "submit failed: {json}");
    json["submission"]["id"].as_str().unwrap().to_owned()
}

/// Cast a vote and return the submission's new tally.
pub async fn vote(app: &Router, submission_id: &str, delta: i64, voter: &str) -> i64 {
    let (status, json) = post_json(
        app,
        "/api/story/vote",
        &serde_json::json!({ "submissionId": submission_id, "delta": delta, "voterId": voter }),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "vote failed: {json}");
    json["submission"]["votes"].as_i64().unwrap()
}

/// Finalize the active day with the test admin secret.
pub async fn finalize(
    app: &Router,
    next_prompt: &str,
    next_deadline: &str,
) -> (StatusCode, serde_json::Value) {
    post_json(
        app,
        "/api/story/finalize",
        &serde_json::json!({
            "adminToken": ADMIN_SECRET,
            "nextPrompt": next_prompt,
            "nextDeadline": next_deadline
        }),
    )
    .await
}
