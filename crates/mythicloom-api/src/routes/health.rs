//! Health check endpoint.

use axum::extract::State;
use axum::http::StatusCode;
use axum::{Json, Router, routing::get};
use mythicloom_story::domain::aggregates::StoryEngine;
use serde::Serialize;

use crate::state::AppState;

/// Health check response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    /// `ok`, or `degraded` when the story state cannot be read.
    pub status: &'static str,
    /// Service version.
    pub version: &'static str,
    /// Key of the day currently open, when readable.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active_day_key: Option<String>,
}

/// GET /health
async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let version = env!("CARGO_PKG_VERSION");
    match state.story.read(StoryEngine::active_day_key) {
        Ok(day_key) => (
            StatusCode::OK,
            Json(HealthResponse {
                status: "ok",
                version,
                active_day_key: Some(day_key.to_string()),
            }),
        ),
        Err(error) => {
            tracing::error!(%error, "story state unreadable");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(HealthResponse {
                    status: "degraded",
                    version,
                    active_day_key: None,
                }),
            )
        }
    }
}

/// Returns the health check router.
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
