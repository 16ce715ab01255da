//! Routes for the Story Progression bounded context.

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::{info, instrument, warn};
use url::Url;
use uuid::Uuid;

use mythicloom_story::application::command_handlers::{
    self, FinalizeResponse, SubmitBranchResponse, VoteResponse,
};
use mythicloom_story::application::query_handlers::{self, TimelineView};
use mythicloom_story::domain::commands;
use mythicloom_story::domain::records::StoryState;
use mythicloom_story::domain::values::{MAX_BRANCH_LENGTH, MIN_BRANCH_LENGTH};

use crate::error::ApiError;
use crate::state::AppState;

const MIN_IDENTITY_LENGTH: usize = 2;
const MAX_IDENTITY_LENGTH: usize = 100;
const MIN_ADMIN_TOKEN_LENGTH: usize = 10;
const MIN_PROMPT_LENGTH: usize = 10;
const MAX_PROMPT_LENGTH: usize = 300;

/// Request body for POST /submit.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitBranchRequest {
    /// Opaque author identity.
    pub author_id: String,
    /// The proposed continuation.
    pub branch_text: String,
    /// Optional absolute URL of the originating comment.
    pub source_comment_url: Option<String>,
}

/// Request body for POST /vote.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoteRequest {
    /// The submission being voted on.
    pub submission_id: Uuid,
    /// `1` or `-1`; anything else is rejected by the engine.
    pub delta: i64,
    /// Opaque voter identity.
    pub voter_id: String,
}

/// Request body for POST /finalize.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinalizeRequest {
    /// Must equal the configured admin secret.
    pub admin_token: String,
    /// Prompt for the next day.
    pub next_prompt: String,
    /// Requested deadline for the next day (RFC 3339).
    pub next_deadline: DateTime<Utc>,
}

fn check_length(field: &str, value: &str, min: usize, max: usize) -> Result<(), ApiError> {
    let length = value.chars().count();
    if length < min {
        return Err(ApiError::InvalidRequest(format!(
            "{field} must be at least {min} characters."
        )));
    }
    if length > max {
        return Err(ApiError::InvalidRequest(format!(
            "{field} must be at most {max} characters."
        )));
    }
    Ok(())
}

impl SubmitBranchRequest {
    fn validate(&self) -> Result<(), ApiError> {
        check_length(
            "authorId",
            &self.author_id,
            MIN_IDENTITY_LENGTH,
            MAX_IDENTITY_LENGTH,
        )?;
        check_length(
            "branchText",
            &self.branch_text,
            MIN_BRANCH_LENGTH,
            MAX_BRANCH_LENGTH,
        )?;
        if let Some(url) = &self.source_comment_url {
            Url::parse(url).map_err(|e| {
                ApiError::InvalidRequest(format!("sourceCommentUrl must be a valid URL: {e}"))
            })?;
        }
        Ok(())
    }
}

impl VoteRequest {
    fn validate(&self) -> Result<(), ApiError> {
        check_length(
            "voterId",
            &self.voter_id,
            MIN_IDENTITY_LENGTH,
            MAX_IDENTITY_LENGTH,
        )
    }
}

impl FinalizeRequest {
    fn validate(&self) -> Result<(), ApiError> {
        check_length(
            "adminToken",
            &self.admin_token,
            MIN_ADMIN_TOKEN_LENGTH,
            usize::MAX,
        )?;
        check_length(
            "nextPrompt",
            &self.next_prompt,
            MIN_PROMPT_LENGTH,
            MAX_PROMPT_LENGTH,
        )
    }
}

/// GET /state
#[instrument(skip(state))]
async fn get_state(State(state): State<AppState>) -> Result<Json<StoryState>, ApiError> {
    Ok(Json(query_handlers::get_story_state(&state.story)?))
}

/// GET /timeline
#[instrument(skip(state))]
async fn get_timeline(State(state): State<AppState>) -> Result<Json<TimelineView>, ApiError> {
    Ok(Json(query_handlers::get_timeline(&state.story)?))
}

/// POST /submit
#[instrument(skip(state, request), fields(author_id = %request.author_id))]
async fn submit_branch(
    State(state): State<AppState>,
    Json(request): Json<SubmitBranchRequest>,
) -> Result<(StatusCode, Json<SubmitBranchResponse>), ApiError> {
    request.validate()?;

    let command = commands::SubmitBranch {
        correlation_id: Uuid::new_v4(),
        author_id: request.author_id,
        branch_text: request.branch_text,
        source_comment_url: request.source_comment_url,
    };

    let response = command_handlers::handle_submit_branch(
        &command,
        &state.story,
        state.clock.as_ref(),
        state.ids.as_ref(),
    )?;

    info!(
        correlation_id = %command.correlation_id,
        submission_id = %response.submission.id,
        "branch submitted"
    );

    Ok((StatusCode::CREATED, Json(response)))
}

/// POST /vote
#[instrument(skip(state, request), fields(submission_id = %request.submission_id))]
async fn cast_vote(
    State(state): State<AppState>,
    Json(request): Json<VoteRequest>,
) -> Result<Json<VoteResponse>, ApiError> {
    request.validate()?;

    let command = commands::CastVote {
        correlation_id: Uuid::new_v4(),
        submission_id: request.submission_id,
        delta: request.delta,
        voter_id: request.voter_id,
    };

    let response = command_handlers::handle_cast_vote(&command, &state.story, state.clock.as_ref())?;

    Ok(Json(response))
}

/// POST /finalize
#[instrument(skip(state, request))]
async fn finalize_day(
    State(state): State<AppState>,
    Json(request): Json<FinalizeRequest>,
) -> Result<Json<FinalizeResponse>, ApiError> {
    request.validate()?;

    let authorized = state
        .admin_token
        .as_ref()
        .is_some_and(|token| token.matches(&request.admin_token));
    if !authorized {
        warn!("finalize rejected: admin token mismatch");
        return Err(ApiError::Forbidden);
    }

    let command = commands::FinalizeDay {
        correlation_id: Uuid::new_v4(),
        next_prompt: request.next_prompt,
        next_deadline: request.next_deadline,
    };

    let response =
        command_handlers::handle_finalize_day(&command, &state.story, state.clock.as_ref())?;

    Ok(Json(response))
}

/// Returns the router for the story context.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/state", get(get_state))
        .route("/timeline", get(get_timeline))
        .route("/submit", post(submit_branch))
        .route("/vote", post(cast_vote))
        .route("/finalize", post(finalize_day))
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::Request;
    use mythicloom_core::clock::Clock;
    use mythicloom_story::application::store::StoryStore;
    use mythicloom_story::domain::aggregates::{StoryEngine, StoryOptions};
    use mythicloom_test_support::{BRANCH_TEXT, FixedClock, SequenceIdGenerator, fixed_now};
    use serde_json::Value;
    use tower::ServiceExt;

    use crate::auth::AdminToken;

    const ADMIN_SECRET: &str = "super-secret-admin-token";

    fn test_app_state(admin_token: Option<AdminToken>) -> AppState {
        let clock: Arc<dyn Clock + Send + Sync> = Arc::new(FixedClock(fixed_now()));
        let story = StoryStore::new(StoryEngine::new(&StoryOptions::default(), clock.as_ref()));
        AppState::new(
            story,
            clock,
            Arc::new(SequenceIdGenerator::new()),
            admin_token,
        )
    }

    fn test_app() -> Router {
        router().with_state(test_app_state(Some(AdminToken::new(ADMIN_SECRET))))
    }

    async fn send(app: Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(json) => builder
                .header("content-type", "application/json")
                .body(Body::from(serde_json::to_vec(&json).unwrap()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = if body_bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&body_bytes).unwrap_or(Value::Null)
        };
        (status, json)
    }

    #[tokio::test]
    async fn test_get_state_returns_open_day() {
        // Arrange
        let app = test_app();

        // Act
        let (status, json) = send(app, "GET", "/state", None).await;

        // Assert
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["activeDayKey"], "2026-01-15");
        assert_eq!(
            json["prompt"],
            "Begin the adventure with an intriguing opening line."
        );
        assert_eq!(json["deadline"], "2026-01-16T10:00:00Z");
        assert_eq!(json["canonicalChapters"], serde_json::json!([]));
        assert_eq!(json["submissions"], serde_json::json!([]));
    }

    #[tokio::test]
    async fn test_submit_returns_201_with_submission() {
        // Arrange
        let app = test_app();
        let body = serde_json::json!({
            "authorId": "test_user",
            "branchText": BRANCH_TEXT,
            "sourceCommentUrl": "https://reddit.com/r/test/comments/1"
        });

        // Act
        let (status, json) = send(app, "POST", "/submit", Some(body)).await;

        // Assert
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(json["submission"]["authorId"], "test_user");
        assert_eq!(json["submission"]["votes"], 0);
        assert_eq!(
            json["submission"]["id"],
            "00000000-0000-0000-0000-000000000001"
        );
        assert_eq!(json["storyState"]["submissions"].as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_submit_rejects_short_author_and_bad_url() {
        let cases = [
            serde_json::json!({ "authorId": "x", "branchText": BRANCH_TEXT }),
            serde_json::json!({
                "authorId": "test_user",
                "branchText": BRANCH_TEXT,
                "sourceCommentUrl": "not a url"
            }),
            serde_json::json!({ "authorId": "test_user", "branchText": "too short" }),
        ];

        for body in cases {
            let (status, json) = send(test_app(), "POST", "/submit", Some(body)).await;

            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(json["error"], "invalid_request");
        }
    }

    #[tokio::test]
    async fn test_submit_returns_422_for_missing_fields() {
        let (status, _) = send(test_app(), "POST", "/submit", Some(serde_json::json!({}))).await;

        // Axum returns 422 for deserialization failures.
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_vote_on_unknown_submission_returns_404() {
        let body = serde_json::json!({
            "submissionId": Uuid::new_v4(),
            "delta": 1,
            "voterId": "reader1"
        });

        let (status, json) = send(test_app(), "POST", "/vote", Some(body)).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json["error"], "submission_not_found");
    }

    #[tokio::test]
    async fn test_vote_with_malformed_submission_id_returns_422() {
        let body = serde_json::json!({
            "submissionId": "not-a-uuid",
            "delta": 1,
            "voterId": "reader1"
        });

        let (status, _) = send(test_app(), "POST", "/vote", Some(body)).await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_finalize_without_configured_token_is_forbidden() {
        // Arrange
        let app = router().with_state(test_app_state(None));
        let body = serde_json::json!({
            "adminToken": ADMIN_SECRET,
            "nextPrompt": "Next adventure prompt",
            "nextDeadline": "2026-01-16T10:00:00Z"
        });

        // Act
        let (status, json) = send(app, "POST", "/finalize", Some(body)).await;

        // Assert
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(json["error"], "forbidden");
    }

    #[tokio::test]
    async fn test_finalize_with_wrong_token_is_forbidden() {
        let body = serde_json::json!({
            "adminToken": "wrong-token-value",
            "nextPrompt": "Next adventure prompt",
            "nextDeadline": "2026-01-16T10:00:00Z"
        });

        let (status, _) = send(test_app(), "POST", "/finalize", Some(body)).await;

        assert_eq!(status, StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_finalize_validates_before_authorizing() {
        let body = serde_json::json!({
            "adminToken": ADMIN_SECRET,
            "nextPrompt": "short",
            "nextDeadline": "2026-01-16T10:00:00Z"
        });

        let (status, json) = send(test_app(), "POST", "/finalize", Some(body)).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"], "invalid_request");
    }

    #[tokio::test]
    async fn test_finalize_silent_day_returns_new_state() {
        // Arrange
        let body = serde_json::json!({
            "adminToken": ADMIN_SECRET,
            "nextPrompt": "Next adventure prompt",
            "nextDeadline": "2026-01-15T10:30:00Z"
        });

        // Act
        let (status, json) = send(test_app(), "POST", "/finalize", Some(body)).await;

        // Assert
        assert_eq!(status, StatusCode::OK);
        assert!(json.get("winningSubmission").is_none());
        assert_eq!(json["storyState"]["prompt"], "Next adventure prompt");
        // Raised to one hour after the finalize call.
        assert_eq!(json["storyState"]["deadline"], "2026-01-15T11:00:00Z");
    }
}
