//! Commands for the Story Progression context.

use chrono::{DateTime, Utc};
use mythicloom_core::command::Command;
use uuid::Uuid;

/// Command to submit a branch for the active day.
#[derive(Debug, Clone)]
pub struct SubmitBranch {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// Opaque author identity.
    pub author_id: String,
    /// The proposed continuation.
    pub branch_text: String,
    /// Optional link back to where the branch was posted.
    pub source_comment_url: Option<String>,
}

impl Command for SubmitBranch {
    fn command_type(&self) -> &'static str {
        "story.submit_branch"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

/// Command to cast, flip or retract a vote.
#[derive(Debug, Clone)]
pub struct CastVote {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The submission being voted on.
    pub submission_id: Uuid,
    /// Requested direction; only `1` and `-1` are accepted.
    pub delta: i64,
    /// Opaque voter identity.
    pub voter_id: String,
}

impl Command for CastVote {
    fn command_type(&self) -> &'static str {
        "story.cast_vote"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

/// Command to close the active day and open the next one.
#[derive(Debug, Clone)]
pub struct FinalizeDay {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// Prompt for the next day.
    pub next_prompt: String,
    /// Requested deadline for the next day.
    pub next_deadline: DateTime<Utc>,
}

impl Command for FinalizeDay {
    fn command_type(&self) -> &'static str {
        "story.finalize_day"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}
