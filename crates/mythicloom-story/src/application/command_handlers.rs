//! Command handlers for the Story Progression context.
//!
//! Each handler takes the engine's write lock for the whole operation, runs
//! the domain method, and returns the affected record together with a fresh
//! snapshot taken under the same lock.

use mythicloom_core::clock::Clock;
use mythicloom_core::command::Command;
use mythicloom_core::error::DomainError;
use mythicloom_core::id::IdGenerator;
use serde::Serialize;
use tracing::{info, warn};

use crate::application::store::StoryStore;
use crate::domain::commands::{CastVote, FinalizeDay, SubmitBranch};
use crate::domain::records::{Chapter, StoryState, Submission};

/// Result of a successful `SubmitBranch`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitBranchResponse {
    /// The newly created submission.
    pub submission: Submission,
    /// Snapshot taken right after the submission was added.
    pub story_state: StoryState,
}

/// Result of a successful `CastVote`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VoteResponse {
    /// The submission with its updated tally.
    pub submission: Submission,
    /// Snapshot taken right after the vote was applied.
    pub story_state: StoryState,
}

/// Result of a `FinalizeDay`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FinalizeResponse {
    /// The chapter promoted from the closed day, absent on a silent day.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub winning_submission: Option<Chapter>,
    /// Snapshot of the freshly opened day.
    pub story_state: StoryState,
}

fn log_received(command: &impl Command) {
    info!(
        command_type = command.command_type(),
        correlation_id = %command.correlation_id(),
        "handling command"
    );
}

fn log_rejected(command: &impl Command, error: &DomainError) {
    warn!(
        command_type = command.command_type(),
        correlation_id = %command.correlation_id(),
        %error,
        "command rejected"
    );
}

/// Handles the `SubmitBranch` command.
///
/// # Errors
///
/// Returns `DomainError::Validation` or `DomainError::DeadlinePassed` when
/// the engine rejects the branch, and `DomainError::Infrastructure` if the
/// store lock is poisoned.
pub fn handle_submit_branch(
    command: &SubmitBranch,
    store: &StoryStore,
    clock: &dyn Clock,
    ids: &dyn IdGenerator,
) -> Result<SubmitBranchResponse, DomainError> {
    log_received(command);

    let result = store.write(|engine| -> Result<SubmitBranchResponse, DomainError> {
        let submission = engine.submit_branch(
            &command.author_id,
            &command.branch_text,
            command.source_comment_url.as_deref(),
            clock,
            ids,
        )?;
        Ok(SubmitBranchResponse {
            submission,
            story_state: engine.state(),
        })
    })?;

    result.inspect_err(|error| log_rejected(command, error))
}

/// Handles the `CastVote` command.
///
/// # Errors
///
/// Returns `DomainError::Validation`, `DomainError::SubmissionNotFound` or
/// `DomainError::DeadlinePassed` when the engine rejects the vote, and
/// `DomainError::Infrastructure` if the store lock is poisoned.
pub fn handle_cast_vote(
    command: &CastVote,
    store: &StoryStore,
    clock: &dyn Clock,
) -> Result<VoteResponse, DomainError> {
    log_received(command);

    let result = store.write(|engine| -> Result<VoteResponse, DomainError> {
        let submission = engine.vote(
            command.submission_id,
            command.delta,
            &command.voter_id,
            clock,
        )?;
        Ok(VoteResponse {
            submission,
            story_state: engine.state(),
        })
    })?;

    result.inspect_err(|error| log_rejected(command, error))
}

/// Handles the `FinalizeDay` command.
///
/// # Errors
///
/// Returns `DomainError::Infrastructure` if the store lock is poisoned.
pub fn handle_finalize_day(
    command: &FinalizeDay,
    store: &StoryStore,
    clock: &dyn Clock,
) -> Result<FinalizeResponse, DomainError> {
    log_received(command);

    let response = store.write(|engine| {
        let closed_day = engine.state().active_day_key;
        let winning_submission =
            engine.finalize_day(&command.next_prompt, command.next_deadline, clock);

        match &winning_submission {
            Some(chapter) => info!(
                day_key = %closed_day,
                chapter_id = %chapter.id,
                votes = chapter.votes,
                "chapter promoted to canon"
            ),
            None => info!(day_key = %closed_day, "silent day, no chapter promoted"),
        }

        FinalizeResponse {
            winning_submission,
            story_state: engine.state(),
        }
    })?;

    Ok(response)
}
