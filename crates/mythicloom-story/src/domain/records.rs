//! Plain records exchanged with callers of the Story Progression context.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::values::DayKey;

/// A candidate continuation submitted for the active day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Submission {
    /// Unique submission identifier.
    pub id: Uuid,
    /// The day this submission was made for.
    pub day_key: DayKey,
    /// The prompt the branch answers.
    pub prompt: String,
    /// Opaque author identity supplied by the caller.
    pub author_id: String,
    /// The branch text, trimmed.
    pub branch_text: String,
    /// Optional link back to where the branch was posted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_comment_url: Option<String>,
    /// When the branch was submitted.
    pub submitted_at: DateTime<Utc>,
    /// Signed vote tally.
    pub votes: i64,
}

/// A promoted submission, frozen into the canon.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Chapter {
    /// Identifier of the submission this chapter was promoted from.
    pub id: Uuid,
    /// The day the chapter was produced.
    pub day_key: DayKey,
    /// The prompt the chapter answered.
    pub prompt: String,
    /// Author of the winning branch.
    pub author_id: String,
    /// The chapter text.
    pub branch_text: String,
    /// Optional link back to where the branch was posted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_comment_url: Option<String>,
    /// When the winning branch was submitted.
    pub submitted_at: DateTime<Utc>,
    /// Tally at promotion time.
    pub votes: i64,
}

impl From<Submission> for Chapter {
    fn from(submission: Submission) -> Self {
        Self {
            id: submission.id,
            day_key: submission.day_key,
            prompt: submission.prompt,
            author_id: submission.author_id,
            branch_text: submission.branch_text,
            source_comment_url: submission.source_comment_url,
            submitted_at: submission.submitted_at,
            votes: submission.votes,
        }
    }
}

/// Point-in-time snapshot of the whole story.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoryState {
    /// Key of the active day.
    pub active_day_key: DayKey,
    /// Prompt of the active day.
    pub prompt: String,
    /// Deadline of the active day.
    pub deadline: DateTime<Utc>,
    /// The canon, oldest first.
    pub canonical_chapters: Vec<Chapter>,
    /// Active-day submissions in display order.
    pub submissions: Vec<Submission>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use mythicloom_test_support::fixed_now;

    fn submission(source: Option<&str>) -> Submission {
        Submission {
            id: Uuid::from_u128(7),
            day_key: DayKey::of(fixed_now()),
            prompt: "Test prompt".to_owned(),
            author_id: "storyteller".to_owned(),
            branch_text: "Adventure awaits beyond the crimson canyon.".to_owned(),
            source_comment_url: source.map(str::to_owned),
            submitted_at: fixed_now(),
            votes: 3,
        }
    }

    #[test]
    fn test_submission_serializes_with_camel_case_fields() {
        let json = serde_json::to_value(submission(Some("https://example.com/c/1"))).unwrap();

        assert_eq!(json["dayKey"], "2026-01-15");
        assert_eq!(json["authorId"], "storyteller");
        assert_eq!(json["sourceCommentUrl"], "https://example.com/c/1");
        assert_eq!(json["submittedAt"], "2026-01-15T10:00:00Z");
        assert_eq!(json["votes"], 3);
    }

    #[test]
    fn test_absent_source_is_omitted() {
        let json = serde_json::to_value(submission(None)).unwrap();

        assert!(json.get("sourceCommentUrl").is_none());
    }

    #[test]
    fn test_chapter_copies_every_field() {
        let original = submission(Some("https://example.com/c/1"));

        let chapter = Chapter::from(original.clone());

        assert_eq!(chapter.id, original.id);
        assert_eq!(chapter.day_key, original.day_key);
        assert_eq!(chapter.prompt, original.prompt);
        assert_eq!(chapter.author_id, original.author_id);
        assert_eq!(chapter.branch_text, original.branch_text);
        assert_eq!(chapter.source_comment_url, original.source_comment_url);
        assert_eq!(chapter.submitted_at, original.submitted_at);
        assert_eq!(chapter.votes, original.votes);
    }
}
