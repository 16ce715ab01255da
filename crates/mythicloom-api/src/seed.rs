//! Optional startup seed: a JSON document with canon chapters and an active
//! day to resume from.
//!
//! ```json
//! {
//!   "chapters": [ { "id": "...", "dayKey": "2026-01-14", ... } ],
//!   "activeDay": { "prompt": "...", "deadline": "2026-01-15T22:00:00Z", "submissions": [] }
//! }
//! ```

use std::path::Path;

use chrono::{DateTime, Utc};
use mythicloom_story::domain::aggregates::StoryEngine;
use mythicloom_story::domain::records::{Chapter, Submission};
use serde::Deserialize;

use crate::error::AppError;

/// The active day section of a seed document.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActiveDaySeed {
    /// Prompt of the resumed day.
    pub prompt: String,
    /// Deadline of the resumed day.
    pub deadline: DateTime<Utc>,
    /// Submissions already made, tallies included.
    #[serde(default)]
    pub submissions: Vec<Submission>,
}

/// A parsed seed document.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StorySeed {
    /// Canon chapters; sorted by day key when applied.
    #[serde(default)]
    pub chapters: Vec<Chapter>,
    /// Active day to resume, if any. Without one the configured first day
    /// stays open.
    pub active_day: Option<ActiveDaySeed>,
}

impl StorySeed {
    /// Parses a seed document.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Seed` if the JSON does not match the seed shape.
    pub fn from_json(raw: &str) -> Result<Self, AppError> {
        serde_json::from_str(raw).map_err(|e| AppError::Seed(format!("invalid seed document: {e}")))
    }

    /// Reads and parses the seed file at `path`.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Seed` if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, AppError> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| AppError::Seed(format!("cannot read {}: {e}", path.display())))?;
        Self::from_json(&raw)
    }

    /// Applies the seed to a freshly constructed engine.
    pub fn apply(self, engine: &mut StoryEngine) {
        engine.seed_canon(self.chapters);
        if let Some(day) = self.active_day {
            engine.seed_active_day(&day.prompt, day.deadline, day.submissions);
        }
    }
}
