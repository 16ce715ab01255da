//! Query handlers for the Story Progression context.
//!
//! This module contains read-only handlers that snapshot the engine under
//! its read lock.

use mythicloom_core::error::DomainError;
use serde::Serialize;

use crate::application::store::StoryStore;
use crate::domain::aggregates::StoryEngine;
use crate::domain::records::{Chapter, StoryState};

/// Read-only view of the canon.
#[derive(Debug, Serialize)]
pub struct TimelineView {
    /// Promoted chapters, oldest first.
    pub chapters: Vec<Chapter>,
}

/// Returns the full story snapshot.
///
/// # Errors
///
/// Returns `DomainError::Infrastructure` if the store lock is poisoned.
pub fn get_story_state(store: &StoryStore) -> Result<StoryState, DomainError> {
    store.read(StoryEngine::state)
}

/// Returns only the canon.
///
/// # Errors
///
/// Returns `DomainError::Infrastructure` if the store lock is poisoned.
pub fn get_timeline(store: &StoryStore) -> Result<TimelineView, DomainError> {
    store.read(|engine| TimelineView {
        chapters: engine.chapters().to_vec(),
    })
}
