//! Shared application state.

use std::sync::Arc;

use mythicloom_core::clock::Clock;
use mythicloom_core::id::IdGenerator;
use mythicloom_story::application::store::StoryStore;

use crate::auth::AdminToken;

/// Application state shared across all request handlers.
#[derive(Clone)]
pub struct AppState {
    /// The single story engine.
    pub story: StoryStore,
    /// Time source for every engine operation.
    pub clock: Arc<dyn Clock + Send + Sync>,
    /// Submission id source.
    pub ids: Arc<dyn IdGenerator + Send + Sync>,
    /// Secret guarding the finalize route.
    pub admin_token: Option<AdminToken>,
}

impl AppState {
    /// Create new application state.
    #[must_use]
    pub fn new(
        story: StoryStore,
        clock: Arc<dyn Clock + Send + Sync>,
        ids: Arc<dyn IdGenerator + Send + Sync>,
        admin_token: Option<AdminToken>,
    ) -> Self {
        Self {
            story,
            clock,
            ids,
            admin_token,
        }
    }
}
