//! Mythicloom API — HTTP surface over the story engine.
//!
//! Parses and validates requests, authorizes day finalization, and maps
//! domain results and errors onto JSON responses. The story rules themselves
//! live in `mythicloom-story`.

use axum::Router;

pub mod auth;
pub mod config;
pub mod error;
pub mod routes;
pub mod seed;
pub mod state;

/// Builds the application router with every route mounted.
pub fn build_router(app_state: state::AppState) -> Router {
    Router::new()
        .merge(routes::health::router())
        .nest("/api/story", routes::story::router())
        .with_state(app_state)
}
