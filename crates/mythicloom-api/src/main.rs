//! Mythicloom API server entry point.

use std::error::Error;
use std::sync::Arc;

use mythicloom_api::config::ApiConfig;
use mythicloom_api::seed::StorySeed;
use mythicloom_api::state::AppState;
use mythicloom_core::clock::{Clock, SystemClock};
use mythicloom_core::id::RandomIdGenerator;
use mythicloom_story::application::store::StoryStore;
use mythicloom_story::domain::aggregates::StoryEngine;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // Initialize tracing subscriber.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .json()
        .init();

    tracing::info!("Starting Mythicloom API server");

    let config = ApiConfig::from_env()?;
    if config.admin_token.is_none() {
        tracing::warn!("MYTHICLOOM_ADMIN_TOKEN is not set; finalize requests will be rejected");
    }

    // Open the first day, then resume from the seed file if one is given.
    let clock: Arc<dyn Clock + Send + Sync> = Arc::new(SystemClock);
    let mut engine = StoryEngine::new(&config.story, clock.as_ref());
    if let Some(path) = &config.seed_file {
        let seed = StorySeed::load(path)?;
        tracing::info!(
            path = %path.display(),
            chapters = seed.chapters.len(),
            resumes_day = seed.active_day.is_some(),
            "applying story seed"
        );
        seed.apply(&mut engine);
    }

    let app_state = AppState::new(
        StoryStore::new(engine),
        clock,
        Arc::new(RandomIdGenerator),
        config.admin_token.clone(),
    );

    // TODO: Replace CorsLayer::permissive() with the client's origin once it is hosted.
    let app = mythicloom_api::build_router(app_state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr = config.socket_addr()?;
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app).await?;

    Ok(())
}
