//! Server configuration read from the environment.

use std::net::SocketAddr;
use std::path::PathBuf;

use mythicloom_story::domain::aggregates::StoryOptions;

use crate::auth::AdminToken;
use crate::error::AppError;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 4000;

/// Everything the server needs to start.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Bind host.
    pub host: String,
    /// Bind port.
    pub port: u16,
    /// Secret required by the finalize route. `None` disables finalization.
    pub admin_token: Option<AdminToken>,
    /// Options for the first day.
    pub story: StoryOptions,
    /// Optional JSON file with chapters and an active day to start from.
    pub seed_file: Option<PathBuf>,
}

impl ApiConfig {
    /// Loads `.env` if present, then reads the process environment.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if a variable is present but invalid.
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if `PORT` is not a valid `u16` or
    /// `MYTHICLOOM_INITIAL_DEADLINE_MINUTES` is not a positive integer.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let non_blank = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let host = non_blank("HOST").unwrap_or_else(|| DEFAULT_HOST.to_owned());
        let port = match non_blank("PORT") {
            Some(raw) => raw
                .trim()
                .parse()
                .map_err(|e| AppError::Config(format!("PORT must be a valid u16: {e}")))?,
            None => DEFAULT_PORT,
        };

        let mut story = StoryOptions::default();
        if let Some(prompt) = non_blank("MYTHICLOOM_INITIAL_PROMPT") {
            story.initial_prompt = prompt;
        }
        if let Some(raw) = non_blank("MYTHICLOOM_INITIAL_DEADLINE_MINUTES") {
            story.initial_deadline_minutes = raw
                .trim()
                .parse::<i64>()
                .ok()
                .filter(|minutes| *minutes > 0)
                .ok_or_else(|| {
                    AppError::Config(format!(
                        "MYTHICLOOM_INITIAL_DEADLINE_MINUTES must be a positive integer, got {raw:?}"
                    ))
                })?;
        }

        Ok(Self {
            host,
            port,
            admin_token: non_blank("MYTHICLOOM_ADMIN_TOKEN").map(|secret| AdminToken::new(&secret)),
            story,
            seed_file: non_blank("MYTHICLOOM_SEED_FILE").map(PathBuf::from),
        })
    }

    /// The address to bind.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if `HOST:PORT` is not a socket address.
    pub fn socket_addr(&self) -> Result<SocketAddr, AppError> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| AppError::Config(format!("invalid HOST:PORT combination: {e}")))
    }
}
