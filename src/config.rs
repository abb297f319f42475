// src/config.rs
// Process configuration, read once at startup and passed into the clients.

use crate::error::{Error, Result};

pub const DEFAULT_EVENTS_BASE_URL: &str = "https://meridian-production.alceos.workers.dev";
pub const DEFAULT_LLM_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/openai";

const ENV_EVENTS_TOKEN: &str = "MERIDIAN_SECRET_KEY";
const ENV_LLM_API_KEY: &str = "GOOGLE_API_KEY";
const ENV_EVENTS_BASE_URL: &str = "MERIDIAN_EVENTS_BASE_URL";
const ENV_LLM_BASE_URL: &str = "MERIDIAN_LLM_BASE_URL";

/// Read-only configuration shared by both clients.
///
/// Construct it once (e.g. in an application-start routine) and build the
/// clients from it; nothing here is a process-wide singleton.
#[derive(Debug, Clone)]
pub struct Config {
    pub events_base_url: String,
    pub events_token: String,
    pub llm_base_url: String,
    pub llm_api_key: String,
}

impl Config {
    /// Load configuration from the environment.
    ///
    /// Loads `.env` best-effort first (no-op when the file is absent, as in
    /// production). Base URLs fall back to the production endpoints unless
    /// overridden via `MERIDIAN_EVENTS_BASE_URL` / `MERIDIAN_LLM_BASE_URL`.
    pub fn from_env() -> Result<Self> {
        let _ = dotenvy::dotenv();

        let events_token = std::env::var(ENV_EVENTS_TOKEN)
            .map_err(|_| Error::MissingCredential(ENV_EVENTS_TOKEN))?;
        let llm_api_key =
            std::env::var(ENV_LLM_API_KEY).map_err(|_| Error::MissingCredential(ENV_LLM_API_KEY))?;

        Ok(Self {
            events_base_url: std::env::var(ENV_EVENTS_BASE_URL)
                .unwrap_or_else(|_| DEFAULT_EVENTS_BASE_URL.to_string()),
            events_token,
            llm_base_url: std::env::var(ENV_LLM_BASE_URL)
                .unwrap_or_else(|_| DEFAULT_LLM_BASE_URL.to_string()),
            llm_api_key,
        })
    }
}
