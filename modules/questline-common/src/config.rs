use std::env;

use crate::error::QuestlineError;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    // Points backend
    pub points_backend_url: String,
    pub points_api_key: String,
    pub internal_api_key: Option<String>,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, QuestlineError> {
        Ok(Self {
            points_backend_url: required_env("POINTS_BACKEND_URL")?,
            points_api_key: required_env("POINTS_API_KEY")?,
            internal_api_key: env::var("INTERNAL_API_KEY").ok(),
        })
    }

    /// The key used for privileged (system-initiated) backend calls.
    /// Falls back to the regular API key when no internal key is set.
    pub fn internal_key(&self) -> &str {
        self.internal_api_key
            .as_deref()
            .unwrap_or(&self.points_api_key)
    }
}

fn required_env(key: &str) -> Result<String, QuestlineError> {
    env::var(key)
        .map_err(|_| QuestlineError::Config(format!("{key} environment variable is required")))
}
