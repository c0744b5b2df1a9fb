//! Process configuration from the environment.

use thiserror::Error;

use sendgrid_mcp_client::DEFAULT_BASE_URL;

/// Variable holding the SendGrid API key.
pub const API_KEY_VAR: &str = "SENDGRID_API_KEY";

/// Variable overriding the SendGrid API origin.
pub const BASE_URL_VAR: &str = "SENDGRID_API_BASE_URL";

/// Startup configuration errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// The API key variable is unset or empty.
    #[error("{} environment variable is required", API_KEY_VAR)]
    MissingApiKey,
}

/// Server configuration.
#[derive(Clone, PartialEq, Eq)]
pub struct Config {
    /// SendGrid API key.
    pub api_key: String,
    /// SendGrid API origin.
    pub base_url: String,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl Config {
    /// Reads the process environment.
    ///
    /// # Errors
    ///
    /// Returns an error if the API key is missing.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Reads configuration through `lookup`, which maps a variable name to
    /// its value.
    ///
    /// # Errors
    ///
    /// Returns an error if the API key is missing or blank.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let api_key = lookup(API_KEY_VAR)
            .filter(|key| !key.trim().is_empty())
            .ok_or(ConfigError::MissingApiKey)?;

        let base_url = lookup(BASE_URL_VAR)
            .filter(|url| !url.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        Ok(Self { api_key, base_url })
    }
}
