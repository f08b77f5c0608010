//! Configuration for the API-key gate, loaded through `core_config::FromEnv`.

use core_config::{ConfigError, FromEnv, env_required};

/// Shared secret configuration.
///
/// Loaded from environment variables:
/// - `API_KEY` (required, must not be blank)
#[derive(Clone)]
pub struct ApiKeyConfig {
    pub api_key: String,
}

impl std::fmt::Debug for ApiKeyConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiKeyConfig")
            .field("api_key", &"[REDACTED]")
            .finish()
    }
}

impl ApiKeyConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
        }
    }
}

impl FromEnv for ApiKeyConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let api_key = env_required("API_KEY")?;

        // An empty header counts as missing, so a blank secret could never match
        if api_key.trim().is_empty() {
            return Err(ConfigError::ParseError {
                key: "API_KEY".to_string(),
                details: "must not be empty".to_string(),
            });
        }

        Ok(Self { api_key })
    }
}
