//! services/api/src/config.rs
//!
//! Defines the application's configuration structure and loading logic.
//!
//! All configuration is loaded from environment variables at startup. The `.env`
//! file is used for local development.

use std::net::SocketAddr;
use std::time::Duration;
use tracing::Level;

/// A custom error type for configuration loading failures.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for the environment variable {0}: {1}")]
    InvalidValue(String, String),
}

/// Settings for the Gemini `generateContent` endpoint.
#[derive(Clone, Debug)]
pub struct GenerationConfig {
    /// Without a key the generation call is skipped and every message is a fallback.
    pub api_key: Option<String>,
    pub base_url: String,
    pub api_version: String,
    pub model: String,
    pub timeout: Duration,
}

/// Settings for the Cloud Translation v3 endpoint.
#[derive(Clone, Debug)]
pub struct TranslationConfig {
    /// Without a project the translate callable always fails with an internal error.
    pub project_id: Option<String>,
    pub location: String,
    pub base_url: String,
    pub access_token: Option<String>,
    pub timeout: Duration,
}

/// Holds all configuration loaded from the environment at startup.
#[derive(Clone, Debug)]
pub struct Config {
    pub bind_address: SocketAddr,
    pub log_level: Level,
    /// Postgres URL. When absent, onboarding records are kept in memory.
    pub database_url: Option<String>,
    pub cors_allowed_origin: String,
    pub generation: GenerationConfig,
    pub translation: TranslationConfig,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// It will look for a `.env` file in the current directory for development,
    /// but this is skipped in test environments to ensure tests are hermetic.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Only load from .env in non-test mode to avoid contamination.
        if !cfg!(test) {
            dotenvy::dotenv().ok();
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let var_or = |key: &str, default: &str| var(key).unwrap_or_else(|| default.to_string());

        // --- Server Settings ---
        let bind_address_str = var_or("BIND_ADDRESS", "0.0.0.0:3000");
        let bind_address = bind_address_str.parse::<SocketAddr>().map_err(|e| {
            ConfigError::InvalidValue("BIND_ADDRESS".to_string(), e.to_string())
        })?;

        let log_level_str = var_or("RUST_LOG", "INFO");
        let log_level = log_level_str.parse::<Level>().map_err(|_| {
            ConfigError::InvalidValue(
                "RUST_LOG".to_string(),
                format!("'{}' is not a valid log level", log_level_str),
            )
        })?;

        let database_url = var("DATABASE_URL");
        let cors_allowed_origin = var_or("CORS_ALLOWED_ORIGIN", "http://localhost:3000");

        // --- Generation Settings ---
        let generation = GenerationConfig {
            api_key: var("GEMINI_API_KEY"),
            base_url: var_or("GEMINI_BASE_URL", "https://generativelanguage.googleapis.com"),
            api_version: var_or("GEMINI_API_VERSION", "v1"),
            model: var_or("GEMINI_MODEL", "gemini-1.5-pro-latest"),
            timeout: parse_millis("GENERATION_TIMEOUT_MS", var("GENERATION_TIMEOUT_MS"), 5_000)?,
        };

        // --- Translation Settings ---
        let translation = TranslationConfig {
            project_id: var("GCLOUD_PROJECT").or_else(|| var("GCP_PROJECT")),
            location: var_or("TRANSLATE_LOCATION", "global"),
            base_url: var_or("TRANSLATE_BASE_URL", "https://translation.googleapis.com"),
            access_token: var("GOOGLE_ACCESS_TOKEN"),
            timeout: parse_millis("TRANSLATE_TIMEOUT_MS", var("TRANSLATE_TIMEOUT_MS"), 10_000)?,
        };

        Ok(Self {
            bind_address,
            log_level,
            database_url,
            cors_allowed_origin,
            generation,
            translation,
        })
    }
}

fn parse_millis(name: &str, value: Option<String>, default: u64) -> Result<Duration, ConfigError> {
    let Some(raw) = value else {
        return Ok(Duration::from_millis(default));
    };
    match raw.trim().parse::<u64>() {
        Ok(0) => Err(ConfigError::InvalidValue(
            name.to_string(),
            "timeout must be greater than zero".to_string(),
        )),
        Ok(ms) => Ok(Duration::from_millis(ms)),
        Err(e) => Err(ConfigError::InvalidValue(name.to_string(), e.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_apply_when_nothing_is_set() {
        let config = load(&[]).unwrap();
        assert_eq!(config.bind_address.to_string(), "0.0.0.0:3000");
        assert_eq!(config.log_level, Level::INFO);
        assert!(config.database_url.is_none());
        assert!(config.generation.api_key.is_none());
        assert_eq!(config.generation.api_version, "v1");
        assert_eq!(config.generation.model, "gemini-1.5-pro-latest");
        assert_eq!(config.generation.timeout, Duration::from_millis(5_000));
        assert_eq!(config.translation.location, "global");
        assert!(config.translation.project_id.is_none());
    }

    #[test]
    fn gcp_project_is_used_when_gcloud_project_is_missing() {
        let config = load(&[("GCP_PROJECT", "medisign")]).unwrap();
        assert_eq!(config.translation.project_id.as_deref(), Some("medisign"));
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let err = load(&[("GENERATION_TIMEOUT_MS", "0")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue(name, _) if name == "GENERATION_TIMEOUT_MS"));
    }

    #[test]
    fn bad_bind_address_is_rejected() {
        assert!(load(&[("BIND_ADDRESS", "not-an-address")]).is_err());
    }
}
