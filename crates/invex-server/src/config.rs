//! Environment-derived application configuration, read once at startup.

use thiserror::Error;

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub model: ModelConfig,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// Chat model endpoint settings; immutable for the process lifetime.
#[derive(Debug, Clone)]
pub struct ModelConfig {
    pub api_base: String,
    pub api_key: String,
    pub model: String,
}

/// Configuration errors surfaced at startup.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing OPENAI_API_KEY environment variable")]
    MissingApiKey,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_key = std::env::var("OPENAI_API_KEY").map_err(|_| ConfigError::MissingApiKey)?;

        Ok(Self {
            server: ServerConfig {
                host: std::env::var("SERVER_HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
                port: std::env::var("SERVER_PORT")
                    .ok()
                    .and_then(|p| p.parse().ok())
                    .unwrap_or(8080),
            },
            model: ModelConfig {
                api_base: std::env::var("OPENAI_API_BASE")
                    .unwrap_or_else(|_| "https://api.openai.com/v1".to_string()),
                api_key,
                model: std::env::var("INVEX_MODEL").unwrap_or_else(|_| "gpt-4.1".to_string()),
            },
        })
    }
}
