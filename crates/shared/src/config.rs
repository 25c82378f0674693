use thiserror::Error;

use crate::config_env::{optional_trimmed_env, parse_u64_env, require_env};
use crate::llm::OpenRouterConfig;

pub const DEFAULT_SESSION_TTL_SECONDS: u64 = 60 * 60 * 24;

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind_addr: String,
    pub session_secret: String,
    pub session_ttl_seconds: u64,
    pub openrouter: OpenRouterConfig,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required env var {0}")]
    MissingVar(String),
    #[error("invalid integer in env var {0}")]
    ParseInt(String),
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
}

impl ServerConfig {
    /// Resolves the whole server configuration up front so a missing
    /// credential aborts startup instead of surfacing on the first request.
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            bind_addr: optional_trimmed_env("API_BIND_ADDR")
                .unwrap_or_else(|| "127.0.0.1:8080".to_string()),
            session_secret: require_env("SESSION_SECRET")?,
            session_ttl_seconds: parse_u64_env(
                "SESSION_TTL_SECONDS",
                DEFAULT_SESSION_TTL_SECONDS,
            )?,
            openrouter: OpenRouterConfig::from_env()?,
        })
    }
}
