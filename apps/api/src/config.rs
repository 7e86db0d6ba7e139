use std::time::Duration;

use anyhow::{Context, Result};

use crate::llm_client::{LlmClientConfig, ANTHROPIC_API_URL};

/// Application configuration loaded from environment variables.
/// Fails at startup if required variables are missing or malformed.
#[derive(Debug, Clone)]
pub struct Config {
    pub anthropic_api_key: String,
    pub anthropic_api_url: String,
    pub llm_max_retries: u32,
    pub llm_timeout_secs: u64,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            anthropic_api_key: require_env("ANTHROPIC_API_KEY")?,
            anthropic_api_url: std::env::var("ANTHROPIC_API_URL")
                .unwrap_or_else(|_| ANTHROPIC_API_URL.to_string()),
            llm_max_retries: parse_env("LLM_MAX_RETRIES", 3)?,
            llm_timeout_secs: parse_env("LLM_TIMEOUT_SECS", 120)?,
            port: parse_env("PORT", 8080)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }

    /// Transport policy for the LLM client.
    pub fn llm_client_config(&self) -> LlmClientConfig {
        LlmClientConfig {
            api_url: self.anthropic_api_url.clone(),
            timeout: Duration::from_secs(self.llm_timeout_secs),
            max_retries: self.llm_max_retries,
            ..LlmClientConfig::default()
        }
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("{key} must be a valid {}", std::any::type_name::<T>())),
        Err(_) => Ok(default),
    }
}
