//! Configuration loading.
//!
//! Credentials and endpoints come from environment variables, read once at
//! startup (`Config::from_env`) and passed into the gateway. Nothing reads
//! the environment at request time.

use anyhow::{bail, Context, Result};
use std::time::Duration;

pub const DEFAULT_LINE_API_BASE: &str = "https://api.line.me";
pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";

const DEFAULT_BIND: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 5000;
const DEFAULT_COMPLETION_TIMEOUT_SECS: u64 = 10;

/// Top-level application config.
#[derive(Debug, Clone)]
pub struct Config {
    /// Webhook server settings.
    pub server: ServerConfig,

    /// LINE channel credentials and API base.
    pub line: LineConfig,

    /// OpenAI credentials, model, and completion timeout.
    pub openai: OpenAiConfig,
}

/// Webhook server bind address and port.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default "0.0.0.0").
    pub bind: String,

    /// HTTP port (default 5000).
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: DEFAULT_BIND.to_string(),
            port: DEFAULT_PORT,
        }
    }
}

/// LINE channel settings. Both credentials are required; the API base is
/// overridable so tests can point the reply client at a mock server.
#[derive(Debug, Clone)]
pub struct LineConfig {
    /// Channel access token for the reply API (LINE_CHANNEL_ACCESS_TOKEN).
    pub channel_access_token: String,

    /// Channel secret used to verify webhook signatures (LINE_CHANNEL_SECRET).
    pub channel_secret: String,

    /// Messaging API base URL (LINE_API_BASE, default https://api.line.me).
    pub api_base: String,
}

/// OpenAI settings.
#[derive(Debug, Clone)]
pub struct OpenAiConfig {
    /// API key (OPENAI_API_KEY).
    pub api_key: String,

    /// Model id passed to the completion endpoint (OPENAI_MODEL).
    pub model: String,

    /// API base URL (OPENAI_BASE_URL, default https://api.openai.com/v1).
    pub base_url: String,

    /// Per-request completion timeout (OPENAI_TIMEOUT_SECS, default 10).
    pub timeout: Duration,
}

impl Config {
    /// Load the config from the process environment. Missing or empty
    /// required variables are a startup error.
    pub fn from_env() -> Result<Config> {
        Ok(Config {
            server: ServerConfig {
                bind: env_or("BOT_BIND", DEFAULT_BIND),
                port: env_parsed("BOT_PORT", DEFAULT_PORT)?,
            },
            line: LineConfig {
                channel_access_token: require_env("LINE_CHANNEL_ACCESS_TOKEN")?,
                channel_secret: require_env("LINE_CHANNEL_SECRET")?,
                api_base: env_or("LINE_API_BASE", DEFAULT_LINE_API_BASE),
            },
            openai: OpenAiConfig {
                api_key: require_env("OPENAI_API_KEY")?,
                model: env_or("OPENAI_MODEL", DEFAULT_MODEL),
                base_url: env_or("OPENAI_BASE_URL", DEFAULT_OPENAI_BASE_URL),
                timeout: Duration::from_secs(env_parsed(
                    "OPENAI_TIMEOUT_SECS",
                    DEFAULT_COMPLETION_TIMEOUT_SECS,
                )?),
            },
        })
    }
}

/// Trimmed value, None when the variable is unset or blank.
fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

fn require_env(name: &str) -> Result<String> {
    match non_empty(std::env::var(name).ok()) {
        Some(v) => Ok(v),
        None => bail!("{} is not set", name),
    }
}

fn env_or(name: &str, default: &str) -> String {
    non_empty(std::env::var(name).ok()).unwrap_or_else(|| default.to_string())
}

fn env_parsed<T: std::str::FromStr>(name: &str, default: T) -> Result<T>
where
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match non_empty(std::env::var(name).ok()) {
        Some(raw) => raw
            .parse()
            .with_context(|| format!("invalid {}: {}", name, raw)),
        None => Ok(default),
    }
}
