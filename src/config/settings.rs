use serde::Deserialize;

use crate::utils::constants::{
    DEFAULT_HTTP_TIMEOUT_MS, DEFAULT_ISSUE_PATH, DEFAULT_TICK_INTERVAL_MS,
    DEFAULT_TOKEN_TTL_SECONDS,
};

/// ================================
/// Global client-wide settings
/// ================================
#[derive(Debug, Deserialize, Clone, Default)]
pub struct SettingsConfig {
    pub logging: Option<LoggingConfig>,
}

/// ================================
/// Token issuing endpoint
/// ================================
#[derive(Debug, Deserialize, Clone)]
pub struct IssuerConfig {
    /// scheme + host of the dashboard, e.g. `http://127.0.0.1:8000`
    pub base_url: String,
    #[serde(default = "default_issue_path")]
    pub path: String,
    /// sent as `X-CSRFToken`; empty string means absent
    #[serde(default)]
    pub csrf_token: Option<String>,
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

impl IssuerConfig {
    pub fn endpoint(&self) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), self.path)
    }

    pub fn csrf_token(&self) -> Option<&str> {
        self.csrf_token
            .as_deref()
            .map(str::trim)
            .filter(|token| !token.is_empty())
    }
}

/// ================================
/// Countdown
/// ================================
#[derive(Debug, Deserialize, Clone)]
pub struct CountdownConfig {
    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,
    /// fallback window when the issuing response carries no `issued_at`.
    /// must match the server side token lifetime
    #[serde(default = "default_token_ttl_seconds")]
    pub token_ttl_seconds: u64,
}

impl Default for CountdownConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: DEFAULT_TICK_INTERVAL_MS,
            token_ttl_seconds: DEFAULT_TOKEN_TTL_SECONDS,
        }
    }
}

/// ================================
/// Logging
/// ================================
#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    pub level: String, // allowed: trace, debug, info, warn, error
    pub format: LogFormat,
}

impl LoggingConfig {
    pub fn new(level: String, format: LogFormat) -> Self {
        Self { level, format }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self::new("info".to_owned(), LogFormat::Compact)
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Json,
    Compact,
}

fn default_issue_path() -> String {
    DEFAULT_ISSUE_PATH.to_string()
}

fn default_timeout_ms() -> u64 {
    DEFAULT_HTTP_TIMEOUT_MS
}

fn default_tick_interval_ms() -> u64 {
    DEFAULT_TICK_INTERVAL_MS
}

fn default_token_ttl_seconds() -> u64 {
    DEFAULT_TOKEN_TTL_SECONDS
}
