//! Configuration schema for cocktails
//!
//! Configuration is stored at `~/.config/cocktails/config.toml`

use crate::api::DEFAULT_BASE_URL;
use crate::error::{CocktailError, CocktailResult};
use crate::query::DEFAULT_SEARCH_TERM;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use url::Url;

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// General settings
    pub general: GeneralConfig,

    /// Recipe API settings
    pub api: ApiConfig,

    /// Query cache settings
    pub cache: CacheConfig,

    /// Search defaults
    pub search: SearchConfig,
}

impl Config {
    /// Keys accepted by `cocktails config set`
    pub const KEYS: [&'static str; 5] = [
        "general.log_format",
        "api.base_url",
        "api.timeout_secs",
        "cache.stale_after_secs",
        "search.default_term",
    ];

    /// Set a dot-separated key from its string form
    pub fn set(&mut self, key: &str, value: &str) -> CocktailResult<()> {
        match key {
            "general.log_format" => self.general.log_format = value.parse()?,
            "api.base_url" => self.api.base_url = checked_base_url(value)?,
            "api.timeout_secs" => self.api.timeout_secs = positive_secs(key, value)?,
            "cache.stale_after_secs" => self.cache.stale_after_secs = secs(key, value)?,
            "search.default_term" => {
                let term = value.trim();
                if term.is_empty() {
                    return Err(CocktailError::User(
                        "search.default_term cannot be empty".to_string(),
                    ));
                }
                self.search.default_term = term.to_string();
            }
            _ => {
                return Err(CocktailError::User(format!(
                    "Unknown config key: {}. Valid keys: {}",
                    key,
                    Self::KEYS.join(", ")
                )))
            }
        }
        Ok(())
    }

    pub fn api_timeout(&self) -> Duration {
        Duration::from_secs(self.api.timeout_secs)
    }

    pub fn stale_after(&self) -> Duration {
        Duration::from_secs(self.cache.stale_after_secs)
    }
}

fn secs(key: &str, value: &str) -> CocktailResult<u64> {
    value
        .trim()
        .parse()
        .map_err(|_| CocktailError::User(format!("{} expects whole seconds, got {}", key, value)))
}

fn positive_secs(key: &str, value: &str) -> CocktailResult<u64> {
    match secs(key, value)? {
        0 => Err(CocktailError::User(format!("{} must be at least 1", key))),
        n => Ok(n),
    }
}

/// Recipe API base URLs must be absolute http(s) URLs
pub(crate) fn checked_base_url(value: &str) -> CocktailResult<String> {
    let invalid = |reason: String| CocktailError::ApiUrlInvalid {
        url: value.to_string(),
        reason,
    };
    let url = Url::parse(value.trim()).map_err(|e| invalid(e.to_string()))?;
    match url.scheme() {
        "http" | "https" => Ok(url.to_string()),
        other => Err(invalid(format!("unsupported scheme {}", other))),
    }
}

/// Log line format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl std::str::FromStr for LogFormat {
    type Err = CocktailError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            other => Err(CocktailError::User(format!(
                "Invalid log format: {}. Use text/json",
                other
            ))),
        }
    }
}

/// General application settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    pub log_format: LogFormat,
}

/// Recipe API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL holding `search.php` and `lookup.php`
    pub base_url: String,

    /// Whole-request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 10,
        }
    }
}

/// Query cache configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Seconds a successful fetch stays fresh (default: 5 minutes)
    pub stale_after_secs: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            stale_after_secs: 300,
        }
    }
}

/// Search configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Term searched when none is given
    pub default_term: String,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            default_term: DEFAULT_SEARCH_TERM.to_string(),
        }
    }
}
