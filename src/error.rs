//! Error types for cocktails
//!
//! All modules use `CocktailResult<T>` as their return type. Fetch failures
//! use the cloneable [`FetchError`] so they can be stored in cache entries and
//! shared between every caller waiting on the same request.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for cocktails operations
pub type CocktailResult<T> = Result<T, CocktailError>;

/// Failure of a single remote fetch
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    #[error("request to {url} failed: {reason}")]
    Transport { url: String, reason: String },

    #[error("{url} returned HTTP {code}")]
    Status { url: String, code: u16 },

    #[error("request to {url} timed out")]
    Timeout { url: String },

    #[error("unexpected response from {url}: {reason}")]
    Decode { url: String, reason: String },

    #[error("fetch task aborted: {0}")]
    Aborted(String),
}

impl FetchError {
    /// Check if retrying the same request could succeed
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Transport { .. } | Self::Timeout { .. } | Self::Aborted(_) => true,
            Self::Status { code, .. } => *code >= 500 || *code == 429,
            Self::Decode { .. } => false,
        }
    }
}

/// All errors that can occur in cocktails
#[derive(Error, Debug)]
pub enum CocktailError {
    // Remote errors
    #[error("Could not load data: {0}")]
    Fetch(#[from] FetchError),

    // Navigation errors
    #[error("Page not found: {0}")]
    RouteNotFound(String),

    // Configuration errors
    #[error("Invalid configuration at {path}: {reason}")]
    ConfigInvalid { path: PathBuf, reason: String },

    #[error("Failed to create config directory {path}: {source}")]
    ConfigDirCreate {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid API URL {url}: {reason}")]
    ApiUrlInvalid { url: String, reason: String },

    // IO errors
    #[error("IO error: {context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    // Serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    // General errors
    #[error("Internal error: {0}")]
    Internal(String),

    #[error("{0}")]
    User(String),
}

impl CocktailError {
    /// Create an IO error with context
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    /// Check if error is retryable
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Fetch(e) => e.is_transient(),
            _ => false,
        }
    }

    /// Get actionable hint for the error
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            Self::Fetch(FetchError::Timeout { .. }) => {
                Some("Raise api.timeout_secs or check your connection")
            }
            Self::Fetch(_) => Some("Check your connection, or point --api-url at a mirror"),
            Self::RouteNotFound(_) => Some("Back home: cocktails open /"),
            Self::ConfigInvalid { .. } => Some("Run: cocktails config init --force"),
            _ => None,
        }
    }
}
