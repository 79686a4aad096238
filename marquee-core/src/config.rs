//! Centralized configuration for Marquee.
//!
//! All tunable parameters and settings are defined here to avoid
//! hard-coded values scattered throughout the codebase.

use std::path::PathBuf;
use std::time::Duration;

use crate::{MarqueeError, Result};

/// Environment variable holding the catalog API bearer token.
pub const TOKEN_ENV_VAR: &str = "MARQUEE_TMDB_TOKEN";

/// Fallback environment variable, matching the upstream catalog convention.
pub const TOKEN_FALLBACK_ENV_VAR: &str = "TMDB_API_KEY";

/// Central configuration for all Marquee components.
///
/// Groups related configuration settings into logical sections.
/// Supports environment variable overrides for the API token.
#[derive(Debug, Clone, Default)]
pub struct MarqueeConfig {
    pub api: ApiConfig,
    pub browse: BrowseConfig,
    pub storage: StorageConfig,
}

impl MarqueeConfig {
    /// Creates configuration with the API token taken from the environment.
    ///
    /// Checks `MARQUEE_TMDB_TOKEN` first, then `TMDB_API_KEY`. A missing
    /// token is not an error here; catalog calls fail later with a clear
    /// message when the token is actually needed.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        config.api.bearer_token = std::env::var(TOKEN_ENV_VAR)
            .or_else(|_| std::env::var(TOKEN_FALLBACK_ENV_VAR))
            .ok();
        config
    }

    /// Returns the configured bearer token.
    ///
    /// # Errors
    ///
    /// - `MarqueeError::Configuration` - If no token is configured
    pub fn require_token(&self) -> Result<&str> {
        self.api
            .bearer_token
            .as_deref()
            .ok_or_else(|| MarqueeError::Configuration {
                reason: format!(
                    "no catalog API token configured (set {TOKEN_ENV_VAR} or {TOKEN_FALLBACK_ENV_VAR})"
                ),
            })
    }
}

/// Remote catalog API configuration.
///
/// Controls the API endpoints, authentication, and HTTP client behavior.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Base URL of the TMDB-compatible catalog API
    pub base_url: String,
    /// Base URL for poster images
    pub image_base_url: String,
    /// Bearer token for authenticated requests
    pub bearer_token: Option<String>,
    /// HTTP request timeout
    pub request_timeout: Duration,
    /// User agent for HTTP requests
    pub user_agent: &'static str,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.themoviedb.org/3".to_string(),
            image_base_url: "https://image.tmdb.org/t/p/w500".to_string(),
            bearer_token: None,
            request_timeout: Duration::from_secs(30),
            user_agent: "marquee/0.1.0",
        }
    }
}

/// Search and pagination behavior configuration.
#[derive(Debug, Clone)]
pub struct BrowseConfig {
    /// Quiet period before a raw query change becomes the debounced query
    pub debounce: Duration,
}

impl Default for BrowseConfig {
    fn default() -> Self {
        Self {
            debounce: Duration::from_millis(500),
        }
    }
}

/// Bookmark persistence configuration.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    /// Path of the JSON file holding the serialized bookmark set
    pub bookmarks_path: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            bookmarks_path: PathBuf::from("marquee-bookmarks.json"),
        }
    }
}
