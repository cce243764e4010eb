//! Application configuration with layered loading.
//!
//! This module provides configuration management using figment for layered
//! configuration loading from multiple sources:
//!
//! 1. Environment variables (WIKI_CACHE_*)
//! 2. TOML config file (if WIKI_CACHE_CONFIG_FILE set)
//! 3. Built-in defaults

use std::path::PathBuf;
use std::time::Duration;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};

mod validation;

pub use validation::{ConfigError, MAX_SEARCH_LIMIT};

/// Application configuration with layered loading.
///
/// Loading precedence (highest wins):
/// 1. Environment variables (WIKI_CACHE_*)
/// 2. TOML config file (if WIKI_CACHE_CONFIG_FILE set)
/// 3. Built-in defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Path to the JSON cache document.
    ///
    /// Set via WIKI_CACHE_CACHE_PATH environment variable.
    #[serde(default = "default_cache_path")]
    pub cache_path: PathBuf,

    /// User-Agent string for wiki API requests.
    ///
    /// Set via WIKI_CACHE_USER_AGENT environment variable.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// HTTP request timeout in milliseconds.
    ///
    /// Set via WIKI_CACHE_TIMEOUT_MS environment variable.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Minimum delay between two wiki API requests, in milliseconds.
    ///
    /// Set via WIKI_CACHE_RATE_LIMIT_MS environment variable.
    #[serde(default = "default_rate_limit_ms")]
    pub rate_limit_ms: u64,

    /// Pages older than this are re-scraped on a non-forced ingestion.
    ///
    /// Set via WIKI_CACHE_MAX_AGE_DAYS environment variable.
    #[serde(default = "default_max_age_days")]
    pub max_age_days: i64,

    /// `aplimit` used when listing all pages.
    ///
    /// Set via WIKI_CACHE_PAGE_SIZE environment variable.
    #[serde(default = "default_page_size")]
    pub page_size: u32,

    /// Report ingestion progress every N scraped pages.
    ///
    /// Set via WIKI_CACHE_PROGRESS_EVERY environment variable.
    #[serde(default = "default_progress_every")]
    pub progress_every: usize,

    /// Result count used when a search does not specify a limit.
    ///
    /// Set via WIKI_CACHE_DEFAULT_SEARCH_LIMIT environment variable.
    #[serde(default = "default_search_limit")]
    pub default_search_limit: usize,

    /// Run a non-forced ingestion of every wiki right after startup.
    ///
    /// Set via WIKI_CACHE_REFRESH_ON_START environment variable.
    #[serde(default)]
    pub refresh_on_start: bool,
}

fn default_cache_path() -> PathBuf {
    PathBuf::from("data/wiki_data.json")
}

fn default_user_agent() -> String {
    "wikicache/0.1".into()
}

fn default_timeout_ms() -> u64 {
    20_000
}

fn default_rate_limit_ms() -> u64 {
    500
}

fn default_max_age_days() -> i64 {
    30
}

fn default_page_size() -> u32 {
    500 // MediaWiki cap for anonymous clients
}

fn default_progress_every() -> usize {
    50
}

fn default_search_limit() -> usize {
    5
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            cache_path: default_cache_path(),
            user_agent: default_user_agent(),
            timeout_ms: default_timeout_ms(),
            rate_limit_ms: default_rate_limit_ms(),
            max_age_days: default_max_age_days(),
            page_size: default_page_size(),
            progress_every: default_progress_every(),
            default_search_limit: default_search_limit(),
            refresh_on_start: false,
        }
    }
}

impl AppConfig {
    /// Timeout as Duration for use with reqwest/tokio.
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Minimum spacing between API requests.
    pub fn rate_limit(&self) -> Duration {
        Duration::from_millis(self.rate_limit_ms)
    }

    /// Load configuration from all sources with layered precedence.
    ///
    /// Priority (highest wins):
    /// 1. Environment variables prefixed with `WIKI_CACHE_`
    /// 2. TOML file from `WIKI_CACHE_CONFIG_FILE` (if set)
    /// 3. Built-in defaults via `Default::default()`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - Configuration file cannot be read
    /// - Environment variables cannot be parsed
    /// - Validation fails after loading
    pub fn load() -> Result<Self, ConfigError> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Ok(config_path) = std::env::var("WIKI_CACHE_CONFIG_FILE") {
            figment = figment.merge(Toml::file(&config_path));
        }

        figment = figment.merge(
            Env::prefixed("WIKI_CACHE_")
                .ignore(&["CONFIG_FILE"])
                .map(|key| key.as_str().to_lowercase().into())
                .split("__"),
        );

        let config: Self = figment.extract().map_err(|e| ConfigError::LoadFailed(e.to_string()))?;

        config.validate()?;

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.cache_path, PathBuf::from("data/wiki_data.json"));
        assert_eq!(config.user_agent, "wikicache/0.1");
        assert_eq!(config.timeout_ms, 20_000);
        assert_eq!(config.rate_limit_ms, 500);
        assert_eq!(config.max_age_days, 30);
        assert_eq!(config.page_size, 500);
        assert_eq!(config.progress_every, 50);
        assert_eq!(config.default_search_limit, 5);
        assert!(!config.refresh_on_start);
    }

    #[test]
    fn test_durations() {
        let config = AppConfig::default();
        assert_eq!(config.timeout(), Duration::from_millis(20_000));
        assert_eq!(config.rate_limit(), Duration::from_millis(500));
    }

    #[test]
    fn test_toml_layer_overrides_defaults() {
        let toml = r#"
            cache_path = "/var/lib/wikicache/cache.json"
            max_age_days = 7
        "#;
        let config: AppConfig = Figment::from(Serialized::defaults(AppConfig::default()))
            .merge(Toml::string(toml))
            .extract()
            .unwrap();

        assert_eq!(config.cache_path, PathBuf::from("/var/lib/wikicache/cache.json"));
        assert_eq!(config.max_age_days, 7);
        assert_eq!(config.page_size, 500);
    }
}
