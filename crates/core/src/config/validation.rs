//! Configuration validation rules.
//!
//! This module provides validation logic for `AppConfig` values
//! after they have been loaded from environment, files, or defaults.

use crate::config::AppConfig;
use thiserror::Error;

/// Largest `aplimit` MediaWiki grants without the apihighlimits right.
const MAX_PAGE_SIZE: u32 = 500;

/// Upper bound for search result counts.
pub const MAX_SEARCH_LIMIT: usize = 25;

/// Configuration validation errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    LoadFailed(String),

    #[error("invalid configuration: {field} - {reason}")]
    Invalid { field: String, reason: String },
}

impl AppConfig {
    /// Validate configuration values after loading.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` if:
    /// - `cache_path` or `user_agent` is empty
    /// - `timeout_ms` is less than 100ms or exceeds 5 minutes
    /// - `rate_limit_ms` exceeds one minute
    /// - `max_age_days` is less than one day
    /// - `page_size` is outside 1..=500
    /// - `progress_every` is 0
    /// - `default_search_limit` is outside 1..=25
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.cache_path.as_os_str().is_empty() {
            return Err(ConfigError::Invalid { field: "cache_path".into(), reason: "must not be empty".into() });
        }

        if self.user_agent.is_empty() {
            return Err(ConfigError::Invalid { field: "user_agent".into(), reason: "must not be empty".into() });
        }

        if self.timeout_ms < 100 {
            return Err(ConfigError::Invalid { field: "timeout_ms".into(), reason: "must be at least 100ms".into() });
        }
        if self.timeout_ms > 300_000 {
            return Err(ConfigError::Invalid {
                field: "timeout_ms".into(),
                reason: "must not exceed 5 minutes (300000ms)".into(),
            });
        }

        if self.rate_limit_ms > 60_000 {
            return Err(ConfigError::Invalid {
                field: "rate_limit_ms".into(),
                reason: "must not exceed 1 minute (60000ms)".into(),
            });
        }

        if self.max_age_days < 1 {
            return Err(ConfigError::Invalid { field: "max_age_days".into(), reason: "must be at least 1".into() });
        }

        if self.page_size == 0 || self.page_size > MAX_PAGE_SIZE {
            return Err(ConfigError::Invalid {
                field: "page_size".into(),
                reason: format!("must be between 1 and {MAX_PAGE_SIZE}"),
            });
        }

        if self.progress_every == 0 {
            return Err(ConfigError::Invalid {
                field: "progress_every".into(),
                reason: "must be greater than 0".into(),
            });
        }

        if self.default_search_limit == 0 || self.default_search_limit > MAX_SEARCH_LIMIT {
            return Err(ConfigError::Invalid {
                field: "default_search_limit".into(),
                reason: format!("must be between 1 and {MAX_SEARCH_LIMIT}"),
            });
        }

        if self.rate_limit_ms == 0 {
            tracing::warn!("rate_limit_ms is 0; wiki API requests will not be spaced out");
        }

        Ok(())
    }
}
