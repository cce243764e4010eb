//! MediaWiki client error types.

use std::sync::Arc;

use wikicache_core::Error;

/// Errors from the MediaWiki API client.
#[derive(Debug, Clone, thiserror::Error)]
pub enum WikiApiError {
    /// The configured API URL could not be parsed.
    #[error("invalid API URL: {0}")]
    InvalidUrl(String),

    /// Rate limited by the wiki (HTTP 429).
    #[error("rate limited: too many requests")]
    RateLimited,

    /// HTTP error response.
    #[error("HTTP error: {status}")]
    HttpError { status: u16 },

    /// Request timeout.
    #[error("request timeout")]
    Timeout,

    /// Network error.
    #[error("network error: {0}")]
    Network(Arc<reqwest::Error>),

    /// Response body was not the expected JSON.
    #[error("parse error: {0}")]
    Parse(String),

    /// The API answered with an `error` object.
    #[error("API error {code}: {info}")]
    Api { code: String, info: String },
}

impl From<reqwest::Error> for WikiApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() { WikiApiError::Timeout } else { WikiApiError::Network(Arc::new(err)) }
    }
}

impl From<WikiApiError> for Error {
    fn from(err: WikiApiError) -> Self {
        match err {
            WikiApiError::Timeout => Error::FetchTimeout(err.to_string()),
            WikiApiError::RateLimited => Error::RateLimited(err.to_string()),
            WikiApiError::Parse(msg) => Error::ParseFailed(msg),
            WikiApiError::InvalidUrl(msg) => Error::InvalidInput(msg),
            WikiApiError::HttpError { .. } | WikiApiError::Network(_) | WikiApiError::Api { .. } => {
                Error::HttpError(err.to_string())
            }
        }
    }
}
