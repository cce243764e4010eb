//! Unified error types for wikicache.
//!
//! The uppercase prefixes are stable machine-readable codes surfaced to tool
//! callers.

use rmcp::model::{ErrorCode, ErrorData as McpError};

/// Unified error types for the wiki cache.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Invalid input parameters (e.g., empty title).
    #[error("INVALID_INPUT: {0}")]
    InvalidInput(String),

    /// Wiki key is not one of the configured wikis.
    #[error("UNKNOWN_WIKI: {0}")]
    UnknownWiki(String),

    /// No cached page with the given title.
    #[error("PAGE_NOT_FOUND: {0}")]
    PageNotFound(String),

    /// Cache document could not be read or parsed.
    #[error("CACHE_ERROR: read failed: {0}")]
    CacheRead(String),

    /// Cache document could not be written.
    #[error("CACHE_ERROR: write failed: {0}")]
    CacheWrite(String),

    /// HTTP error response or transport failure.
    #[error("HTTP_ERROR: {0}")]
    HttpError(String),

    /// Request timed out.
    #[error("FETCH_TIMEOUT: {0}")]
    FetchTimeout(String),

    /// Remote API answered 429.
    #[error("RATE_LIMITED: {0}")]
    RateLimited(String),

    /// Remote API response did not have the expected shape.
    #[error("PARSE_FAILED: {0}")]
    ParseFailed(String),
}

impl From<Error> for McpError {
    fn from(err: Error) -> Self {
        let (code, message) = match &err {
            Error::InvalidInput(msg) => (-32602, msg.clone()),
            Error::UnknownWiki(key) => (-32602, format!("unknown wiki: {key}")),
            Error::PageNotFound(msg) => (-32001, msg.clone()),
            Error::CacheRead(msg) | Error::CacheWrite(msg) => (-32002, msg.clone()),
            Error::HttpError(msg) => (-32008, msg.clone()),
            Error::FetchTimeout(msg) => (-32006, msg.clone()),
            Error::RateLimited(msg) => (-32010, msg.clone()),
            Error::ParseFailed(msg) => (-32000, msg.clone()),
        };

        McpError { code: ErrorCode(code), message: message.into(), data: None }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::PageNotFound("Leopard Fruit".to_string());
        assert!(err.to_string().contains("PAGE_NOT_FOUND"));
        assert!(err.to_string().contains("Leopard Fruit"));

        let err = Error::CacheWrite("disk full".to_string());
        assert!(err.to_string().starts_with("CACHE_ERROR"));
    }

    #[test]
    fn test_error_to_mcp_error() {
        let err = Error::PageNotFound("Leopard Fruit".to_string());
        let mcp_err: McpError = err.into();
        assert_eq!(mcp_err.code.0, -32001);

        let mcp_err: McpError = Error::UnknownWiki("minecraft".to_string()).into();
        assert_eq!(mcp_err.code.0, -32602);
        assert!(mcp_err.message.contains("minecraft"));
    }
}
