//! MediaWiki API client.
//!
//! Provides the two read calls the ingestion pipeline needs, behind the
//! [`WikiApi`] trait so the orchestrator can be driven by a test double.
//!
//! ### Protocol
//!
//! - **Endpoint**: the wiki's `api.php`, `format=json`.
//! - **Listing**: `action=query&list=allpages`, paginated with `apcontinue`.
//! - **Rendering**: `action=parse&prop=text|images` for one title.
//! - **Rate Limiting**: a fixed minimum interval between any two requests
//!   sent by the same client. HTTP 429 is reported, never retried.

pub mod enumerate;
pub mod error;
pub mod response;

pub use enumerate::enumerate_titles;
pub use error::WikiApiError;
pub use response::{AllPagesResponse, ParseResponse};

use async_trait::async_trait;
use reqwest::header;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use url::Url;
use wikicache_core::{AppConfig, WikiDescriptor};

/// One page of an `allpages` listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TitleBatch {
    pub titles: Vec<String>,
    /// Opaque cursor for the next request; `None` on the last batch.
    pub continue_token: Option<String>,
}

/// Rendered page as returned by `action=parse`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderedPage {
    pub html: String,
    pub images: Vec<String>,
}

/// Read access to a MediaWiki-compatible API.
#[async_trait]
pub trait WikiApi: Send + Sync {
    /// Fetch one batch of page titles, continuing from `continue_token`.
    async fn list_titles(
        &self, wiki: &WikiDescriptor, continue_token: Option<&str>,
    ) -> Result<TitleBatch, WikiApiError>;

    /// Render one page. `Ok(None)` means the response carried no page text.
    async fn render_page(&self, wiki: &WikiDescriptor, title: &str) -> Result<Option<RenderedPage>, WikiApiError>;
}

/// MediaWiki client configuration.
#[derive(Debug, Clone)]
pub struct MediaWikiConfig {
    /// User-agent string (default: wikicache/0.1).
    pub user_agent: String,
    /// Request timeout (default: 20s).
    pub timeout: Duration,
    /// Minimum interval between requests (default: 500ms).
    pub min_interval: Duration,
    /// `aplimit` for title listings (default: 500).
    pub page_size: u32,
}

impl Default for MediaWikiConfig {
    fn default() -> Self {
        Self {
            user_agent: "wikicache/0.1".to_string(),
            timeout: Duration::from_secs(20),
            min_interval: Duration::from_millis(500),
            page_size: 500,
        }
    }
}

impl From<&AppConfig> for MediaWikiConfig {
    fn from(config: &AppConfig) -> Self {
        Self {
            user_agent: config.user_agent.clone(),
            timeout: config.timeout(),
            min_interval: config.rate_limit(),
            page_size: config.page_size,
        }
    }
}

/// Rate limiter to enforce request intervals.
#[derive(Debug)]
struct RateLimiter {
    last_request: Mutex<Option<Instant>>,
    min_interval: Duration,
}

impl RateLimiter {
    fn new(min_interval: Duration) -> Self {
        Self { last_request: Mutex::new(None), min_interval }
    }

    /// Wait until `min_interval` has passed since the previous request.
    async fn acquire(&self) {
        let mut last = self.last_request.lock().await;
        if let Some(previous) = *last {
            let elapsed = previous.elapsed();
            if elapsed < self.min_interval {
                tokio::time::sleep(self.min_interval - elapsed).await;
            }
        }
        *last = Some(Instant::now());
    }
}

/// HTTP client for MediaWiki `api.php` endpoints.
#[derive(Debug, Clone)]
pub struct MediaWikiClient {
    http: reqwest::Client,
    config: MediaWikiConfig,
    rate_limiter: Arc<RateLimiter>,
}

impl MediaWikiClient {
    /// Create a new client with the given configuration.
    pub fn new(config: MediaWikiConfig) -> Result<Self, WikiApiError> {
        let http = reqwest::Client::builder()
            .user_agent(&config.user_agent)
            .timeout(config.timeout)
            .use_rustls_tls()
            .gzip(true)
            .brotli(true)
            .deflate(true)
            .build()
            .map_err(|e| WikiApiError::Network(Arc::new(e)))?;

        let rate_limiter = Arc::new(RateLimiter::new(config.min_interval));
        Ok(Self { http, config, rate_limiter })
    }

    /// Get reference to the configuration.
    pub fn config(&self) -> &MediaWikiConfig {
        &self.config
    }

    async fn get_json<T: DeserializeOwned>(&self, api_url: &str, params: &[(&str, String)]) -> Result<T, WikiApiError> {
        let url = Url::parse(api_url).map_err(|e| WikiApiError::InvalidUrl(format!("{api_url}: {e}")))?;

        self.rate_limiter.acquire().await;

        let start = Instant::now();
        let response = self
            .http
            .get(url)
            .header(header::ACCEPT, "application/json")
            .query(&[("format", "json")])
            .query(params)
            .send()
            .await?;

        let status = response.status();
        if status == 429 {
            return Err(WikiApiError::RateLimited);
        }
        if !status.is_success() {
            return Err(WikiApiError::HttpError { status: status.as_u16() });
        }

        let bytes = response.bytes().await?;
        tracing::debug!("wiki API {} answered in {:?} ({} bytes)", api_url, start.elapsed(), bytes.len());

        serde_json::from_slice(&bytes).map_err(|e| WikiApiError::Parse(e.to_string()))
    }
}

#[async_trait]
impl WikiApi for MediaWikiClient {
    async fn list_titles(
        &self, wiki: &WikiDescriptor, continue_token: Option<&str>,
    ) -> Result<TitleBatch, WikiApiError> {
        let mut params = vec![
            ("action", "query".to_string()),
            ("list", "allpages".to_string()),
            ("aplimit", self.config.page_size.to_string()),
        ];
        if let Some(token) = continue_token {
            params.push(("apcontinue", token.to_string()));
        }

        let response: AllPagesResponse = self.get_json(&wiki.api_url, &params).await?;
        if let Some(error) = response.error {
            return Err(WikiApiError::Api { code: error.code, info: error.info });
        }

        Ok(TitleBatch {
            titles: response.query.allpages.into_iter().map(|p| p.title).collect(),
            continue_token: response.continuation.and_then(|c| c.apcontinue),
        })
    }

    async fn render_page(&self, wiki: &WikiDescriptor, title: &str) -> Result<Option<RenderedPage>, WikiApiError> {
        let params = [
            ("action", "parse".to_string()),
            ("page", title.to_string()),
            ("prop", "text|images".to_string()),
        ];

        let response: ParseResponse = self.get_json(&wiki.api_url, &params).await?;
        if let Some(error) = response.error {
            tracing::debug!(wiki = %wiki.key, title, "parse returned {}: {}", error.code, error.info);
        }

        Ok(response
            .parse
            .and_then(|parse| parse.text.map(|text| RenderedPage { html: text.into_html(), images: parse.images })))
    }
}
