//! Long-lived entry point shared by the server tools.
//!
//! `WikiService` owns the API client and the cache store handle. It holds no
//! page data itself: every operation reloads the cache document.

use std::sync::Arc;

use wikicache_core::cache::{self, CacheStats, SearchHit};
use wikicache_core::config::MAX_SEARCH_LIMIT;
use wikicache_core::{AppConfig, CacheStore, Error, PageRecord, WikiKey};

use crate::ingest::{IngestOptions, IngestReport, IngestTarget, ProgressFn, ingest_wikis};
use crate::mediawiki::{MediaWikiClient, MediaWikiConfig, WikiApi};

pub struct WikiService {
    api: Arc<dyn WikiApi>,
    store: CacheStore,
    options: IngestOptions,
    default_search_limit: usize,
}

impl WikiService {
    /// Build the service with a real MediaWiki client.
    pub fn from_config(config: &AppConfig) -> Result<Self, Error> {
        let client = MediaWikiClient::new(MediaWikiConfig::from(config))?;
        Ok(Self::with_api(Arc::new(client), config))
    }

    /// Build the service around any [`WikiApi`] implementation.
    pub fn with_api(api: Arc<dyn WikiApi>, config: &AppConfig) -> Self {
        Self {
            api,
            store: CacheStore::new(&config.cache_path),
            options: IngestOptions { max_age_days: config.max_age_days, progress_every: config.progress_every },
            default_search_limit: config.default_search_limit,
        }
    }

    /// Refresh the targeted wikis one after another.
    pub async fn trigger_ingestion(
        &self, target: IngestTarget, force: bool, progress: Option<&ProgressFn<'_>>,
    ) -> IngestReport {
        tracing::info!(%target, force, "ingestion triggered");
        ingest_wikis(self.api.as_ref(), &self.store, &target.wikis(), force, self.options, progress).await
    }

    /// Search cached pages. `limit` defaults to the configured search limit.
    pub async fn search(&self, query: &str, limit: Option<usize>) -> Result<Vec<SearchHit>, Error> {
        let limit = limit.unwrap_or(self.default_search_limit);
        if limit == 0 || limit > MAX_SEARCH_LIMIT {
            return Err(Error::InvalidInput(format!("limit must be between 1 and {MAX_SEARCH_LIMIT}")));
        }

        let snapshot = self.store.load().await;
        Ok(cache::search(&snapshot, query, limit))
    }

    pub async fn stats(&self) -> CacheStats {
        cache::stats(&self.store.load().await)
    }

    /// Cached record for an exact title, if any.
    pub async fn page(&self, wiki: WikiKey, title: &str) -> Option<PageRecord> {
        self.store.load().await.page(wiki, title).cloned()
    }
}
