//! Ingestion orchestration.
//!
//! One run for one wiki:
//!
//! 1. Load the cache document.
//! 2. Enumerate every title (partial listings are accepted).
//! 3. Select candidates: every title when forced, otherwise the stale ones,
//!    judged against a single `now` captured at the start of the run.
//! 4. Scrape candidates one after another; failures and missing pages are
//!    skipped without retry.
//! 5. Persist the whole cache once.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::Utc;
use serde::Serialize;
use wikicache_core::cache::should_update;
use wikicache_core::{CacheStore, Error, WikiKey};

use crate::mediawiki::{WikiApi, enumerate_titles};
use crate::scrape::scrape_page;

/// Tunables for an ingestion run.
#[derive(Debug, Clone, Copy)]
pub struct IngestOptions {
    /// Pages older than this many days are re-scraped.
    pub max_age_days: i64,
    /// Candidates between two progress reports.
    pub progress_every: usize,
}

impl Default for IngestOptions {
    fn default() -> Self {
        Self { max_age_days: 30, progress_every: 50 }
    }
}

/// Progress snapshot handed to the progress callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct IngestProgress {
    pub wiki: WikiKey,
    /// Candidates handled so far, successful or not.
    pub processed: usize,
    /// Number of candidates in this run.
    pub total: usize,
}

/// Observer for [`IngestProgress`] events.
pub type ProgressFn<'a> = dyn Fn(IngestProgress) + Send + Sync + 'a;

/// Which wikis an ingestion covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IngestTarget {
    All,
    Wiki(WikiKey),
}

impl IngestTarget {
    /// Wikis covered, in registry order.
    pub fn wikis(&self) -> Vec<WikiKey> {
        match self {
            IngestTarget::All => WikiKey::ALL.to_vec(),
            IngestTarget::Wiki(wiki) => vec![*wiki],
        }
    }
}

impl FromStr for IngestTarget {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") { Ok(IngestTarget::All) } else { s.parse().map(IngestTarget::Wiki) }
    }
}

impl fmt::Display for IngestTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IngestTarget::All => f.write_str("all"),
            IngestTarget::Wiki(wiki) => write!(f, "{wiki}"),
        }
    }
}

/// Outcome of an ingestion over one or more wikis.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct IngestReport {
    /// Pages updated per wiki. A wiki whose run failed reports 0.
    pub updated: BTreeMap<WikiKey, usize>,
    pub total: usize,
    /// Error message for each wiki whose run failed, e.g. a cache write
    /// failure. Pages scraped by a failed run were not persisted.
    pub failed: BTreeMap<WikiKey, String>,
}

impl IngestReport {
    pub fn record(&mut self, wiki: WikiKey, count: usize) {
        self.updated.insert(wiki, count);
        self.total = self.updated.values().sum();
    }

    pub fn record_failure(&mut self, wiki: WikiKey, error: &Error) {
        self.record(wiki, 0);
        self.failed.insert(wiki, error.to_string());
    }

    /// True when every targeted wiki finished and was persisted.
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Refresh one wiki and return the number of pages written.
///
/// Only a failure to persist the cache is reported as an error; listing and
/// per-page failures are logged and skipped.
pub async fn ingest(
    api: &dyn WikiApi, store: &CacheStore, wiki: WikiKey, force: bool, options: IngestOptions,
    progress: Option<&ProgressFn<'_>>,
) -> Result<usize, Error> {
    let descriptor = wiki.descriptor();
    let mut cache = store.load().await;

    let titles = enumerate_titles(api, &descriptor).await;
    if titles.is_empty() {
        tracing::warn!(%wiki, "no pages listed, leaving cache untouched");
        return Ok(0);
    }

    let now = Utc::now();
    let candidates: Vec<String> = titles
        .into_iter()
        .filter(|title| force || should_update(cache.page(wiki, title), now, options.max_age_days))
        .collect();

    let total = candidates.len();
    tracing::info!(%wiki, force, candidates = total, "starting ingestion");

    let every = options.progress_every.max(1);
    let mut updated = 0;
    for (idx, title) in candidates.iter().enumerate() {
        match scrape_page(api, &descriptor, title, now).await {
            Ok(Some(record)) => {
                cache.upsert(wiki, record);
                updated += 1;
            }
            Ok(None) => tracing::debug!(%wiki, title = %title, "no rendered text, skipping"),
            Err(e) => tracing::warn!(%wiki, title = %title, "failed to scrape page: {}", e),
        }

        let processed = idx + 1;
        if processed % every == 0 {
            tracing::info!(%wiki, processed, total, "ingestion progress");
            if let Some(report) = progress {
                report(IngestProgress { wiki, processed, total });
            }
        }
    }

    store.save(&cache).await?;
    tracing::info!(%wiki, updated, "ingestion finished");
    Ok(updated)
}

/// Refresh every configured wiki in registry order.
///
/// A wiki whose run fails is logged, counted as 0 and listed in
/// [`IngestReport::failed`].
pub async fn ingest_all(
    api: &dyn WikiApi, store: &CacheStore, force: bool, options: IngestOptions, progress: Option<&ProgressFn<'_>>,
) -> IngestReport {
    ingest_wikis(api, store, &WikiKey::ALL, force, options, progress).await
}

pub(crate) async fn ingest_wikis(
    api: &dyn WikiApi, store: &CacheStore, wikis: &[WikiKey], force: bool, options: IngestOptions,
    progress: Option<&ProgressFn<'_>>,
) -> IngestReport {
    let mut report = IngestReport::default();
    for &wiki in wikis {
        match ingest(api, store, wiki, force, options, progress).await {
            Ok(count) => report.record(wiki, count),
            Err(e) => {
                tracing::warn!(%wiki, "ingestion failed: {}", e);
                report.record_failure(wiki, &e);
            }
        }
    }
    report
}
