//! JSON document store for the wiki cache.
//!
//! The whole cache lives in one pretty-printed JSON file shaped
//! `{ wiki_key: { page_title: PageRecord } }`. Reads never fail: an absent
//! file is an empty cache and a malformed one degrades to empty with a
//! warning. Writes replace the document atomically via a sibling temp file.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::Value;

use super::record::PageRecord;
use crate::Error;
use crate::wiki::WikiKey;

/// Pages of one wiki, keyed by title.
pub type WikiPages = BTreeMap<String, PageRecord>;

/// In-memory copy of the cache document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct WikiCache {
    wikis: BTreeMap<WikiKey, WikiPages>,
}

impl WikiCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pages cached for `wiki`, if any were ever stored.
    pub fn pages(&self, wiki: WikiKey) -> Option<&WikiPages> {
        self.wikis.get(&wiki)
    }

    /// Mutable page map for `wiki`, created on first use.
    pub fn pages_mut(&mut self, wiki: WikiKey) -> &mut WikiPages {
        self.wikis.entry(wiki).or_default()
    }

    /// Look up a single page by exact title.
    pub fn page(&self, wiki: WikiKey, title: &str) -> Option<&PageRecord> {
        self.wikis.get(&wiki).and_then(|pages| pages.get(title))
    }

    /// Insert or replace a page, returning the previous record.
    pub fn upsert(&mut self, wiki: WikiKey, record: PageRecord) -> Option<PageRecord> {
        self.pages_mut(wiki).insert(record.title.clone(), record)
    }

    /// Total number of cached pages across all wikis.
    pub fn page_count(&self) -> usize {
        self.wikis.values().map(BTreeMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.page_count() == 0
    }

    /// Build a cache from a parsed JSON document, repairing what it can.
    ///
    /// Unknown wiki keys, non-object entries and records with wrongly typed
    /// fields are dropped with a warning.
    pub fn from_document(document: Value) -> Result<Self, Error> {
        let Value::Object(root) = document else {
            return Err(Error::CacheRead("cache document is not a JSON object".into()));
        };

        let mut cache = Self::new();
        for (wiki_key, pages) in root {
            let wiki = match wiki_key.parse::<WikiKey>() {
                Ok(wiki) => wiki,
                Err(_) => {
                    tracing::warn!(wiki = %wiki_key, "ignoring cached pages for unknown wiki");
                    continue;
                }
            };

            let Value::Object(pages) = pages else {
                tracing::warn!(%wiki, "ignoring cached pages: entry is not a JSON object");
                continue;
            };

            let descriptor = wiki.descriptor();
            let entry = cache.pages_mut(wiki);
            for (title, value) in pages {
                if let Some(record) = PageRecord::from_stored(&descriptor, &title, value) {
                    entry.insert(title, record);
                }
            }
        }

        Ok(cache)
    }
}

/// Handle on the cache file.
///
/// Holds only the path; every operation reads the file fresh.
#[derive(Debug, Clone)]
pub struct CacheStore {
    path: PathBuf,
}

impl CacheStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the cache, degrading to an empty cache on any failure.
    pub async fn load(&self) -> WikiCache {
        match self.try_load().await {
            Ok(cache) => cache,
            Err(e) => {
                tracing::warn!(path = %self.path.display(), "failed to load wiki cache, starting empty: {}", e);
                WikiCache::new()
            }
        }
    }

    /// Load the cache, reporting read and parse failures.
    ///
    /// An absent file is not an error.
    pub async fn try_load(&self) -> Result<WikiCache, Error> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %self.path.display(), "no wiki cache on disk yet");
                return Ok(WikiCache::new());
            }
            Err(e) => return Err(Error::CacheRead(format!("{}: {e}", self.path.display()))),
        };

        let document: Value =
            serde_json::from_slice(&bytes).map_err(|e| Error::CacheRead(format!("{}: {e}", self.path.display())))?;

        WikiCache::from_document(document)
    }

    /// Persist the whole cache, replacing the previous document.
    pub async fn save(&self, cache: &WikiCache) -> Result<(), Error> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| Error::CacheWrite(format!("failed to create {}: {e}", parent.display())))?;
        }

        let serialized =
            serde_json::to_vec_pretty(cache).map_err(|e| Error::CacheWrite(format!("serialize failed: {e}")))?;

        let tmp_path = self.tmp_path();
        tokio::fs::write(&tmp_path, serialized)
            .await
            .map_err(|e| Error::CacheWrite(format!("{}: {e}", tmp_path.display())))?;

        if let Err(e) = tokio::fs::rename(&tmp_path, &self.path).await {
            let _ = tokio::fs::remove_file(&tmp_path).await;
            return Err(Error::CacheWrite(format!("{}: {e}", self.path.display())));
        }

        tracing::debug!(path = %self.path.display(), pages = cache.page_count(), "saved wiki cache");
        Ok(())
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self.path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}
