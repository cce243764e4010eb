//! Linear search and statistics over the cached pages.
//!
//! The cache is small (a few thousand pages), so every query is a straight
//! scan of titles and content.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::record::truncate_chars;
use super::store::WikiCache;
use crate::wiki::WikiKey;

/// Characters of content included in a search hit.
pub const SNIPPET_CHARS: usize = 200;

/// How a page matched a query. Title matches always rank first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchKind {
    Content,
    Title,
}

impl MatchKind {
    /// Numeric relevance reported to callers.
    pub fn relevance(&self) -> u8 {
        match self {
            MatchKind::Title => 100,
            MatchKind::Content => 50,
        }
    }
}

/// One search result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchHit {
    pub wiki: WikiKey,
    pub wiki_name: String,
    pub title: String,
    pub url: String,
    pub snippet: String,
    pub matched: MatchKind,
    pub relevance: u8,
}

/// Find pages whose title or content contains `query`, ignoring case.
///
/// Title matches come before content-only matches; within a tier, results
/// keep scan order (wikis in registry order, titles sorted). An empty query
/// or a zero limit yields nothing.
pub fn search(cache: &WikiCache, query: &str, limit: usize) -> Vec<SearchHit> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() || limit == 0 {
        return Vec::new();
    }

    let mut hits = Vec::new();
    for wiki in WikiKey::ALL {
        let Some(pages) = cache.pages(wiki) else {
            continue;
        };

        for (title, record) in pages {
            let matched = if title.to_lowercase().contains(&needle) {
                MatchKind::Title
            } else if record.content.to_lowercase().contains(&needle) {
                MatchKind::Content
            } else {
                continue;
            };

            hits.push(SearchHit {
                wiki,
                wiki_name: wiki.display_name().to_string(),
                title: title.clone(),
                url: record.url.clone(),
                snippet: snippet(&record.content),
                matched,
                relevance: matched.relevance(),
            });
        }
    }

    // stable: ties keep scan order
    hits.sort_by(|a, b| b.matched.cmp(&a.matched));
    hits.truncate(limit);
    hits
}

fn snippet(content: &str) -> String {
    let mut snippet = truncate_chars(content, SNIPPET_CHARS);
    if snippet.len() < content.len() {
        snippet.push_str("...");
    }
    snippet
}

/// Per-wiki cache statistics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WikiStats {
    pub key: WikiKey,
    pub name: String,
    pub pages: usize,
    /// Newest parseable `last_updated` among the wiki's pages; `None` means
    /// the wiki was never scraped.
    pub last_update: Option<DateTime<Utc>>,
}

impl WikiStats {
    /// Human-readable last update, `"Never"` when there is none.
    pub fn last_update_label(&self) -> String {
        match &self.last_update {
            Some(at) => at.format("%Y-%m-%d").to_string(),
            None => "Never".to_string(),
        }
    }
}

/// Aggregate statistics for the whole cache.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    pub total_pages: usize,
    pub wikis: Vec<WikiStats>,
}

/// Summarize the cache, one entry per configured wiki.
pub fn stats(cache: &WikiCache) -> CacheStats {
    let wikis: Vec<WikiStats> = WikiKey::ALL
        .into_iter()
        .map(|wiki| {
            let pages = cache.pages(wiki);
            WikiStats {
                key: wiki,
                name: wiki.display_name().to_string(),
                pages: pages.map_or(0, |p| p.len()),
                last_update: pages.and_then(|p| p.values().filter_map(|r| r.last_updated_at()).max()),
            }
        })
        .collect();

    CacheStats { total_pages: wikis.iter().map(|w| w.pages).sum(), wikis }
}
