//! wiki_stats tool implementation.

use rmcp::{ErrorData as McpError, model::CallToolResult};
use serde::Serialize;
use wikicache_client::WikiService;
use wikicache_core::WikiKey;
use wikicache_core::cache::record::format_timestamp;

use super::json_result;

/// Output structure for wiki_stats tool.
#[derive(Debug, Clone, Serialize)]
pub struct WikiStatsOutput {
    pub total_pages: usize,
    pub wikis: Vec<WikiStatsEntry>,
}

#[derive(Debug, Clone, Serialize)]
pub struct WikiStatsEntry {
    pub key: WikiKey,
    pub name: String,
    pub pages: usize,
    /// Newest scrape in the same format records store, `null` if never
    /// scraped.
    pub last_update: Option<String>,
    /// Day of the newest scrape, or "Never".
    pub last_update_label: String,
}

/// Implementation of the wiki_stats tool.
pub async fn stats_impl(service: &WikiService) -> Result<CallToolResult, McpError> {
    let stats = service.stats().await;

    let output = WikiStatsOutput {
        total_pages: stats.total_pages,
        wikis: stats
            .wikis
            .into_iter()
            .map(|w| WikiStatsEntry {
                last_update: w.last_update.as_ref().map(format_timestamp),
                last_update_label: w.last_update_label(),
                key: w.key,
                name: w.name,
                pages: w.pages,
            })
            .collect(),
    };

    json_result(&output)
}
