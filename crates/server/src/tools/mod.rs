//! MCP tool implementations.
//!
//! This module contains all tools exposed by the wiki-mcp server. Every tool
//! answers with a single pretty-printed JSON text block.
#![allow(unused_imports)]

pub mod wiki_ingest;
pub mod wiki_page;
pub mod wiki_search;
pub mod wiki_stats;

pub use wiki_ingest::{WikiIngestOutput, WikiIngestParams};
pub use wiki_page::{WikiPageOutput, WikiPageParams};
pub use wiki_search::{WikiSearchOutput, WikiSearchParams};
pub use wiki_stats::WikiStatsOutput;

use rmcp::{
    ErrorData as McpError,
    model::{CallToolResult, Content},
};
use serde::Serialize;

use crate::error::ToolError;

/// Encode `output` as the tool's text result.
pub(crate) fn json_result<T: Serialize>(output: &T) -> Result<CallToolResult, McpError> {
    let json = serde_json::to_string_pretty(output).map_err(|e| ToolError::SerializeFailed(e.to_string()))?;
    Ok(CallToolResult::success(vec![Content::text(json)]))
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::sync::Arc;

    use rmcp::model::CallToolResult;
    use serde_json::Value;
    use tempfile::TempDir;
    use wikicache_client::WikiService;
    use wikicache_core::{AppConfig, CacheStore, PageRecord, WikiCache, WikiKey};

    pub fn config(dir: &TempDir) -> AppConfig {
        AppConfig { cache_path: dir.path().join("wiki_data.json"), rate_limit_ms: 0, ..Default::default() }
    }

    /// Service over a cache seeded with `pages`. The HTTP client is never
    /// reached by read-only tools.
    pub async fn seeded_service(dir: &TempDir, pages: &[(WikiKey, &str, &str)]) -> Arc<WikiService> {
        let config = config(dir);
        let mut cache = WikiCache::new();
        for (wiki, title, content) in pages {
            cache.upsert(
                *wiki,
                PageRecord {
                    title: title.to_string(),
                    content: content.to_string(),
                    url: wiki.descriptor().page_url(title),
                    images: vec![],
                    last_updated: Some("2024-01-01T00:00:00Z".into()),
                },
            );
        }
        CacheStore::new(&config.cache_path).save(&cache).await.unwrap();
        Arc::new(WikiService::from_config(&config).unwrap())
    }

    /// Parse the JSON text block of a tool result.
    pub fn result_json(result: &CallToolResult) -> Value {
        let content = serde_json::to_value(&result.content[0]).unwrap();
        serde_json::from_str(content["text"].as_str().unwrap()).unwrap()
    }
}
