//! wiki_search tool implementation.
//!
//! Case-insensitive substring search over the cached wiki pages. Title
//! matches rank above content-only matches.

use rmcp::{ErrorData as McpError, model::CallToolResult};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use wikicache_client::WikiService;
use wikicache_core::SearchHit;

use super::json_result;

/// Input parameters for wiki_search tool.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct WikiSearchParams {
    /// Text to look for in page titles and content.
    pub query: String,

    /// Maximum number of results (1-25, default 5).
    #[serde(default)]
    pub limit: Option<usize>,
}

/// Output structure for wiki_search tool.
#[derive(Debug, Clone, Serialize)]
pub struct WikiSearchOutput {
    pub query: String,
    pub count: usize,
    pub results: Vec<SearchHit>,
}

/// Implementation of the wiki_search tool.
pub async fn search_impl(service: &WikiService, params: WikiSearchParams) -> Result<CallToolResult, McpError> {
    let results = service.search(&params.query, params.limit).await?;
    tracing::debug!(query = %params.query, hits = results.len(), "wiki search");

    json_result(&WikiSearchOutput { query: params.query, count: results.len(), results })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::test_support::{result_json, seeded_service};
    use rmcp::model::ErrorCode;
    use tempfile::tempdir;
    use wikicache_core::WikiKey;

    #[tokio::test]
    async fn test_search_finds_leopard() {
        let dir = tempdir().unwrap();
        let service =
            seeded_service(&dir, &[(WikiKey::Sbor, "Leopard Fruit", "A rare fruit granting leopard form")]).await;

        let params = WikiSearchParams { query: "leopard".into(), limit: Some(5) };
        let result = search_impl(&service, params).await.unwrap();
        let json = result_json(&result);

        assert_eq!(json["count"], 1);
        assert_eq!(json["results"][0]["wiki"], "sbor");
        assert_eq!(json["results"][0]["wiki_name"], "Soul Blade Online Rebirth");
        assert_eq!(json["results"][0]["title"], "Leopard Fruit");
        assert_eq!(json["results"][0]["relevance"], 100);
    }

    #[tokio::test]
    async fn test_empty_query_returns_no_results() {
        let dir = tempdir().unwrap();
        let service = seeded_service(&dir, &[(WikiKey::Sbor, "Leopard Fruit", "A rare fruit")]).await;

        let result = search_impl(&service, WikiSearchParams::default()).await.unwrap();
        assert_eq!(result_json(&result)["count"], 0);
    }

    #[tokio::test]
    async fn test_limit_out_of_range() {
        let dir = tempdir().unwrap();
        let service = seeded_service(&dir, &[]).await;

        let params = WikiSearchParams { query: "fruit".into(), limit: Some(26) };
        let err = search_impl(&service, params).await.unwrap_err();
        assert_eq!(err.code, ErrorCode(-32602));
    }
}
