//! wiki_page tool implementation.
//!
//! Returns one cached page by exact title.

use rmcp::{ErrorData as McpError, model::CallToolResult};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use wikicache_client::WikiService;
use wikicache_core::{Error, PageRecord, WikiKey};

use super::json_result;
use crate::error::ToolError;

/// Input parameters for wiki_page tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct WikiPageParams {
    /// Wiki key: "sbor" or "bloxfruits".
    pub wiki: String,

    /// Exact page title, e.g. "Leopard Fruit".
    pub title: String,
}

/// Output structure for wiki_page tool.
#[derive(Debug, Clone, Serialize)]
pub struct WikiPageOutput {
    pub wiki: WikiKey,
    pub wiki_name: String,
    pub page: PageRecord,
}

/// Implementation of the wiki_page tool.
pub async fn page_impl(service: &WikiService, params: WikiPageParams) -> Result<CallToolResult, McpError> {
    let title = params.title.trim();
    if title.is_empty() {
        return Err(ToolError::InvalidInput("title cannot be empty".into()).into());
    }

    let wiki: WikiKey = params.wiki.parse()?;
    let page = service
        .page(wiki, title)
        .await
        .ok_or_else(|| Error::PageNotFound(format!("{title} ({wiki})")))?;

    json_result(&WikiPageOutput { wiki, wiki_name: wiki.display_name().to_string(), page })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::test_support::{result_json, seeded_service};
    use rmcp::model::ErrorCode;
    use tempfile::tempdir;

    fn params(wiki: &str, title: &str) -> WikiPageParams {
        WikiPageParams { wiki: wiki.into(), title: title.into() }
    }

    #[tokio::test]
    async fn test_page_found() {
        let dir = tempdir().unwrap();
        let service = seeded_service(&dir, &[(WikiKey::BloxFruits, "Dragon Fruit", "Mythical")]).await;

        let result = page_impl(&service, params("BloxFruits", "Dragon Fruit")).await.unwrap();
        let json = result_json(&result);

        assert_eq!(json["wiki"], "bloxfruits");
        assert_eq!(json["wiki_name"], "Blox Fruits");
        assert_eq!(json["page"]["content"], "Mythical");
        assert_eq!(json["page"]["url"], "https://blox-fruits.fandom.com/wiki/Dragon_Fruit");
    }

    #[tokio::test]
    async fn test_page_not_found() {
        let dir = tempdir().unwrap();
        let service = seeded_service(&dir, &[(WikiKey::BloxFruits, "Dragon Fruit", "Mythical")]).await;

        let err = page_impl(&service, params("sbor", "Dragon Fruit")).await.unwrap_err();
        assert_eq!(err.code, ErrorCode(-32001));
    }

    #[tokio::test]
    async fn test_invalid_arguments() {
        let dir = tempdir().unwrap();
        let service = seeded_service(&dir, &[]).await;

        let err = page_impl(&service, params("sbor", "  ")).await.unwrap_err();
        assert_eq!(err.code, ErrorCode(-32602));

        let err = page_impl(&service, params("minecraft", "Creeper")).await.unwrap_err();
        assert_eq!(err.code, ErrorCode(-32602));
    }
}
