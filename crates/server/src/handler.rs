//! MCP server handler implementation.
//!
//! This module defines the main server handler that
//! routes tool calls to the appropriate implementations.
use std::sync::Arc;

use crate::tools::{
    wiki_ingest::{WikiIngestParams, ingest_impl},
    wiki_page::{WikiPageParams, page_impl},
    wiki_search::{WikiSearchParams, search_impl},
    wiki_stats::stats_impl,
};

use rmcp::{
    ErrorData as McpError, ServerHandler,
    handler::server::{
        tool::{ToolCallContext, ToolRouter},
        wrapper::Parameters,
    },
    model::{
        CallToolRequestParam, CallToolResult, Implementation, ListToolsResult, PaginatedRequestParam, ProtocolVersion,
        ServerCapabilities, ServerInfo,
    },
    service::{RequestContext, RoleServer},
    tool, tool_router,
};
use wikicache_client::WikiService;

/// The main MCP server handler for wiki-mcp.
#[derive(Clone)]
pub struct WikiMcpServer {
    service: Arc<WikiService>,
    tool_router: ToolRouter<Self>,
}

/// Tool router implementation using the #[tool_router] macro.
///
/// This macro generates the routing logic that maps tool names to handler methods.
#[tool_router]
impl WikiMcpServer {
    /// Create a new server handler over a shared service.
    pub fn new(service: Arc<WikiService>) -> Self {
        Self { service, tool_router: Self::tool_router() }
    }

    #[tool(
        description = "Search the cached game wikis (Soul Blade Online Rebirth, Blox Fruits). Title matches rank above content matches. Returns title, URL, wiki and a short snippet per hit."
    )]
    async fn wiki_search(&self, params: Parameters<WikiSearchParams>) -> Result<CallToolResult, McpError> {
        search_impl(&self.service, params.0).await
    }

    /// Fetch a single cached page.
    #[tool(description = "Return the cached text, URL and images of one wiki page by exact title.")]
    async fn wiki_page(&self, params: Parameters<WikiPageParams>) -> Result<CallToolResult, McpError> {
        page_impl(&self.service, params.0).await
    }

    #[tool(description = "Show how many pages are cached per wiki and when each wiki was last scraped.")]
    async fn wiki_stats(&self) -> Result<CallToolResult, McpError> {
        stats_impl(&self.service).await
    }

    /// Refresh the cache from the live wikis.
    ///
    /// Blocks until every targeted wiki has been processed, which can take
    /// minutes on a cold cache.
    #[tool(
        description = "Scrape the wikis into the local cache. Only pages older than the configured age are refreshed unless force is true. wiki defaults to \"all\"."
    )]
    async fn wiki_ingest(&self, params: Parameters<WikiIngestParams>) -> Result<CallToolResult, McpError> {
        ingest_impl(&self.service, params.0).await
    }
}

impl ServerHandler for WikiMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            server_info: Implementation {
                name: "wiki-mcp".into(),
                version: env!("CARGO_PKG_VERSION").into(),
                ..Default::default()
            },
            protocol_version: ProtocolVersion::LATEST,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            instructions: Some("Search and browse cached pages of the Soul Blade Online Rebirth and Blox Fruits wikis.".into()),
            ..Default::default()
        }
    }

    async fn list_tools(
        &self, _request: Option<PaginatedRequestParam>, _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, rmcp::model::ErrorData> {
        Ok(ListToolsResult { meta: None, tools: self.tool_router.list_all(), next_cursor: None })
    }

    async fn call_tool(
        &self, request: CallToolRequestParam, context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, rmcp::model::ErrorData> {
        self.tool_router
            .call(ToolCallContext::new(self, request, context))
            .await
    }
}
