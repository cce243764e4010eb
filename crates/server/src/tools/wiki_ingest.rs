//! wiki_ingest tool implementation.
//!
//! Runs an ingestion pass and waits for it to finish. Only stale pages are
//! scraped unless `force` is set.

use rmcp::{ErrorData as McpError, model::CallToolResult};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use wikicache_client::{IngestReport, IngestTarget, WikiService};

use super::json_result;

/// Input parameters for wiki_ingest tool.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct WikiIngestParams {
    /// Wiki key ("sbor", "bloxfruits") or "all" (default).
    #[serde(default)]
    pub wiki: Option<String>,

    /// Re-scrape every page regardless of age.
    #[serde(default)]
    pub force: bool,
}

/// Output structure for wiki_ingest tool.
#[derive(Debug, Clone, Serialize)]
pub struct WikiIngestOutput {
    pub target: String,
    pub force: bool,
    #[serde(flatten)]
    pub report: IngestReport,
}

/// Implementation of the wiki_ingest tool.
pub async fn ingest_impl(service: &WikiService, params: WikiIngestParams) -> Result<CallToolResult, McpError> {
    let target: IngestTarget = match params.wiki.as_deref() {
        Some(wiki) => wiki.parse()?,
        None => IngestTarget::All,
    };

    let report = service.trigger_ingestion(target, params.force, None).await;

    json_result(&WikiIngestOutput { target: target.to_string(), force: params.force, report })
}
