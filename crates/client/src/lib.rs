//! Client code for wikicache.
//!
//! This crate provides the MediaWiki API client, page scraping, the
//! ingestion pipeline, and the [`WikiService`] shared by the server.

pub mod extract;
pub mod ingest;
pub mod mediawiki;
pub mod scrape;
pub mod service;

pub use extract::html_to_text;
pub use ingest::{IngestOptions, IngestProgress, IngestReport, IngestTarget, ProgressFn, ingest, ingest_all};
pub use mediawiki::{MediaWikiClient, MediaWikiConfig, WikiApi, WikiApiError};
pub use scrape::scrape_page;
pub use service::WikiService;
