//! JSON-file cache of scraped wiki pages.
//!
//! This module provides the page record type, the on-disk store, the
//! staleness policy that drives re-scraping, and the linear search index:
//!
//! - Validated records with load-time repair
//! - Whole-document atomic writes
//! - Age-based staleness checks
//! - Two-tier (title, then content) substring search and statistics

pub mod record;
pub mod search;
pub mod staleness;
pub mod store;

pub use crate::Error;

pub use record::{MAX_CONTENT_CHARS, MAX_IMAGES, PageRecord};
pub use search::{CacheStats, MatchKind, SearchHit, WikiStats, search, stats};
pub use staleness::should_update;
pub use store::{CacheStore, WikiCache, WikiPages};
