//! Cached page records.
//!
//! A [`PageRecord`] is the plain-text rendition of one wiki page. Records are
//! built through [`PageRecord::new`] or repaired on load through
//! [`PageRecord::from_stored`], both of which enforce the content and image
//! bounds and derive the URL from the title.

use chrono::{DateTime, NaiveDateTime, SecondsFormat, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::wiki::WikiDescriptor;

/// Maximum number of characters kept from a page's text.
pub const MAX_CONTENT_CHARS: usize = 5000;

/// Maximum number of image references kept per page.
pub const MAX_IMAGES: usize = 5;

/// One scraped wiki page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct PageRecord {
    pub title: String,
    /// Whitespace-normalized plain text, at most [`MAX_CONTENT_CHARS`] chars.
    pub content: String,
    pub url: String,
    /// Image file names in page order, at most [`MAX_IMAGES`].
    pub images: Vec<String>,
    /// Raw timestamp of the last scrape. Kept verbatim so a value that fails
    /// to parse survives a round trip and keeps the page stale.
    #[serde(default, alias = "lastUpdated", skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<String>,
}

/// On-disk shape before validation. Every field is optional so that a record
/// missing any of them can be repaired instead of rejected wholesale.
#[derive(Debug, Default, Deserialize)]
struct StoredRecord {
    title: Option<String>,
    content: Option<String>,
    images: Option<Vec<String>>,
    last_updated: Option<String>,
    #[serde(rename = "lastUpdated")]
    last_updated_camel: Option<String>,
}

impl PageRecord {
    /// Build a freshly scraped record stamped with `fetched_at`.
    pub fn new(
        wiki: &WikiDescriptor, title: &str, content: &str, images: Vec<String>, fetched_at: DateTime<Utc>,
    ) -> Self {
        Self {
            title: title.to_string(),
            content: truncate_chars(content, MAX_CONTENT_CHARS),
            url: wiki.page_url(title),
            images: truncate_images(images),
            last_updated: Some(format_timestamp(&fetched_at)),
        }
    }

    /// Validate and repair a record read from the cache document.
    ///
    /// `key` is the page title the record is stored under. The stored URL is
    /// ignored and re-derived from the title. Returns `None`
    /// when the value is not an object or one of its fields has the wrong
    /// JSON type.
    pub fn from_stored(wiki: &WikiDescriptor, key: &str, value: Value) -> Option<Self> {
        if !value.is_object() {
            tracing::warn!(wiki = %wiki.key, title = key, "dropping cached page: not a JSON object");
            return None;
        }

        let stored: StoredRecord = match serde_json::from_value(value) {
            Ok(stored) => stored,
            Err(e) => {
                tracing::warn!(wiki = %wiki.key, title = key, "dropping cached page: {}", e);
                return None;
            }
        };

        let title = match stored.title {
            Some(title) if !title.is_empty() => title,
            _ => key.to_string(),
        };
        let content = stored.content.unwrap_or_default();

        Some(Self {
            content: truncate_chars(&content, MAX_CONTENT_CHARS),
            images: truncate_images(stored.images.unwrap_or_default()),
            url: wiki.page_url(&title),
            title,
            last_updated: stored.last_updated.or(stored.last_updated_camel),
        })
    }

    /// Parsed `last_updated`, if present and well-formed.
    pub fn last_updated_at(&self) -> Option<DateTime<Utc>> {
        self.last_updated.as_deref().and_then(parse_timestamp)
    }
}

/// Format a timestamp the way records store it.
pub fn format_timestamp(at: &DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Parse a stored timestamp.
///
/// Accepts RFC 3339 and naive ISO-8601 datetimes (with or without fractional
/// seconds), the latter read as UTC.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(at) = DateTime::parse_from_rfc3339(raw) {
        return Some(at.with_timezone(&Utc));
    }

    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|naive| naive.and_utc())
}

/// Keep at most `max` chars of `s`.
pub fn truncate_chars(s: &str, max: usize) -> String {
    match s.char_indices().nth(max) {
        Some((idx, _)) => s[..idx].to_string(),
        None => s.to_string(),
    }
}

fn truncate_images(mut images: Vec<String>) -> Vec<String> {
    images.truncate(MAX_IMAGES);
    images
}
