//! Re-scrape policy for cached pages.

use chrono::{DateTime, Duration, Utc};

use super::record::PageRecord;

/// Decide whether a page must be fetched again.
///
/// A missing record, or one whose `last_updated` is absent or unparseable,
/// is always stale. Otherwise the page is stale once it is strictly older
/// than `max_age_days`.
pub fn should_update(record: Option<&PageRecord>, now: DateTime<Utc>, max_age_days: i64) -> bool {
    let Some(last_updated) = record.and_then(PageRecord::last_updated_at) else {
        return true;
    };

    now - last_updated > Duration::days(max_age_days)
}
