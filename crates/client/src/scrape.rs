//! Single-page scraping.

use chrono::{DateTime, Utc};
use wikicache_core::{PageRecord, WikiDescriptor};

use crate::extract::html_to_text;
use crate::mediawiki::{WikiApi, WikiApiError};

/// Fetch one page and turn it into a cache record stamped with `now`.
///
/// Returns `Ok(None)` when the API has no rendered text for the title.
pub async fn scrape_page(
    api: &dyn WikiApi, wiki: &WikiDescriptor, title: &str, now: DateTime<Utc>,
) -> Result<Option<PageRecord>, WikiApiError> {
    let Some(rendered) = api.render_page(wiki, title).await? else {
        return Ok(None);
    };

    let content = html_to_text(&rendered.html);
    Ok(Some(PageRecord::new(wiki, title, &content, rendered.images, now)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mediawiki::{RenderedPage, TitleBatch};
    use async_trait::async_trait;
    use chrono::TimeZone;
    use wikicache_core::WikiKey;
    use wikicache_core::cache::{MAX_CONTENT_CHARS, MAX_IMAGES};

    struct FixedPage(Option<RenderedPage>);

    #[async_trait]
    impl WikiApi for FixedPage {
        async fn list_titles(&self, _: &WikiDescriptor, _: Option<&str>) -> Result<TitleBatch, WikiApiError> {
            Ok(TitleBatch::default())
        }

        async fn render_page(&self, _: &WikiDescriptor, _: &str) -> Result<Option<RenderedPage>, WikiApiError> {
            Ok(self.0.clone())
        }
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 12, 30, 0).unwrap()
    }

    #[tokio::test]
    async fn test_scrape_builds_record() {
        let api = FixedPage(Some(RenderedPage {
            html: "<div><style>p{}</style><p>A rare   fruit\ngranting leopard form</p></div>".into(),
            images: vec!["Leopard.png".into()],
        }));
        let wiki = WikiKey::Sbor.descriptor();

        let record = scrape_page(&api, &wiki, "Leopard Fruit", now()).await.unwrap().unwrap();

        assert_eq!(record.title, "Leopard Fruit");
        assert_eq!(record.content, "A rare fruit granting leopard form");
        assert_eq!(record.url, "https://soul-blade-online-rebirth.fandom.com/wiki/Leopard_Fruit");
        assert_eq!(record.images, vec!["Leopard.png".to_string()]);
        assert_eq!(record.last_updated.as_deref(), Some("2024-06-01T12:30:00Z"));
    }

    #[tokio::test]
    async fn test_scrape_enforces_bounds() {
        let images: Vec<String> = (0..12).map(|i| format!("img{i}.png")).collect();
        let api = FixedPage(Some(RenderedPage { html: format!("<p>{}</p>", "é".repeat(6000)), images }));

        let record = scrape_page(&api, &WikiKey::BloxFruits.descriptor(), "Long", now()).await.unwrap().unwrap();

        assert_eq!(record.content.chars().count(), MAX_CONTENT_CHARS);
        assert_eq!(record.images.len(), MAX_IMAGES);
        assert_eq!(record.images[0], "img0.png");
    }

    #[tokio::test]
    async fn test_scrape_missing_page() {
        let api = FixedPage(None);
        let result = scrape_page(&api, &WikiKey::Sbor.descriptor(), "Gone", now()).await.unwrap();
        assert!(result.is_none());
    }
}
