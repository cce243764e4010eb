//! Full title listing for one wiki.

use std::collections::HashSet;

use wikicache_core::WikiDescriptor;

use super::WikiApi;

/// List every page title of `wiki`, following `apcontinue` until the last
/// batch.
///
/// A failed request ends the listing early and the titles collected so far
/// are returned. A continuation token that was already followed also ends
/// it, so a server cycling through tokens cannot keep the loop alive.
pub async fn enumerate_titles(api: &dyn WikiApi, wiki: &WikiDescriptor) -> Vec<String> {
    let mut titles = Vec::new();
    let mut continue_token: Option<String> = None;
    let mut seen_tokens = HashSet::new();

    loop {
        let batch = match api.list_titles(wiki, continue_token.as_deref()).await {
            Ok(batch) => batch,
            Err(e) => {
                tracing::warn!(wiki = %wiki.key, collected = titles.len(), "page listing stopped early: {}", e);
                break;
            }
        };

        titles.extend(batch.titles);

        match batch.continue_token {
            Some(next) if !seen_tokens.insert(next.clone()) => {
                tracing::warn!(wiki = %wiki.key, token = %next, "page listing revisited a continuation token");
                break;
            }
            Some(next) => continue_token = Some(next),
            None => break,
        }
    }

    tracing::debug!(wiki = %wiki.key, count = titles.len(), "enumerated page titles");
    titles
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mediawiki::{RenderedPage, TitleBatch, WikiApiError};
    use async_trait::async_trait;
    use std::sync::Mutex;
    use wikicache_core::WikiKey;

    /// Replays a fixed sequence of listing results.
    struct ScriptedApi {
        batches: Mutex<Vec<Result<TitleBatch, WikiApiError>>>,
        tokens_seen: Mutex<Vec<Option<String>>>,
    }

    impl ScriptedApi {
        fn new(mut batches: Vec<Result<TitleBatch, WikiApiError>>) -> Self {
            batches.reverse();
            Self { batches: Mutex::new(batches), tokens_seen: Mutex::new(Vec::new()) }
        }
    }

    #[async_trait]
    impl WikiApi for ScriptedApi {
        async fn list_titles(
            &self, _wiki: &WikiDescriptor, continue_token: Option<&str>,
        ) -> Result<TitleBatch, WikiApiError> {
            self.tokens_seen.lock().unwrap().push(continue_token.map(String::from));
            self.batches.lock().unwrap().pop().unwrap_or(Err(WikiApiError::Timeout))
        }

        async fn render_page(
            &self, _wiki: &WikiDescriptor, _title: &str,
        ) -> Result<Option<RenderedPage>, WikiApiError> {
            Ok(None)
        }
    }

    fn batch(titles: &[&str], next: Option<&str>) -> Result<TitleBatch, WikiApiError> {
        Ok(TitleBatch {
            titles: titles.iter().map(|t| t.to_string()).collect(),
            continue_token: next.map(String::from),
        })
    }

    #[tokio::test]
    async fn test_follows_continuation() {
        let api = ScriptedApi::new(vec![batch(&["A", "B"], Some("C")), batch(&["C"], None)]);

        let titles = enumerate_titles(&api, &WikiKey::Sbor.descriptor()).await;

        assert_eq!(titles, vec!["A", "B", "C"]);
        assert_eq!(*api.tokens_seen.lock().unwrap(), vec![None, Some("C".to_string())]);
    }

    #[tokio::test]
    async fn test_partial_result_on_failure() {
        let api = ScriptedApi::new(vec![
            batch(&["A", "B"], Some("C")),
            Err(WikiApiError::HttpError { status: 502 }),
        ]);

        let titles = enumerate_titles(&api, &WikiKey::Sbor.descriptor()).await;

        assert_eq!(titles, vec!["A", "B"]);
    }

    #[tokio::test]
    async fn test_first_request_fails() {
        let api = ScriptedApi::new(vec![Err(WikiApiError::Timeout)]);
        assert!(enumerate_titles(&api, &WikiKey::BloxFruits.descriptor()).await.is_empty());
    }

    #[tokio::test]
    async fn test_repeated_token_stops() {
        let api = ScriptedApi::new(vec![
            batch(&["A"], Some("B")),
            batch(&["B"], Some("B")),
            batch(&["never"], None),
        ]);

        let titles = enumerate_titles(&api, &WikiKey::Sbor.descriptor()).await;

        assert_eq!(titles, vec!["A", "B"]);
        assert_eq!(api.tokens_seen.lock().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_token_cycle_stops() {
        let api = ScriptedApi::new(vec![
            batch(&["A"], Some("t1")),
            batch(&["B"], Some("t2")),
            batch(&["C"], Some("t1")),
            batch(&["never"], None),
        ]);

        let titles = enumerate_titles(&api, &WikiKey::Sbor.descriptor()).await;

        assert_eq!(titles, vec!["A", "B", "C"]);
        assert_eq!(
            *api.tokens_seen.lock().unwrap(),
            vec![None, Some("t1".to_string()), Some("t2".to_string())]
        );
    }
}
