//! MediaWiki API response types.
//!
//! Only the fields this crate reads are modelled; everything else in the
//! response is ignored.

use serde::Deserialize;

/// `action=query&list=allpages` response.
#[derive(Debug, Default, Deserialize)]
pub struct AllPagesResponse {
    #[serde(default)]
    pub query: AllPagesQuery,
    #[serde(default, rename = "continue")]
    pub continuation: Option<Continuation>,
    #[serde(default)]
    pub error: Option<ApiErrorInfo>,
}

#[derive(Debug, Default, Deserialize)]
pub struct AllPagesQuery {
    #[serde(default)]
    pub allpages: Vec<AllPagesEntry>,
}

#[derive(Debug, Deserialize)]
pub struct AllPagesEntry {
    pub title: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct Continuation {
    pub apcontinue: Option<String>,
}

/// `error` object returned with HTTP 200 for failed API calls.
#[derive(Debug, Default, Deserialize)]
pub struct ApiErrorInfo {
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub info: String,
}

/// `action=parse` response.
#[derive(Debug, Default, Deserialize)]
pub struct ParseResponse {
    #[serde(default)]
    pub parse: Option<ParsePayload>,
    #[serde(default)]
    pub error: Option<ApiErrorInfo>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ParsePayload {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub text: Option<ParseText>,
    #[serde(default)]
    pub images: Vec<String>,
}

/// Rendered HTML, in either response format version.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum ParseText {
    /// `formatversion=2`: `"text": "<div>..."`.
    Plain(String),
    /// `formatversion=1`: `"text": {"*": "<div>..."}`.
    Wrapped {
        #[serde(rename = "*")]
        html: String,
    },
}

impl ParseText {
    pub fn into_html(self) -> String {
        match self {
            ParseText::Plain(html) | ParseText::Wrapped { html } => html,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALLPAGES_FIXTURE: &str = r#"{
        "batchcomplete": "",
        "continue": { "apcontinue": "Dragon_Fruit", "continue": "-||" },
        "query": {
            "allpages": [
                { "pageid": 1, "ns": 0, "title": "Buddha Fruit" },
                { "pageid": 2, "ns": 0, "title": "Dough Fruit" }
            ]
        }
    }"#;

    const PARSE_FIXTURE_V1: &str = r#"{
        "parse": {
            "title": "Leopard Fruit",
            "pageid": 7,
            "text": { "*": "<div class=\"mw-parser-output\"><p>A rare fruit</p></div>" },
            "images": ["Leopard.png", "Leopard_Icon.png"]
        }
    }"#;

    #[test]
    fn test_deserialize_allpages() {
        let response: AllPagesResponse = serde_json::from_str(ALLPAGES_FIXTURE).unwrap();
        let titles: Vec<&str> = response.query.allpages.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, vec!["Buddha Fruit", "Dough Fruit"]);
        assert_eq!(response.continuation.unwrap().apcontinue.as_deref(), Some("Dragon_Fruit"));
    }

    #[test]
    fn test_deserialize_allpages_last_batch() {
        let response: AllPagesResponse =
            serde_json::from_str(r#"{"batchcomplete":"","query":{"allpages":[]}}"#).unwrap();
        assert!(response.query.allpages.is_empty());
        assert!(response.continuation.is_none());
        assert!(response.error.is_none());
    }

    #[test]
    fn test_deserialize_parse_v1() {
        let response: ParseResponse = serde_json::from_str(PARSE_FIXTURE_V1).unwrap();
        let parse = response.parse.unwrap();
        assert_eq!(parse.title.as_deref(), Some("Leopard Fruit"));
        assert_eq!(parse.images.len(), 2);
        assert!(parse.text.unwrap().into_html().contains("A rare fruit"));
    }

    #[test]
    fn test_deserialize_parse_v2() {
        let json = r#"{"parse":{"title":"Raids","text":"<p>Raid bosses</p>","images":[]}}"#;
        let response: ParseResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.parse.unwrap().text.unwrap().into_html(), "<p>Raid bosses</p>");
    }

    #[test]
    fn test_deserialize_missing_title_error() {
        let json = r#"{"error":{"code":"missingtitle","info":"The page you specified doesn't exist."}}"#;
        let response: ParseResponse = serde_json::from_str(json).unwrap();
        assert!(response.parse.is_none());
        assert_eq!(response.error.unwrap().code, "missingtitle");
    }
}
