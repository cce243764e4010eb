//! Plain-text extraction from rendered wiki HTML.
//!
//! ### Algorithm
//! - Parse the `action=parse` HTML as a fragment (html5ever via `scraper`).
//! - Drop every text node inside a `<script>` or `<style>` subtree.
//! - Concatenate the remaining text nodes in document order.
//! - Collapse whitespace runs to single spaces and trim the ends.

use scraper::Html;

/// Elements whose text never reaches the extracted content.
const SKIPPED_ELEMENTS: [&str; 2] = ["script", "style"];

/// Convert rendered page HTML to whitespace-normalized plain text.
pub fn html_to_text(html: &str) -> String {
    let fragment = Html::parse_fragment(html);

    let mut raw = String::with_capacity(html.len() / 2);
    for node in fragment.root_element().descendants() {
        let Some(text) = node.value().as_text() else {
            continue;
        };

        let hidden = node
            .ancestors()
            .any(|ancestor| ancestor.value().as_element().is_some_and(|el| SKIPPED_ELEMENTS.contains(&el.name())));
        if !hidden {
            raw.push_str(text);
        }
    }

    collapse_whitespace(&raw)
}

/// Replace every run of whitespace with one space, trimming both ends.
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
