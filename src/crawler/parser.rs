//! HTML parser for extracting links and scannable markup
//!
//! This module turns a fetched body into:
//! - every anchor link, resolved against the requesting page URL
//! - the serialized document markup, which the domain extractor scans
//!   (attributes included, so `mailto:` hrefs are seen)

use crate::url::resolve_link;
use once_cell::sync::Lazy;
use scraper::{Html, Selector};
use thiserror::Error;
use url::Url;

static ANCHOR_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("a[href]").expect("anchor selector is valid"));

/// Content-Type prefixes that are never markup
const BINARY_CONTENT_TYPES: &[&str] = &[
    "image/",
    "audio/",
    "video/",
    "font/",
    "application/octet-stream",
    "application/pdf",
    "application/zip",
];

/// Returns true if a Content-Type value names a non-markup payload
pub fn is_binary_content_type(content_type: &str) -> bool {
    let lowered = content_type.to_ascii_lowercase();
    BINARY_CONTENT_TYPES
        .iter()
        .any(|prefix| lowered.starts_with(prefix))
}

/// Extracted information from an HTML page
#[derive(Debug, Clone)]
pub struct ParsedPage {
    /// Absolute http(s) links found in `<a href>` elements, fragments stripped
    pub links: Vec<Url>,

    /// Serialized document markup
    pub markup: String,
}

/// Why a body could not be parsed
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("body is not valid UTF-8: {0}")]
    Encoding(String),

    #[error("content type {0} is not markup")]
    Binary(String),
}

/// Parses a fetched body and extracts links and markup
///
/// The body must decode as UTF-8 (a leading BOM is accepted). Bodies
/// declared with a binary Content-Type are rejected without decoding.
///
/// # Example
///
/// ```
/// use mailhost_harvest::crawler::parse_html;
/// use url::Url;
///
/// let html = br#"<html><body><a href="/a#x">A</a> foo@bar.test</body></html>"#;
/// let page_url = Url::parse("http://ex.test/").unwrap();
/// let parsed = parse_html(html, Some("text/html"), &page_url).unwrap();
/// assert_eq!(parsed.links[0].as_str(), "http://ex.test/a");
/// assert!(parsed.markup.contains("foo@bar.test"));
/// ```
pub fn parse_html(
    body: &[u8],
    content_type: Option<&str>,
    page_url: &Url,
) -> Result<ParsedPage, ParseError> {
    if let Some(content_type) = content_type.filter(|ct| is_binary_content_type(ct)) {
        return Err(ParseError::Binary(content_type.to_string()));
    }

    let body = body.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(body);
    let text = std::str::from_utf8(body).map_err(|e| ParseError::Encoding(e.to_string()))?;

    let document = Html::parse_document(text);
    let links = extract_links(&document, page_url);
    let markup = document.root_element().html();

    Ok(ParsedPage { links, markup })
}

/// Extracts all anchor links from the document
fn extract_links(document: &Html, page_url: &Url) -> Vec<Url> {
    document
        .select(&ANCHOR_SELECTOR)
        .filter_map(|element| element.value().attr("href"))
        .filter_map(|href| resolve_link(page_url, href))
        .collect()
}
