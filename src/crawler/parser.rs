//! HTML parser for extracting links and metadata
//!
//! This module handles parsing HTML content to extract:
//! - Every `<a href>` anchor, resolved against a base URL and classified as
//!   internal or external
//! - Page metadata (title, description, keywords, canonical URL)
//!
//! Parsing is permissive: malformed markup never fails, missing elements
//! simply produce empty values.

use crate::url::extract_domain;
use scraper::{ElementRef, Html, Selector};
use serde::{Deserialize, Serialize};
use url::Url;

/// A link as found in the markup, before it becomes a `Link` record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawLink {
    /// Absolute URL after resolution against the base URL
    pub url: String,
    /// The anchor's `title` attribute (empty when absent)
    pub title: String,
    /// Whitespace-trimmed anchor text
    pub link_text: String,
    /// Domain of the resolved URL
    pub domain: String,
    /// True when `domain` differs from the base URL's domain
    pub is_external: bool,
}

/// Page-level metadata
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageMetadata {
    /// `<title>` text, empty when absent
    pub title: String,
    /// `<meta name="description">`, falling back to `og:description`
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keywords: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub canonical_url: Option<String>,
}

/// Extracts every resolvable anchor from the HTML
///
/// Each `href` is resolved with standard URL-join rules (relative paths,
/// protocol-relative and fragment references, query strings preserved).
/// Anchors whose href does not resolve to a URL with a host are skipped, which
/// drops `mailto:`, `javascript:`, `tel:` and `data:` links.
///
/// # Arguments
///
/// * `html` - The HTML content to parse
/// * `base_url` - The base URL for resolving relative links
///
/// # Example
///
/// ```
/// use link_ingestor::crawler::extract_links;
/// use url::Url;
///
/// let html = r#"<a href="/x">X</a><a href="http://b.test/y">Y</a>"#;
/// let base = Url::parse("http://a.test/").unwrap();
/// let links = extract_links(html, &base);
/// assert_eq!(links[0].url, "http://a.test/x");
/// assert!(!links[0].is_external);
/// assert!(links[1].is_external);
/// ```
pub fn extract_links(html: &str, base_url: &Url) -> Vec<RawLink> {
    let document = Html::parse_document(html);
    let base_domain = extract_domain(base_url).unwrap_or_default();

    let Ok(a_selector) = Selector::parse("a[href]") else {
        return Vec::new();
    };

    document
        .select(&a_selector)
        .filter_map(|element| {
            let href = element.value().attr("href")?;
            let resolved = resolve_link(href, base_url)?;
            let domain = extract_domain(&resolved)?;

            Some(RawLink {
                url: resolved.to_string(),
                title: element.value().attr("title").unwrap_or("").to_string(),
                link_text: element_text(&element),
                is_external: domain != base_domain,
                domain,
            })
        })
        .collect()
}

/// Resolves every anchor's href against the base URL, in page order
///
/// Same filtering as `extract_links`, without collecting anchor text or
/// classifying the result.
pub(crate) fn extract_link_urls(html: &str, base_url: &Url) -> Vec<Url> {
    let document = Html::parse_document(html);
    let Ok(a_selector) = Selector::parse("a[href]") else {
        return Vec::new();
    };

    document
        .select(&a_selector)
        .filter_map(|element| resolve_link(element.value().attr("href")?, base_url))
        .collect()
}

/// Resolves an href against the base URL
///
/// Returns None when the href cannot be joined or the result has no host.
fn resolve_link(href: &str, base_url: &Url) -> Option<Url> {
    let resolved = base_url.join(href.trim()).ok()?;
    resolved.host_str().filter(|h| !h.is_empty())?;
    Some(resolved)
}

/// Extracts the page title, or an empty string when there is none
pub fn extract_title(html: &str) -> String {
    title_of(&Html::parse_document(html))
}

fn title_of(document: &Html) -> String {
    Selector::parse("title")
        .ok()
        .and_then(|selector| document.select(&selector).next().map(|e| element_text(&e)))
        .unwrap_or_default()
}

/// Extracts page metadata
///
/// Title and description default to empty strings; keywords and canonical URL
/// are `None` when the page does not declare them.
pub fn extract_metadata(html: &str) -> PageMetadata {
    let document = Html::parse_document(html);

    let description = meta_content(&document, r#"meta[name="description"]"#)
        .or_else(|| meta_content(&document, r#"meta[property="og:description"]"#))
        .unwrap_or_default();

    let canonical_url = Selector::parse(r#"link[rel="canonical"][href]"#)
        .ok()
        .and_then(|selector| {
            document
                .select(&selector)
                .next()
                .and_then(|e| e.value().attr("href"))
                .map(|href| href.trim().to_string())
        })
        .filter(|href| !href.is_empty());

    PageMetadata {
        title: title_of(&document),
        description,
        keywords: meta_content(&document, r#"meta[name="keywords"]"#),
        canonical_url,
    }
}

/// Returns the non-empty `content` attribute of the first element matching `selector`
fn meta_content(document: &Html, selector: &str) -> Option<String> {
    let selector = Selector::parse(selector).ok()?;
    document
        .select(&selector)
        .next()
        .and_then(|e| e.value().attr("content"))
        .filter(|content| !content.is_empty())
        .map(|content| content.to_string())
}

/// Concatenated text of an element, with surrounding whitespace trimmed
fn element_text(element: &ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}
