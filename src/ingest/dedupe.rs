use crate::model::Link;
use std::collections::HashSet;

/// Collapses links to the first occurrence of each URL, preserving order
///
/// URLs are compared as exact strings; no normalization is applied.
pub fn dedupe_links(links: Vec<Link>) -> Vec<Link> {
    let mut seen = HashSet::new();
    links
        .into_iter()
        .filter(|link| seen.insert(link.url.clone()))
        .collect()
}
