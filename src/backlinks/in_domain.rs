//! Backlink discovery by crawling the link's own domain
//!
//! Starting at the domain root, the crawler walks same-domain pages depth-first
//! and reports every page whose raw HTML contains the target URL as a literal
//! substring. Matching is deliberately loose: an occurrence in text, a script,
//! or a comment counts, and a relative or differently-encoded link does not.
//!
//! # Traversal
//!
//! | Rule | Value |
//! |------|-------|
//! | Start | `scheme://domain/` of the target, depth 0 |
//! | Depth limit | pages deeper than `max-depth` are never fetched |
//! | Visit budget | at most `max-visited` fetches per session |
//! | Fan-out | first `max-links-per-page` same-domain links, in page order |
//! | Order | depth-first, children in page order |
//! | Stop | as soon as `limit` backlinks are found |

use crate::backlinks::provider::{BacklinkProvider, ProviderResult};
use crate::config::CrawlerConfig;
use crate::crawler::{extract_link_urls, extract_title, Fetcher};
use crate::model::Backlink;
use crate::url::{extract_domain, site_root};
use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::Arc;
use url::Url;

/// Identifier reported by the in-domain provider
pub const IN_DOMAIN_PROVIDER_NAME: &str = "in_domain_search";

/// Provider that crawls the target's own domain; always available
pub struct InDomainBacklinkProvider {
    fetcher: Arc<dyn Fetcher>,
    limits: CrawlerConfig,
}

impl InDomainBacklinkProvider {
    pub fn new(fetcher: Arc<dyn Fetcher>, limits: CrawlerConfig) -> Self {
        Self { fetcher, limits }
    }
}

#[async_trait]
impl BacklinkProvider for InDomainBacklinkProvider {
    fn name(&self) -> &'static str {
        IN_DOMAIN_PROVIDER_NAME
    }

    fn is_available(&self) -> bool {
        true
    }

    async fn get_backlinks(&self, url: &str, limit: usize) -> ProviderResult<Vec<Backlink>> {
        if limit == 0 {
            return Ok(Vec::new());
        }

        let Ok(target) = Url::parse(url) else {
            tracing::debug!("Skipping in-domain search for unparseable URL {}", url);
            return Ok(Vec::new());
        };
        let (Some(domain), Some(root)) = (extract_domain(&target), site_root(&target)) else {
            return Ok(Vec::new());
        };

        tracing::info!("Starting in-domain backlink search for {} on {}", url, domain);

        let session = CrawlSession::new(url, domain, self.limits);
        let mut backlinks = session.run(self.fetcher.as_ref(), root, limit).await;
        backlinks.truncate(limit);

        tracing::info!("In-domain provider found {} backlinks for {}", backlinks.len(), url);
        Ok(backlinks)
    }
}

/// State of one crawl; created per `get_backlinks` call and never shared
struct CrawlSession {
    target_url: String,
    domain: String,
    limits: CrawlerConfig,
    visited: HashSet<Url>,
    /// Pending `(url, depth)` pairs; the last entry is crawled next
    stack: Vec<(Url, u32)>,
    found: Vec<Backlink>,
}

impl CrawlSession {
    fn new(target_url: &str, domain: String, limits: CrawlerConfig) -> Self {
        Self {
            target_url: target_url.to_string(),
            domain,
            limits,
            visited: HashSet::new(),
            stack: Vec::new(),
            found: Vec::new(),
        }
    }

    async fn run(mut self, fetcher: &dyn Fetcher, root: Url, limit: usize) -> Vec<Backlink> {
        self.stack.push((root, 0));

        while let Some((url, depth)) = self.stack.pop() {
            if self.visited.len() >= self.limits.max_visited {
                tracing::debug!("Visit budget of {} exhausted", self.limits.max_visited);
                break;
            }
            if depth > self.limits.max_depth || self.visited.contains(&url) {
                continue;
            }
            self.visited.insert(url.clone());

            let page = match fetcher.fetch(url.as_str()).await {
                Ok(page) => page,
                Err(e) => {
                    tracing::debug!("Skipping branch at {}: {}", url, e);
                    continue;
                }
            };

            if page.content.contains(&self.target_url) {
                tracing::debug!("{} references {}", url, self.target_url);
                self.found.push(Backlink::new(
                    url.as_str(),
                    extract_title(&page.content),
                    self.domain.clone(),
                    format!("Found link to {}", self.target_url),
                ));
                if self.found.len() >= limit {
                    break;
                }
            }

            if depth < self.limits.max_depth {
                self.push_children(&url, &page.content, depth + 1);
            }
        }

        self.found
    }

    /// Queues the first same-domain links of a page so they pop in page order
    fn push_children(&mut self, base: &Url, content: &str, depth: u32) {
        let children: Vec<Url> = extract_link_urls(content, base)
            .into_iter()
            .filter(|link| extract_domain(link).as_deref() == Some(self.domain.as_str()))
            .take(self.limits.max_links_per_page)
            .collect();

        self.stack
            .extend(children.into_iter().rev().map(|child| (child, depth)));
    }
}
