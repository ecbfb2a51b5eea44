//! Ingestion orchestrator - the fetch -> extract -> dedupe -> discover pipeline
//!
//! Every step runs sequentially: one page fetch, then one aggregator call per
//! unique link, each awaited before the next begins.

use crate::backlinks::BacklinkAggregator;
use crate::config::Config;
use crate::crawler::{extract_links, extract_metadata, Fetcher, HttpFetcher, RawLink};
use crate::ingest::dedupe::dedupe_links;
use crate::model::{Backlink, IngestionJob, IngestionResult, Link, LinkType, PageSummary};
use crate::IngestError;
use std::sync::Arc;
use url::Url;

/// Error message recorded on a job whose source page could not be fetched
pub const FETCH_FAILURE_MESSAGE: &str = "Failed to fetch page";

/// Runs ingestions and page summaries
///
/// An `Ingestor` holds no per-request state, so one instance can serve
/// concurrent ingestions; every backlink crawl gets its own visited set.
#[derive(Clone)]
pub struct Ingestor {
    fetcher: Arc<dyn Fetcher>,
    aggregator: BacklinkAggregator,
    max_backlinks_per_link: usize,
}

impl Ingestor {
    /// Creates an ingestor from explicit parts
    pub fn new(
        fetcher: Arc<dyn Fetcher>,
        aggregator: BacklinkAggregator,
        max_backlinks_per_link: usize,
    ) -> Self {
        Self {
            fetcher,
            aggregator,
            max_backlinks_per_link,
        }
    }

    /// Creates an ingestor with the HTTP fetcher and default provider chain
    ///
    /// # Arguments
    ///
    /// * `config` - A validated configuration
    ///
    /// # Returns
    ///
    /// * `Ok(Ingestor)` - Ready to ingest
    /// * `Err(IngestError)` - The HTTP clients could not be built
    pub fn from_config(config: &Config) -> Result<Self, IngestError> {
        let fetcher: Arc<dyn Fetcher> = Arc::new(HttpFetcher::new(&config.http)?);
        Self::with_fetcher(config, fetcher)
    }

    /// Creates an ingestor with the default provider chain over any page source
    pub fn with_fetcher(config: &Config, fetcher: Arc<dyn Fetcher>) -> Result<Self, IngestError> {
        let aggregator = BacklinkAggregator::from_config(config, fetcher.clone())?;
        Ok(Self::new(
            fetcher,
            aggregator,
            config.backlinks.max_per_link,
        ))
    }

    pub fn aggregator(&self) -> &BacklinkAggregator {
        &self.aggregator
    }

    /// Ingests a page: extracts its links and discovers backlinks for each
    ///
    /// Always returns a well-formed result. Failures are reported through the
    /// job's status and error message, with empty link/backlink lists.
    pub async fn ingest(&self, url: &str) -> IngestionResult {
        let mut job = IngestionJob::new(url);
        tracing::info!("Starting ingestion of {} (job {})", url, job.id);
        job.start();

        let page = match self.fetcher.fetch(url).await {
            Ok(page) => page,
            Err(e) => {
                tracing::warn!("Ingestion of {} failed: {}", url, e);
                job.fail(FETCH_FAILURE_MESSAGE);
                return IngestionResult::empty(job);
            }
        };

        match self.discover(url, &page.content).await {
            Ok((links, backlinks)) => {
                job.complete(links.len(), backlinks.len());
                tracing::info!(
                    "Ingestion of {} completed: {} links, {} backlinks",
                    url,
                    links.len(),
                    backlinks.len()
                );
                IngestionResult::new(job, links, backlinks)
            }
            Err(e) => {
                tracing::error!("Error during ingestion of {}: {}", url, e);
                job.fail(e.to_string());
                IngestionResult::empty(job)
            }
        }
    }

    /// Extraction, deduplication and per-link backlink discovery
    async fn discover(
        &self,
        url: &str,
        content: &str,
    ) -> Result<(Vec<Link>, Vec<Backlink>), IngestError> {
        let base = Url::parse(url)?;

        let raw_links = extract_links(content, &base);
        tracing::info!("Extracted {} raw links from {}", raw_links.len(), url);

        let links = dedupe_links(
            raw_links
                .into_iter()
                .map(|raw| to_link(raw, url))
                .collect(),
        );

        let mut backlinks = Vec::new();
        for link in &links {
            let found = self
                .aggregator
                .aggregate(&link.url, self.max_backlinks_per_link)
                .await;
            backlinks.extend(found);
        }

        Ok((links, backlinks))
    }

    /// Fetches and parses a page without backlink discovery
    ///
    /// # Returns
    ///
    /// * `Ok(PageSummary)` - Link counts, metadata, status and content type
    /// * `Err(IngestError)` - The page could not be fetched
    pub async fn summarize(&self, url: &str) -> Result<PageSummary, IngestError> {
        let page = self.fetcher.fetch(url).await?;
        let base = Url::parse(url)?;

        let raw_links = extract_links(&page.content, &base);
        let metadata = extract_metadata(&page.content);
        let external_links = raw_links.iter().filter(|l| l.is_external).count();

        Ok(PageSummary {
            url: url.to_string(),
            title: metadata.title,
            description: metadata.description,
            keywords: metadata.keywords,
            canonical_url: metadata.canonical_url,
            total_links_found: raw_links.len(),
            external_links,
            internal_links: raw_links.len() - external_links,
            content_type: page.content_type,
            status_code: page.status_code,
        })
    }
}

fn to_link(raw: RawLink, source_url: &str) -> Link {
    let link_type = if raw.is_external {
        LinkType::External
    } else {
        LinkType::Internal
    };

    Link::new(raw.url, source_url)
        .with_title(raw.title)
        .with_link_text(raw.link_text)
        .with_domain(raw.domain)
        .with_link_type(link_type)
}
