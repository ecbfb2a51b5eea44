//! Multi-provider backlink aggregation
//!
//! Providers are queried one at a time in priority order. Each is asked only
//! for the backlinks still missing, results are deduplicated by exact
//! `backlink_url`, and iteration stops once the limit is met.

use crate::backlinks::in_domain::InDomainBacklinkProvider;
use crate::backlinks::provider::BacklinkProvider;
use crate::backlinks::search::{SearchBacklinkProvider, SEARCH_PROVIDER_NAME};
use crate::config::Config;
use crate::crawler::Fetcher;
use crate::model::Backlink;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::Arc;

/// Number of backlinks sampled by `backlink_summary`
const SUMMARY_SAMPLE_SIZE: usize = 5;

/// Quick overview of backlink discovery for one URL
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BacklinkSummary {
    pub url: String,
    pub sample_backlinks_count: usize,
    pub providers_available: usize,
    pub has_search_provider: bool,
}

/// Queries backlink providers in priority order under a hard cap
#[derive(Clone)]
pub struct BacklinkAggregator {
    providers: Vec<Arc<dyn BacklinkProvider>>,
}

impl BacklinkAggregator {
    /// Creates an aggregator over providers listed in priority order
    pub fn new(providers: Vec<Arc<dyn BacklinkProvider>>) -> Self {
        Self { providers }
    }

    /// Builds the default provider chain
    ///
    /// The external search provider comes first when a credential is
    /// configured; the in-domain crawler is always last as the fallback.
    pub fn from_config(config: &Config, fetcher: Arc<dyn Fetcher>) -> Result<Self, reqwest::Error> {
        let mut providers: Vec<Arc<dyn BacklinkProvider>> = Vec::new();

        if config.search.credential().is_some() {
            providers.push(Arc::new(SearchBacklinkProvider::new(
                &config.search,
                &config.http,
            )?));
        }

        providers.push(Arc::new(InDomainBacklinkProvider::new(
            fetcher,
            config.crawler,
        )));

        tracing::debug!(
            "Backlink providers: {}",
            providers
                .iter()
                .map(|p| p.name())
                .collect::<Vec<_>>()
                .join(", ")
        );

        Ok(Self::new(providers))
    }

    /// Names of the configured providers, in query order
    pub fn provider_names(&self) -> Vec<&'static str> {
        self.providers.iter().map(|p| p.name()).collect()
    }

    /// Collects at most `limit` backlinks for `url`
    ///
    /// A provider that fails is logged and skipped; it never aborts the
    /// aggregation.
    pub async fn aggregate(&self, url: &str, limit: usize) -> Vec<Backlink> {
        tracing::debug!("Fetching backlinks for {} (limit {})", url, limit);

        let mut collected: Vec<Backlink> = Vec::new();
        let mut seen: HashSet<String> = HashSet::new();

        for provider in &self.providers {
            if collected.len() >= limit {
                break;
            }

            if !provider.is_available() {
                tracing::debug!("Skipping unavailable provider {}", provider.name());
                continue;
            }

            let remaining = limit - collected.len();
            let backlinks = match provider.get_backlinks(url, remaining).await {
                Ok(backlinks) => backlinks,
                Err(e) => {
                    tracing::warn!("Provider {} failed for {}: {}", provider.name(), url, e);
                    continue;
                }
            };

            tracing::debug!(
                "Provider {} returned {} backlinks for {}",
                provider.name(),
                backlinks.len(),
                url
            );

            for backlink in backlinks {
                if collected.len() >= limit {
                    break;
                }
                if seen.insert(backlink.backlink_url.clone()) {
                    collected.push(backlink);
                }
            }
        }

        collected.truncate(limit);
        tracing::info!(
            "Found {} backlinks for {} (requested {})",
            collected.len(),
            url,
            limit
        );
        collected
    }

    /// Samples a few backlinks and reports which providers are usable
    pub async fn backlink_summary(&self, url: &str) -> BacklinkSummary {
        let sample = self.aggregate(url, SUMMARY_SAMPLE_SIZE).await;

        BacklinkSummary {
            url: url.to_string(),
            sample_backlinks_count: sample.len(),
            providers_available: self.providers.iter().filter(|p| p.is_available()).count(),
            has_search_provider: self
                .providers
                .iter()
                .any(|p| p.name() == SEARCH_PROVIDER_NAME && p.is_available()),
        }
    }
}
