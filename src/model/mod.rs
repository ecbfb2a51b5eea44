//! Records produced by an ingestion
//!
//! - `Link`: an outbound reference extracted from the source page
//! - `Backlink`: a page discovered to reference one of those links
//! - `IngestionJob` / `JobStatus`: the job record and its state machine
//! - `IngestionResult` / `PageSummary`: what the orchestrator hands back
//!
//! All records are plain data (`serde`-serializable) so persistence and
//! request-handling layers can store or render them as they see fit.

mod backlink;
mod job;
mod link;

pub use backlink::Backlink;
pub use job::{IngestionJob, JobStatus};
pub use link::{Link, LinkType};

use serde::{Deserialize, Serialize};

/// Everything produced by one `ingest` call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IngestionResult {
    pub job: IngestionJob,
    /// Unique links, in first-seen order
    pub links: Vec<Link>,
    /// Backlinks for all links, concatenated in link order
    pub backlinks: Vec<Backlink>,
    pub total_links: usize,
    pub total_backlinks: usize,
}

impl IngestionResult {
    /// Builds a result whose counts match its lists
    pub fn new(job: IngestionJob, links: Vec<Link>, backlinks: Vec<Backlink>) -> Self {
        let total_links = links.len();
        let total_backlinks = backlinks.len();
        Self {
            job,
            links,
            backlinks,
            total_links,
            total_backlinks,
        }
    }

    /// Builds an empty result around a (failed) job
    pub fn empty(job: IngestionJob) -> Self {
        Self::new(job, Vec::new(), Vec::new())
    }

    pub fn external_links(&self) -> impl Iterator<Item = &Link> {
        self.links.iter().filter(|link| link.is_external())
    }

    pub fn internal_links(&self) -> impl Iterator<Item = &Link> {
        self.links.iter().filter(|link| !link.is_external())
    }
}

/// Page overview returned by `summarize` (no backlink discovery)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageSummary {
    pub url: String,
    pub title: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keywords: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub canonical_url: Option<String>,
    /// Number of extracted anchors, duplicates included
    pub total_links_found: usize,
    pub external_links: usize,
    pub internal_links: usize,
    pub content_type: String,
    pub status_code: u16,
}
