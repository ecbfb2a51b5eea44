//! Ingestion orchestration
//!
//! `Ingestor::ingest` runs the whole pipeline for one page and
//! `Ingestor::summarize` reports on a page without backlink discovery.

mod dedupe;
mod orchestrator;

pub use dedupe::dedupe_links;
pub use orchestrator::{Ingestor, FETCH_FAILURE_MESSAGE};
