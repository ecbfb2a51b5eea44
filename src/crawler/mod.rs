//! Page fetching and HTML link extraction
//!
//! This module contains the two leaf components of the pipeline:
//! - The `Fetcher` capability and its reqwest-backed `HttpFetcher`
//! - HTML parsing: anchor extraction, internal/external classification, and
//!   page metadata

mod fetcher;
mod parser;

pub use fetcher::{
    build_http_client, FetchError, Fetcher, HttpFetcher, PageData, ACCEPT_HTML,
    ACCEPT_LANGUAGE_VALUE,
};
pub(crate) use parser::extract_link_urls;
pub use parser::{extract_links, extract_metadata, extract_title, PageMetadata, RawLink};
