//! Backlink discovery
//!
//! This module contains:
//! - The `BacklinkProvider` trait every discovery strategy implements
//! - `SearchBacklinkProvider`: external web search API (needs a credential)
//! - `InDomainBacklinkProvider`: bounded crawl of the link's own domain
//! - `BacklinkAggregator`: priority-ordered merge under a hard cap

mod aggregator;
mod in_domain;
mod provider;
mod search;

pub use aggregator::{BacklinkAggregator, BacklinkSummary};
pub use in_domain::{InDomainBacklinkProvider, IN_DOMAIN_PROVIDER_NAME};
pub use provider::{BacklinkProvider, ProviderError, ProviderResult};
pub use search::{SearchBacklinkProvider, SEARCH_PROVIDER_NAME};
