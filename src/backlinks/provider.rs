//! Backlink provider trait and error types

use crate::model::Backlink;
use async_trait::async_trait;
use thiserror::Error;

/// Errors a provider can report instead of an empty result
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("Provider {provider} is not available")]
    Unavailable { provider: &'static str },

    #[error("{provider} request failed: {source}")]
    Http {
        provider: &'static str,
        source: reqwest::Error,
    },

    #[error("{provider} returned HTTP {status_code}")]
    Status {
        provider: &'static str,
        status_code: u16,
    },

    #[error("{provider} response could not be decoded: {message}")]
    Decode {
        provider: &'static str,
        message: String,
    },
}

/// Result type for provider queries
pub type ProviderResult<T> = Result<T, ProviderError>;

/// A pluggable backlink-discovery strategy
///
/// Providers are queried in priority order by the `BacklinkAggregator`.
/// `Ok(vec![])` means the provider looked and found nothing; `Err` means the
/// discovery itself failed.
#[async_trait]
pub trait BacklinkProvider: Send + Sync {
    /// Stable identifier used in logs and reports
    fn name(&self) -> &'static str;

    /// Returns false when the provider must be skipped without being queried
    fn is_available(&self) -> bool;

    /// Returns at most `limit` pages believed to reference `url`
    async fn get_backlinks(&self, url: &str, limit: usize) -> ProviderResult<Vec<Backlink>>;
}
