//! Link Ingestor: outbound link extraction and backlink discovery
//!
//! This crate fetches a single web page, extracts and classifies every outbound
//! hyperlink, and then asks a chain of backlink providers for pages that
//! reference each extracted link.

pub mod backlinks;
pub mod config;
pub mod crawler;
pub mod ingest;
pub mod model;
pub mod output;
pub mod url;

#[cfg(test)]
pub(crate) mod testing;

use thiserror::Error;

/// Main error type for ingestion operations
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("Fetch error: {0}")]
    Fetch(#[from] crawler::FetchError),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] ::url::ParseError),

    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),

    #[error("Invalid value for environment variable {name}: {value}")]
    Env { name: String, value: String },
}

/// Result type alias for ingestion operations
pub type Result<T> = std::result::Result<T, IngestError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use backlinks::{BacklinkAggregator, BacklinkProvider};
pub use config::Config;
pub use ingest::Ingestor;
pub use model::{Backlink, IngestionJob, IngestionResult, JobStatus, Link, LinkType, PageSummary};
pub use url::extract_domain;
