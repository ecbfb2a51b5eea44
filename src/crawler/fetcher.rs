//! HTTP fetcher implementation
//!
//! This module handles all page requests, including:
//! - Building the HTTP client with the fixed header set and timeout
//! - A single GET per call (no retry), following redirects
//! - Classifying failures into `FetchError`

use crate::config::HttpConfig;
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, CONTENT_TYPE};
use reqwest::{redirect::Policy, Client};
use std::collections::HashMap;
use std::time::Duration;
use thiserror::Error;

/// Accept header sent with every page request
pub const ACCEPT_HTML: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8";

/// Accept-Language header sent with every page request
pub const ACCEPT_LANGUAGE_VALUE: &str = "en-US,en;q=0.5";

/// Maximum number of redirect hops followed before giving up
const MAX_REDIRECTS: usize = 10;

/// A successfully fetched page
#[derive(Debug, Clone)]
pub struct PageData {
    /// The URL that was requested
    pub url: String,
    /// Final URL after redirects
    pub final_url: String,
    pub status_code: u16,
    /// Page body decoded as text
    pub content: String,
    /// Content-Type header value (empty when absent)
    pub content_type: String,
    pub headers: HashMap<String, String>,
}

/// Reasons a page fetch failed
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP {status_code} for {url}")]
    Status { url: String, status_code: u16 },

    #[error("Request timeout for {url}")]
    Timeout { url: String },

    #[error("Connection failed for {url}: {message}")]
    Connect { url: String, message: String },

    #[error("Request failed for {url}: {source}")]
    Transport { url: String, source: reqwest::Error },

    #[error("Invalid URL: {url}")]
    InvalidUrl { url: String },
}

impl FetchError {
    /// Classifies a reqwest error raised while requesting `url`
    fn from_reqwest(url: &str, error: reqwest::Error) -> Self {
        if error.is_timeout() {
            FetchError::Timeout {
                url: url.to_string(),
            }
        } else if error.is_connect() {
            FetchError::Connect {
                url: url.to_string(),
                message: error.to_string(),
            }
        } else if error.is_builder() {
            FetchError::InvalidUrl {
                url: url.to_string(),
            }
        } else {
            FetchError::Transport {
                url: url.to_string(),
                source: error,
            }
        }
    }
}

/// Page-fetch capability
///
/// The crawler and orchestrator depend on this trait rather than on a concrete
/// client, so any page source can drive them.
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Performs a single GET of `url`
    ///
    /// Any non-2xx final status, transport error, or timeout is a `FetchError`.
    async fn fetch(&self, url: &str) -> Result<PageData, FetchError>;
}

/// Builds an HTTP client with the fixed header set
///
/// # Arguments
///
/// * `config` - The HTTP configuration (timeout and user agent)
///
/// # Example
///
/// ```no_run
/// use link_ingestor::config::HttpConfig;
/// use link_ingestor::crawler::build_http_client;
///
/// let client = build_http_client(&HttpConfig::default()).unwrap();
/// ```
pub fn build_http_client(config: &HttpConfig) -> Result<Client, reqwest::Error> {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static(ACCEPT_HTML));
    headers.insert(
        ACCEPT_LANGUAGE,
        HeaderValue::from_static(ACCEPT_LANGUAGE_VALUE),
    );

    Client::builder()
        .user_agent(config.user_agent.clone())
        .default_headers(headers)
        .timeout(Duration::from_secs(config.timeout_secs))
        .redirect(Policy::limited(MAX_REDIRECTS))
        .gzip(true)
        .brotli(true)
        .build()
}

/// `Fetcher` backed by a reqwest client
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Creates a fetcher from the HTTP configuration
    pub fn new(config: &HttpConfig) -> Result<Self, reqwest::Error> {
        Ok(Self {
            client: build_http_client(config)?,
        })
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<PageData, FetchError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| FetchError::from_reqwest(url, e))?;

        let status = response.status();
        let final_url = response.url().to_string();

        if !status.is_success() {
            tracing::warn!("HTTP {} fetching {}", status.as_u16(), url);
            return Err(FetchError::Status {
                url: url.to_string(),
                status_code: status.as_u16(),
            });
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
            .to_string();

        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.as_str().to_string(), v.to_string()))
            })
            .collect();

        let content = response
            .text()
            .await
            .map_err(|e| FetchError::from_reqwest(url, e))?;

        tracing::debug!("Fetched {} ({} bytes)", final_url, content.len());

        Ok(PageData {
            url: url.to_string(),
            final_url,
            status_code: status.as_u16(),
            content,
            content_type,
            headers,
        })
    }
}
