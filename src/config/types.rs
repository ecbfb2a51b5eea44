use serde::{Deserialize, Serialize};

/// Default Bing Web Search v7 endpoint used by the external search provider
pub const DEFAULT_SEARCH_ENDPOINT: &str = "https://api.bing.microsoft.com/v7.0/search";

/// Largest page size the search API accepts
pub const MAX_SEARCH_PAGE_SIZE: u32 = 50;

/// Main configuration structure for the link ingestor
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub http: HttpConfig,
    pub crawler: CrawlerConfig,
    pub backlinks: BacklinkConfig,
    pub search: SearchConfig,
}

/// Outbound HTTP request configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct HttpConfig {
    /// Per-request timeout in seconds
    #[serde(rename = "timeout-secs")]
    pub timeout_secs: u64,

    /// User-Agent header sent with every request
    #[serde(rename = "user-agent")]
    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 30,
            user_agent: "LinkIngestor/1.0".to_string(),
        }
    }
}

/// Limits for the in-domain backlink crawler
#[derive(Debug, Clone, Copy, Deserialize, Serialize)]
#[serde(default)]
pub struct CrawlerConfig {
    /// Maximum number of hops from the domain root
    #[serde(rename = "max-depth")]
    pub max_depth: u32,

    /// Maximum number of pages fetched in one crawl session
    #[serde(rename = "max-visited")]
    pub max_visited: usize,

    /// Maximum number of same-domain links followed from each page
    #[serde(rename = "max-links-per-page")]
    pub max_links_per_page: usize,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            max_depth: 2,
            max_visited: 100,
            max_links_per_page: 5,
        }
    }
}

/// Backlink aggregation configuration
#[derive(Debug, Clone, Copy, Deserialize, Serialize)]
#[serde(default)]
pub struct BacklinkConfig {
    /// Maximum number of backlinks collected for each extracted link
    #[serde(rename = "max-per-link")]
    pub max_per_link: usize,
}

impl Default for BacklinkConfig {
    fn default() -> Self {
        Self { max_per_link: 10 }
    }
}

/// External search API configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SearchConfig {
    /// API credential; the search provider is disabled when absent
    #[serde(rename = "api-key", skip_serializing)]
    pub api_key: Option<String>,

    /// Search API endpoint
    pub endpoint: String,

    /// Page size cap imposed by the API
    #[serde(rename = "max-results")]
    pub max_results: u32,

    /// Market code passed with every query
    pub market: String,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            endpoint: DEFAULT_SEARCH_ENDPOINT.to_string(),
            max_results: MAX_SEARCH_PAGE_SIZE,
            market: "en-US".to_string(),
        }
    }
}

impl SearchConfig {
    /// Returns the API key if one is configured and non-empty
    pub fn credential(&self) -> Option<&str> {
        self.api_key.as_deref().filter(|key| !key.trim().is_empty())
    }
}
