//! Backlink discovery through an external web search API
//!
//! Queries the Bing Web Search v7 API for `link:"<url>"` and maps every web
//! page result to a backlink.

use crate::backlinks::provider::{BacklinkProvider, ProviderError, ProviderResult};
use crate::config::{HttpConfig, SearchConfig};
use crate::model::Backlink;
use crate::url::domain_of;
use async_trait::async_trait;
use reqwest::header::ACCEPT;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

/// Identifier reported by the search provider
pub const SEARCH_PROVIDER_NAME: &str = "bing_search";

/// Maximum length (in characters) of the anchor text taken from a snippet
const MAX_ANCHOR_CHARS: usize = 100;

const SUBSCRIPTION_KEY_HEADER: &str = "Ocp-Apim-Subscription-Key";

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(rename = "webPages")]
    web_pages: Option<WebPages>,
}

#[derive(Debug, Deserialize)]
struct WebPages {
    #[serde(default)]
    value: Vec<WebPage>,
}

#[derive(Debug, Deserialize)]
struct WebPage {
    #[serde(default)]
    url: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    snippet: String,
}

/// Provider backed by the external search API
pub struct SearchBacklinkProvider {
    client: Client,
    config: SearchConfig,
}

impl SearchBacklinkProvider {
    /// Creates the provider; it reports itself unavailable when the
    /// configuration carries no API key
    pub fn new(config: &SearchConfig, http: &HttpConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .user_agent(http.user_agent.clone())
            .timeout(Duration::from_secs(http.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            config: config.clone(),
        })
    }

    fn http_error(source: reqwest::Error) -> ProviderError {
        ProviderError::Http {
            provider: SEARCH_PROVIDER_NAME,
            source,
        }
    }
}

#[async_trait]
impl BacklinkProvider for SearchBacklinkProvider {
    fn name(&self) -> &'static str {
        SEARCH_PROVIDER_NAME
    }

    fn is_available(&self) -> bool {
        self.config.credential().is_some()
    }

    async fn get_backlinks(&self, url: &str, limit: usize) -> ProviderResult<Vec<Backlink>> {
        let Some(api_key) = self.config.credential() else {
            return Err(ProviderError::Unavailable {
                provider: SEARCH_PROVIDER_NAME,
            });
        };

        if limit == 0 {
            return Ok(Vec::new());
        }

        let count = limit.min(self.config.max_results as usize);
        let query = format!("link:\"{}\"", url);
        let count_param = count.to_string();
        tracing::debug!("Search query {} (count {})", query, count);

        let response = self
            .client
            .get(&self.config.endpoint)
            .header(SUBSCRIPTION_KEY_HEADER, api_key)
            .header(ACCEPT, "application/json")
            .query(&[
                ("q", query.as_str()),
                ("count", count_param.as_str()),
                ("responseFilter", "Webpages"),
                ("mkt", self.config.market.as_str()),
            ])
            .send()
            .await
            .map_err(Self::http_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(ProviderError::Status {
                provider: SEARCH_PROVIDER_NAME,
                status_code: status.as_u16(),
            });
        }

        let data: SearchResponse = response.json().await.map_err(|e| ProviderError::Decode {
            provider: SEARCH_PROVIDER_NAME,
            message: e.to_string(),
        })?;

        let backlinks: Vec<Backlink> = data
            .web_pages
            .map(|pages| pages.value)
            .unwrap_or_default()
            .into_iter()
            .filter(|page| !page.url.is_empty())
            .take(limit)
            .map(|page| {
                let anchor_text: String = page.snippet.chars().take(MAX_ANCHOR_CHARS).collect();
                Backlink::new(
                    page.url.clone(),
                    page.name,
                    domain_of(&page.url),
                    anchor_text,
                )
            })
            .collect();

        tracing::info!("Search provider returned {} backlinks for {}", backlinks.len(), url);
        Ok(backlinks)
    }
}
