//! In-memory page source for unit tests

use crate::crawler::{FetchError, Fetcher, PageData};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

type Generator = Box<dyn Fn(&str) -> Option<String> + Send + Sync>;

/// Serves fixed HTML bodies by exact URL and records every request
#[derive(Default)]
pub struct StaticFetcher {
    pages: HashMap<String, String>,
    generator: Option<Generator>,
    requests: Mutex<Vec<String>>,
}

impl StaticFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page(mut self, url: &str, html: &str) -> Self {
        self.pages.insert(url.to_string(), html.to_string());
        self
    }

    /// Produces bodies for URLs that have no fixed page
    pub fn with_generator<F>(mut self, generator: F) -> Self
    where
        F: Fn(&str) -> Option<String> + Send + Sync + 'static,
    {
        self.generator = Some(Box::new(generator));
        self
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl Fetcher for StaticFetcher {
    async fn fetch(&self, url: &str) -> Result<PageData, FetchError> {
        self.requests.lock().unwrap().push(url.to_string());

        let body = self
            .pages
            .get(url)
            .cloned()
            .or_else(|| self.generator.as_ref().and_then(|g| g(url)));

        match body {
            Some(content) => Ok(PageData {
                url: url.to_string(),
                final_url: url.to_string(),
                status_code: 200,
                content,
                content_type: "text/html; charset=utf-8".to_string(),
                headers: HashMap::new(),
            }),
            None => Err(FetchError::Status {
                url: url.to_string(),
                status_code: 404,
            }),
        }
    }
}
