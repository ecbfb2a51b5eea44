//! Integration tests for ingestion and backlink discovery
//!
//! These tests use wiremock to create mock HTTP servers and run the real
//! `HttpFetcher` through the full pipeline.

use link_ingestor::backlinks::{
    BacklinkProvider, InDomainBacklinkProvider, IN_DOMAIN_PROVIDER_NAME, SEARCH_PROVIDER_NAME,
};
use link_ingestor::config::{Config, CrawlerConfig, HttpConfig};
use link_ingestor::crawler::{FetchError, Fetcher, HttpFetcher};
use link_ingestor::ingest::FETCH_FAILURE_MESSAGE;
use link_ingestor::{IngestError, Ingestor, JobStatus, LinkType};
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a test configuration with short timeouts and no search credential
fn create_test_config() -> Config {
    let mut config = Config::default();
    config.http = HttpConfig {
        timeout_secs: 5,
        user_agent: "TestIngestor/1.0".to_string(),
    };
    config.search.api_key = None;
    config
}

/// Host and port of a mock server, as the extractor reports domains
fn domain_of(server: &MockServer) -> String {
    server.uri().trim_start_matches("http://").to_string()
}

fn html(body: String) -> ResponseTemplate {
    ResponseTemplate::new(200)
        .set_body_raw(body, "text/html; charset=utf-8")
}

async fn mount_page(server: &MockServer, page_path: &str, body: String) {
    Mock::given(method("GET"))
        .and(path(page_path))
        .respond_with(html(body))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_ingest_classifies_and_deduplicates_links() {
    let site_a = MockServer::start().await;
    let site_b = MockServer::start().await;
    let target = format!("{}/y", site_b.uri());

    mount_page(
        &site_a,
        "/",
        format!(
            r#"<html><head><title>A</title></head><body>
            <a href="/x">X</a>
            <a href="{}">Y</a>
            <a href="/x">X again</a>
            </body></html>"#,
            target
        ),
    )
    .await;

    // Site B's home page references the external link, so the in-domain
    // provider reports it as a backlink
    mount_page(
        &site_b,
        "/",
        format!(
            r#"<html><head><title>B Home</title></head><body><a href="{}">y</a></body></html>"#,
            target
        ),
    )
    .await;

    let ingestor = Ingestor::from_config(&create_test_config()).expect("Failed to build ingestor");
    let source = format!("{}/", site_a.uri());
    let result = ingestor.ingest(&source).await;

    assert_eq!(result.job.status, JobStatus::Completed);
    assert_eq!(result.job.total_links_found, 2);
    assert_eq!(result.links.len(), 2);

    assert_eq!(result.links[0].url, format!("{}/x", site_a.uri()));
    assert_eq!(result.links[0].link_type, LinkType::Internal);
    assert_eq!(result.links[0].domain, domain_of(&site_a));
    assert_eq!(result.links[1].url, target);
    assert_eq!(result.links[1].link_type, LinkType::External);
    assert_eq!(result.links[1].domain, domain_of(&site_b));

    assert_eq!(result.total_backlinks, 1);
    let backlink = &result.backlinks[0];
    assert_eq!(backlink.backlink_url, format!("{}/", site_b.uri()));
    assert_eq!(backlink.backlink_title, "B Home");
    assert_eq!(backlink.backlink_domain, domain_of(&site_b));
    assert_eq!(backlink.anchor_text, format!("Found link to {}", target));
}

#[tokio::test]
async fn test_ingest_unreachable_page_fails_job() {
    let ingestor = Ingestor::from_config(&create_test_config()).expect("Failed to build ingestor");

    let result = ingestor.ingest("http://127.0.0.1:1/").await;

    assert_eq!(result.job.status, JobStatus::Failed);
    assert_eq!(
        result.job.error_message.as_deref(),
        Some(FETCH_FAILURE_MESSAGE)
    );
    assert_eq!(result.job.total_links_found, 0);
    assert!(result.links.is_empty());
    assert!(result.backlinks.is_empty());
}

#[tokio::test]
async fn test_ingest_error_status_fails_job() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let ingestor = Ingestor::from_config(&create_test_config()).expect("Failed to build ingestor");
    let result = ingestor.ingest(&format!("{}/", server.uri())).await;

    assert_eq!(result.job.status, JobStatus::Failed);
    assert_eq!(
        result.job.error_message.as_deref(),
        Some(FETCH_FAILURE_MESSAGE)
    );
}

#[tokio::test]
async fn test_in_domain_provider_over_http() {
    let server = MockServer::start().await;
    let target = format!("{}/y", server.uri());

    mount_page(
        &server,
        "/",
        r#"<html><body><a href="/about">About</a><a href="/blog">Blog</a></body></html>"#
            .to_string(),
    )
    .await;
    mount_page(&server, "/about", "<html><body>Nothing here</body></html>".to_string()).await;
    mount_page(
        &server,
        "/blog",
        format!(
            r#"<html><head><title>Blog</title></head><body><a href="{}">read</a></body></html>"#,
            target
        ),
    )
    .await;

    let fetcher = Arc::new(HttpFetcher::new(&create_test_config().http).unwrap());
    let provider = InDomainBacklinkProvider::new(fetcher, CrawlerConfig::default());
    let backlinks = provider.get_backlinks(&target, 10).await.unwrap();

    assert_eq!(backlinks.len(), 1);
    assert_eq!(backlinks[0].backlink_url, format!("{}/blog", server.uri()));
    assert_eq!(backlinks[0].backlink_title, "Blog");
    assert_eq!(backlinks[0].backlink_domain, domain_of(&server));

    // Root, /about, /blog, then /y (404) linked from /blog
    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 4);
}

#[tokio::test]
async fn test_without_credential_only_in_domain_provider_runs() {
    let ingestor = Ingestor::from_config(&create_test_config()).expect("Failed to build ingestor");
    assert_eq!(
        ingestor.aggregator().provider_names(),
        vec![IN_DOMAIN_PROVIDER_NAME]
    );
}

#[tokio::test]
async fn test_search_provider_results_come_first() {
    let site = MockServer::start().await;
    let search = MockServer::start().await;
    let target = format!("{}/y", site.uri());

    Mock::given(method("GET"))
        .and(path("/v7.0/search"))
        .and(header("Ocp-Apim-Subscription-Key", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "webPages": { "value": [
                { "url": "https://elsewhere.test/post", "name": "Post", "snippet": "cites it" }
            ]}
        })))
        .expect(1)
        .mount(&search)
        .await;

    mount_page(&site, "/", format!("<html><body>{}</body></html>", target)).await;

    let mut config = create_test_config();
    config.search.api_key = Some("test-key".to_string());
    config.search.endpoint = format!("{}/v7.0/search", search.uri());

    let ingestor = Ingestor::from_config(&config).expect("Failed to build ingestor");
    assert_eq!(
        ingestor.aggregator().provider_names(),
        vec![SEARCH_PROVIDER_NAME, IN_DOMAIN_PROVIDER_NAME]
    );

    let backlinks = ingestor.aggregator().aggregate(&target, 10).await;
    let urls: Vec<&str> = backlinks.iter().map(|b| b.backlink_url.as_str()).collect();
    assert_eq!(
        urls,
        vec![
            "https://elsewhere.test/post".to_string(),
            format!("{}/", site.uri())
        ]
    );
}

#[tokio::test]
async fn test_failing_search_provider_falls_back() {
    let site = MockServer::start().await;
    let search = MockServer::start().await;
    let target = format!("{}/y", site.uri());

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&search)
        .await;
    mount_page(&site, "/", format!("<html><body>{}</body></html>", target)).await;

    let mut config = create_test_config();
    config.search.api_key = Some("test-key".to_string());
    config.search.endpoint = format!("{}/v7.0/search", search.uri());

    let ingestor = Ingestor::from_config(&config).expect("Failed to build ingestor");
    let backlinks = ingestor.aggregator().aggregate(&target, 10).await;

    assert_eq!(backlinks.len(), 1);
    assert_eq!(backlinks[0].backlink_url, format!("{}/", site.uri()));
}

#[tokio::test]
async fn test_fetcher_follows_redirects_and_sends_headers() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/old"))
        .respond_with(
            ResponseTemplate::new(301).insert_header("location", format!("{}/new", server.uri()).as_str()),
        )
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/new"))
        .and(header("user-agent", "TestIngestor/1.0"))
        .respond_with(html("<html><title>New</title></html>".to_string()))
        .mount(&server)
        .await;

    let fetcher = HttpFetcher::new(&create_test_config().http).unwrap();
    let page = fetcher
        .fetch(&format!("{}/old", server.uri()))
        .await
        .expect("Fetch failed");

    assert_eq!(page.url, format!("{}/old", server.uri()));
    assert_eq!(page.final_url, format!("{}/new", server.uri()));
    assert_eq!(page.status_code, 200);
    assert!(page.content.contains("<title>New</title>"));
    assert!(page.content_type.starts_with("text/html"));
    assert!(page.headers.contains_key("content-type"));
}

#[tokio::test]
async fn test_fetcher_reports_status_failure() {
    let server = MockServer::start().await;

    let fetcher = HttpFetcher::new(&create_test_config().http).unwrap();
    let result = fetcher.fetch(&format!("{}/missing", server.uri())).await;

    assert!(matches!(
        result,
        Err(FetchError::Status {
            status_code: 404,
            ..
        })
    ));
}

/// Serves `/` only after a delay longer than the one-second client timeout
async fn slow_server() -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(
            html("<html><title>Late</title></html>".to_string()).set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;
    server
}

fn short_timeout_config() -> Config {
    let mut config = create_test_config();
    config.http.timeout_secs = 1;
    config
}

#[tokio::test]
async fn test_fetcher_reports_timeout() {
    let server = slow_server().await;

    let fetcher = HttpFetcher::new(&short_timeout_config().http).unwrap();
    let result = fetcher.fetch(&format!("{}/", server.uri())).await;

    assert!(matches!(result, Err(FetchError::Timeout { .. })));
}

#[tokio::test]
async fn test_ingest_timeout_fails_job() {
    let server = slow_server().await;

    let ingestor =
        Ingestor::from_config(&short_timeout_config()).expect("Failed to build ingestor");
    let result = ingestor.ingest(&format!("{}/", server.uri())).await;

    assert_eq!(result.job.status, JobStatus::Failed);
    assert_eq!(
        result.job.error_message.as_deref(),
        Some(FETCH_FAILURE_MESSAGE)
    );
    assert!(result.links.is_empty());
}

#[tokio::test]
async fn test_summarize_over_http() {
    let server = MockServer::start().await;
    mount_page(
        &server,
        "/",
        r#"<html><head>
            <title>Home</title>
            <meta name="description" content="Welcome">
            <meta name="keywords" content="a, b">
        </head><body>
            <a href="/one">1</a><a href="https://other.test/">2</a><a href="mailto:x@y.test">3</a>
        </body></html>"#
            .to_string(),
    )
    .await;

    let ingestor = Ingestor::from_config(&create_test_config()).expect("Failed to build ingestor");
    let summary = ingestor
        .summarize(&format!("{}/", server.uri()))
        .await
        .expect("Summarize failed");

    assert_eq!(summary.title, "Home");
    assert_eq!(summary.description, "Welcome");
    assert_eq!(summary.keywords.as_deref(), Some("a, b"));
    assert!(summary.canonical_url.is_none());
    assert_eq!(summary.total_links_found, 2);
    assert_eq!(summary.internal_links, 1);
    assert_eq!(summary.external_links, 1);
    assert_eq!(summary.status_code, 200);
}

#[tokio::test]
async fn test_summarize_fetch_failure_is_error() {
    let ingestor = Ingestor::from_config(&create_test_config()).expect("Failed to build ingestor");
    let result = ingestor.summarize("http://127.0.0.1:1/").await;
    assert!(matches!(result, Err(IngestError::Fetch(_))));
}

#[tokio::test]
async fn test_concurrent_ingestions_are_independent() {
    let site = MockServer::start().await;
    let target = format!("{}/y", site.uri());

    mount_page(
        &site,
        "/",
        format!(r#"<html><body><a href="{}">y</a></body></html>"#, target),
    )
    .await;

    let ingestor = Ingestor::from_config(&create_test_config()).expect("Failed to build ingestor");
    let source = format!("{}/", site.uri());

    let (first, second) = tokio::join!(ingestor.ingest(&source), ingestor.ingest(&source));

    assert_eq!(first.job.status, JobStatus::Completed);
    assert_eq!(second.job.status, JobStatus::Completed);
    assert_ne!(first.job.id, second.job.id);
    assert_eq!(first.total_backlinks, 1);
    assert_eq!(second.total_backlinks, 1);
    assert_eq!(first.backlinks[0].backlink_url, second.backlinks[0].backlink_url);
}
