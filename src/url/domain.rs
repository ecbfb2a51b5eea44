use url::Url;

/// Extracts the domain (authority) from a URL
///
/// The domain is the lowercase host, followed by `:port` when the URL carries a
/// port that is not the default for its scheme. Two URLs belong to the same
/// site exactly when their domains are equal.
///
/// # Arguments
///
/// * `url` - The URL to extract the domain from
///
/// # Returns
///
/// * `Some(String)` - The lowercase domain
/// * `None` - If the URL has no host (e.g. `mailto:` or `data:` URLs)
///
/// # Examples
///
/// ```
/// use url::Url;
/// use link_ingestor::url::extract_domain;
///
/// let url = Url::parse("https://EXAMPLE.COM/path").unwrap();
/// assert_eq!(extract_domain(&url), Some("example.com".to_string()));
///
/// let url = Url::parse("http://localhost:8080/").unwrap();
/// assert_eq!(extract_domain(&url), Some("localhost:8080".to_string()));
///
/// let url = Url::parse("mailto:someone@example.com").unwrap();
/// assert_eq!(extract_domain(&url), None);
/// ```
pub fn extract_domain(url: &Url) -> Option<String> {
    let host = url.host_str().filter(|h| !h.is_empty())?.to_lowercase();

    // Url::port() is None for scheme-default ports
    match url.port() {
        Some(port) => Some(format!("{}:{}", host, port)),
        None => Some(host),
    }
}

/// Extracts the domain from a URL string, returning an empty string when the
/// input does not parse or has no host
pub fn domain_of(url: &str) -> String {
    Url::parse(url)
        .ok()
        .and_then(|parsed| extract_domain(&parsed))
        .unwrap_or_default()
}

/// Builds the root URL (`scheme://domain/`) of the site a URL belongs to
pub fn site_root(url: &Url) -> Option<Url> {
    let domain = extract_domain(url)?;
    Url::parse(&format!("{}://{}/", url.scheme(), domain)).ok()
}
