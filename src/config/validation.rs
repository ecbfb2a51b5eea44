use crate::config::types::{
    BacklinkConfig, Config, CrawlerConfig, HttpConfig, SearchConfig, MAX_SEARCH_PAGE_SIZE,
};
use crate::ConfigError;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_http_config(&config.http)?;
    validate_crawler_config(&config.crawler)?;
    validate_backlink_config(&config.backlinks)?;
    validate_search_config(&config.search)?;
    Ok(())
}

fn validate_http_config(config: &HttpConfig) -> Result<(), ConfigError> {
    if config.timeout_secs == 0 {
        return Err(ConfigError::Validation(
            "timeout_secs must be >= 1".to_string(),
        ));
    }

    if config.user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user_agent cannot be empty".to_string(),
        ));
    }

    Ok(())
}

fn validate_crawler_config(config: &CrawlerConfig) -> Result<(), ConfigError> {
    // max_depth of 0 is allowed: only the domain root is inspected

    if config.max_visited < 1 {
        return Err(ConfigError::Validation(format!(
            "max_visited must be >= 1, got {}",
            config.max_visited
        )));
    }

    if config.max_links_per_page < 1 {
        return Err(ConfigError::Validation(format!(
            "max_links_per_page must be >= 1, got {}",
            config.max_links_per_page
        )));
    }

    Ok(())
}

fn validate_backlink_config(config: &BacklinkConfig) -> Result<(), ConfigError> {
    if config.max_per_link < 1 {
        return Err(ConfigError::Validation(format!(
            "max_per_link must be >= 1, got {}",
            config.max_per_link
        )));
    }

    Ok(())
}

fn validate_search_config(config: &SearchConfig) -> Result<(), ConfigError> {
    let endpoint = Url::parse(&config.endpoint)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid search endpoint: {}", e)))?;

    if endpoint.scheme() != "http" && endpoint.scheme() != "https" {
        return Err(ConfigError::InvalidUrl(format!(
            "Search endpoint '{}' must use HTTP or HTTPS",
            config.endpoint
        )));
    }

    if config.max_results < 1 || config.max_results > MAX_SEARCH_PAGE_SIZE {
        return Err(ConfigError::Validation(format!(
            "max_results must be between 1 and {}, got {}",
            MAX_SEARCH_PAGE_SIZE, config.max_results
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate(&Config::default()).is_ok());
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let mut config = Config::default();
        config.http.timeout_secs = 0;
        assert!(matches!(
            validate(&config),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn test_blank_user_agent_rejected() {
        let mut config = Config::default();
        config.http.user_agent = "   ".to_string();
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_crawler_limits() {
        let mut config = Config::default();
        config.crawler.max_depth = 0;
        assert!(validate(&config).is_ok());

        config.crawler.max_visited = 0;
        assert!(validate(&config).is_err());

        let mut config = Config::default();
        config.crawler.max_links_per_page = 0;
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_zero_backlinks_per_link_rejected() {
        let mut config = Config::default();
        config.backlinks.max_per_link = 0;
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_search_endpoint() {
        let mut config = Config::default();
        config.search.endpoint = "not a url".to_string();
        assert!(matches!(
            validate(&config),
            Err(ConfigError::InvalidUrl(_))
        ));

        config.search.endpoint = "ftp://search.example.com/".to_string();
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_search_page_size_bounds() {
        let mut config = Config::default();
        config.search.max_results = 0;
        assert!(validate(&config).is_err());

        config.search.max_results = 51;
        assert!(validate(&config).is_err());

        config.search.max_results = 50;
        assert!(validate(&config).is_ok());
    }
}
