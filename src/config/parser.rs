use crate::config::types::Config;
use crate::config::validation::validate;
use crate::ConfigError;
use std::path::Path;

/// Environment variable holding the search API credential
pub const ENV_SEARCH_API_KEY: &str = "BING_API_KEY";
/// Environment variable overriding the per-request timeout (seconds)
pub const ENV_HTTP_TIMEOUT: &str = "HTTP_TIMEOUT";
/// Environment variable overriding the User-Agent header
pub const ENV_USER_AGENT: &str = "USER_AGENT";
/// Environment variable overriding the per-link backlink cap
pub const ENV_MAX_BACKLINKS_PER_LINK: &str = "MAX_BACKLINKS_PER_LINK";

/// Loads and parses a configuration file from the given path
///
/// Environment overrides are applied after parsing and before validation.
///
/// # Arguments
///
/// * `path` - Path to the TOML configuration file
///
/// # Returns
///
/// * `Ok(Config)` - Successfully loaded and validated configuration
/// * `Err(ConfigError)` - Failed to load, parse, or validate the configuration
///
/// # Example
///
/// ```no_run
/// use std::path::Path;
/// use link_ingestor::config::load_config;
///
/// let config = load_config(Path::new("ingestor.toml")).unwrap();
/// println!("Max depth: {}", config.crawler.max_depth);
/// ```
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    let mut config: Config = toml::from_str(&content)?;

    apply_env_overrides(&mut config)?;
    validate(&config)?;

    Ok(config)
}

/// Loads the configuration file if one is given, otherwise starts from defaults
///
/// Environment overrides and validation apply in both cases.
pub fn load_config_or_default(path: Option<&Path>) -> Result<Config, ConfigError> {
    match path {
        Some(path) => load_config(path),
        None => {
            let mut config = Config::default();
            apply_env_overrides(&mut config)?;
            validate(&config)?;
            Ok(config)
        }
    }
}

/// Applies overrides from the process environment
pub fn apply_env_overrides(config: &mut Config) -> Result<(), ConfigError> {
    apply_overrides_from(config, |name| std::env::var(name).ok())
}

/// Applies overrides using the given variable lookup
///
/// Empty values are ignored so an exported-but-blank variable never clears a
/// value from the file.
pub fn apply_overrides_from<F>(config: &mut Config, lookup: F) -> Result<(), ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let lookup = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

    if let Some(key) = lookup(ENV_SEARCH_API_KEY) {
        config.search.api_key = Some(key);
    }

    if let Some(value) = lookup(ENV_HTTP_TIMEOUT) {
        config.http.timeout_secs = parse_env(ENV_HTTP_TIMEOUT, &value)?;
    }

    if let Some(value) = lookup(ENV_USER_AGENT) {
        config.http.user_agent = value;
    }

    if let Some(value) = lookup(ENV_MAX_BACKLINKS_PER_LINK) {
        config.backlinks.max_per_link = parse_env(ENV_MAX_BACKLINKS_PER_LINK, &value)?;
    }

    Ok(())
}

fn parse_env<T: std::str::FromStr>(name: &str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::Env {
        name: name.to_string(),
        value: value.to_string(),
    })
}
