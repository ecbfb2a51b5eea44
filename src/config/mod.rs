//! Configuration module for the link ingestor
//!
//! This module handles loading, parsing, and validating TOML configuration files,
//! plus the environment variable overrides applied on top of them.
//!
//! # Example
//!
//! ```no_run
//! use link_ingestor::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("ingestor.toml")).unwrap();
//! println!("Backlinks per link: {}", config.backlinks.max_per_link);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    BacklinkConfig, Config, CrawlerConfig, HttpConfig, SearchConfig, DEFAULT_SEARCH_ENDPOINT,
    MAX_SEARCH_PAGE_SIZE,
};

// Re-export parser functions
pub use parser::{
    apply_env_overrides, apply_overrides_from, load_config, load_config_or_default,
    ENV_HTTP_TIMEOUT, ENV_MAX_BACKLINKS_PER_LINK, ENV_SEARCH_API_KEY, ENV_USER_AGENT,
};
pub use validation::validate;
