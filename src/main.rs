//! Link Ingestor main entry point
//!
//! This is the command-line interface for page ingestion and backlink discovery.

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use link_ingestor::config::{load_config_or_default, Config};
use link_ingestor::output::{
    format_markdown_report, format_markdown_summary, to_json, write_output,
};
use link_ingestor::{Ingestor, JobStatus};
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

/// Link Ingestor: outbound link extraction and backlink discovery
///
/// Fetches a page, classifies every outbound link as internal or external,
/// and looks for pages that link back to each of them.
#[derive(Parser, Debug)]
#[command(name = "link-ingestor")]
#[command(version)]
#[command(about = "Outbound link extraction and backlink discovery", long_about = None)]
struct Cli {
    /// Path to TOML configuration file (defaults are used when omitted)
    #[arg(short, long, value_name = "CONFIG", global = true)]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose", global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Extract links from a page and discover backlinks for each
    Ingest {
        /// Page to ingest
        url: String,

        /// Output format
        #[arg(long, value_enum, default_value_t = Format::Json)]
        format: Format,

        /// Write the report to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Abandon the ingestion after this many seconds
        #[arg(long)]
        deadline_secs: Option<u64>,
    },

    /// Report link counts and metadata for a page without backlink discovery
    Summarize {
        /// Page to summarize
        url: String,

        /// Output format
        #[arg(long, value_enum, default_value_t = Format::Json)]
        format: Format,
    },

    /// Discover backlinks for a single URL
    Backlinks {
        /// URL to find backlinks for
        url: String,

        /// Maximum number of backlinks (defaults to the configured per-link cap)
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Validate configuration and print the effective values
    CheckConfig,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum Format {
    Json,
    Markdown,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let config = load_config_or_default(cli.config.as_deref()).with_context(|| match &cli.config {
        Some(path) => format!("Failed to load configuration from {}", path.display()),
        None => "Invalid configuration".to_string(),
    })?;

    match cli.command {
        Command::CheckConfig => handle_check_config(&config),
        Command::Ingest {
            url,
            format,
            output,
            deadline_secs,
        } => handle_ingest(&config, &url, format, output, deadline_secs).await,
        Command::Summarize { url, format } => handle_summarize(&config, &url, format).await,
        Command::Backlinks { url, limit } => handle_backlinks(&config, &url, limit).await,
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("link_ingestor=info,warn"),
            1 => EnvFilter::new("link_ingestor=debug,info"),
            2 => EnvFilter::new("link_ingestor=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    // Logs go to stderr so JSON on stdout stays machine-readable
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Handles `check-config`: prints the effective configuration
fn handle_check_config(config: &Config) -> anyhow::Result<()> {
    println!("=== Link Ingestor Configuration ===\n");

    println!("HTTP:");
    println!("  Timeout: {}s", config.http.timeout_secs);
    println!("  User agent: {}", config.http.user_agent);

    println!("\nIn-domain crawler:");
    println!("  Max depth: {}", config.crawler.max_depth);
    println!("  Max visited: {}", config.crawler.max_visited);
    println!("  Links per page: {}", config.crawler.max_links_per_page);

    println!("\nBacklinks:");
    println!("  Max per link: {}", config.backlinks.max_per_link);

    println!("\nSearch provider:");
    match config.search.credential() {
        Some(_) => {
            println!("  Enabled ({})", config.search.endpoint);
            println!("  Max results: {}", config.search.max_results);
            println!("  Market: {}", config.search.market);
        }
        None => println!("  Disabled (no API key)"),
    }

    println!("\n✓ Configuration is valid");
    Ok(())
}

/// Handles `ingest`: runs the full pipeline, optionally under a deadline
async fn handle_ingest(
    config: &Config,
    url: &str,
    format: Format,
    output: Option<PathBuf>,
    deadline_secs: Option<u64>,
) -> anyhow::Result<()> {
    let ingestor = Ingestor::from_config(config)?;

    let result = match deadline_secs {
        Some(secs) => tokio::time::timeout(Duration::from_secs(secs), ingestor.ingest(url))
            .await
            .with_context(|| format!("Ingestion of {} exceeded {}s deadline", url, secs))?,
        None => ingestor.ingest(url).await,
    };

    let rendered = match format {
        Format::Json => to_json(&result)?,
        Format::Markdown => format_markdown_report(&result),
    };
    write_output(&rendered, output.as_deref())?;

    if result.job.status == JobStatus::Failed {
        anyhow::bail!(
            "Ingestion failed: {}",
            result.job.error_message.as_deref().unwrap_or("unknown error")
        );
    }

    Ok(())
}

/// Handles `summarize`: fetch and extraction only
async fn handle_summarize(config: &Config, url: &str, format: Format) -> anyhow::Result<()> {
    let ingestor = Ingestor::from_config(config)?;

    match ingestor.summarize(url).await {
        Ok(summary) => {
            let rendered = match format {
                Format::Json => to_json(&summary)?,
                Format::Markdown => format_markdown_summary(&summary),
            };
            write_output(&rendered, None)?;
            Ok(())
        }
        Err(e) => {
            let rendered = to_json(&serde_json::json!({ "error": e.to_string() }))?;
            write_output(&rendered, None)?;
            Err(e.into())
        }
    }
}

/// Handles `backlinks`: runs the aggregator for one URL
async fn handle_backlinks(config: &Config, url: &str, limit: Option<usize>) -> anyhow::Result<()> {
    let ingestor = Ingestor::from_config(config)?;
    let aggregator = ingestor.aggregator();
    let limit = limit.unwrap_or(config.backlinks.max_per_link);

    tracing::info!(
        "Querying providers [{}] for {}",
        aggregator.provider_names().join(", "),
        url
    );

    let backlinks = aggregator.aggregate(url, limit).await;
    write_output(&to_json(&backlinks)?, None)?;
    Ok(())
}
