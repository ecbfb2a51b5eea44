//! Output module for rendering ingestion results
//!
//! This module handles:
//! - JSON serialization of results for other tools
//! - Markdown reports for people
//! - Writing either to stdout or a file

mod markdown;

pub use markdown::{format_markdown_report, format_markdown_summary};

use serde::Serialize;
use std::fs::File;
use std::io::Write;
use std::path::Path;
use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Failed to format output: {0}")]
    Format(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// Serializes any record as pretty-printed JSON
pub fn to_json<T: Serialize>(value: &T) -> OutputResult<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

/// Writes rendered output to `path`, or to stdout when no path is given
pub fn write_output(rendered: &str, path: Option<&Path>) -> OutputResult<()> {
    match path {
        Some(path) => {
            let mut file = File::create(path)?;
            file.write_all(rendered.as_bytes())?;
            if !rendered.ends_with('\n') {
                file.write_all(b"\n")?;
            }
        }
        None => {
            let stdout = std::io::stdout();
            let mut handle = stdout.lock();
            writeln!(handle, "{}", rendered.trim_end())?;
        }
    }
    Ok(())
}
