//! Markdown report generation
//!
//! Human-readable reports of ingestion results and page summaries for the
//! command-line front end.

use crate::model::{IngestionResult, PageSummary};
use std::fmt::Write;

/// Formats an ingestion result as markdown
///
/// # Arguments
///
/// * `result` - The ingestion result to render
///
/// # Returns
///
/// A formatted markdown string
pub fn format_markdown_report(result: &IngestionResult) -> String {
    let mut md = String::new();
    let job = &result.job;

    md.push_str("# Link Ingestion Report\n\n");

    // Job metadata
    md.push_str("## Job\n\n");
    let _ = writeln!(md, "- **Job ID**: {}", job.id);
    let _ = writeln!(md, "- **Source**: {}", job.source_url);
    let _ = writeln!(md, "- **Status**: {}", job.status);
    if let Some(error) = &job.error_message {
        let _ = writeln!(md, "- **Error**: {}", error);
    }
    if let (Some(started), Some(finished)) = (job.started_at, job.completed_at) {
        let elapsed = finished - started;
        let _ = writeln!(
            md,
            "- **Duration**: {:.2} seconds",
            elapsed.num_milliseconds() as f64 / 1000.0
        );
    }
    let _ = writeln!(md, "- **Links Found**: {}", result.total_links);
    let _ = writeln!(md, "- **Backlinks Found**: {}\n", result.total_backlinks);

    if result.links.is_empty() {
        return md;
    }

    md.push_str("## Links\n\n");
    md.push_str("| URL | Type | Text |\n");
    md.push_str("|-----|------|------|\n");
    for link in &result.links {
        let _ = writeln!(
            md,
            "| {} | {} | {} |",
            link.url,
            link.link_type.as_str(),
            escape_cell(&link.link_text)
        );
    }
    md.push('\n');

    if !result.backlinks.is_empty() {
        md.push_str("## Backlinks\n\n");
        md.push_str("| Backlink | Domain | Title | Anchor |\n");
        md.push_str("|----------|--------|-------|--------|\n");
        for backlink in &result.backlinks {
            let _ = writeln!(
                md,
                "| {} | {} | {} | {} |",
                backlink.backlink_url,
                backlink.backlink_domain,
                escape_cell(&backlink.backlink_title),
                escape_cell(&backlink.anchor_text)
            );
        }
        md.push('\n');
    }

    md
}

/// Formats a page summary as markdown
pub fn format_markdown_summary(summary: &PageSummary) -> String {
    let mut md = String::new();

    md.push_str("# Page Summary\n\n");
    let _ = writeln!(md, "- **URL**: {}", summary.url);
    let _ = writeln!(md, "- **Status Code**: {}", summary.status_code);
    let _ = writeln!(md, "- **Content Type**: {}", summary.content_type);
    let _ = writeln!(md, "- **Title**: {}", summary.title);
    let _ = writeln!(md, "- **Description**: {}", summary.description);
    if let Some(keywords) = &summary.keywords {
        let _ = writeln!(md, "- **Keywords**: {}", keywords);
    }
    if let Some(canonical) = &summary.canonical_url {
        let _ = writeln!(md, "- **Canonical URL**: {}", canonical);
    }
    let _ = writeln!(md, "- **Links Found**: {}", summary.total_links_found);
    let _ = writeln!(md, "  - Internal: {}", summary.internal_links);
    let _ = writeln!(md, "  - External: {}", summary.external_links);

    md
}

/// Keeps table cells on one line and free of column separators
fn escape_cell(text: &str) -> String {
    text.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .replace('|', "\\|")
}
