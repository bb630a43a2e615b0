//! Markdown summary generation
//!
//! This module generates human-readable markdown summaries of a mirror run,
//! including statistics, saved files and failures.

use crate::output::{CrawlReport, CrawlStatistics};
use crate::url::LinkKind;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Writes a markdown summary of `report` to `output_path`
///
/// # Arguments
///
/// * `report` - The crawl report
/// * `output_path` - Path where the markdown file should be written
///
/// # Returns
///
/// * `Ok(())` - Successfully wrote markdown summary
/// * `Err(std::io::Error)` - Failed to write summary
pub fn generate_markdown_summary(report: &CrawlReport, output_path: &Path) -> std::io::Result<()> {
    let markdown = format_markdown_summary(report);

    let mut file = File::create(output_path)?;
    file.write_all(markdown.as_bytes())?;

    Ok(())
}

/// Formats a crawl report as markdown
pub fn format_markdown_summary(report: &CrawlReport) -> String {
    let stats = CrawlStatistics::from_report(report);
    let mut md = String::new();

    md.push_str("# Site-Mirror Summary\n\n");

    // Run metadata
    md.push_str("## Run Information\n\n");
    md.push_str(&format!("- **Start URL**: {}\n", report.start_url));
    md.push_str(&format!(
        "- **Output Directory**: {}\n",
        report.output_dir.display()
    ));
    md.push_str(&format!("- **Max Depth**: {}\n", report.max_depth));
    md.push_str(&format!("- **Started**: {}\n", report.started_at.to_rfc3339()));
    if let Some(finished) = report.finished_at {
        md.push_str(&format!("- **Finished**: {}\n", finished.to_rfc3339()));
    }
    if let Some(duration) = report.duration_seconds() {
        md.push_str(&format!("- **Duration**: {} seconds\n", duration));
    }
    md.push('\n');

    // Overall statistics
    md.push_str("## Overall Statistics\n\n");
    md.push_str(&format!("- **Pages Saved**: {}\n", stats.pages_saved));
    md.push_str(&format!("- **Pages Saved Raw**: {}\n", stats.pages_raw));
    md.push_str(&format!("- **Resources Saved**: {}\n", stats.resources_saved));
    md.push_str(&format!(
        "- **External Links Skipped**: {}\n",
        stats.external_links_skipped
    ));
    md.push_str(&format!("- **Total Errors**: {}\n", stats.total_errors()));
    md.push_str(&format!(
        "- **Success Rate**: {:.2}%\n\n",
        stats.success_rate()
    ));

    // Pages
    md.push_str("## Pages\n\n");
    let pages: Vec<_> = report
        .entries_of(LinkKind::Page)
        .filter(|e| e.outcome.is_success())
        .collect();
    if pages.is_empty() {
        md.push_str("_No pages saved._\n\n");
    } else {
        md.push_str("| URL | Title | File |\n");
        md.push_str("|-----|-------|------|\n");
        for page in pages {
            md.push_str(&format!(
                "| {} | {} | {} |\n",
                page.url,
                page.title.as_deref().unwrap_or("-"),
                page.path
                    .as_ref()
                    .map(|p| p.display().to_string())
                    .unwrap_or_default()
            ));
        }
        md.push('\n');
    }

    // Failures
    let failures: Vec<_> = report.failures().collect();
    if !failures.is_empty() {
        md.push_str("## Failures\n\n");
        md.push_str("| URL | Kind | Outcome | Detail |\n");
        md.push_str("|-----|------|---------|--------|\n");
        for failure in failures {
            md.push_str(&format!(
                "| {} | {} | {} | {} |\n",
                failure.url,
                failure.kind.as_str(),
                failure.outcome,
                failure.detail.as_deref().unwrap_or("-")
            ));
        }
        md.push('\n');
    }

    md
}
