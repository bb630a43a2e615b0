//! Statistics derived from a crawl report
//!
//! This module condenses a [`CrawlReport`] into counters and prints them.

use crate::output::CrawlReport;
use crate::state::Outcome;
use crate::url::LinkKind;
use std::collections::HashMap;

/// Crawl statistics summary
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CrawlStatistics {
    /// Pages fetched and parsed, rewritten and written
    pub pages_saved: usize,

    /// Pages written as fetched because they were not HTML
    pub pages_raw: usize,

    /// Resources written verbatim
    pub resources_saved: usize,

    /// Count of failed URLs by outcome label
    pub error_summary: HashMap<&'static str, usize>,

    /// Page links skipped by the same-site test
    pub external_links_skipped: u64,

    /// Total URLs processed
    pub total: usize,
}

impl CrawlStatistics {
    /// Computes statistics from a report
    pub fn from_report(report: &CrawlReport) -> Self {
        let mut error_summary = HashMap::new();
        for failure in report.failures() {
            *error_summary.entry(failure.outcome.label()).or_insert(0) += 1;
        }

        Self {
            pages_saved: report.count(LinkKind::Page, Outcome::Saved),
            pages_raw: report.count(LinkKind::Page, Outcome::SavedRaw),
            resources_saved: report.resources_saved(),
            error_summary,
            external_links_skipped: report.external_links_skipped,
            total: report.entries.len(),
        }
    }

    /// Number of failed URLs
    pub fn total_errors(&self) -> usize {
        self.error_summary.values().sum()
    }

    /// Share of processed URLs that were written, in percent
    pub fn success_rate(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        let saved = self.pages_saved + self.pages_raw + self.resources_saved;
        (saved as f64 / self.total as f64) * 100.0
    }
}

/// Prints statistics to stdout in a formatted manner
///
/// # Arguments
///
/// * `stats` - The statistics to display
pub fn print_statistics(stats: &CrawlStatistics) {
    println!("=== Mirror Statistics ===\n");

    println!("Overview:");
    println!("  Pages saved: {}", stats.pages_saved);
    println!("  Pages saved raw: {}", stats.pages_raw);
    println!("  Resources saved: {}", stats.resources_saved);
    println!("  External links skipped: {}", stats.external_links_skipped);
    println!();

    if !stats.error_summary.is_empty() {
        println!("Error Summary:");
        // Sort by count (descending)
        let mut error_counts: Vec<_> = stats.error_summary.iter().collect();
        error_counts.sort_by(|a, b| b.1.cmp(a.1).then(a.0.cmp(b.0)));

        for (label, count) in error_counts {
            println!("  {}: {}", label, count);
        }
        println!();
    }

    println!(
        "Success Rate: {:.1}% ({} errors out of {} URLs)",
        stats.success_rate(),
        stats.total_errors(),
        stats.total
    );
}
