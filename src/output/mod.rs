//! Output module for crawl reports and summaries
//!
//! This module handles:
//! - Recording the outcome of every URL in a crawl
//! - Condensing the record into statistics
//! - Generating markdown summaries

mod markdown;
mod report;
pub mod stats;

pub use markdown::{format_markdown_summary, generate_markdown_summary};
pub use report::{CrawlReport, ReportEntry};
pub use stats::{print_statistics, CrawlStatistics};
