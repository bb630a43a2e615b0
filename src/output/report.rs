//! Per-crawl record of what happened to every URL

use crate::state::{CrawlSession, Outcome};
use crate::url::LinkKind;
use chrono::{DateTime, Utc};
use std::path::PathBuf;

/// What happened to one URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportEntry {
    /// The URL as it was requested
    pub url: String,

    /// Whether it was handled as a page or a resource
    pub kind: LinkKind,

    /// Final outcome
    pub outcome: Outcome,

    /// Where it was (or would have been) written
    pub path: Option<PathBuf>,

    /// Page title (pages only, if available)
    pub title: Option<String>,

    /// Error message for failed entries
    pub detail: Option<String>,
}

/// Record of one crawl session
#[derive(Debug, Clone)]
pub struct CrawlReport {
    pub start_url: String,
    pub output_dir: PathBuf,
    pub max_depth: u32,
    pub started_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,

    /// One entry per processed URL, in processing order
    pub entries: Vec<ReportEntry>,

    /// Page links not followed because they fail the same-site test
    pub external_links_skipped: u64,
}

impl CrawlReport {
    /// Starts a report for `session`, stamped with the current time
    pub fn new(session: &CrawlSession) -> Self {
        Self {
            start_url: session.start_url().to_string(),
            output_dir: session.output_dir().to_path_buf(),
            max_depth: session.max_depth(),
            started_at: Utc::now(),
            finished_at: None,
            entries: Vec::new(),
            external_links_skipped: 0,
        }
    }

    pub fn record(&mut self, entry: ReportEntry) {
        self.entries.push(entry);
    }

    /// Stamps the finish time
    pub fn finish(&mut self) {
        self.finished_at = Some(Utc::now());
    }

    /// Whole seconds between start and finish, if finished
    pub fn duration_seconds(&self) -> Option<u64> {
        self.finished_at
            .map(|finished| (finished - self.started_at).num_seconds().max(0) as u64)
    }

    /// Entries of the given kind
    pub fn entries_of(&self, kind: LinkKind) -> impl Iterator<Item = &ReportEntry> {
        self.entries.iter().filter(move |e| e.kind == kind)
    }

    /// Entries that ended in an error
    pub fn failures(&self) -> impl Iterator<Item = &ReportEntry> {
        self.entries.iter().filter(|e| e.outcome.is_error())
    }

    /// Number of entries of `kind` with exactly `outcome`
    pub fn count(&self, kind: LinkKind, outcome: Outcome) -> usize {
        self.entries_of(kind).filter(|e| e.outcome == outcome).count()
    }

    /// Pages written, rewritten or raw
    pub fn pages_saved(&self) -> usize {
        self.entries_of(LinkKind::Page)
            .filter(|e| e.outcome.is_success())
            .count()
    }

    pub fn resources_saved(&self) -> usize {
        self.count(LinkKind::Resource, Outcome::Saved)
    }

    /// Returns the entry for `url`, if it was processed
    pub fn entry(&self, url: &str) -> Option<&ReportEntry> {
        self.entries.iter().find(|e| e.url == url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(url: &str, kind: LinkKind, outcome: Outcome) -> ReportEntry {
        ReportEntry {
            url: url.to_string(),
            kind,
            outcome,
            path: None,
            title: None,
            detail: None,
        }
    }

    fn report() -> CrawlReport {
        let session = CrawlSession::new("https://example.com/", "/out", 2);
        let mut report = CrawlReport::new(&session);
        report.record(entry("https://example.com/", LinkKind::Page, Outcome::Saved));
        report.record(entry("https://example.com/raw", LinkKind::Page, Outcome::SavedRaw));
        report.record(entry("https://example.com/gone", LinkKind::Page, Outcome::HttpStatus(404)));
        report.record(entry("https://example.com/a.css", LinkKind::Resource, Outcome::Saved));
        report.record(entry("https://example.com/b.png", LinkKind::Resource, Outcome::WriteFailed));
        report
    }

    #[test]
    fn test_counts() {
        let report = report();
        assert_eq!(report.pages_saved(), 2);
        assert_eq!(report.resources_saved(), 1);
        assert_eq!(report.count(LinkKind::Page, Outcome::SavedRaw), 1);
        assert_eq!(report.failures().count(), 2);
    }

    #[test]
    fn test_entry_lookup() {
        let report = report();
        let found = report.entry("https://example.com/gone").unwrap();
        assert_eq!(found.outcome, Outcome::HttpStatus(404));
        assert!(report.entry("https://example.com/missing").is_none());
    }

    #[test]
    fn test_duration_after_finish() {
        let mut report = report();
        assert_eq!(report.duration_seconds(), None);
        report.finish();
        assert!(report.duration_seconds().is_some());
    }
}
