use crate::url::is_same_site;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// State of one crawl: its configuration and what has been visited
///
/// Pages and resources are tracked in independent sets. Entries are only
/// ever inserted, so a URL moves from unvisited to visited exactly once per
/// session. Membership is by exact string form; no normalization happens
/// here.
#[derive(Debug, Clone)]
pub struct CrawlSession {
    start_url: String,
    output_dir: PathBuf,
    max_depth: u32,
    visited_pages: HashSet<String>,
    visited_resources: HashSet<String>,
}

impl CrawlSession {
    /// Creates a session with empty visited sets
    pub fn new(start_url: impl Into<String>, output_dir: impl Into<PathBuf>, max_depth: u32) -> Self {
        Self {
            start_url: start_url.into(),
            output_dir: output_dir.into(),
            max_depth,
            visited_pages: HashSet::new(),
            visited_resources: HashSet::new(),
        }
    }

    /// The start URL exactly as configured
    pub fn start_url(&self) -> &str {
        &self.start_url
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub fn max_depth(&self) -> u32 {
        self.max_depth
    }

    /// Marks a page visited; returns false if it already was
    pub fn mark_page_visited(&mut self, url: &str) -> bool {
        if self.visited_pages.contains(url) {
            return false;
        }
        self.visited_pages.insert(url.to_string())
    }

    /// Marks a resource visited; returns false if it already was
    pub fn mark_resource_visited(&mut self, url: &str) -> bool {
        if self.visited_resources.contains(url) {
            return false;
        }
        self.visited_resources.insert(url.to_string())
    }

    pub fn is_page_visited(&self, url: &str) -> bool {
        self.visited_pages.contains(url)
    }

    pub fn is_resource_visited(&self, url: &str) -> bool {
        self.visited_resources.contains(url)
    }

    /// Returns true if a page link is followed by this session
    ///
    /// See [`is_same_site`] for the exact (string prefix) rule.
    pub fn is_same_site(&self, url: &str) -> bool {
        is_same_site(&self.start_url, url)
    }

    /// Number of distinct pages visited so far
    pub fn pages_visited(&self) -> usize {
        self.visited_pages.len()
    }

    /// Number of distinct resources visited so far
    pub fn resources_visited(&self) -> usize {
        self.visited_resources.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> CrawlSession {
        CrawlSession::new("https://example.com/", "/out", 2)
    }

    #[test]
    fn test_new_session_is_empty() {
        let session = session();
        assert_eq!(session.start_url(), "https://example.com/");
        assert_eq!(session.output_dir(), Path::new("/out"));
        assert_eq!(session.max_depth(), 2);
        assert_eq!(session.pages_visited(), 0);
        assert_eq!(session.resources_visited(), 0);
    }

    #[test]
    fn test_mark_page_visited_once() {
        let mut session = session();
        assert!(session.mark_page_visited("https://example.com/a"));
        assert!(!session.mark_page_visited("https://example.com/a"));
        assert!(session.is_page_visited("https://example.com/a"));
        assert_eq!(session.pages_visited(), 1);
    }

    #[test]
    fn test_no_normalization_between_urls() {
        let mut session = session();
        assert!(session.mark_page_visited("https://example.com/a"));
        assert!(session.mark_page_visited("https://example.com/a/"));
        assert!(session.mark_page_visited("https://example.com/a?x=1"));
        assert_eq!(session.pages_visited(), 3);
    }

    #[test]
    fn test_pages_and_resources_are_independent() {
        let mut session = session();
        assert!(session.mark_page_visited("https://example.com/x"));
        assert!(!session.is_resource_visited("https://example.com/x"));
        assert!(session.mark_resource_visited("https://example.com/x"));
        assert!(!session.mark_resource_visited("https://example.com/x"));
    }

    #[test]
    fn test_same_site() {
        let session = session();
        assert!(session.is_same_site("https://example.com/docs/"));
        assert!(!session.is_same_site("https://other.com/"));
    }

    #[test]
    fn test_sessions_do_not_share_state() {
        let mut first = session();
        let second = session();
        first.mark_page_visited("https://example.com/");
        assert!(!second.is_page_visited("https://example.com/"));
    }
}
