//! Crawl engine - mirror orchestration logic
//!
//! This module drives a crawl session from its start URL:
//! - Fetching pages and parsing them into documents
//! - Rewriting links and writing the rewritten pages
//! - Downloading the resources a page references
//! - Following same-site page links depth-first, up to the depth limit

use crate::crawler::fetcher::{fetch_ok, Fetch};
use crate::crawler::resource::fetch_resource;
use crate::document::{rewrite_links, LinkRewriter, ParsedDocument};
use crate::output::{CrawlReport, ReportEntry};
use crate::state::{CrawlSession, Outcome};
use crate::storage::SiteStore;
use crate::url::{local_path, LinkKind, LinkStyle};
use crate::FetchError;
use std::path::Path;
use url::Url;

/// Mirror crawler over a fetch capability `F` and a store `S`
///
/// All work happens on the caller's task: every fetch is awaited before
/// the next step starts, so the session's visited sets need no locking.
pub struct Crawler<F, S> {
    fetcher: F,
    store: S,
    session: CrawlSession,
    link_style: LinkStyle,
    report: CrawlReport,
}

impl<F: Fetch, S: SiteStore> Crawler<F, S> {
    /// Creates a crawler for `session`
    pub fn new(fetcher: F, store: S, session: CrawlSession) -> Self {
        let report = CrawlReport::new(&session);
        Self {
            fetcher,
            store,
            session,
            link_style: LinkStyle::default(),
            report,
        }
    }

    /// Sets how rewritten links are expressed
    pub fn with_link_style(mut self, link_style: LinkStyle) -> Self {
        self.link_style = link_style;
        self
    }

    pub fn session(&self) -> &CrawlSession {
        &self.session
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    pub fn report(&self) -> &CrawlReport {
        &self.report
    }

    /// Consumes the crawler, returning the store and the report
    pub fn into_parts(self) -> (S, CrawlReport) {
        (self.store, self.report)
    }

    /// Mirrors the session's start URL down to its maximum depth
    ///
    /// Pages are processed depth-first in discovery order. A LIFO stack
    /// holds the pending page links of every open page, pushed in reverse,
    /// which yields exactly the order of the recursive formulation: a
    /// linked page and everything below it is finished before its next
    /// sibling starts.
    ///
    /// Failures are reported per URL and never stop the crawl.
    pub async fn run(&mut self) -> &CrawlReport {
        tracing::info!(
            "Mirroring {} into {} (max depth {})",
            self.session.start_url(),
            self.session.output_dir().display(),
            self.session.max_depth()
        );

        let mut stack = vec![(
            self.session.start_url().to_string(),
            self.session.max_depth(),
        )];

        while let Some((url, remaining_depth)) = stack.pop() {
            let page_links = self.crawl_page(&url, remaining_depth).await;
            let next_depth = remaining_depth.saturating_sub(1);
            stack.extend(page_links.into_iter().rev().map(|link| (link, next_depth)));
        }

        self.report.finish();

        tracing::info!(
            "Mirror finished: {} pages, {} resources, {} failures",
            self.report.pages_saved(),
            self.report.resources_saved(),
            self.report.failures().count()
        );

        &self.report
    }

    /// Processes one page and returns the same-site page links to follow
    ///
    /// Returns nothing when the depth budget is spent, the page was already
    /// visited, or processing it failed.
    async fn crawl_page(&mut self, url: &str, remaining_depth: u32) -> Vec<String> {
        if remaining_depth == 0 || !self.session.mark_page_visited(url) {
            return Vec::new();
        }

        tracing::info!("Downloading page: {}", url);

        let page_url = match Url::parse(url) {
            Ok(page_url) => page_url,
            Err(e) => {
                tracing::warn!("Skipping unparseable page URL {}: {}", url, e);
                self.record(url, LinkKind::Page, Outcome::Unreachable, None, Some(e.to_string()));
                return Vec::new();
            }
        };

        let response = match fetch_ok(&self.fetcher, &page_url).await {
            Ok(response) => response,
            Err(e) => {
                self.record_fetch_failure(url, LinkKind::Page, &e);
                return Vec::new();
            }
        };

        let output_dir = self.session.output_dir().to_path_buf();
        let page_path = local_path(&page_url, &output_dir);

        let parsed = ParsedDocument::parse(response.body, response.content_type.as_deref());

        let mut document = match parsed {
            ParsedDocument::Parsed(document) => document,
            ParsedDocument::Unparsed(raw) => {
                tracing::debug!("{} is not HTML, saving it unmodified", url);
                self.persist(url, LinkKind::Page, &page_path, &raw, Outcome::SavedRaw, None);
                return Vec::new();
            }
        };

        let rewriter = LinkRewriter {
            base_url: &response.final_url,
            page_path: &page_path,
            output_dir: &output_dir,
            style: self.link_style,
        };
        let links = rewrite_links(&mut document, &rewriter);

        let title = document.title();
        self.persist(
            url,
            LinkKind::Page,
            &page_path,
            &document.serialize(),
            Outcome::Saved,
            title,
        );

        let mut page_links = Vec::new();
        for link in links {
            if link.kind.is_page() {
                page_links.push(link.url.to_string());
            } else {
                self.download_resource(&link.url).await;
            }
        }

        let mut to_follow = Vec::with_capacity(page_links.len());
        for link in page_links {
            if self.session.is_same_site(&link) {
                to_follow.push(link);
            } else {
                tracing::debug!("Not following external link {}", link);
                self.report.external_links_skipped += 1;
            }
        }

        to_follow
    }

    /// Downloads a resource once per session and writes it verbatim
    async fn download_resource(&mut self, url: &Url) {
        if !self.session.mark_resource_visited(url.as_str()) {
            return;
        }

        tracing::info!("Downloading resource: {}", url);

        match fetch_resource(&self.fetcher, url).await {
            Ok(bytes) => {
                let path = local_path(url, self.session.output_dir());
                self.persist(url.as_str(), LinkKind::Resource, &path, &bytes, Outcome::Saved, None);
            }
            Err(e) => self.record_fetch_failure(url.as_str(), LinkKind::Resource, &e),
        }
    }

    /// Writes `bytes` at `path` and records the outcome
    ///
    /// A failed write is reported and abandoned; the crawl carries on.
    fn persist(
        &mut self,
        url: &str,
        kind: LinkKind,
        path: &Path,
        bytes: &[u8],
        outcome: Outcome,
        title: Option<String>,
    ) {
        let written = match path.parent() {
            Some(parent) => self.store.ensure_dir(parent),
            None => Ok(()),
        }
        .and_then(|()| self.store.write_file(path, bytes));

        match written {
            Ok(()) => {
                self.report.record(ReportEntry {
                    url: url.to_string(),
                    kind,
                    outcome,
                    path: Some(path.to_path_buf()),
                    title,
                    detail: None,
                });
            }
            Err(e) => {
                tracing::warn!("Error while saving {} {}: {}", kind.as_str(), url, e);
                self.report.record(ReportEntry {
                    url: url.to_string(),
                    kind,
                    outcome: Outcome::WriteFailed,
                    path: Some(path.to_path_buf()),
                    title,
                    detail: Some(e.to_string()),
                });
            }
        }
    }

    fn record_fetch_failure(&mut self, url: &str, kind: LinkKind, error: &FetchError) {
        tracing::warn!("Error while downloading {}: {}", kind.as_str(), error);

        let outcome = match error {
            FetchError::Status { status, .. } => Outcome::HttpStatus(*status),
            FetchError::Transport { .. } => Outcome::Unreachable,
        };
        self.record(url, kind, outcome, None, Some(error.to_string()));
    }

    fn record(
        &mut self,
        url: &str,
        kind: LinkKind,
        outcome: Outcome,
        title: Option<String>,
        detail: Option<String>,
    ) {
        self.report.record(ReportEntry {
            url: url.to_string(),
            kind,
            outcome,
            path: None,
            title,
            detail,
        });
    }
}
