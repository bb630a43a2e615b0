//! Crawler module for mirroring a site
//!
//! This module contains the core mirroring logic, including:
//! - HTTP fetching behind the `Fetch` seam
//! - Resource downloads
//! - The depth-limited crawl engine

mod engine;
mod fetcher;
mod resource;

pub use engine::Crawler;
pub use fetcher::{build_http_client, fetch_ok, Fetch, FetchResponse, HttpFetcher};
pub use resource::fetch_resource;

use crate::config::Config;
use crate::output::CrawlReport;
use crate::state::CrawlSession;
use crate::storage::{FsStore, SiteStore};
use crate::{ConfigError, MirrorError};

/// Runs a complete mirror operation
///
/// This is the main entry point for mirroring a site. It will:
/// 1. Build the HTTP client
/// 2. Create the output directory
/// 3. Crawl from the start URL down to the configured depth
/// 4. Return the report of everything that happened
///
/// Per-URL failures end up in the report; only setup problems are errors.
///
/// # Arguments
///
/// * `config` - A validated configuration
///
/// # Returns
///
/// * `Ok(CrawlReport)` - The crawl ran to completion
/// * `Err(MirrorError)` - The crawl could not be started
pub async fn mirror(config: &Config) -> Result<CrawlReport, MirrorError> {
    let start_url = config
        .mirror
        .start_url
        .clone()
        .ok_or(ConfigError::MissingStartUrl)?;

    let fetcher = HttpFetcher::new(&config.http)?;
    let mut store = FsStore::new();
    store.ensure_dir(&config.mirror.output_dir)?;

    let session = CrawlSession::new(
        start_url,
        config.mirror.output_dir.clone(),
        config.mirror.max_depth,
    );

    let mut crawler = Crawler::new(fetcher, store, session).with_link_style(config.mirror.link_style);
    crawler.run().await;

    let (_, report) = crawler.into_parts();
    Ok(report)
}
