//! State module for tracking crawl progress
//!
//! # Components
//!
//! - `CrawlSession`: the configuration of one crawl plus its dedup sets
//! - `Outcome`: how processing of a single URL ended

mod outcome;
mod session;

// Re-export main types
pub use outcome::Outcome;
pub use session::CrawlSession;
