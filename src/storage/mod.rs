//! Storage module for persisting mirrored files
//!
//! This module handles everything the crawler writes, including:
//! - Directory creation for the mirror layout
//! - Writing rewritten pages and verbatim resources
//! - An in-memory backend for tests

mod fs;
mod memory;
mod traits;

pub use fs::FsStore;
pub use memory::MemoryStore;
pub use traits::{SiteStore, StorageError, StorageResult};
