//! Storage traits and error types
//!
//! This module defines the trait interface for the backends that hold the
//! mirrored files, and the errors they report.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur during storage operations
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Failed to create directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Path {0} is occupied by a directory")]
    IsDirectory(PathBuf),

    #[error("Path {0} is occupied by a file")]
    IsFile(PathBuf),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Trait for mirror storage backends
///
/// The crawler never touches the filesystem directly: every directory and
/// file it produces goes through this trait. Failures are reported per call
/// and never abort the crawl.
pub trait SiteStore {
    /// Ensures a directory (and all of its parents) exists
    fn ensure_dir(&mut self, path: &Path) -> StorageResult<()>;

    /// Writes `bytes` to `path`, replacing any previous content
    ///
    /// Implementations create missing parent directories.
    fn write_file(&mut self, path: &Path, bytes: &[u8]) -> StorageResult<()>;
}

impl<S: SiteStore + ?Sized> SiteStore for &mut S {
    fn ensure_dir(&mut self, path: &Path) -> StorageResult<()> {
        (**self).ensure_dir(path)
    }

    fn write_file(&mut self, path: &Path, bytes: &[u8]) -> StorageResult<()> {
        (**self).write_file(path, bytes)
    }
}
