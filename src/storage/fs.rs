//! Filesystem storage backend

use crate::storage::traits::{SiteStore, StorageError, StorageResult};
use std::path::Path;

/// Writes the mirror to the local filesystem
#[derive(Debug, Clone, Copy, Default)]
pub struct FsStore;

impl FsStore {
    pub fn new() -> Self {
        Self
    }
}

impl SiteStore for FsStore {
    fn ensure_dir(&mut self, path: &Path) -> StorageResult<()> {
        std::fs::create_dir_all(path).map_err(|source| StorageError::CreateDir {
            path: path.to_path_buf(),
            source,
        })
    }

    fn write_file(&mut self, path: &Path, bytes: &[u8]) -> StorageResult<()> {
        if path.is_dir() {
            return Err(StorageError::IsDirectory(path.to_path_buf()));
        }

        if let Some(parent) = path.parent() {
            self.ensure_dir(parent)?;
        }

        std::fs::write(path, bytes).map_err(|source| StorageError::Write {
            path: path.to_path_buf(),
            source,
        })?;

        tracing::debug!("Wrote {} bytes to {}", bytes.len(), path.display());
        Ok(())
    }
}
