//! In-memory storage backend

use crate::storage::traits::{SiteStore, StorageError, StorageResult};
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

/// Keeps the mirror in memory
///
/// Mirrors the rules of a real filesystem closely enough for the crawler: a
/// path is either a file or a directory, never both.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    files: BTreeMap<PathBuf, Vec<u8>>,
    dirs: BTreeSet<PathBuf>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the content written at `path`, if any
    pub fn get(&self, path: &Path) -> Option<&[u8]> {
        self.files.get(path).map(Vec::as_slice)
    }

    /// Returns the content at `path` as UTF-8 text, if any
    pub fn get_text(&self, path: &Path) -> Option<&str> {
        self.get(path).and_then(|bytes| std::str::from_utf8(bytes).ok())
    }

    /// Returns true if a file has been written at `path`
    pub fn contains(&self, path: &Path) -> bool {
        self.files.contains_key(path)
    }

    /// Returns true if `path` is a known directory
    pub fn is_dir(&self, path: &Path) -> bool {
        self.dirs.contains(path)
    }

    /// Paths of all written files, in sorted order
    pub fn paths(&self) -> impl Iterator<Item = &Path> {
        self.files.keys().map(PathBuf::as_path)
    }

    /// Number of written files
    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

impl SiteStore for MemoryStore {
    fn ensure_dir(&mut self, path: &Path) -> StorageResult<()> {
        for ancestor in path.ancestors() {
            if ancestor.as_os_str().is_empty() {
                continue;
            }
            if self.files.contains_key(ancestor) {
                return Err(StorageError::IsFile(ancestor.to_path_buf()));
            }
        }

        for ancestor in path.ancestors() {
            if !ancestor.as_os_str().is_empty() {
                self.dirs.insert(ancestor.to_path_buf());
            }
        }

        Ok(())
    }

    fn write_file(&mut self, path: &Path, bytes: &[u8]) -> StorageResult<()> {
        if self.dirs.contains(path) {
            return Err(StorageError::IsDirectory(path.to_path_buf()));
        }

        if let Some(parent) = path.parent() {
            self.ensure_dir(parent)?;
        }

        self.files.insert(path.to_path_buf(), bytes.to_vec());
        Ok(())
    }
}
