//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from external systems.
//! The `endurance-adapters` crate provides implementations.

use std::path::{Path, PathBuf};

use crate::error::EnduranceResult;

/// Kind of a directory entry, after following symlinks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Directory,
}

/// One child of a listed directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntry {
    /// Final path segment, lossily converted to UTF-8.
    pub name: String,
    pub path: PathBuf,
    pub kind: EntryKind,
}

impl DirEntry {
    pub fn is_dir(&self) -> bool {
        self.kind == EntryKind::Directory
    }
}

/// Port for filesystem operations.
///
/// Implemented by:
/// - `endurance_adapters::filesystem::LocalFilesystem` (production)
/// - `endurance_adapters::filesystem::MemoryFilesystem` (testing)
///
/// ## Design Notes
///
/// - `read_dir` returns children in the adapter's listing order; callers
///   must not assume sorting
/// - Writes never create parent directories implicitly
#[cfg_attr(test, mockall::automock)]
pub trait Filesystem: Send + Sync {
    /// Create a directory and all parent directories.
    fn create_dir_all(&self, path: &Path) -> EnduranceResult<()>;

    /// List the immediate children of a directory.
    fn read_dir(&self, path: &Path) -> EnduranceResult<Vec<DirEntry>>;

    /// Read a file's raw bytes.
    fn read_file(&self, path: &Path) -> EnduranceResult<Vec<u8>>;

    /// Write text to a file, replacing any previous content.
    fn write_file(&self, path: &Path, content: &str) -> EnduranceResult<()>;

    /// Copy a file byte-for-byte, replacing any previous content.
    fn copy_file(&self, from: &Path, to: &Path) -> EnduranceResult<()>;

    /// Check if path exists.
    fn exists(&self, path: &Path) -> bool;

    /// Check if path exists and is a directory.
    fn is_dir(&self, path: &Path) -> bool;
}
