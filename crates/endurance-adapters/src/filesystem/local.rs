//! Local filesystem adapter using std::fs.

use std::io;
use std::path::Path;

use endurance_core::{
    application::{
        ApplicationError,
        ports::{DirEntry, EntryKind, Filesystem},
    },
    error::{EnduranceError, EnduranceResult},
};
use tracing::{debug, trace};
use walkdir::WalkDir;

/// Production filesystem implementation using `std::fs`.
#[derive(Debug, Clone, Copy)]
pub struct LocalFilesystem;

impl LocalFilesystem {
    /// Create a new local filesystem adapter.
    pub fn new() -> Self {
        Self
    }
}

impl Default for LocalFilesystem {
    fn default() -> Self {
        Self::new()
    }
}

impl Filesystem for LocalFilesystem {
    fn create_dir_all(&self, path: &Path) -> EnduranceResult<()> {
        std::fs::create_dir_all(path).map_err(|e| map_io_error(path, e, "create directory"))
    }

    /// Children in the order the OS returns them. Symlinks are followed so a
    /// linked package directory is listed as a directory. A link back to
    /// `path` or one of its ancestors is skipped, since walking it never ends.
    fn read_dir(&self, path: &Path) -> EnduranceResult<Vec<DirEntry>> {
        let mut entries = Vec::new();
        for entry in WalkDir::new(path)
            .min_depth(1)
            .max_depth(1)
            .follow_links(true)
        {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) if e.loop_ancestor().is_some() => {
                    debug!(path = ?e.path(), "Skipping symlink loop");
                    continue;
                }
                Err(e) => {
                    let at = e.path().unwrap_or(path).to_path_buf();
                    return Err(ApplicationError::io(&at, "list directory", e).into());
                }
            };

            let is_dir = entry.file_type().is_dir();
            if is_dir && entry.path_is_symlink() && links_to_ancestor(path, entry.path()) {
                debug!(path = %entry.path().display(), "Skipping symlink loop");
                continue;
            }

            entries.push(DirEntry {
                name: entry.file_name().to_string_lossy().into_owned(),
                path: entry.into_path(),
                kind: if is_dir {
                    EntryKind::Directory
                } else {
                    EntryKind::File
                },
            });
        }
        Ok(entries)
    }

    fn read_file(&self, path: &Path) -> EnduranceResult<Vec<u8>> {
        std::fs::read(path).map_err(|e| map_io_error(path, e, "read file"))
    }

    fn write_file(&self, path: &Path, content: &str) -> EnduranceResult<()> {
        trace!(path = %path.display(), bytes = content.len(), "write");
        std::fs::write(path, content).map_err(|e| map_io_error(path, e, "write file"))
    }

    fn copy_file(&self, from: &Path, to: &Path) -> EnduranceResult<()> {
        trace!(from = %from.display(), to = %to.display(), "copy");
        std::fs::copy(from, to)
            .map(|_| ())
            .map_err(|e| map_io_error(to, e, &format!("copy {}", from.display())))
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }
}

/// `true` when `link` resolves to `dir` itself or a directory above it.
fn links_to_ancestor(dir: &Path, link: &Path) -> bool {
    match (std::fs::canonicalize(dir), std::fs::canonicalize(link)) {
        (Ok(dir), Ok(target)) => dir.starts_with(&target),
        _ => false,
    }
}

fn map_io_error(path: &Path, e: io::Error, operation: &str) -> EnduranceError {
    trace!(path = %path.display(), error = %e, operation, "filesystem call failed");
    ApplicationError::io(path, operation, e).into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read_dir_reports_kinds() {
        let temp = tempfile::tempdir().unwrap();
        std::fs::create_dir(temp.path().join("user")).unwrap();
        std::fs::write(temp.path().join("index.js"), "x").unwrap();

        let mut entries = LocalFilesystem::new().read_dir(temp.path()).unwrap();
        entries.sort_by(|a, b| a.name.cmp(&b.name));

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].name, "index.js");
        assert_eq!(entries[0].kind, EntryKind::File);
        assert_eq!(entries[1].name, "user");
        assert!(entries[1].is_dir());
    }

    #[test]
    fn read_dir_of_missing_directory_fails() {
        let temp = tempfile::tempdir().unwrap();
        let result = LocalFilesystem::new().read_dir(&temp.path().join("absent"));
        assert!(result.is_err());
    }

    #[cfg(unix)]
    #[test]
    fn read_dir_skips_link_to_itself() {
        let temp = tempfile::tempdir().unwrap();
        let user = temp.path().join("modules/user");
        std::fs::create_dir_all(&user).unwrap();
        std::fs::write(user.join("index.js"), "x").unwrap();
        std::os::unix::fs::symlink(&user, user.join("loop")).unwrap();

        let entries = LocalFilesystem::new().read_dir(&user).unwrap();

        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].name, "index.js");
    }

    #[cfg(unix)]
    #[test]
    fn read_dir_skips_link_to_grandparent() {
        let temp = tempfile::tempdir().unwrap();
        let lib = temp.path().join("modules/user/lib");
        std::fs::create_dir_all(&lib).unwrap();
        std::os::unix::fs::symlink(temp.path().join("modules"), lib.join("up")).unwrap();

        let entries = LocalFilesystem::new().read_dir(&lib).unwrap();

        assert!(entries.is_empty());
    }

    #[cfg(unix)]
    #[test]
    fn read_dir_follows_link_to_sibling_directory() {
        let temp = tempfile::tempdir().unwrap();
        let shared = temp.path().join("shared");
        let user = temp.path().join("modules/user");
        std::fs::create_dir_all(&shared).unwrap();
        std::fs::create_dir_all(&user).unwrap();
        std::os::unix::fs::symlink(&shared, user.join("shared")).unwrap();

        let entries = LocalFilesystem::new().read_dir(&user).unwrap();

        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].name, "shared");
        assert_eq!(entries[0].kind, EntryKind::Directory);
    }

    #[test]
    fn copy_then_overwrite() {
        let temp = tempfile::tempdir().unwrap();
        let fs = LocalFilesystem::new();
        let src = temp.path().join("a.txt");
        let dst = temp.path().join("b.txt");
        std::fs::write(&src, "hello").unwrap();

        fs.copy_file(&src, &dst).unwrap();
        fs.write_file(&dst, "bye").unwrap();

        assert_eq!(fs.read_file(&src).unwrap(), b"hello");
        assert_eq!(fs.read_file(&dst).unwrap(), b"bye");
    }

    #[test]
    fn write_into_missing_parent_is_filesystem_error() {
        let temp = tempfile::tempdir().unwrap();
        let err = LocalFilesystem::new()
            .write_file(&temp.path().join("nope/a.js"), "x")
            .unwrap_err();
        assert!(matches!(
            err,
            EnduranceError::Application(ApplicationError::FilesystemError { .. })
        ));
    }
}
