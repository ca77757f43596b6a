//! In-memory filesystem adapter for testing.

use std::{
    collections::{BTreeMap, BTreeSet},
    path::{Path, PathBuf},
    sync::{Arc, PoisonError, RwLock},
};

use endurance_core::{
    application::{
        ApplicationError,
        ports::{DirEntry, EntryKind, Filesystem},
    },
    error::EnduranceResult,
};

/// In-memory filesystem for testing.
///
/// Clones share state, so a test can hand one clone to a service and
/// inspect the other. Directory listings are sorted by name.
#[derive(Debug, Clone, Default)]
pub struct MemoryFilesystem {
    inner: Arc<RwLock<MemoryFilesystemInner>>,
}

#[derive(Debug, Default)]
struct MemoryFilesystemInner {
    files: BTreeMap<PathBuf, Vec<u8>>,
    directories: BTreeSet<PathBuf>,
    read_only: Vec<PathBuf>,
}

impl MemoryFilesystemInner {
    fn insert_dirs(&mut self, path: &Path) {
        let mut current = PathBuf::new();
        for component in path.components() {
            current.push(component);
            self.directories.insert(current.clone());
        }
    }

    fn check_writable(&self, path: &Path) -> EnduranceResult<()> {
        if self.read_only.iter().any(|p| path.starts_with(p)) {
            return Err(ApplicationError::io(path, "write", "permission denied").into());
        }
        Ok(())
    }

    fn check_parent(&self, path: &Path) -> EnduranceResult<()> {
        match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => {
                if self.directories.contains(parent) {
                    Ok(())
                } else {
                    Err(ApplicationError::FilesystemError {
                        path: path.to_path_buf(),
                        reason: "Parent directory does not exist".into(),
                    }
                    .into())
                }
            }
            _ => Ok(()),
        }
    }
}

impl MemoryFilesystem {
    /// Create a new empty memory filesystem.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a file, creating its parent directories.
    pub fn add_file(&self, path: impl AsRef<Path>, content: impl AsRef<[u8]>) -> &Self {
        let path = path.as_ref();
        let mut inner = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        if let Some(parent) = path.parent() {
            inner.insert_dirs(parent);
        }
        inner
            .files
            .insert(path.to_path_buf(), content.as_ref().to_vec());
        self
    }

    /// Seed an empty directory and its parents.
    pub fn add_dir(&self, path: impl AsRef<Path>) -> &Self {
        let mut inner = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        inner.insert_dirs(path.as_ref());
        self
    }

    /// Make every write at or below `path` fail with a permission error.
    pub fn deny_writes(&self, path: impl AsRef<Path>) -> &Self {
        let mut inner = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        inner.read_only.push(path.as_ref().to_path_buf());
        self
    }

    /// A file's content as text (testing helper).
    pub fn contents(&self, path: impl AsRef<Path>) -> Option<String> {
        self.bytes(path)
            .map(|b| String::from_utf8_lossy(&b).into_owned())
    }

    /// A file's raw content (testing helper).
    pub fn bytes(&self, path: impl AsRef<Path>) -> Option<Vec<u8>> {
        let inner = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        inner.files.get(path.as_ref()).cloned()
    }

    /// All files, sorted.
    pub fn list_files(&self) -> Vec<PathBuf> {
        let inner = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        inner.files.keys().cloned().collect()
    }

    /// All files at or below `root`, relative to it, sorted.
    pub fn files_under(&self, root: impl AsRef<Path>) -> Vec<PathBuf> {
        let root = root.as_ref();
        self.list_files()
            .into_iter()
            .filter_map(|p| p.strip_prefix(root).ok().map(Path::to_path_buf))
            .collect()
    }
}

impl Filesystem for MemoryFilesystem {
    fn create_dir_all(&self, path: &Path) -> EnduranceResult<()> {
        let mut inner = self
            .inner
            .write()
            .map_err(|_| ApplicationError::StoreLockError)?;

        if !inner.directories.contains(path) {
            inner.check_writable(path)?;
        }
        inner.insert_dirs(path);
        Ok(())
    }

    fn read_dir(&self, path: &Path) -> EnduranceResult<Vec<DirEntry>> {
        let inner = self
            .inner
            .read()
            .map_err(|_| ApplicationError::StoreLockError)?;

        if !inner.directories.contains(path) {
            return Err(ApplicationError::io(path, "list directory", "no such directory").into());
        }

        let dirs = inner
            .directories
            .iter()
            .filter(|p| p.parent() == Some(path))
            .map(|p| (p, EntryKind::Directory));
        let files = inner
            .files
            .keys()
            .filter(|p| p.parent() == Some(path))
            .map(|p| (p, EntryKind::File));

        let mut entries: Vec<DirEntry> = dirs
            .chain(files)
            .filter_map(|(p, kind)| {
                let name = p.file_name()?.to_string_lossy().into_owned();
                Some(DirEntry {
                    name,
                    path: p.clone(),
                    kind,
                })
            })
            .collect();
        entries.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(entries)
    }

    fn read_file(&self, path: &Path) -> EnduranceResult<Vec<u8>> {
        let inner = self
            .inner
            .read()
            .map_err(|_| ApplicationError::StoreLockError)?;

        inner
            .files
            .get(path)
            .cloned()
            .ok_or_else(|| ApplicationError::io(path, "read file", "no such file").into())
    }

    fn write_file(&self, path: &Path, content: &str) -> EnduranceResult<()> {
        let mut inner = self
            .inner
            .write()
            .map_err(|_| ApplicationError::StoreLockError)?;

        inner.check_writable(path)?;
        inner.check_parent(path)?;
        inner
            .files
            .insert(path.to_path_buf(), content.as_bytes().to_vec());
        Ok(())
    }

    fn copy_file(&self, from: &Path, to: &Path) -> EnduranceResult<()> {
        let mut inner = self
            .inner
            .write()
            .map_err(|_| ApplicationError::StoreLockError)?;

        let content = inner
            .files
            .get(from)
            .cloned()
            .ok_or_else(|| ApplicationError::io(from, "copy file", "no such file"))?;
        inner.check_writable(to)?;
        inner.check_parent(to)?;
        inner.files.insert(to.to_path_buf(), content);
        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        self.inner
            .read()
            .map(|inner| inner.files.contains_key(path) || inner.directories.contains(path))
            .unwrap_or(false)
    }

    fn is_dir(&self, path: &Path) -> bool {
        self.inner
            .read()
            .map(|inner| inner.directories.contains(path))
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_file_creates_parents() {
        let fs = MemoryFilesystem::new();
        fs.add_file("/a/b/c.js", "x");
        assert!(fs.is_dir(Path::new("/a/b")));
        assert!(fs.exists(Path::new("/a/b/c.js")));
        assert!(!fs.is_dir(Path::new("/a/b/c.js")));
    }

    #[test]
    fn read_dir_lists_immediate_children_only() {
        let fs = MemoryFilesystem::new();
        fs.add_file("/m/user/a.js", "")
            .add_file("/m/index.js", "")
            .add_dir("/m/empty");

        let names: Vec<_> = fs
            .read_dir(Path::new("/m"))
            .unwrap()
            .into_iter()
            .map(|e| (e.name, e.kind))
            .collect();
        assert_eq!(
            names,
            vec![
                ("empty".to_string(), EntryKind::Directory),
                ("index.js".to_string(), EntryKind::File),
                ("user".to_string(), EntryKind::Directory),
            ]
        );
    }

    #[test]
    fn write_requires_parent() {
        let fs = MemoryFilesystem::new();
        assert!(fs.write_file(Path::new("/x/y.js"), "").is_err());
        fs.add_dir("/x");
        assert!(fs.write_file(Path::new("/x/y.js"), "").is_ok());
    }

    #[test]
    fn denied_writes_fail() {
        let fs = MemoryFilesystem::new();
        fs.add_dir("/out").deny_writes("/out/locked");
        assert!(fs.create_dir_all(Path::new("/out/locked")).is_err());
        assert!(fs.create_dir_all(Path::new("/out/open")).is_ok());
    }

    #[test]
    fn copy_is_byte_identical() {
        let fs = MemoryFilesystem::new();
        fs.add_file("/src/logo.png", [0u8, 159, 146, 150]).add_dir("/dst");
        fs.copy_file(Path::new("/src/logo.png"), Path::new("/dst/logo.png"))
            .unwrap();
        assert_eq!(fs.bytes("/dst/logo.png"), fs.bytes("/src/logo.png"));
    }

    #[test]
    fn clones_share_state() {
        let fs = MemoryFilesystem::new();
        let other = fs.clone();
        fs.add_file("/a.js", "x");
        assert_eq!(other.contents("/a.js").as_deref(), Some("x"));
        other.add_dir("/b");
        assert!(fs.is_dir(Path::new("/b")));
    }
}
