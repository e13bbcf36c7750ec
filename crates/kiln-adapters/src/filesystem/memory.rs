//! In-memory filesystem adapter for testing.

use std::{
    collections::{BTreeMap, BTreeSet},
    path::{Path, PathBuf},
    sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard},
};

use kiln_core::{
    application::{ApplicationError, ports::Filesystem},
    domain::{CopyOutcome, ExcludeRules, RelativePath, WalkEntry, WalkListing},
    error::{KilnError, KilnResult},
};

/// In-memory filesystem for testing.
///
/// Clones share state, so a test can hand one clone to a service and
/// inspect the other afterwards.
#[derive(Debug, Clone, Default)]
pub struct MemoryFilesystem {
    inner: Arc<RwLock<MemoryFilesystemInner>>,
}

#[derive(Debug, Default)]
struct MemoryFilesystemInner {
    files: BTreeMap<PathBuf, String>,
    directories: BTreeSet<PathBuf>,
    /// Writes under these paths fail with the paired error.
    faults: Vec<(PathBuf, Fault)>,
}

#[derive(Debug, Clone, Copy)]
enum Fault {
    PermissionDenied,
    DiskFull,
}

impl MemoryFilesystem {
    /// Create a new empty memory filesystem.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a file, creating its parent directories (testing helper).
    pub fn add_file(&self, path: impl AsRef<Path>, content: impl Into<String>) -> &Self {
        if let Ok(mut inner) = self.inner.write() {
            let path = path.as_ref();
            if let Some(parent) = path.parent() {
                insert_ancestors(&mut inner.directories, parent);
            }
            inner.files.insert(path.to_path_buf(), content.into());
        }
        self
    }

    /// Seed a directory and its ancestors (testing helper).
    pub fn add_dir(&self, path: impl AsRef<Path>) -> &Self {
        if let Ok(mut inner) = self.inner.write() {
            insert_ancestors(&mut inner.directories, path.as_ref());
        }
        self
    }

    /// Make every write under `path` fail with a permission error.
    pub fn deny_writes_under(&self, path: impl Into<PathBuf>) {
        if let Ok(mut inner) = self.inner.write() {
            inner.faults.push((path.into(), Fault::PermissionDenied));
        }
    }

    /// Make every write under `path` fail as if the disk were full.
    pub fn fill_disk_under(&self, path: impl Into<PathBuf>) {
        if let Ok(mut inner) = self.inner.write() {
            inner.faults.push((path.into(), Fault::DiskFull));
        }
    }

    /// Read a file's content (testing helper).
    pub fn read_file(&self, path: impl AsRef<Path>) -> Option<String> {
        let inner = self.inner.read().ok()?;
        inner.files.get(path.as_ref()).cloned()
    }

    /// List all files, sorted.
    pub fn list_files(&self) -> Vec<PathBuf> {
        self.inner
            .read()
            .map(|inner| inner.files.keys().cloned().collect())
            .unwrap_or_default()
    }

    /// List all files under `root`, relative to it.
    pub fn files_under(&self, root: impl AsRef<Path>) -> Vec<PathBuf> {
        let root = root.as_ref();
        self.list_files()
            .into_iter()
            .filter_map(|p| p.strip_prefix(root).ok().map(Path::to_path_buf))
            .collect()
    }

    fn read(&self) -> KilnResult<RwLockReadGuard<'_, MemoryFilesystemInner>> {
        self.inner.read().map_err(|_| lock_poisoned())
    }

    fn write(&self) -> KilnResult<RwLockWriteGuard<'_, MemoryFilesystemInner>> {
        self.inner.write().map_err(|_| lock_poisoned())
    }
}

impl MemoryFilesystemInner {
    fn check_writable(&self, path: &Path) -> KilnResult<()> {
        let fault = self
            .faults
            .iter()
            .find(|(root, _)| path.starts_with(root))
            .map(|(_, fault)| *fault);
        let path = path.to_path_buf();
        match fault {
            None => Ok(()),
            Some(Fault::PermissionDenied) => Err(ApplicationError::PermissionDenied { path }.into()),
            Some(Fault::DiskFull) => Err(ApplicationError::OutOfDiskSpace { path }.into()),
        }
    }

    fn check_parent(&self, path: &Path) -> KilnResult<()> {
        match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() && !self.directories.contains(parent) => {
                Err(ApplicationError::FilesystemError {
                    path: path.to_path_buf(),
                    reason: "parent directory does not exist".into(),
                }
                .into())
            }
            _ => Ok(()),
        }
    }
}

impl Filesystem for MemoryFilesystem {
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

    fn create_dir_all(&self, path: &Path) -> KilnResult<()> {
        let mut inner = self.write()?;
        if inner.files.contains_key(path) {
            return Err(ApplicationError::FilesystemError {
                path: path.to_path_buf(),
                reason: "a file already exists at this path".into(),
            }
            .into());
        }
        if !inner.directories.contains(path) {
            inner.check_writable(path)?;
        }
        insert_ancestors(&mut inner.directories, path);
        Ok(())
    }

    fn is_dir_empty(&self, path: &Path) -> KilnResult<bool> {
        let inner = self.read()?;
        if !inner.directories.contains(path) {
            return Err(not_found(path));
        }
        let has_child = |p: &PathBuf| p.parent() == Some(path);
        Ok(!inner.files.keys().any(has_child) && !inner.directories.iter().any(has_child))
    }

    fn read_to_string(&self, path: &Path) -> KilnResult<String> {
        self.read()?
            .files
            .get(path)
            .cloned()
            .ok_or_else(|| not_found(path))
    }

    fn write_file(&self, path: &Path, content: &str) -> KilnResult<()> {
        let mut inner = self.write()?;
        inner.check_parent(path)?;
        inner.check_writable(path)?;
        inner.files.insert(path.to_path_buf(), content.to_string());
        Ok(())
    }

    fn copy_file_if_absent(&self, from: &Path, to: &Path) -> KilnResult<CopyOutcome> {
        let mut inner = self.write()?;
        let content = inner.files.get(from).cloned().ok_or_else(|| not_found(from))?;
        if inner.files.contains_key(to) || inner.directories.contains(to) {
            return Ok(CopyOutcome::Skipped);
        }
        inner.check_parent(to)?;
        inner.check_writable(to)?;
        inner.files.insert(to.to_path_buf(), content);
        Ok(CopyOutcome::Copied)
    }

    fn walk(&self, root: &Path, rules: &ExcludeRules) -> KilnResult<WalkListing> {
        let inner = self.read()?;
        if !inner.directories.contains(root) {
            return Err(not_found(root));
        }

        // BTree order on paths is component-wise: parents first, then
        // children, siblings by name.
        let mut all: Vec<(RelativePath, bool)> = inner
            .directories
            .iter()
            .map(|p| (p, true))
            .chain(inner.files.keys().map(|p| (p, false)))
            .filter_map(|(p, is_dir)| RelativePath::below(root, p).map(|rel| (rel, is_dir)))
            .collect();
        all.sort();

        let mut listing = WalkListing::default();
        for (relative, is_dir) in all {
            if rules.is_excluded(relative.as_path()) {
                // Count only the topmost pruned entry, like a real walk.
                let parent_excluded = relative
                    .as_path()
                    .parent()
                    .is_some_and(|p| !p.as_os_str().is_empty() && rules.is_excluded(p));
                if !parent_excluded {
                    listing.excluded += 1;
                }
                continue;
            }
            listing.entries.push(if is_dir {
                WalkEntry::directory(relative)
            } else {
                WalkEntry::file(relative)
            });
        }
        Ok(listing)
    }
}

fn insert_ancestors(directories: &mut BTreeSet<PathBuf>, path: &Path) {
    let mut current = PathBuf::new();
    for component in path.components() {
        current.push(component);
        directories.insert(current.clone());
    }
}

fn not_found(path: &Path) -> KilnError {
    ApplicationError::FilesystemError {
        path: path.to_path_buf(),
        reason: "no such file or directory".into(),
    }
    .into()
}

fn lock_poisoned() -> KilnError {
    KilnError::Internal {
        message: "memory filesystem lock poisoned".into(),
    }
}
