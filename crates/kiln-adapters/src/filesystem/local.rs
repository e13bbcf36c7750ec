//! Local filesystem adapter using std::fs.

use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::Path;

use tracing::{trace, warn};
use walkdir::WalkDir;

use kiln_core::{
    application::ports::Filesystem,
    domain::{CopyOutcome, ExcludeRules, RelativePath, WalkEntry, WalkListing},
    error::KilnResult,
};

use super::map_io_error;

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
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn create_dir_all(&self, path: &Path) -> KilnResult<()> {
        fs::create_dir_all(path).map_err(|e| map_io_error(path, e, "create directory"))
    }

    fn is_dir_empty(&self, path: &Path) -> KilnResult<bool> {
        let mut entries =
            fs::read_dir(path).map_err(|e| map_io_error(path, e, "read directory"))?;
        Ok(entries.next().is_none())
    }

    fn read_to_string(&self, path: &Path) -> KilnResult<String> {
        fs::read_to_string(path).map_err(|e| map_io_error(path, e, "read file"))
    }

    fn write_file(&self, path: &Path, content: &str) -> KilnResult<()> {
        fs::write(path, content).map_err(|e| map_io_error(path, e, "write file"))
    }

    fn copy_file_if_absent(&self, from: &Path, to: &Path) -> KilnResult<CopyOutcome> {
        let mut source = File::open(from).map_err(|e| map_io_error(from, e, "open file"))?;

        // create_new makes the existence check and the create atomic.
        let dest = match OpenOptions::new().write(true).create_new(true).open(to) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
                trace!(path = %to.display(), "Destination exists, skipping");
                return Ok(CopyOutcome::Skipped);
            }
            Err(e) => return Err(map_io_error(to, e, "create file")),
        };

        let filled = fill_new_file(&mut source, dest, from, to);
        if filled.is_err() {
            // A half-written file would be skipped as present on the next run.
            if let Err(e) = fs::remove_file(to) {
                warn!(path = %to.display(), error = %e, "Could not remove partial copy");
            }
        }
        filled?;

        Ok(CopyOutcome::Copied)
    }

    fn walk(&self, root: &Path, rules: &ExcludeRules) -> KilnResult<WalkListing> {
        let mut excluded = 0;
        let mut entries = Vec::new();

        let walker = WalkDir::new(root)
            .min_depth(1)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| {
                let keep = entry
                    .path()
                    .strip_prefix(root)
                    .map(|relative| !rules.is_excluded(relative))
                    .unwrap_or(true);
                if !keep {
                    trace!(path = %entry.path().display(), "Excluded");
                    excluded += 1;
                }
                keep
            });

        for entry in walker {
            let entry = entry.map_err(|e| {
                let path = e.path().unwrap_or(root).to_path_buf();
                match e.into_io_error() {
                    Some(io) => map_io_error(&path, io, "walk directory"),
                    None => map_io_error(
                        &path,
                        io::Error::other("filesystem loop detected"),
                        "walk directory",
                    ),
                }
            })?;

            let Some(relative) = RelativePath::below(root, entry.path()) else {
                continue;
            };
            entries.push(if entry.file_type().is_dir() {
                WalkEntry::directory(relative)
            } else {
                WalkEntry::file(relative)
            });
        }

        Ok(WalkListing { entries, excluded })
    }
}

/// Copy `source` into the freshly created `dest`, then mirror permissions.
///
/// Takes `dest` by value so the handle is closed before any cleanup.
fn fill_new_file(source: &mut File, mut dest: File, from: &Path, to: &Path) -> KilnResult<()> {
    io::copy(source, &mut dest).map_err(|e| map_io_error(to, e, "write file"))?;
    drop(dest);

    // Keep the executable bit on scripts.
    let permissions = source
        .metadata()
        .map_err(|e| map_io_error(from, e, "get metadata"))?
        .permissions();
    fs::set_permissions(to, permissions).map_err(|e| map_io_error(to, e, "set permissions"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use kiln_core::{application::ApplicationError, error::KilnError};
    use tempfile::TempDir;

    fn write(root: &Path, relative: &str, content: &str) {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    #[test]
    fn copy_file_if_absent_copies_new_files() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "a.txt", "hello");
        let fs_ = LocalFilesystem::new();

        let outcome = fs_
            .copy_file_if_absent(&dir.path().join("a.txt"), &dir.path().join("b.txt"))
            .unwrap();

        assert_eq!(outcome, CopyOutcome::Copied);
        assert_eq!(fs::read_to_string(dir.path().join("b.txt")).unwrap(), "hello");
    }

    #[test]
    fn copy_file_if_absent_never_overwrites() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "a.txt", "template");
        write(dir.path(), "b.txt", "user edits");
        let fs_ = LocalFilesystem::new();

        let outcome = fs_
            .copy_file_if_absent(&dir.path().join("a.txt"), &dir.path().join("b.txt"))
            .unwrap();

        assert_eq!(outcome, CopyOutcome::Skipped);
        assert_eq!(
            fs::read_to_string(dir.path().join("b.txt")).unwrap(),
            "user edits"
        );
    }

    #[cfg(unix)]
    #[test]
    fn failed_copy_leaves_no_partial_file() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "src/app.js", "module.exports = {};");
        let fs_ = LocalFilesystem::new();
        let dst = dir.path().join("out.js");

        // Reading a directory as a file fails after the destination exists.
        let err = fs_
            .copy_file_if_absent(&dir.path().join("src"), &dst)
            .unwrap_err();
        assert!(err.to_string().contains("out.js"));
        assert!(!dst.exists());

        let outcome = fs_
            .copy_file_if_absent(&dir.path().join("src/app.js"), &dst)
            .unwrap();
        assert_eq!(outcome, CopyOutcome::Copied);
        assert_eq!(fs::read_to_string(&dst).unwrap(), "module.exports = {};");
    }

    #[test]
    fn walk_prunes_excluded_trees_and_sorts() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "package.json", "{}");
        write(dir.path(), "src/b.js", "");
        write(dir.path(), "src/a.js", "");
        write(dir.path(), "node_modules/express/index.js", "");
        write(dir.path(), "npm-debug.log", "");

        let listing = LocalFilesystem::new()
            .walk(dir.path(), &ExcludeRules::standard())
            .unwrap();

        let paths: Vec<String> = listing
            .entries
            .iter()
            .map(|e| e.relative.to_string().replace('\\', "/"))
            .collect();
        assert_eq!(paths, vec!["package.json", "src", "src/a.js", "src/b.js"]);
        assert_eq!(listing.excluded, 2);
    }

    #[test]
    fn is_dir_empty_sees_hidden_files() {
        let dir = TempDir::new().unwrap();
        let fs_ = LocalFilesystem::new();
        assert!(fs_.is_dir_empty(dir.path()).unwrap());

        write(dir.path(), ".env", "");
        assert!(!fs_.is_dir_empty(dir.path()).unwrap());
    }

    #[test]
    fn missing_file_is_a_filesystem_error() {
        let dir = TempDir::new().unwrap();
        let err = LocalFilesystem::new()
            .read_to_string(&dir.path().join("nope"))
            .unwrap_err();
        assert!(matches!(
            err,
            KilnError::Application(ApplicationError::FilesystemError { .. })
        ));
    }

    #[cfg(unix)]
    #[test]
    fn copy_preserves_executable_bit() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        write(dir.path(), "run.sh", "#!/bin/sh\n");
        let src = dir.path().join("run.sh");
        fs::set_permissions(&src, fs::Permissions::from_mode(0o755)).unwrap();

        let dst = dir.path().join("copy.sh");
        LocalFilesystem::new().copy_file_if_absent(&src, &dst).unwrap();

        let mode = fs::metadata(&dst).unwrap().permissions().mode();
        assert_eq!(mode & 0o111, 0o111);
    }
}
