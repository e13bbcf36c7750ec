//! Decide where a project goes and make sure it is safe to write there.

use std::path::{Path, PathBuf};

use tracing::{debug, instrument};

use crate::application::{ApplicationError, ports::Filesystem};
use crate::domain::ProjectName;
use crate::error::KilnResult;

/// What the resolver found at the target path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirectoryState {
    /// Nothing there yet; it will be created.
    Missing,
    /// An empty directory; it will be reused as-is.
    Empty,
}

/// A target directory that is ready to receive the template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedDirectory {
    pub path: PathBuf,
    /// `true` if the directory existed (empty) before this run.
    pub reused: bool,
}

/// Resolves `cwd/name`, creating it or reusing it when empty.
///
/// Never deletes or empties anything.
pub struct DirectoryResolver<'a> {
    filesystem: &'a dyn Filesystem,
}

impl<'a> DirectoryResolver<'a> {
    pub fn new(filesystem: &'a dyn Filesystem) -> Self {
        Self { filesystem }
    }

    /// Look at `path` without changing anything.
    pub fn inspect(&self, path: &Path) -> KilnResult<DirectoryState> {
        if !self.filesystem.exists(path) {
            return Ok(DirectoryState::Missing);
        }
        if !self.filesystem.is_dir(path) {
            return Err(ApplicationError::PathNotDirectory {
                path: path.to_path_buf(),
            }
            .into());
        }
        if self.filesystem.is_dir_empty(path)? {
            Ok(DirectoryState::Empty)
        } else {
            Err(ApplicationError::DirectoryNotEmpty {
                path: path.to_path_buf(),
            }
            .into())
        }
    }

    #[instrument(skip(self), fields(name = %name, cwd = %cwd.display()))]
    pub fn resolve(&self, name: &ProjectName, cwd: &Path) -> KilnResult<ResolvedDirectory> {
        let path = cwd.join(name.as_str());

        match self.inspect(&path)? {
            DirectoryState::Missing => {
                self.filesystem.create_dir_all(&path)?;
                debug!(path = %path.display(), "Created project directory");
                Ok(ResolvedDirectory {
                    path,
                    reused: false,
                })
            }
            DirectoryState::Empty => {
                debug!(path = %path.display(), "Reusing empty directory");
                Ok(ResolvedDirectory { path, reused: true })
            }
        }
    }
}
