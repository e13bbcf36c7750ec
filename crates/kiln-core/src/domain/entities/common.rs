//! Paths inside a template or project tree.

use std::fmt;
use std::path::{Path, PathBuf};

use super::DomainError;

/// A non-absolute path, interpreted against whichever root it is joined to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RelativePath(PathBuf);

impl RelativePath {
    /// Rejects absolute paths.
    pub fn try_new(path: impl Into<PathBuf>) -> Result<Self, DomainError> {
        let path = path.into();
        if path.is_absolute() {
            return Err(DomainError::AbsolutePathNotAllowed {
                path: path.display().to_string(),
            });
        }
        Ok(Self(path))
    }

    /// `path` with `root` stripped off. `None` when `path` is not strictly
    /// below `root`.
    pub fn below(root: &Path, path: &Path) -> Option<Self> {
        path.strip_prefix(root)
            .ok()
            .filter(|rel| !rel.as_os_str().is_empty())
            .map(|rel| Self(rel.to_path_buf()))
    }

    /// Resolve against `root`.
    pub fn under(&self, root: &Path) -> PathBuf {
        root.join(&self.0)
    }

    pub fn as_path(&self) -> &Path {
        &self.0
    }
}

impl AsRef<Path> for RelativePath {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}

impl fmt::Display for RelativePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn try_new_rejects_absolute() {
        let abs = std::env::temp_dir();
        assert!(matches!(
            RelativePath::try_new(abs),
            Err(DomainError::AbsolutePathNotAllowed { .. })
        ));
    }

    #[test]
    fn below_strips_the_root() {
        let root = Path::new("tpl");
        let rel = RelativePath::below(root, &root.join("src").join("app.js")).unwrap();
        assert_eq!(rel.as_path(), Path::new("src").join("app.js"));
    }

    #[test]
    fn below_excludes_root_and_outsiders() {
        let root = Path::new("tpl");
        assert_eq!(RelativePath::below(root, root), None);
        assert_eq!(RelativePath::below(root, Path::new("other/file")), None);
    }

    #[test]
    fn under_joins_onto_root() {
        let rel = RelativePath::try_new("src/app.js").unwrap();
        assert_eq!(
            rel.under(Path::new("out")),
            PathBuf::from("out").join("src").join("app.js")
        );
    }
}
