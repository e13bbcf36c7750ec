//! Rewrite `{{TOKEN}}` markers in a file in place.

use std::path::Path;

use tracing::debug;

use crate::application::ports::Filesystem;
use crate::domain::PlaceholderMap;
use crate::error::KilnResult;

/// Applies a [`PlaceholderMap`] to files named by the caller.
pub struct PlaceholderSubstituter<'a> {
    filesystem: &'a dyn Filesystem,
}

impl<'a> PlaceholderSubstituter<'a> {
    pub fn new(filesystem: &'a dyn Filesystem) -> Self {
        Self { filesystem }
    }

    /// Returns whether the file changed. Unchanged files are not rewritten.
    pub fn substitute(&self, path: &Path, map: &PlaceholderMap) -> KilnResult<bool> {
        let original = self.filesystem.read_to_string(path)?;
        let substituted = map.apply(&original);
        if substituted == original {
            return Ok(false);
        }
        self.filesystem.write_file(path, &substituted)?;
        debug!(path = %path.display(), "Substituted placeholders");
        Ok(true)
    }
}
