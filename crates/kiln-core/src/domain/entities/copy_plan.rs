//! What the template copier will do, and what it did.

use std::path::{Component, Path, PathBuf};

use super::common::RelativePath;

/// Path segments that never leave the template root.
pub const EXCLUDED_SEGMENTS: [&str; 7] =
    ["node_modules", ".git", ".hg", ".svn", "logs", "dist", "build"];

/// File-name suffixes that never leave the template root.
pub const EXCLUDED_SUFFIXES: [&str; 1] = [".log"];

/// Kind of a walked filesystem entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryKind {
    File,
    Directory,
}

/// One entry found while walking a template root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalkEntry {
    /// Path relative to the walked root.
    pub relative: RelativePath,
    pub kind: EntryKind,
}

impl WalkEntry {
    pub fn file(relative: RelativePath) -> Self {
        Self {
            relative,
            kind: EntryKind::File,
        }
    }

    pub fn directory(relative: RelativePath) -> Self {
        Self {
            relative,
            kind: EntryKind::Directory,
        }
    }
}

/// Result of walking a template root with exclusions applied.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WalkListing {
    /// Kept entries, parents before children.
    pub entries: Vec<WalkEntry>,
    /// Entries pruned by the rules. A pruned directory counts once; its
    /// contents are never visited.
    pub excluded: usize,
}

/// Denylist applied to paths relative to the template root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExcludeRules {
    segments: Vec<String>,
    suffixes: Vec<String>,
}

impl Default for ExcludeRules {
    fn default() -> Self {
        Self::standard()
    }
}

impl ExcludeRules {
    /// Dependency folders, VCS metadata, logs and build output.
    pub fn standard() -> Self {
        Self {
            segments: EXCLUDED_SEGMENTS.iter().map(|s| s.to_string()).collect(),
            suffixes: EXCLUDED_SUFFIXES.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// `true` if `relative` or any of its ancestors is denylisted.
    pub fn is_excluded(&self, relative: &Path) -> bool {
        let segment_hit = relative.components().any(|component| match component {
            Component::Normal(segment) => segment
                .to_str()
                .is_some_and(|s| self.segments.iter().any(|ex| ex == s)),
            _ => false,
        });
        if segment_hit {
            return true;
        }

        relative
            .file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|name| self.suffixes.iter().any(|suffix| name.ends_with(suffix.as_str())))
    }
}

/// One (source, destination) pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CopyEntry {
    pub relative: RelativePath,
    pub source: PathBuf,
    pub destination: PathBuf,
    pub kind: EntryKind,
}

/// Every entry that would be materialised, in walk order (parents first).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CopyPlan {
    pub entries: Vec<CopyEntry>,
    /// Walked entries dropped by the [`ExcludeRules`].
    pub excluded: usize,
}

impl CopyPlan {
    pub fn files(&self) -> impl Iterator<Item = &CopyEntry> {
        self.entries.iter().filter(|e| e.kind == EntryKind::File)
    }

    pub fn directories(&self) -> impl Iterator<Item = &CopyEntry> {
        self.entries.iter().filter(|e| e.kind == EntryKind::Directory)
    }

    pub fn file_count(&self) -> usize {
        self.files().count()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Outcome of copying a single file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyOutcome {
    Copied,
    /// Destination already existed; left untouched.
    Skipped,
}

/// Outcome of a whole copy run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CopyReport {
    pub copied: usize,
    /// Files left alone because they were already present.
    pub skipped: Vec<RelativePath>,
    pub directories: usize,
    pub excluded: usize,
}

impl CopyReport {
    pub fn record(&mut self, relative: &RelativePath, outcome: CopyOutcome) {
        match outcome {
            CopyOutcome::Copied => self.copied += 1,
            CopyOutcome::Skipped => self.skipped.push(relative.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rel(path: &str) -> RelativePath {
        RelativePath::try_new(path).unwrap()
    }

    fn excluded(path: &str) -> bool {
        ExcludeRules::standard().is_excluded(Path::new(path))
    }

    #[test]
    fn excludes_denylisted_segments_anywhere() {
        assert!(excluded("node_modules"));
        assert!(excluded("node_modules/express/index.js"));
        assert!(excluded("src/node_modules/x.js"));
        assert!(excluded(".git/HEAD"));
        assert!(excluded("vendor/.svn/entries"));
        assert!(excluded("logs/app.txt"));
        assert!(excluded("dist"));
        assert!(excluded("packages/api/build/index.js"));
    }

    #[test]
    fn excludes_log_files() {
        assert!(excluded("npm-debug.log"));
        assert!(excluded("src/debug.log"));
    }

    #[test]
    fn keeps_lookalike_names() {
        assert!(!excluded(".gitignore"));
        assert!(!excluded("src/builder.js"));
        assert!(!excluded("src/logs.js"));
        assert!(!excluded("distribution/readme.md"));
        assert!(!excluded("src/logger.ts"));
        assert!(!excluded("changelog.md"));
    }

    #[test]
    fn keeps_the_root() {
        assert!(!excluded(""));
    }

    #[test]
    fn report_records_outcomes() {
        let mut report = CopyReport::default();
        report.record(&rel("a"), CopyOutcome::Copied);
        report.record(&rel("b"), CopyOutcome::Skipped);
        assert_eq!(report.copied, 1);
        assert_eq!(report.skipped, vec![rel("b")]);
    }

    #[test]
    fn plan_counts_files_only() {
        let plan = CopyPlan {
            entries: vec![
                CopyEntry {
                    relative: rel("src"),
                    source: PathBuf::from("t/src"),
                    destination: PathBuf::from("o/src"),
                    kind: EntryKind::Directory,
                },
                CopyEntry {
                    relative: rel("src/app.js"),
                    source: PathBuf::from("t/src/app.js"),
                    destination: PathBuf::from("o/src/app.js"),
                    kind: EntryKind::File,
                },
            ],
            excluded: 0,
        };
        assert_eq!(plan.file_count(), 1);
        assert_eq!(plan.directories().count(), 1);
    }
}
