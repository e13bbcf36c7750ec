//! Copy a template tree into a project directory.
//!
//! The copy is additive only: existing destination files are skipped, never
//! overwritten. Re-running against a half-finished directory fills in what
//! is missing and leaves everything else alone.

use std::path::Path;

use tracing::{debug, instrument, trace};

use crate::application::{ApplicationError, ports::Filesystem};
use crate::domain::{CopyEntry, CopyPlan, CopyReport, EntryKind, ExcludeRules, TemplateDescriptor};
use crate::error::{KilnError, KilnResult};

pub struct TemplateCopier<'a> {
    filesystem: &'a dyn Filesystem,
    rules: ExcludeRules,
}

impl<'a> TemplateCopier<'a> {
    /// Copier with the standard exclusion rules.
    pub fn new(filesystem: &'a dyn Filesystem) -> Self {
        Self {
            filesystem,
            rules: ExcludeRules::standard(),
        }
    }

    /// Work out every (source, destination) pair without writing.
    pub fn plan(&self, template: &TemplateDescriptor, target: &Path) -> KilnResult<CopyPlan> {
        let root = template.source_root();
        if !self.filesystem.is_dir(root) {
            return Err(ApplicationError::TemplateNotFound {
                path: root.to_path_buf(),
                variant: template.variant().to_string(),
            }
            .into());
        }

        let listing = self.filesystem.walk(root, &self.rules)?;
        let entries = listing
            .entries
            .into_iter()
            .map(|entry| CopyEntry {
                source: entry.relative.under(root),
                destination: entry.relative.under(target),
                relative: entry.relative,
                kind: entry.kind,
            })
            .collect();

        Ok(CopyPlan {
            entries,
            excluded: listing.excluded,
        })
    }

    #[instrument(skip_all, fields(
        template = %template.source_root().display(),
        target = %target.display()
    ))]
    pub fn copy(&self, template: &TemplateDescriptor, target: &Path) -> KilnResult<CopyReport> {
        let plan = self.plan(template, target)?;
        debug!(
            files = plan.file_count(),
            excluded = plan.excluded,
            "Copy plan ready"
        );

        let mut report = CopyReport {
            excluded: plan.excluded,
            ..CopyReport::default()
        };

        for entry in &plan.entries {
            match entry.kind {
                EntryKind::Directory => {
                    self.filesystem
                        .create_dir_all(&entry.destination)
                        .map_err(|e| copy_failure(entry, e))?;
                    report.directories += 1;
                }
                EntryKind::File => {
                    if let Some(parent) = entry.destination.parent() {
                        self.filesystem
                            .create_dir_all(parent)
                            .map_err(|e| copy_failure(entry, e))?;
                    }
                    let outcome = self
                        .filesystem
                        .copy_file_if_absent(&entry.source, &entry.destination)
                        .map_err(|e| copy_failure(entry, e))?;
                    trace!(file = %entry.relative, ?outcome, "Copied");
                    report.record(&entry.relative, outcome);
                }
            }
        }

        debug!(
            copied = report.copied,
            skipped = report.skipped.len(),
            "Template copied"
        );
        Ok(report)
    }
}

/// Name the failing file. Permission and disk-space errors are already
/// specific and pass through untouched.
fn copy_failure(entry: &CopyEntry, err: KilnError) -> KilnError {
    match err {
        KilnError::Application(ApplicationError::FilesystemError { path, reason }) => {
            // Keep the path that failed; mention the template file when it differs.
            let reason = if path == entry.source {
                reason
            } else {
                format!("{reason} (copying from {})", entry.source.display())
            };
            ApplicationError::CopyFailure { path, reason }.into()
        }
        other => other,
    }
}
