//! Stamp the project name into the generated manifest and README.

use std::path::Path;

use serde_json::Value;
use tracing::{debug, instrument};

use crate::application::{ApplicationError, ports::Filesystem};
use crate::application::services::PlaceholderSubstituter;
use crate::domain::{MANIFEST_FILE, PlaceholderMap, ProjectName, README_FILE};
use crate::error::{Context, KilnError, KilnResult};

pub struct ConfigUpdater<'a> {
    filesystem: &'a dyn Filesystem,
}

impl<'a> ConfigUpdater<'a> {
    pub fn new(filesystem: &'a dyn Filesystem) -> Self {
        Self { filesystem }
    }

    /// Set `name` in `package.json` and expand `{{PROJECT_NAME}}` in
    /// `README.md`. No other file is touched.
    #[instrument(skip(self), fields(project = %project_path.display(), name = %name))]
    pub fn configure(&self, project_path: &Path, name: &ProjectName) -> KilnResult<()> {
        let manifest_path = project_path.join(MANIFEST_FILE);
        self.update_manifest(&manifest_path, name)?;

        let readme_path = project_path.join(README_FILE);
        let readme_updated = if self.filesystem.exists(&readme_path) {
            PlaceholderSubstituter::new(self.filesystem)
                .substitute(&readme_path, &PlaceholderMap::for_project(name))
                .map_err(|e| configuration_failure(&readme_path, e))?
        } else {
            debug!("No README to update");
            false
        };

        debug!(readme_updated, "Project configured");
        Ok(())
    }

    fn update_manifest(&self, path: &Path, name: &ProjectName) -> KilnResult<()> {
        if !self.filesystem.exists(path) {
            return Err(ApplicationError::ConfigurationFailure {
                path: path.to_path_buf(),
                reason: "manifest not found".into(),
            }
            .into());
        }

        let text = self
            .filesystem
            .read_to_string(path)
            .map_err(|e| configuration_failure(path, e))?;

        let mut manifest: Value =
            serde_json::from_str(&text).map_err(|e| ApplicationError::ConfigurationFailure {
                path: path.to_path_buf(),
                reason: format!("invalid JSON: {e}"),
            })?;

        let Some(fields) = manifest.as_object_mut() else {
            return Err(ApplicationError::ConfigurationFailure {
                path: path.to_path_buf(),
                reason: "manifest is not a JSON object".into(),
            }
            .into());
        };
        fields.insert("name".to_string(), Value::String(name.as_str().to_string()));

        let mut rendered = serde_json::to_string_pretty(&manifest)
            .context(format!("serialising {}", path.display()))?;
        rendered.push('\n');

        self.filesystem
            .write_file(path, &rendered)
            .map_err(|e| configuration_failure(path, e))?;
        debug!(path = %path.display(), "Manifest name updated");
        Ok(())
    }
}

fn configuration_failure(path: &Path, err: KilnError) -> KilnError {
    match err {
        KilnError::Application(ApplicationError::FilesystemError { reason, .. }) => {
            ApplicationError::ConfigurationFailure {
                path: path.to_path_buf(),
                reason,
            }
            .into()
        }
        other => other,
    }
}
