//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value.  The
//! CLI layer owns config; the core crate never sees it.
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (handled at the call-site, not here)
//! 2. Environment variables: `KILN_<SECTION>__<KEY>`, e.g.
//!    `KILN_DEFAULTS__INSTALL=false`
//! 3. Config file: `--config FILE`, else the platform config dir
//! 4. Built-in defaults (always present)

use std::path::{Path, PathBuf};

use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};

use kiln_core::domain::{DEFAULT_PACKAGE_MANAGER, TemplateVariant};

use crate::error::{CliError, CliResult};

/// Prefix for configuration environment variables.
const ENV_PREFIX: &str = "KILN";

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Default values for new projects.
    pub defaults: Defaults,
    /// Output settings.
    pub output: OutputConfig,
    /// Template settings.
    pub templates: TemplateConfig,
    /// External tool settings.
    pub commands: CommandsConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Defaults {
    pub template: TemplateVariant,
    /// Run the install step unless `--no-install` is given.
    pub install: bool,
    /// Initialise git even without `--git`.
    pub git: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub no_color: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TemplateConfig {
    /// Template tree used when `--template-dir` is not given.
    pub local_path: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CommandsConfig {
    pub package_manager: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            defaults: Defaults::default(),
            output: OutputConfig::default(),
            templates: TemplateConfig::default(),
            commands: CommandsConfig::default(),
        }
    }
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            template: TemplateVariant::default(),
            install: true,
            git: false,
        }
    }
}

impl Default for CommandsConfig {
    fn default() -> Self {
        Self {
            package_manager: DEFAULT_PACKAGE_MANAGER.to_string(),
        }
    }
}

impl AppConfig {
    /// Load configuration, starting from defaults.
    ///
    /// `config_file` is the path the user passed via `--config`; it must
    /// exist. Without it the default location is read if present.
    pub fn load(config_file: Option<&PathBuf>) -> CliResult<Self> {
        match config_file {
            Some(path) => Self::load_from(path, true),
            None => Self::load_from(&Self::config_path(), false),
        }
    }

    fn load_from(path: &Path, required: bool) -> CliResult<Self> {
        let defaults = Config::try_from(&Self::default())
            .map_err(|e| CliError::config("failed to seed default configuration", e))?;

        let settings = Config::builder()
            .add_source(defaults)
            .add_source(File::new(&path.to_string_lossy(), FileFormat::Toml).required(required))
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| {
                CliError::config(format!("failed to read {}", path.display()), e)
            })?;

        settings
            .try_deserialize()
            .map_err(|e| CliError::config("invalid configuration value", e))
    }

    /// Path to the default configuration file.
    ///
    /// Uses `directories::ProjectDirs` for cross-platform correctness,
    /// falling back to `.kiln.toml` in the current directory.
    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("dev", "kiln", "kiln")
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from(".kiln.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write_config(dir: &TempDir, body: &str) -> PathBuf {
        let path = dir.path().join("kiln.toml");
        fs::write(&path, body).unwrap();
        path
    }

    #[test]
    fn defaults_install_without_git() {
        let cfg = AppConfig::default();
        assert!(cfg.defaults.install);
        assert!(!cfg.defaults.git);
        assert_eq!(cfg.defaults.template, TemplateVariant::Full);
        assert_eq!(cfg.commands.package_manager, "npm");
        assert!(!cfg.output.no_color);
    }

    #[test]
    fn file_overrides_defaults() {
        let dir = TempDir::new().unwrap();
        let mut wanted = AppConfig::default();
        wanted.defaults.install = false;
        wanted.defaults.template = TemplateVariant::Basic;
        wanted.commands.package_manager = "pnpm".into();
        let path = write_config(&dir, &toml::to_string(&wanted).unwrap());

        let cfg = AppConfig::load(Some(&path)).unwrap();
        assert!(!cfg.defaults.install);
        assert_eq!(cfg.defaults.template, TemplateVariant::Basic);
        assert_eq!(cfg.commands.package_manager, "pnpm");
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, "[defaults]\ngit = true\n");

        let cfg = AppConfig::load(Some(&path)).unwrap();
        assert!(cfg.defaults.git);
        assert!(cfg.defaults.install);
        assert_eq!(cfg.commands.package_manager, "npm");
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("nope.toml");
        let err = AppConfig::load(Some(&missing)).unwrap_err();
        assert!(matches!(err, CliError::ConfigError { .. }));
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, "[defaults\ninstall = ");
        assert!(AppConfig::load(Some(&path)).is_err());
    }

    #[test]
    fn unknown_template_variant_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, "[defaults]\ntemplate = \"huge\"\n");
        assert!(AppConfig::load(Some(&path)).is_err());
    }

    #[test]
    fn config_path_is_not_empty() {
        let p = AppConfig::config_path();
        assert!(!p.as_os_str().is_empty());
    }
}
