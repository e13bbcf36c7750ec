//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums. No business logic lives here.

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, ValueEnum};

use kiln_core::domain::TemplateVariant;

pub mod global;
pub use global::GlobalArgs;

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name     = "kiln",
    bin_name = "kiln",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "Scaffold an Express + MongoDB backend in one command",
    long_about = "kiln creates a ready-to-run REST API project: it copies the \
                  bundled template, stamps in your project name, installs \
                  dependencies and can initialise a git repository.",
    after_help = "EXAMPLES:\n\
        \x20 kiln my-api\n\
        \x20 kiln my-api --no-install --git\n\
        \x20 kiln my-api --template basic --package-manager pnpm\n\
        \x20 kiln my-api --dry-run",
    arg_required_else_help = true,
    disable_version_flag   = true,
)]
pub struct Cli {
    /// Directory name for the new project, created in the current directory.
    #[arg(value_name = "NAME", help = "Project name (letters, digits, - and _)")]
    pub name: String,

    #[command(flatten)]
    pub scaffold: ScaffoldArgs,

    #[command(flatten)]
    pub global: GlobalArgs,

    #[arg(
        short = 'v',
        long = "version",
        action = ArgAction::Version,
        help = "Print version"
    )]
    pub version: Option<bool>,
}

// ── scaffold ──────────────────────────────────────────────────────────────────

/// What to generate and which optional steps to run.
#[derive(Debug, Clone, Default, Args)]
pub struct ScaffoldArgs {
    /// Skip `<package manager> install`.
    #[arg(long = "no-install", help = "Skip dependency installation")]
    pub no_install: bool,

    /// Run `git init` and make an initial commit.
    #[arg(long = "git", help = "Initialise a git repository")]
    pub git: bool,

    /// Template flavour. All flavours currently share one template.
    #[arg(
        long = "template",
        value_name = "VARIANT",
        value_enum,
        help = "Template variant [default: full]"
    )]
    pub template: Option<TemplateArg>,

    /// Preview what would be created without writing any files.
    #[arg(long = "dry-run", help = "Show what would be created without creating")]
    pub dry_run: bool,

    /// Use a template tree from disk instead of the bundled one.
    #[arg(
        long = "template-dir",
        value_name = "DIR",
        help = "Template directory to copy from"
    )]
    pub template_dir: Option<PathBuf>,

    /// Package manager for the install step.
    #[arg(
        long = "package-manager",
        value_name = "PM",
        value_enum,
        help = "Package manager used to install dependencies [default: npm]"
    )]
    pub package_manager: Option<PackageManager>,
}

// ── value enums ───────────────────────────────────────────────────────────────

/// Template variants accepted on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum TemplateArg {
    Basic,
    Secure,
    Full,
}

impl From<TemplateArg> for TemplateVariant {
    fn from(arg: TemplateArg) -> Self {
        match arg {
            TemplateArg::Basic => TemplateVariant::Basic,
            TemplateArg::Secure => TemplateVariant::Secure,
            TemplateArg::Full => TemplateVariant::Full,
        }
    }
}

/// Supported package managers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum PackageManager {
    Npm,
    Pnpm,
    Yarn,
}

impl PackageManager {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Npm => "npm",
            Self::Pnpm => "pnpm",
            Self::Yarn => "yarn",
        }
    }
}

impl std::fmt::Display for PackageManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── tests ─────────────────────────────────────────────────────────────────────
