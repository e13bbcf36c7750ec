//! kiln core - hexagonal architecture implementation
//!
//! This crate provides the domain and application layers for the kiln
//! project scaffolder, following hexagonal (ports and adapters) architecture.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │             kiln-cli (CLI)              │
//! │       (drives ScaffoldService)          │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │          Application Services           │
//! │  (ScaffoldService, TemplateCopier, ...) │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │        Application Ports (Traits)       │
//! │ (Filesystem, ProcessRunner, Catalog)    │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │     kiln-adapters (Infrastructure)      │
//! │ (LocalFilesystem, SystemProcessRunner)  │
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │        Domain Layer (Pure Logic)        │
//! │ (ProjectName, PlaceholderMap, CopyPlan) │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,no_run
//! use kiln_core::prelude::*;
//! # fn service() -> ScaffoldService { unimplemented!() }
//!
//! let request = ProjectRequest::builder("my-api")
//!     .target_directory(std::env::current_dir()?)
//!     .install(false)
//!     .build()?;
//!
//! let report = service().scaffold(&request)?;
//! println!("created {}", report.project_path.display());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod domain;

pub mod application;

pub mod error;

/// Public API - what external crates should use.
pub mod prelude {
    pub use crate::application::{
        ScaffoldPlan, ScaffoldReport, ScaffoldService, ScaffoldStage, StepWarning,
        ports::{CommandInvocation, Filesystem, ProcessRunner, ProgressReporter, TemplateCatalog},
    };
    pub use crate::domain::{
        ProjectName, ProjectRequest, ScaffoldOptions, TemplateDescriptor, TemplateVariant,
    };
    pub use crate::error::{KilnError, KilnResult};
}
