//! Application layer for kiln.
//!
//! This layer contains:
//! - **Services**: one per scaffold step, plus the `ScaffoldService` orchestrator
//! - **Ports**: interface definitions (traits) for external dependencies
//! - **Errors**: application-specific error types
//!
//! The application layer coordinates the domain layer but contains no
//! business rules itself. Those live in `crate::domain`.

pub mod error;
pub mod ports;
pub mod services;

pub use services::{
    ConfigUpdater, DirectoryResolver, DirectoryState, PlaceholderSubstituter, PlannedStep,
    ResolvedDirectory, ScaffoldPlan, ScaffoldReport, ScaffoldService, ScaffoldStage, StepWarning,
    TemplateCopier,
};

pub use ports::{
    CommandInvocation, Filesystem, NoopProgress, ProcessRunner, ProgressReporter, TemplateCatalog,
};

pub use error::ApplicationError;
