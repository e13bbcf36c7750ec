//! Application services - orchestrate use cases.
//!
//! The small services each own one step of a scaffold run and borrow the
//! filesystem port; [`ScaffoldService`] owns the adapters and sequences them.

pub mod config_updater;
pub mod directory_resolver;
pub mod placeholder_substituter;
pub mod report;
pub mod scaffold_service;
pub mod template_copier;

pub use config_updater::ConfigUpdater;
pub use directory_resolver::{DirectoryResolver, DirectoryState, ResolvedDirectory};
pub use placeholder_substituter::PlaceholderSubstituter;
pub use report::{PlannedStep, ScaffoldPlan, ScaffoldReport, ScaffoldStage, StepWarning};
pub use scaffold_service::ScaffoldService;
pub use template_copier::TemplateCopier;
