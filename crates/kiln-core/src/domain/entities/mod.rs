pub mod common;
pub mod copy_plan;
pub mod placeholder;
pub mod request;
pub mod template;

pub use crate::domain::DomainError;
pub use common::RelativePath;
pub use copy_plan::{
    CopyEntry, CopyOutcome, CopyPlan, CopyReport, EntryKind, ExcludeRules, WalkEntry,
    WalkListing,
};
pub use placeholder::{PlaceholderMap, PROJECT_NAME_KEY};
pub use request::{ProjectRequest, ProjectRequestBuilder, ScaffoldOptions};
pub use template::TemplateDescriptor;
