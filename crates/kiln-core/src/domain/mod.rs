//! Core domain layer for kiln.
//!
//! Pure rules with no I/O: what a valid project name is, which template
//! paths are excluded, how placeholders expand, and the shapes that flow
//! between the application services. Filesystem and process access live
//! behind the ports in [`crate::application::ports`].
//!
//! - **No async**: domain logic is synchronous
//! - **No I/O**: no filesystem, network, or process calls
//! - **Immutable values**: all domain objects are `Clone + PartialEq`

pub mod entities;
pub mod error;
pub mod value_objects;

mod validation;

pub use entities::{
    common::RelativePath,
    copy_plan::{
        CopyEntry, CopyOutcome, CopyPlan, CopyReport, EXCLUDED_SEGMENTS, EXCLUDED_SUFFIXES,
        EntryKind, ExcludeRules, WalkEntry, WalkListing,
    },
    placeholder::{PROJECT_NAME_KEY, PlaceholderMap, find_tokens},
    request::{DEFAULT_PACKAGE_MANAGER, ProjectRequest, ProjectRequestBuilder, ScaffoldOptions},
    template::{MANIFEST_FILE, README_FILE, TemplateDescriptor},
};

pub use error::{DomainError, ErrorCategory, NameViolation};

pub use value_objects::{ProjectName, TemplateVariant};

pub use validation::{DomainValidator, MAX_NAME_LEN, RESERVED_NAMES};
