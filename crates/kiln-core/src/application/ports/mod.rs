//! Application ports (traits) for external dependencies.
//!
//! In hexagonal architecture, ports define interfaces that the application
//! needs from the outside world. Adapters in `kiln-adapters` implement these.
//!
//! ## Port Types
//!
//! - **Driven (Output) Ports**: Called by application, implemented by infrastructure
//!   - `Filesystem`: file and directory operations
//!   - `ProcessRunner`: external commands (package manager, git)
//!   - `TemplateCatalog`: variant → template root
//!   - `ProgressReporter`: stage notifications for the front end
//!
//! - **Driving (Input) Ports**: Called by external world, implemented by application
//!   - (`ScaffoldService::scaffold` and `ScaffoldService::plan`)

pub mod output;

pub use output::{
    CommandInvocation, Filesystem, NoopProgress, ProcessRunner, ProgressReporter, TemplateCatalog,
};
