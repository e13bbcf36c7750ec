//! Infrastructure adapters for kiln.
//!
//! This crate implements the ports defined in `kiln_core::application::ports`.
//! It contains all external dependencies and I/O operations.

pub mod filesystem;
pub mod process;
pub mod templates;

// Re-export commonly used adapters
pub use filesystem::{LocalFilesystem, MemoryFilesystem};
pub use process::SystemProcessRunner;
pub use templates::{BundledTemplates, TEMPLATE_DIR_ENV};
