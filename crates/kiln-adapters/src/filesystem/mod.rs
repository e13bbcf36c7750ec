//! Filesystem adapters.

mod local;
mod memory;

use std::io;
use std::path::Path;

use kiln_core::{application::ApplicationError, error::KilnError};

pub use local::LocalFilesystem;
pub use memory::MemoryFilesystem;

/// Turn an OS error into something the user can act on.
pub(crate) fn map_io_error(path: &Path, e: io::Error, operation: &str) -> KilnError {
    let path = path.to_path_buf();
    match e.kind() {
        io::ErrorKind::PermissionDenied | io::ErrorKind::ReadOnlyFilesystem => {
            ApplicationError::PermissionDenied { path }
        }
        io::ErrorKind::StorageFull => ApplicationError::OutOfDiskSpace { path },
        _ => ApplicationError::FilesystemError {
            path,
            reason: format!("failed to {}: {}", operation, e),
        },
    }
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn permission_errors_are_classified() {
        let err = map_io_error(
            Path::new("x"),
            io::Error::from(io::ErrorKind::PermissionDenied),
            "write file",
        );
        assert!(matches!(
            err,
            KilnError::Application(ApplicationError::PermissionDenied { .. })
        ));
    }

    #[test]
    fn full_disk_is_classified() {
        let err = map_io_error(
            Path::new("x"),
            io::Error::from(io::ErrorKind::StorageFull),
            "write file",
        );
        assert!(matches!(
            err,
            KilnError::Application(ApplicationError::OutOfDiskSpace { .. })
        ));
    }

    #[test]
    fn other_errors_keep_operation_and_cause() {
        let err = map_io_error(
            Path::new("x"),
            io::Error::new(io::ErrorKind::InvalidData, "bad bytes"),
            "read file",
        );
        let text = err.to_string();
        assert!(text.contains("read file"));
        assert!(text.contains("bad bytes"));
    }
}
