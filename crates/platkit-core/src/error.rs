//! Error types for `platkit-core`.
//!
//! All fallible operations in the core library return [`CoreResult<T>`],
//! which is an alias for `Result<T, CoreError>`.

use std::path::PathBuf;

/// Unified error type for all core operations.
///
/// Each variant captures just enough context for the caller to display
/// a meaningful message or take corrective action.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// The target path does not exist.
    #[error("path not found: {0}")]
    NotFound(PathBuf),

    /// The process lacks permission to access the path.
    #[error("permission denied: {0}")]
    PermissionDenied(PathBuf),

    /// A directory was expected but the path points to something else.
    #[error("not a directory: {0}")]
    NotADirectory(PathBuf),

    /// The destination of a create, copy or move is already taken.
    #[error("already exists: {0}")]
    AlreadyExists(PathBuf),

    /// A path has no usable file name (missing or not valid UTF-8).
    #[error("invalid name: {0}")]
    InvalidName(String),

    /// A directory copy whose destination is the source or lies inside it.
    #[error("cannot copy '{src}' into itself at '{dest}'")]
    CopyIntoItself { src: PathBuf, dest: PathBuf },

    /// A directory could not be checked or enumerated while computing a free name.
    #[error("cannot access directory {path}: {source}")]
    DirectoryAccess {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse a TOML configuration file.
    #[error("config parse error: {0}")]
    ConfigParse(String),

    /// A textual value could not be converted.
    #[error("parse error: {0}")]
    Parse(String),

    /// A child process could not be launched or waited on.
    #[error("process error: {0}")]
    Process(String),

    /// An I/O error that doesn't fit a more specific variant.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CoreError {
    /// Maps an I/O error on `path` to the most specific variant.
    pub(crate) fn from_io(path: &std::path::Path, err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::NotFound => CoreError::NotFound(path.to_path_buf()),
            std::io::ErrorKind::PermissionDenied => CoreError::PermissionDenied(path.to_path_buf()),
            _ => CoreError::Io(err),
        }
    }
}

/// Convenience alias used throughout `platkit-core`.
pub type CoreResult<T> = Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::{Path, PathBuf};

    #[test]
    fn not_found_displays_path() {
        let err = CoreError::NotFound(PathBuf::from("/missing/file"));
        assert_eq!(err.to_string(), "path not found: /missing/file");
    }

    #[test]
    fn already_exists_displays_path() {
        let err = CoreError::AlreadyExists(PathBuf::from("/taken.txt"));
        assert_eq!(err.to_string(), "already exists: /taken.txt");
    }

    #[test]
    fn not_a_directory_displays_path() {
        let err = CoreError::NotADirectory(PathBuf::from("/plain.txt"));
        assert_eq!(err.to_string(), "not a directory: /plain.txt");
    }

    #[test]
    fn invalid_name_displays_reason() {
        let err = CoreError::InvalidName("'/' has no file name".to_string());
        assert_eq!(err.to_string(), "invalid name: '/' has no file name");
    }

    #[test]
    fn copy_into_itself_names_both_paths() {
        let err = CoreError::CopyIntoItself {
            src: PathBuf::from("/a"),
            dest: PathBuf::from("/a/sub"),
        };
        assert_eq!(err.to_string(), "cannot copy '/a' into itself at '/a/sub'");
    }

    #[test]
    fn directory_access_keeps_source() {
        let err = CoreError::DirectoryAccess {
            path: PathBuf::from("/nope"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        };
        assert_eq!(err.to_string(), "cannot access directory /nope: gone");
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn process_displays_message() {
        let err = CoreError::Process("spawn failed".to_string());
        assert_eq!(err.to_string(), "process error: spawn failed");
    }

    #[test]
    fn io_error_from_std() {
        let io_err = std::io::Error::new(std::io::ErrorKind::Other, "boom");
        let core_err: CoreError = io_err.into();
        assert!(matches!(core_err, CoreError::Io(_)));
        assert!(core_err.to_string().contains("boom"));
    }

    #[test]
    fn from_io_maps_not_found_and_permission() {
        let path = Path::new("/x");
        let nf = CoreError::from_io(path, std::io::Error::from(std::io::ErrorKind::NotFound));
        assert!(matches!(nf, CoreError::NotFound(p) if p == path));

        let pd = CoreError::from_io(
            path,
            std::io::Error::from(std::io::ErrorKind::PermissionDenied),
        );
        assert!(matches!(pd, CoreError::PermissionDenied(_)));

        let other = CoreError::from_io(path, std::io::Error::from(std::io::ErrorKind::Other));
        assert!(matches!(other, CoreError::Io(_)));
    }
}
