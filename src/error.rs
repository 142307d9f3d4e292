use std::path::PathBuf;

use thiserror::Error;

/// The primary error type for all operations in the `zipsubfolders` crate.
///
/// Every variant is fatal: the run stops at the first error and the error is
/// handed back to the caller unchanged.
#[derive(Debug, Error)]
pub enum ArchiverError {
    /// An I/O error occurred while listing a folder, reading a source file or
    /// creating an archive. Includes the path where the error happened.
    #[error("I/O error on path '{}': {source}", .path.display())]
    Io {
        #[source]
        source: std::io::Error,
        path: PathBuf,
    },

    /// The zip writer or reader failed on the given archive.
    #[error("zip error on archive '{}': {source}", .path.display())]
    Zip {
        #[source]
        source: zip::result::ZipError,
        path: PathBuf,
    },

    /// The configured root does not exist or is not a directory.
    #[error("root path '{}' is not a readable directory", .0.display())]
    InvalidRoot(PathBuf),

    /// A path cannot be stored as an archive entry name because it is not
    /// valid UTF-8.
    #[error("path '{}' is not valid UTF-8 and cannot name an archive entry", .0.display())]
    NonUtf8Name(PathBuf),

    /// Configuration could not be assembled (e.g. no root was given).
    #[error("configuration error: {0}")]
    Config(String),
}

impl ArchiverError {
    pub(crate) fn io(source: std::io::Error, path: impl Into<PathBuf>) -> Self {
        ArchiverError::Io { source, path: path.into() }
    }

    pub(crate) fn zip(source: zip::result::ZipError, path: impl Into<PathBuf>) -> Self {
        ArchiverError::Zip { source, path: path.into() }
    }
}
