//! Run configuration.
//!
//! Replaces a hard-coded root constant with an explicit value that the CLI
//! fills in from arguments or the environment.

use crate::ArchiverError;
use std::path::{Path, PathBuf};

/// Folders with this many immediate files or fewer are skipped.
pub const DEFAULT_THRESHOLD: usize = 9;

/// Environment variable consulted when no root is passed on the command line.
pub const ROOT_ENV_VAR: &str = "ZIPSUBFOLDERS_ROOT";

/// Settings for a single archiving run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Top of the tree to walk. Read-only.
    pub root: PathBuf,
    /// Exclusive lower bound on the immediate file count of a folder.
    pub threshold: usize,
    /// Where archives are written. Defaults to the working directory.
    pub output_dir: PathBuf,
}

impl Config {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            threshold: DEFAULT_THRESHOLD,
            output_dir: PathBuf::from("."),
        }
    }

    pub fn with_threshold(mut self, threshold: usize) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn with_output_dir(mut self, output_dir: impl Into<PathBuf>) -> Self {
        self.output_dir = output_dir.into();
        self
    }

    /// Whether a folder holding `file_count` immediate files gets an archive.
    pub fn qualifies(&self, file_count: usize) -> bool {
        file_count > self.threshold
    }

    /// Checks that the root is a directory and the output directory exists.
    pub fn validate(&self) -> Result<(), ArchiverError> {
        if !self.root.is_dir() {
            return Err(ArchiverError::InvalidRoot(self.root.clone()));
        }
        ensure_dir(&self.output_dir)
    }
}

fn ensure_dir(path: &Path) -> Result<(), ArchiverError> {
    let meta = std::fs::metadata(path).map_err(|e| ArchiverError::io(e, path))?;
    if meta.is_dir() {
        Ok(())
    } else {
        Err(ArchiverError::io(
            std::io::Error::new(std::io::ErrorKind::Other, "output path is not a directory"),
            path,
        ))
    }
}
