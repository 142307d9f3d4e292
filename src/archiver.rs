//! The archiving pass: walk the tree, skip small folders, zip the rest.

use crate::archive::write_folder_archive;
use crate::config::Config;
use crate::naming::archive_name;
use crate::walk::{normalize_path, walk};
use crate::ArchiverError;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// One archive produced by a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveReport {
    pub source: PathBuf,
    pub archive: PathBuf,
    pub entries: usize,
}

/// What a run did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub folders_visited: usize,
    pub folders_skipped: usize,
    /// In walk order. A later report may name the same archive as an earlier one.
    pub archives: Vec<ArchiveReport>,
}

/// Archives every folder under `root` holding more than `threshold` files,
/// writing archives into the current working directory.
pub fn run(root: &Path, threshold: usize) -> Result<RunSummary, ArchiverError> {
    run_with_config(&Config::new(root).with_threshold(threshold))
}

/// Runs a full pass with explicit settings. Stops at the first error.
pub fn run_with_config(config: &Config) -> Result<RunSummary, ArchiverError> {
    config.validate()?;
    let root = normalize_path(&config.root);
    info!(root = %root.display(), threshold = config.threshold, "starting archive run");

    let mut summary = RunSummary::default();
    for listing in walk(&root) {
        let listing = listing?;
        summary.folders_visited += 1;

        if !config.qualifies(listing.files.len()) {
            debug!(folder = %listing.path.display(), files = listing.files.len(), "below threshold, skipping");
            summary.folders_skipped += 1;
            continue;
        }

        println!("The current folder is {}", listing.path.display());
        let dest = config.output_dir.join(archive_name(&listing.path));
        let entries = write_folder_archive(&listing, &dest)?;
        info!(folder = %listing.path.display(), archive = %dest.display(), entries, "archive written");

        summary.archives.push(ArchiveReport { source: listing.path, archive: dest, entries });
    }

    info!(
        visited = summary.folders_visited,
        skipped = summary.folders_skipped,
        archives = summary.archives.len(),
        "archive run finished"
    );
    Ok(summary)
}
