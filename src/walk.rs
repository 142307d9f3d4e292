//! Folder traversal.
//!
//! [`walk`] yields one [`FolderListing`] per directory under a root (the root
//! included), top-down and sorted by name. The iterator is lazy; calling
//! [`walk`] again restarts the traversal from scratch.
//!
//! Each directory is read exactly once: the walk descends into the
//! subdirectories recorded in the listing it just yielded, so what is
//! archived and what is descended into come from the same snapshot.

use crate::ArchiverError;
use std::ffi::OsString;
use std::fs;
use std::path::{Component, Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

/// One directory and its immediate children, split into subdirectories and
/// everything else.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FolderListing {
    /// The directory as reached by the walk (root joined with child names).
    pub path: PathBuf,
    /// Names of immediate subdirectories, symlinked ones included.
    pub subdirs: Vec<OsString>,
    /// Names of every other immediate child.
    pub files: Vec<OsString>,
}

impl FolderListing {
    /// Full paths of the immediate files, in listing order.
    pub fn file_paths(&self) -> impl Iterator<Item = PathBuf> + '_ {
        self.files.iter().map(move |name| self.path.join(name))
    }
}

/// Iterator returned by [`walk`].
pub struct FolderWalk {
    root: Option<PathBuf>,
    /// Directories still to visit; the next one is at the end.
    pending: Vec<PathBuf>,
}

/// Starts a top-down traversal of `root`.
///
/// Symlinks below the root are not followed, so a symlinked directory shows up
/// in its parent's `subdirs` but is never visited itself. A root that is not a
/// directory yields nothing; a missing root yields one error.
pub fn walk(root: &Path) -> FolderWalk {
    FolderWalk { root: Some(root.to_path_buf()), pending: Vec::new() }
}

impl Iterator for FolderWalk {
    type Item = Result<FolderListing, ArchiverError>;

    fn next(&mut self) -> Option<Self::Item> {
        let dir = match self.root.take() {
            Some(root) => match fs::metadata(&root) {
                Ok(meta) if meta.is_dir() => root,
                Ok(_) => return None,
                Err(e) => return Some(Err(ArchiverError::io(e, root))),
            },
            None => self.pending.pop()?,
        };

        match read_folder(&dir) {
            Ok((listing, descend)) => {
                self.pending.extend(descend.into_iter().rev());
                Some(Ok(listing))
            }
            Err(e) => {
                self.pending.clear();
                Some(Err(e))
            }
        }
    }
}

/// Reads the immediate children of `dir`.
///
/// A child counts as a subdirectory when it resolves to a directory, following
/// symlinks; anything else, broken links included, counts as a file.
pub fn list_folder(dir: &Path) -> Result<FolderListing, ArchiverError> {
    read_folder(dir).map(|(listing, _)| listing)
}

/// Lists `dir` with a single depth-one walkdir pass. Also returns the
/// subdirectories to descend into: real directories only, not symlinks.
fn read_folder(dir: &Path) -> Result<(FolderListing, Vec<PathBuf>), ArchiverError> {
    let mut subdirs = Vec::new();
    let mut files = Vec::new();
    let mut descend = Vec::new();

    let children = WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(false)
        .sort_by_file_name();
    for entry in children {
        let entry = entry.map_err(|e| {
            let path = e.path().map(Path::to_path_buf).unwrap_or_else(|| dir.to_path_buf());
            ArchiverError::io(e.into(), path)
        })?;
        let file_type = entry.file_type();
        if file_type.is_dir() {
            descend.push(entry.path().to_path_buf());
            subdirs.push(entry.file_name().to_os_string());
        } else if file_type.is_symlink() && entry.path().is_dir() {
            subdirs.push(entry.file_name().to_os_string());
        } else {
            files.push(entry.file_name().to_os_string());
        }
    }

    debug!(
        folder = %dir.display(),
        subdirs = subdirs.len(),
        files = files.len(),
        "listed folder"
    );

    Ok((FolderListing { path: dir.to_path_buf(), subdirs, files }, descend))
}

/// Lexically normalizes a path: collapses repeated separators, drops `.`
/// components, folds `name/..` pairs and strips trailing separators.
///
/// The filesystem is not consulted, so symlinks are not resolved. An empty
/// result becomes `.`.
pub fn normalize_path(path: &Path) -> PathBuf {
    let mut out: Vec<Component<'_>> = Vec::new();
    for comp in path.components() {
        match comp {
            Component::CurDir => {}
            Component::ParentDir => match out.last() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                // `/..` is `/`
                Some(Component::RootDir) => {}
                _ => out.push(comp),
            },
            _ => out.push(comp),
        }
    }
    if out.is_empty() {
        return PathBuf::from(".");
    }
    out.iter().collect()
}
