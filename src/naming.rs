//! Archive and entry naming.

use crate::ArchiverError;
use std::path::{is_separator, Component, Path};

/// Number of trailing characters of the underscored folder path kept in the
/// archive name.
pub const ARCHIVE_NAME_TAIL: usize = 13;

/// Appended to every archive name.
pub const ARCHIVE_SUFFIX: &str = "_new.zip";

/// Derives the archive file name for a folder.
///
/// Every separator in the path becomes `_`, the last [`ARCHIVE_NAME_TAIL`]
/// characters are kept and [`ARCHIVE_SUFFIX`] is appended. Distinct folders
/// sharing the same tail map to the same name; the later archive overwrites
/// the earlier one.
pub fn archive_name(folder: &Path) -> String {
    let underscored: Vec<char> = folder
        .to_string_lossy()
        .chars()
        .map(|c| if is_separator(c) { '_' } else { c })
        .collect();
    let start = underscored.len().saturating_sub(ARCHIVE_NAME_TAIL);
    let mut name: String = underscored[start..].iter().collect();
    name.push_str(ARCHIVE_SUFFIX);
    name
}

/// Builds the name a path is stored under inside an archive.
///
/// Zip names are relative and `/`-separated, so any root or drive prefix is
/// dropped along with `.` components. `..` is kept as written. Components
/// that are not valid UTF-8 are rejected rather than replaced, since a lossy
/// conversion can give two files the same entry name.
pub fn entry_name(path: &Path) -> Result<String, ArchiverError> {
    let mut parts: Vec<&str> = Vec::new();
    for comp in path.components() {
        match comp {
            Component::Normal(part) => {
                let part = part
                    .to_str()
                    .ok_or_else(|| ArchiverError::NonUtf8Name(path.to_path_buf()))?;
                parts.push(part);
            }
            Component::ParentDir => parts.push(".."),
            Component::Prefix(_) | Component::RootDir | Component::CurDir => {}
        }
    }
    if parts.is_empty() {
        Ok(".".to_string())
    } else {
        Ok(parts.join("/"))
    }
}
