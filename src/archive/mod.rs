//! # Folder Archives
//!
//! Writes one zip archive per qualifying folder and reads back an archive's
//! entry list. An archive holds a directory entry for the folder followed by
//! one entry per immediate file; subfolder contents are never included.

use crate::naming::entry_name;
use crate::walk::FolderListing;
use crate::ArchiverError;
use chrono::{Datelike, Local, Timelike};
use std::fs::{self, File, Metadata};
use std::io::{self, BufReader, BufWriter, Write};
use std::path::Path;
use std::time::SystemTime;
use tracing::debug;
use zip::write::FileOptions;
use zip::{CompressionMethod, DateTime, ZipArchive, ZipWriter};

#[cfg(unix)]
use std::os::unix::fs::PermissionsExt;

/// Files at or above this size need zip64 records.
const LARGE_FILE_THRESHOLD: u64 = u32::MAX as u64;

/// A single entry as read back from an archive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryInfo {
    pub name: String,
    pub is_dir: bool,
    /// Uncompressed size in bytes. Zero for directories.
    pub size: u64,
}

/// Writes `listing` to a new zip at `dest`, replacing any existing file.
///
/// Every entry carries its source's own modification time (local time, as
/// zip stores it), so rerunning over an unchanged tree reproduces the same
/// bytes. Entry names are resolved before `dest` is created; any other error
/// leaves the partially written archive in place.
///
/// Returns the number of entries written (the directory entry plus one per
/// file).
pub fn write_folder_archive(listing: &FolderListing, dest: &Path) -> Result<usize, ArchiverError> {
    let dir_name = entry_name(&listing.path)?;
    let files = listing
        .file_paths()
        .map(|path| entry_name(&path).map(|name| (path, name)))
        .collect::<Result<Vec<_>, _>>()?;
    let dir_meta = fs::metadata(&listing.path).map_err(|e| ArchiverError::io(e, &listing.path))?;

    let out = File::create(dest).map_err(|e| ArchiverError::io(e, dest))?;
    let mut zip = ZipWriter::new(BufWriter::new(out));
    let base = FileOptions::default().compression_method(CompressionMethod::Deflated);

    zip.add_directory(dir_name, entry_options(base, &dir_meta, &listing.path)?)
        .map_err(|e| ArchiverError::zip(e, dest))?;
    let mut entries = 1;

    for (path, name) in files {
        let mut src = File::open(&path).map_err(|e| ArchiverError::io(e, &path))?;
        let meta = src.metadata().map_err(|e| ArchiverError::io(e, &path))?;

        let options = entry_options(base, &meta, &path)?.large_file(meta.len() >= LARGE_FILE_THRESHOLD);
        zip.start_file(name.as_str(), options)
            .map_err(|e| ArchiverError::zip(e, dest))?;
        io::copy(&mut src, &mut zip).map_err(|e| ArchiverError::io(e, &path))?;
        debug!(entry = %name, bytes = meta.len(), "added file");
        entries += 1;
    }

    let mut writer = zip.finish().map_err(|e| ArchiverError::zip(e, dest))?;
    writer.flush().map_err(|e| ArchiverError::io(e, dest))?;
    Ok(entries)
}

/// Per-entry options: the source's mtime and, on Unix, its mode bits.
fn entry_options(base: FileOptions, meta: &Metadata, path: &Path) -> Result<FileOptions, ArchiverError> {
    let modified = meta.modified().map_err(|e| ArchiverError::io(e, path))?;
    let options = base.last_modified_time(zip_time(modified));
    #[cfg(unix)]
    let options = options.unix_permissions(meta.permissions().mode());
    Ok(options)
}

/// Converts to the zip (DOS) timestamp in local time. Times outside the
/// representable 1980-2107 range fall back to 1980-01-01.
fn zip_time(time: SystemTime) -> DateTime {
    let local: chrono::DateTime<Local> = time.into();
    DateTime::from_date_and_time(
        u16::try_from(local.year()).unwrap_or(0),
        local.month() as u8,
        local.day() as u8,
        local.hour() as u8,
        local.minute() as u8,
        local.second() as u8,
    )
    .unwrap_or_default()
}

/// Reads the entry list of an existing archive, in stored order.
pub fn list_entries(archive_path: &Path) -> Result<Vec<EntryInfo>, ArchiverError> {
    let file = File::open(archive_path).map_err(|e| ArchiverError::io(e, archive_path))?;
    let mut archive =
        ZipArchive::new(BufReader::new(file)).map_err(|e| ArchiverError::zip(e, archive_path))?;

    let mut entries = Vec::with_capacity(archive.len());
    for i in 0..archive.len() {
        let entry = archive.by_index(i).map_err(|e| ArchiverError::zip(e, archive_path))?;
        entries.push(EntryInfo {
            name: entry.name().to_string(),
            is_dir: entry.is_dir(),
            size: entry.size(),
        });
    }
    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::walk::list_folder;
    use std::fs;
    use std::io::Read;

    #[test]
    fn archive_holds_dir_entry_and_immediate_files_only() {
        let src = tempfile::tempdir().unwrap();
        for i in 0..3 {
            fs::write(src.path().join(format!("f{i}.dat")), vec![i as u8; 100]).unwrap();
        }
        fs::create_dir(src.path().join("nested")).unwrap();
        fs::write(src.path().join("nested/deep.dat"), b"deep").unwrap();

        let out = tempfile::tempdir().unwrap();
        let dest = out.path().join("x_new.zip");
        let listing = list_folder(src.path()).unwrap();
        assert_eq!(write_folder_archive(&listing, &dest).unwrap(), 4);

        let entries = list_entries(&dest).unwrap();
        let base = entry_name(src.path()).unwrap();
        assert_eq!(entries[0], EntryInfo { name: format!("{base}/"), is_dir: true, size: 0 });
        let files: Vec<&str> = entries[1..].iter().map(|e| e.name.as_str()).collect();
        assert_eq!(
            files,
            vec![format!("{base}/f0.dat"), format!("{base}/f1.dat"), format!("{base}/f2.dat")]
        );
        assert!(entries[1..].iter().all(|e| !e.is_dir && e.size == 100));
    }

    #[test]
    fn archive_content_matches_source() {
        let src = tempfile::tempdir().unwrap();
        fs::write(src.path().join("payload.bin"), b"simulation output").unwrap();

        let out = tempfile::tempdir().unwrap();
        let dest = out.path().join("p_new.zip");
        write_folder_archive(&list_folder(src.path()).unwrap(), &dest).unwrap();

        let mut archive = ZipArchive::new(File::open(&dest).unwrap()).unwrap();
        let mut entry = archive.by_name(&entry_name(&src.path().join("payload.bin")).unwrap()).unwrap();
        assert_eq!(entry.compression(), CompressionMethod::Deflated);
        let mut body = Vec::new();
        entry.read_to_end(&mut body).unwrap();
        assert_eq!(body, b"simulation output");
    }

    #[test]
    fn entries_carry_source_mtime_and_mode() {
        let src = tempfile::tempdir().unwrap();
        let file = src.path().join("stamp.dat");
        fs::write(&file, b"t").unwrap();

        let out = tempfile::tempdir().unwrap();
        let dest = out.path().join("s_new.zip");
        write_folder_archive(&list_folder(src.path()).unwrap(), &dest).unwrap();

        let mut archive = ZipArchive::new(File::open(&dest).unwrap()).unwrap();
        for (source, name) in [
            (src.path().to_path_buf(), format!("{}/", entry_name(src.path()).unwrap())),
            (file.clone(), entry_name(&file).unwrap()),
        ] {
            let meta = fs::metadata(&source).unwrap();
            let expected = zip_time(meta.modified().unwrap());
            let entry = archive.by_name(&name).unwrap();
            let got = entry.last_modified();
            assert_eq!(
                (got.year(), got.month(), got.day(), got.hour(), got.minute(), got.second()),
                (expected.year(), expected.month(), expected.day(), expected.hour(), expected.minute(), expected.second()),
                "timestamp of {name}"
            );
            #[cfg(unix)]
            assert_eq!(entry.unix_mode().unwrap() & 0o777, meta.permissions().mode() & 0o777);
        }
    }

    #[test]
    fn zip_time_clamps_pre_1980_to_default() {
        let t = zip_time(SystemTime::UNIX_EPOCH);
        // the epoch is before 1980 in every timezone
        assert_eq!((t.year(), t.month(), t.day()), (1980, 1, 1));
    }

    #[test]
    fn existing_archive_is_truncated() {
        let src = tempfile::tempdir().unwrap();
        fs::write(src.path().join("a.dat"), b"a").unwrap();
        let out = tempfile::tempdir().unwrap();
        let dest = out.path().join("t_new.zip");
        fs::write(&dest, vec![0xAB; 64 * 1024]).unwrap();

        write_folder_archive(&list_folder(src.path()).unwrap(), &dest).unwrap();
        assert_eq!(list_entries(&dest).unwrap().len(), 2);
        assert!(fs::metadata(&dest).unwrap().len() < 64 * 1024);
    }

    #[test]
    fn list_entries_rejects_non_zip() {
        let dir = tempfile::tempdir().unwrap();
        let bogus = dir.path().join("bogus.zip");
        fs::write(&bogus, b"not a zip").unwrap();
        assert!(matches!(list_entries(&bogus), Err(ArchiverError::Zip { .. })));
    }
}
