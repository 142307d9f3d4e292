//! # zipsubfolders
//!
//! Walks a directory tree and writes one zip archive for every folder that
//! holds more than a threshold of immediate files (ten or more by default).
//! Meant for consolidating flat collections of data files, such as
//! simulation output, into per-folder archives.
//!
//! ## Key Modules
//!
//! - [`walk`]: lazy top-down traversal yielding each folder's subdirectories and files.
//! - [`naming`]: archive file names and archive entry names.
//! - [`archive`]: writing a folder archive and listing an archive's entries.
//! - [`archiver`]: the full pass over a tree.
//! - [`config`]: run settings.
//!
//! ## Examples
//!
//! ```no_run
//! use zipsubfolders::{archiver, Config};
//!
//! let config = Config::new("/data/sims").with_output_dir("/data/archives");
//! let summary = archiver::run_with_config(&config)?;
//! println!("{} archives written", summary.archives.len());
//! # Ok::<(), zipsubfolders::ArchiverError>(())
//! ```

pub mod archive;
pub mod archiver;
pub mod cli;
pub mod cli_runner;
pub mod config;
pub mod error;
pub mod naming;
pub mod walk;

pub use config::Config;
pub use error::ArchiverError;
