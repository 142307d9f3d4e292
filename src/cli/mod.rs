use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::config::{Config, DEFAULT_THRESHOLD, ROOT_ENV_VAR};
use crate::ArchiverError;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Clone, Debug)]
pub enum Commands {
    /// Zip every folder under ROOT that holds more than THRESHOLD files.
    #[command(alias = "a")]
    Archive {
        /// Top of the tree to walk. Falls back to the ZIPSUBFOLDERS_ROOT environment variable.
        root: Option<PathBuf>,

        /// Folders with this many files or fewer are skipped.
        #[arg(long, default_value_t = DEFAULT_THRESHOLD)]
        threshold: usize,

        /// Directory the archives are written to. Defaults to the current directory.
        #[arg(short, long, default_value = ".")]
        output_dir: PathBuf,
    },

    /// List the entries of an archive.
    #[command(alias = "l")]
    List {
        /// The archive file to list.
        #[arg(required = true)]
        archive: PathBuf,
    },
}

/// Gets the root from the command-line argument or the `ZIPSUBFOLDERS_ROOT`
/// environment variable.
///
/// Priority:
/// 1. positional `ROOT` argument.
/// 2. `ZIPSUBFOLDERS_ROOT` environment variable (ignored when empty).
pub fn get_root_from_opt_or_env(root_opt: Option<PathBuf>) -> Result<PathBuf, ArchiverError> {
    if let Some(root) = root_opt {
        return Ok(root);
    }
    match std::env::var_os(ROOT_ENV_VAR) {
        Some(root) if !root.is_empty() => Ok(PathBuf::from(root)),
        _ => Err(ArchiverError::Config(format!(
            "no root given; pass ROOT or set {ROOT_ENV_VAR}"
        ))),
    }
}

/// Assembles the run configuration for the `archive` command.
pub fn build_config(
    root: Option<PathBuf>,
    threshold: usize,
    output_dir: PathBuf,
) -> Result<Config, ArchiverError> {
    let root = get_root_from_opt_or_env(root)?;
    Ok(Config::new(root).with_threshold(threshold).with_output_dir(output_dir))
}

/// Parses command-line arguments using `clap` and returns the command to execute.
pub fn run() -> Result<Commands, Box<dyn std::error::Error>> {
    let args = Args::parse();
    Ok(args.command)
}
