//! CLI runner shared by the binary: logging setup and command dispatch.

use crate::archive::list_entries;
use crate::archiver::run_with_config;
use crate::cli::{self, Commands};
use tracing_subscriber::EnvFilter;

/// Public entry for running the CLI.
pub fn run_cli_app() -> Result<(), Box<dyn std::error::Error>> {
    init_logging();
    let command = cli::run()?;

    match command {
        Commands::Archive { root, threshold, output_dir } => {
            let config = cli::build_config(root, threshold, output_dir)?;
            run_with_config(&config)?;
        }
        Commands::List { archive } => {
            for entry in list_entries(&archive)? {
                if entry.is_dir {
                    println!("-\t{}", entry.name);
                } else {
                    println!("{}\t{}", entry.size, entry.name);
                }
            }
        }
    }

    Ok(())
}

/// Logs go to stderr so stdout only carries progress lines and listings.
/// The level comes from `RUST_LOG`, defaulting to `warn`.
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let installed = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
    if let Err(e) = installed {
        // an existing subscriber keeps receiving events
        tracing::debug!("keeping existing tracing subscriber: {e}");
    }
}
