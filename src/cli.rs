//! Command-line interface implementation for next-gen.
//! Provides argument parsing using clap.

use clap::Parser;
use std::path::PathBuf;

/// Command-line arguments structure for next-gen.
#[derive(Parser, Debug)]
#[command(author, version, about = "next-gen: scaffold a Next.js + Tauri desktop project", long_about = None)]
pub struct Args {
    /// Project directory; must be empty or an existing next-gen project
    #[arg(value_name = "DIRECTORY", default_value = ".")]
    pub directory: PathBuf,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,

    /// Do not look for a newer next-gen release on startup
    #[arg(long)]
    pub skip_update_check: bool,
}

/// Parses command line arguments and returns the Args structure.
///
/// # Exits
/// * With clap's default error handling for invalid arguments
pub fn get_args() -> Args {
    Args::parse()
}
