//! Command-line interface definitions.
//!
//! # Example
//!
//! ```bash
//! # Interactive deduplication of a directory
//! dupelink ~/archive
//!
//! # Show what would happen without touching anything
//! dupelink ~/archive --dry-run
//!
//! # Unattended run, no prompts
//! dupelink ~/archive --auto-confirm
//!
//! # Write a report instead of linking
//! dupelink ~/archive --report duplicates.txt
//! ```

use clap::Parser;
use std::path::PathBuf;

/// Find duplicate files and replace them with links to save space.
///
/// On POSIX systems duplicates become soft links (symlinks); on
/// Windows they become hard links, optionally excluding executables.
#[derive(Debug, Parser)]
#[command(name = "dupelink")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Directory to scan for duplicate files
    #[arg(value_name = "DIRECTORY")]
    pub directory: PathBuf,

    /// Show what would be done without making any changes
    #[arg(long)]
    pub dry_run: bool,

    /// Exclude executable files from deduplication (hard-link platforms only)
    #[arg(long)]
    pub exclude_executables: bool,

    /// Skip confirmation prompts and process all duplicates automatically
    #[arg(short = 'y', long)]
    pub auto_confirm: bool,

    /// Generate a report of duplicates to a file instead of processing
    #[arg(long, value_name = "FILE")]
    pub report: Option<PathBuf>,

    /// Number of I/O threads for hashing (default: 4)
    ///
    /// Lower values reduce disk thrashing on HDDs.
    #[arg(long, value_name = "N", default_value = "4")]
    pub io_threads: usize,

    /// Increase verbosity level (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Emit fatal errors as JSON on stderr
    #[arg(long)]
    pub json_errors: bool,
}
