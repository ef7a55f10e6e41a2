//! Application orchestrator.
//!
//! Sequences the pipeline: scan → group → select → link (or report),
//! with a single forward pass over the tree. Per-file problems are
//! aggregated and surfaced once in the final summary; only an invalid
//! root or an unwritable report destination aborts the run.

use std::io::{self, Write};

use anyhow::bail;

use crate::actions::{LinkConfig, Linker};
use crate::cli::Cli;
use crate::duplicates::{build_plans, group_duplicates, ExclusionSet, GrouperConfig};
use crate::error::ExitCode;
use crate::interact;
use crate::output::{report, terminal};
use crate::platform::Platform;
use crate::scanner::{FileRecord, Hasher, ScanConfig, Scanner};

/// Run the full application with the parsed CLI arguments.
///
/// # Errors
///
/// Returns an error only for fatal conditions: the root directory is
/// missing or not traversable, or the report destination cannot be
/// written. Per-file failures are reported in the summary and still
/// yield [`ExitCode::Success`].
pub fn run_app(cli: Cli) -> anyhow::Result<ExitCode> {
    let platform = Platform::current();

    if !cli.directory.is_dir() {
        bail!("'{}' is not a valid directory", cli.directory.display());
    }

    let stdout = io::stdout();
    let mut out = stdout.lock();

    terminal::write_banner(&mut out, platform, cli.exclude_executables, cli.dry_run)?;
    writeln!(out, "\nScanning directory: {}", cli.directory.display())?;

    // Scan: collect candidates in deterministic order, recording
    // per-entry skips.
    let scan_config = ScanConfig::new(platform, cli.exclude_executables);
    let scanner = Scanner::new(&cli.directory, scan_config);

    let mut files: Vec<FileRecord> = Vec::new();
    let mut skip_messages: Vec<String> = Vec::new();
    for entry in scanner.scan() {
        match entry {
            Ok(file) => files.push(file),
            Err(e) => skip_messages.push(e.to_string()),
        }
    }

    // Group by (size, digest).
    let hasher = Hasher::new();
    let grouper_config = GrouperConfig::default().with_io_threads(cli.io_threads);
    let grouping = group_duplicates(files, &hasher, &grouper_config);
    skip_messages.extend(grouping.errors.iter().map(ToString::to_string));

    if grouping.groups.is_empty() {
        writeln!(out, "\nNo duplicate files found.")?;
        report_skips(&mut out, &skip_messages)?;
        return Ok(ExitCode::Success);
    }

    terminal::write_group_listings(&mut out, &grouping.groups)?;

    // Report mode bypasses the linker entirely.
    if let Some(report_path) = &cli.report {
        report::write_report_file(report_path, &grouping.groups)?;
        writeln!(out, "\nReport generated: {}", report_path.display())?;
        return Ok(ExitCode::Success);
    }

    let total_duplicates: usize = grouping
        .groups
        .iter()
        .map(|g| g.duplicate_count())
        .sum();
    let potential_savings: u64 = grouping
        .groups
        .iter()
        .map(|g| g.reclaimable_bytes())
        .sum();

    // Select: exclusions come from the user in interactive mode, and
    // are empty in dry-run and auto-confirm modes.
    let exclusions = if cli.dry_run || cli.auto_confirm {
        terminal::write_totals(&mut out, &grouping.groups)?;
        ExclusionSet::empty()
    } else {
        let stdin = io::stdin();
        let mut input = stdin.lock();

        if !interact::confirm_proceed(&mut input, &mut out, total_duplicates, potential_savings)? {
            writeln!(out, "\nOperation cancelled by user.")?;
            return Ok(ExitCode::Success);
        }
        interact::collect_exclusions(&mut input, &mut out, &grouping.groups)?
    };

    // Link (or simulate).
    if !cli.dry_run {
        writeln!(out, "\nProcessing duplicates...")?;
    }
    let plans = build_plans(&grouping.groups, &exclusions);
    let linker = Linker::new(LinkConfig::new(platform.link_strategy(), cli.dry_run));
    let result = linker.process(&plans);

    terminal::write_summary(&mut out, &result, cli.dry_run)?;
    report_skips(&mut out, &skip_messages)?;

    Ok(ExitCode::Success)
}

/// Surface per-file scan and hash skips once, at the end.
fn report_skips(out: &mut impl Write, skips: &[String]) -> io::Result<()> {
    if skips.is_empty() {
        return Ok(());
    }
    writeln!(out, "\nSkipped {} file(s)/director(ies):", skips.len())?;
    for message in skips {
        writeln!(out, "  {message}")?;
    }
    Ok(())
}
