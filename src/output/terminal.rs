//! Terminal output: platform banner, group listings, summaries.
//!
//! All functions write to a generic sink so tests can capture the
//! output. Human-readable sizes use `bytesize`.

use std::io::{self, Write};

use bytesize::ByteSize;

use crate::actions::BatchLinkResult;
use crate::duplicates::DuplicateGroup;
use crate::platform::Platform;

const RULE: &str = "============================================================";

/// Print platform identification and the active mode flags.
pub fn write_banner(
    w: &mut impl Write,
    platform: Platform,
    exclude_executables: bool,
    dry_run: bool,
) -> io::Result<()> {
    writeln!(w, "Platform: {platform}")?;
    writeln!(w, "Link type: {}", platform.link_strategy())?;
    if platform.supports_executable_exclusion() {
        if exclude_executables {
            writeln!(w, "Executable files: excluded from deduplication")?;
        } else {
            writeln!(w, "Executable files: included in deduplication")?;
        }
    }
    if dry_run {
        writeln!(w, "\n*** DRY RUN MODE - no changes will be made ***")?;
    }
    Ok(())
}

/// Print each group with its digest and ordered members.
///
/// The kept member is listed as `[0]`; non-kept members are numbered
/// from 1, matching the `group.member` exclusion addressing.
pub fn write_group_listings(w: &mut impl Write, groups: &[DuplicateGroup]) -> io::Result<()> {
    for (idx, group) in groups.iter().enumerate() {
        let digest = group.digest_hex();
        writeln!(w, "\nGroup {} (digest: {}...):", idx + 1, &digest[..16])?;
        writeln!(w, "  [0] {} (KEEP)", group.keep().path.display())?;
        for (member, file) in group.duplicates().iter().enumerate() {
            writeln!(
                w,
                "  [{}] {} ({})",
                member + 1,
                file.path.display(),
                ByteSize::b(file.size)
            )?;
        }
    }
    Ok(())
}

/// Print running totals for the discovered duplicates.
pub fn write_totals(w: &mut impl Write, groups: &[DuplicateGroup]) -> io::Result<()> {
    let total_duplicates: usize = groups.iter().map(DuplicateGroup::duplicate_count).sum();
    let potential_savings: u64 = groups.iter().map(DuplicateGroup::reclaimable_bytes).sum();

    writeln!(w, "\n{RULE}")?;
    writeln!(w, "Total duplicate files: {total_duplicates}")?;
    writeln!(
        w,
        "Potential space savings: {}",
        ByteSize::b(potential_savings)
    )?;
    writeln!(w, "{RULE}")?;
    Ok(())
}

/// Print the final summary after linking (or after a dry run).
pub fn write_summary(
    w: &mut impl Write,
    result: &BatchLinkResult,
    dry_run: bool,
) -> io::Result<()> {
    writeln!(w, "\n{RULE}")?;
    if dry_run {
        writeln!(w, "Would replace {} duplicate file(s)", result.linked_count())?;
        writeln!(
            w,
            "Potential space savings: {}",
            ByteSize::b(result.bytes_reclaimed)
        )?;
    } else {
        writeln!(
            w,
            "Successfully processed {} duplicate file(s)",
            result.linked_count()
        )?;
        writeln!(w, "Space saved: {}", ByteSize::b(result.bytes_reclaimed))?;
    }
    if result.excluded > 0 {
        writeln!(w, "Files excluded: {}", result.excluded)?;
    }
    if !result.failures.is_empty() {
        writeln!(w, "Failures: {}", result.failure_count())?;
        for (path, message) in &result.failures {
            writeln!(w, "  {}: {}", path.display(), message)?;
        }
    }
    writeln!(w, "{RULE}")?;
    Ok(())
}
