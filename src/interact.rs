//! Interactive confirmation and exclusion collection.
//!
//! This is the single suspension point of a run: it sits between
//! building the duplicate groups and invoking the linker, and blocks
//! for user input. Cancelling here leaves the filesystem unmodified.
//! Both functions work over generic reader/writer pairs so tests can
//! drive them without a terminal.

use std::io::{self, BufRead, Write};

use bytesize::ByteSize;

use crate::duplicates::{DuplicateGroup, ExclusionSet};

const RULE: &str = "============================================================";

/// Ask the user to confirm before any filesystem mutation.
///
/// Loops until a recognizable answer arrives; end of input counts as a
/// refusal, so a closed stdin can never trigger a mutation.
pub fn confirm_proceed(
    reader: &mut impl BufRead,
    writer: &mut impl Write,
    total_duplicates: usize,
    potential_savings: u64,
) -> io::Result<bool> {
    writeln!(writer, "\n{RULE}")?;
    writeln!(writer, "Total duplicate files: {total_duplicates}")?;
    writeln!(
        writer,
        "Potential space savings: {}",
        ByteSize::b(potential_savings)
    )?;
    writeln!(writer, "{RULE}")?;

    loop {
        write!(writer, "\nProceed with deduplication? (y/n): ")?;
        writer.flush()?;

        let mut line = String::new();
        if reader.read_line(&mut line)? == 0 {
            return Ok(false);
        }

        match line.trim().to_ascii_lowercase().as_str() {
            "y" | "yes" => return Ok(true),
            "n" | "no" => return Ok(false),
            _ => writeln!(writer, "Please enter 'y' or 'n'")?,
        }
    }
}

/// Collect exclusions from one line of `group.member` pairs.
///
/// Invalid entries are reported individually and simply dropped; the
/// run proceeds with whatever valid exclusions remain, possibly none.
pub fn collect_exclusions(
    reader: &mut impl BufRead,
    writer: &mut impl Write,
    groups: &[DuplicateGroup],
) -> io::Result<ExclusionSet> {
    writeln!(writer, "\n{RULE}")?;
    writeln!(writer, "You can exclude specific files from deduplication.")?;
    writeln!(
        writer,
        "Enter file numbers (e.g. '1.2,3.1' for group 1 file 2, group 3 file 1),"
    )?;
    writeln!(writer, "or press Enter to skip exclusions.")?;
    writeln!(writer, "{RULE}")?;
    write!(writer, "\nEnter files to exclude (or press Enter to continue): ")?;
    writer.flush()?;

    let mut line = String::new();
    reader.read_line(&mut line)?;

    let (exclusions, errors) = ExclusionSet::parse(line.trim(), groups);
    for error in &errors {
        writeln!(writer, "{error}")?;
    }
    if !exclusions.is_empty() {
        writeln!(writer, "Excluded {} file(s)", exclusions.len())?;
    }

    Ok(exclusions)
}
