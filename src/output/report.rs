//! Text report writer.
//!
//! In report mode the orchestrator never invokes the linker; it emits
//! every duplicate group, with its full digest and ordered member
//! paths, to the requested destination. An unwritable destination is
//! fatal, consistent with other unwritable-output cases.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use anyhow::Context;
use bytesize::ByteSize;

use crate::duplicates::DuplicateGroup;

const RULE: &str = "======================================================================";

/// Write the duplicate report to a file.
///
/// # Errors
///
/// Fails if the destination cannot be created or written.
pub fn write_report_file(path: &Path, groups: &[DuplicateGroup]) -> anyhow::Result<()> {
    let file = File::create(path)
        .with_context(|| format!("cannot write report to {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    write_report(&mut writer, groups)
        .with_context(|| format!("cannot write report to {}", path.display()))?;
    writer
        .flush()
        .with_context(|| format!("cannot write report to {}", path.display()))?;
    Ok(())
}

/// Render the report to any writer.
pub fn write_report(w: &mut impl Write, groups: &[DuplicateGroup]) -> io::Result<()> {
    let total_duplicates: usize = groups.iter().map(DuplicateGroup::duplicate_count).sum();
    let potential_savings: u64 = groups.iter().map(DuplicateGroup::reclaimable_bytes).sum();

    writeln!(w, "{RULE}")?;
    writeln!(w, "DUPLICATE FILES REPORT")?;
    writeln!(w, "{RULE}")?;
    writeln!(w)?;
    writeln!(w, "Total duplicate file groups: {}", groups.len())?;
    writeln!(w, "Total duplicate files: {total_duplicates}")?;
    writeln!(
        w,
        "Potential space savings: {}",
        ByteSize::b(potential_savings)
    )?;
    writeln!(w)?;
    writeln!(w, "{RULE}")?;
    writeln!(w)?;

    for (idx, group) in groups.iter().enumerate() {
        writeln!(w, "Group {} (digest: {})", idx + 1, group.digest_hex())?;
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
        writeln!(w)?;
    }

    writeln!(w, "{RULE}")?;
    writeln!(w, "End of report")?;
    Ok(())
}
