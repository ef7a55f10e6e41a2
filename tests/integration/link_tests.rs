use dupelink::actions::{BatchLinkResult, LinkConfig, Linker};
use dupelink::duplicates::{build_plans, group_duplicates, ExclusionSet, GrouperConfig};
use dupelink::platform::{LinkStrategy, Platform};
use dupelink::scanner::{Hasher, ScanConfig, Scanner};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::tempdir;

/// Run the whole pipeline over a tree with no exclusions.
fn run_pipeline(root: &Path, strategy: LinkStrategy, dry_run: bool) -> BatchLinkResult {
    let files = Scanner::new(root, ScanConfig::new(Platform::Posix, false))
        .scan()
        .filter_map(Result::ok)
        .collect();
    let grouping = group_duplicates(files, &Hasher::new(), &GrouperConfig::default());
    let plans = build_plans(&grouping.groups, &ExclusionSet::empty());
    Linker::new(LinkConfig::new(strategy, dry_run)).process(&plans)
}

/// Snapshot of every entry in a tree: path, symlink-ness, content.
fn snapshot(root: &Path) -> Vec<(PathBuf, bool, Vec<u8>)> {
    let mut entries = Vec::new();
    let mut stack = vec![root.to_path_buf()];
    while let Some(dir) = stack.pop() {
        let mut children: Vec<_> = fs::read_dir(&dir)
            .unwrap()
            .map(|e| e.unwrap().path())
            .collect();
        children.sort();
        for child in children {
            let meta = fs::symlink_metadata(&child).unwrap();
            if meta.is_dir() {
                stack.push(child);
            } else {
                let is_symlink = meta.file_type().is_symlink();
                let content = fs::read(&child).unwrap_or_default();
                entries.push((child, is_symlink, content));
            }
        }
    }
    entries.sort();
    entries
}

fn write_aaa_tree(root: &Path) {
    fs::write(root.join("file1.txt"), "AAA").unwrap();
    fs::write(root.join("copy1.txt"), "AAA").unwrap();
    fs::write(root.join("copy2.txt"), "AAA").unwrap();
    fs::write(root.join("other.txt"), "BBB").unwrap();
}

#[test]
#[cfg(unix)]
fn test_auto_confirm_links_two_files_six_bytes() {
    let dir = tempdir().unwrap();
    write_aaa_tree(dir.path());

    let result = run_pipeline(dir.path(), LinkStrategy::Symlink, false);

    assert_eq!(result.linked_count(), 2);
    assert_eq!(result.bytes_reclaimed, 6);
    assert_eq!(result.excluded, 0);
    assert!(result.all_succeeded());

    // Keep candidate (lexicographically first: copy1.txt) is untouched,
    // the other two copies are now symlinks to identical content
    let keep = dir.path().join("copy1.txt");
    assert!(fs::symlink_metadata(&keep).unwrap().file_type().is_file());
    assert_eq!(fs::read_to_string(&keep).unwrap(), "AAA");

    for name in ["copy2.txt", "file1.txt"] {
        let path = dir.path().join(name);
        assert!(fs::symlink_metadata(&path).unwrap().file_type().is_symlink());
        assert_eq!(fs::read_to_string(&path).unwrap(), "AAA");
    }

    // The unique file is untouched
    assert_eq!(
        fs::read_to_string(dir.path().join("other.txt")).unwrap(),
        "BBB"
    );
}

#[test]
fn test_hardlink_run_reclaims_bytes() {
    let dir = tempdir().unwrap();
    write_aaa_tree(dir.path());

    let result = run_pipeline(dir.path(), LinkStrategy::Hardlink, false);

    assert_eq!(result.linked_count(), 2);
    assert_eq!(result.bytes_reclaimed, 6);
    for name in ["file1.txt", "copy1.txt", "copy2.txt"] {
        assert_eq!(
            fs::read_to_string(dir.path().join(name)).unwrap(),
            "AAA"
        );
    }
}

#[test]
fn test_dry_run_is_bit_identical() {
    let dir = tempdir().unwrap();
    write_aaa_tree(dir.path());

    let before = snapshot(dir.path());
    let result = run_pipeline(dir.path(), LinkStrategy::Symlink, true);
    let after = snapshot(dir.path());

    // Dry run reports the same numbers as a real run would
    assert_eq!(result.linked_count(), 2);
    assert_eq!(result.bytes_reclaimed, 6);
    // ...but the tree is unchanged
    assert_eq!(before, after);
}

#[test]
#[cfg(unix)]
fn test_symlink_run_is_idempotent() {
    let dir = tempdir().unwrap();
    write_aaa_tree(dir.path());

    let first = run_pipeline(dir.path(), LinkStrategy::Symlink, false);
    assert_eq!(first.linked_count(), 2);

    // Replaced files are symlinks now and never rescanned, so the
    // second run finds nothing to do
    let second = run_pipeline(dir.path(), LinkStrategy::Symlink, false);
    assert_eq!(second.linked_count(), 0);
    assert_eq!(second.bytes_reclaimed, 0);
    assert!(second.all_succeeded());
}

#[test]
#[cfg(unix)]
fn test_hardlink_run_is_idempotent() {
    let dir = tempdir().unwrap();
    write_aaa_tree(dir.path());

    let first = run_pipeline(dir.path(), LinkStrategy::Hardlink, false);
    assert_eq!(first.linked_count(), 2);

    // All three entries now share an inode; the scanner keeps only the
    // first, so no group forms again
    let second = run_pipeline(dir.path(), LinkStrategy::Hardlink, false);
    assert_eq!(second.linked_count(), 0);
}

#[test]
#[cfg(unix)]
fn test_keep_candidate_content_identical_after_run() {
    let dir = tempdir().unwrap();
    let payload = "some archival payload worth keeping";
    fs::write(dir.path().join("a_original.txt"), payload).unwrap();
    fs::write(dir.path().join("b_copy.txt"), payload).unwrap();

    let result = run_pipeline(dir.path(), LinkStrategy::Symlink, false);
    assert_eq!(result.linked_count(), 1);

    let keep = dir.path().join("a_original.txt");
    assert!(fs::symlink_metadata(&keep).unwrap().file_type().is_file());
    assert_eq!(fs::read_to_string(&keep).unwrap(), payload);
}

#[test]
fn test_bytes_reclaimed_matches_replaced_sizes() {
    let dir = tempdir().unwrap();
    // Two groups of different sizes
    fs::write(dir.path().join("s1_a.txt"), "1234").unwrap();
    fs::write(dir.path().join("s1_b.txt"), "1234").unwrap();
    fs::write(dir.path().join("s2_a.txt"), "abcdefghij").unwrap();
    fs::write(dir.path().join("s2_b.txt"), "abcdefghij").unwrap();
    fs::write(dir.path().join("s2_c.txt"), "abcdefghij").unwrap();

    let result = run_pipeline(dir.path(), LinkStrategy::Hardlink, false);

    // 4 + 10 + 10 bytes, independent of group count
    assert_eq!(result.linked_count(), 3);
    assert_eq!(result.bytes_reclaimed, 24);
}
