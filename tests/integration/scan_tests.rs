use dupelink::duplicates::{group_duplicates, GrouperConfig};
use dupelink::platform::Platform;
use dupelink::scanner::{FileRecord, Hasher, ScanConfig, Scanner};
use std::fs;
use std::path::Path;
use tempfile::tempdir;

fn scan(root: &Path) -> Vec<FileRecord> {
    Scanner::new(root, ScanConfig::new(Platform::Posix, false))
        .scan()
        .filter_map(Result::ok)
        .collect()
}

fn group(root: &Path) -> Vec<dupelink::duplicates::DuplicateGroup> {
    group_duplicates(scan(root), &Hasher::new(), &GrouperConfig::default()).groups
}

#[test]
fn test_three_copies_form_one_group() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("file1.txt"), "AAA").unwrap();
    fs::write(dir.path().join("copy1.txt"), "AAA").unwrap();
    fs::write(dir.path().join("copy2.txt"), "AAA").unwrap();
    fs::write(dir.path().join("other.txt"), "BBB").unwrap();

    let groups = group(dir.path());

    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].len(), 3);
    assert_eq!(groups[0].size, 3);
    // No group ever forms around the unique content
    assert!(groups[0].files.iter().all(|f| !f.path.ends_with("other.txt")));
}

#[test]
fn test_same_size_different_content_stay_apart() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("a.txt"), "AAA").unwrap();
    fs::write(dir.path().join("b.txt"), "BBB").unwrap();

    assert!(group(dir.path()).is_empty());
}

#[test]
fn test_keep_candidate_reproducible_across_runs() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("zeta.txt"), "dup").unwrap();
    fs::write(dir.path().join("alpha.txt"), "dup").unwrap();
    fs::create_dir(dir.path().join("sub")).unwrap();
    fs::write(dir.path().join("sub/mid.txt"), "dup").unwrap();

    let first = group(dir.path());
    let second = group(dir.path());

    assert_eq!(first.len(), 1);
    assert_eq!(first[0].keep().path, second[0].keep().path);
    // Lexicographic walk: alpha.txt is discovered first
    assert!(first[0].keep().path.ends_with("alpha.txt"));
}

#[test]
#[cfg(unix)]
fn test_symlinks_never_scanned() {
    let dir = tempdir().unwrap();
    let original = dir.path().join("original.txt");
    fs::write(&original, "content").unwrap();
    std::os::unix::fs::symlink(&original, dir.path().join("symlink.txt")).unwrap();

    let files = scan(dir.path());

    assert_eq!(files.len(), 1);
    assert!(files[0].path.ends_with("original.txt"));
}

#[test]
fn test_duplicates_across_subdirectories() {
    let dir = tempdir().unwrap();
    fs::create_dir_all(dir.path().join("a/deep")).unwrap();
    fs::write(dir.path().join("top.txt"), "shared-bytes").unwrap();
    fs::write(dir.path().join("a/deep/buried.txt"), "shared-bytes").unwrap();

    let groups = group(dir.path());

    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].len(), 2);
}

#[test]
fn test_report_mode_leaves_tree_unchanged() {
    use dupelink::output::report::write_report_file;

    let dir = tempdir().unwrap();
    fs::write(dir.path().join("a.txt"), "dup").unwrap();
    fs::write(dir.path().join("b.txt"), "dup").unwrap();

    let groups = group(dir.path());
    let dest = tempdir().unwrap();
    let report_path = dest.path().join("report.txt");
    write_report_file(&report_path, &groups).unwrap();

    let content = fs::read_to_string(&report_path).unwrap();
    assert!(content.contains("Total duplicate file groups: 1"));

    // Both originals are still plain files
    for name in ["a.txt", "b.txt"] {
        let meta = fs::symlink_metadata(dir.path().join(name)).unwrap();
        assert!(meta.file_type().is_file());
    }
}
