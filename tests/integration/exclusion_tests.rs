use dupelink::actions::{LinkConfig, Linker};
use dupelink::duplicates::{
    build_plans, group_duplicates, DuplicateGroup, ExclusionSet, GrouperConfig, SelectionError,
};
use dupelink::platform::{LinkStrategy, Platform};
use dupelink::scanner::{Hasher, ScanConfig, Scanner};
use std::fs;
use std::path::Path;
use tempfile::tempdir;

fn group(root: &Path) -> Vec<DuplicateGroup> {
    let files = Scanner::new(root, ScanConfig::new(Platform::Posix, false))
        .scan()
        .filter_map(Result::ok)
        .collect();
    group_duplicates(files, &Hasher::new(), &GrouperConfig::default()).groups
}

#[test]
fn test_exclude_first_member_links_only_second() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("file1.txt"), "AAA").unwrap();
    fs::write(dir.path().join("copy1.txt"), "AAA").unwrap();
    fs::write(dir.path().join("copy2.txt"), "AAA").unwrap();
    fs::write(dir.path().join("other.txt"), "BBB").unwrap();

    let groups = group(dir.path());
    assert_eq!(groups.len(), 1);
    // Discovery order: copy1 (keep), copy2 (member 1), file1 (member 2)
    let member_one = groups[0].duplicates()[0].path.clone();
    let member_two = groups[0].duplicates()[1].path.clone();

    let (exclusions, errors) = ExclusionSet::parse("1.1", &groups);
    assert!(errors.is_empty());

    let plans = build_plans(&groups, &exclusions);
    let linker = Linker::new(LinkConfig::new(LinkStrategy::Hardlink, false));
    let result = linker.process(&plans);

    assert_eq!(result.linked_count(), 1);
    assert_eq!(result.bytes_reclaimed, 3);
    assert_eq!(result.excluded, 1);

    // The excluded member retains its original file and never appears
    // in the failure list
    let meta = fs::symlink_metadata(&member_one).unwrap();
    assert!(meta.file_type().is_file());
    assert_eq!(fs::read_to_string(&member_one).unwrap(), "AAA");
    assert!(result.failures.iter().all(|(p, _)| p != &member_one));

    assert!(result.linked.contains(&member_two));
}

#[test]
fn test_invalid_exclusions_do_not_abort() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("a.txt"), "dup").unwrap();
    fs::write(dir.path().join("b.txt"), "dup").unwrap();

    let groups = group(dir.path());
    let (exclusions, errors) = ExclusionSet::parse("7.1,nonsense,1.5", &groups);

    assert_eq!(errors.len(), 3);
    assert!(exclusions.is_empty());

    // The run proceeds with zero exclusions
    let plans = build_plans(&groups, &exclusions);
    let result = Linker::new(LinkConfig::new(LinkStrategy::Hardlink, false)).process(&plans);
    assert_eq!(result.linked_count(), 1);
    assert_eq!(result.excluded, 0);
}

#[test]
fn test_keep_candidate_exclusion_rejected() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("a.txt"), "dup").unwrap();
    fs::write(dir.path().join("b.txt"), "dup").unwrap();

    let groups = group(dir.path());
    let (exclusions, errors) = ExclusionSet::parse("1.0", &groups);

    assert!(exclusions.is_empty());
    assert_eq!(errors, vec![SelectionError::KeepProtected { group: 1 }]);
}

#[test]
fn test_exclude_all_members_links_nothing() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("a.txt"), "dup").unwrap();
    fs::write(dir.path().join("b.txt"), "dup").unwrap();
    fs::write(dir.path().join("c.txt"), "dup").unwrap();

    let groups = group(dir.path());
    let (exclusions, errors) = ExclusionSet::parse("1.1,1.2", &groups);
    assert!(errors.is_empty());

    let plans = build_plans(&groups, &exclusions);
    let result = Linker::new(LinkConfig::new(LinkStrategy::Hardlink, false)).process(&plans);

    assert_eq!(result.linked_count(), 0);
    assert_eq!(result.excluded, 2);
    assert_eq!(result.bytes_reclaimed, 0);

    // Everything still a plain file
    for name in ["a.txt", "b.txt", "c.txt"] {
        let meta = fs::symlink_metadata(dir.path().join(name)).unwrap();
        assert!(meta.file_type().is_file());
    }
}
