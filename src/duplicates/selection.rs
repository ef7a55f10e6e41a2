//! Exclusion parsing and per-group link plans.
//!
//! Exclusions address group members as 1-based `group.member` pairs,
//! e.g. `"1.2,3.1"`: group 1 is the first duplicate group, member 1 is
//! the first non-kept member of that group. The keep candidate has no
//! address, so it can never be excluded. Invalid entries are reported
//! per-entry and never abort the run.

use std::collections::HashSet;

use crate::scanner::FileRecord;

use super::DuplicateGroup;

/// Errors for a single exclusion entry.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum SelectionError {
    /// Entry is not of the form `group.member` with numeric parts.
    #[error("invalid entry: {0}")]
    Malformed(String),

    /// Group index outside 1..=group count.
    #[error("group {group} does not exist ({total} group(s))")]
    GroupOutOfRange {
        /// 1-based group index from the input
        group: usize,
        /// Number of groups in this run
        total: usize,
    },

    /// Member index outside 1..=duplicate count for the group.
    #[error("group {group} has no member {member} ({total} duplicate(s))")]
    MemberOutOfRange {
        /// 1-based group index from the input
        group: usize,
        /// 1-based member index from the input
        member: usize,
        /// Number of non-kept members in the group
        total: usize,
    },

    /// Member 0 addresses the kept copy, which is structurally
    /// protected.
    #[error("group {group}: the kept copy cannot be excluded")]
    KeepProtected {
        /// 1-based group index from the input
        group: usize,
    },
}

/// Validated set of excluded members.
///
/// Stored as 0-based (group index, member index within `files`) pairs,
/// where the member index is always ≥ 1 since the keep candidate is
/// unaddressable.
#[derive(Debug, Clone, Default)]
pub struct ExclusionSet {
    excluded: HashSet<(usize, usize)>,
}

impl ExclusionSet {
    /// An empty set; used by auto-confirm and report modes.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Parse and validate a raw exclusion string against the groups.
    ///
    /// Accepts comma-separated `group.member` pairs (1-based); an empty
    /// or whitespace-only string yields an empty set. Returns the set
    /// of valid exclusions along with one error per invalid entry,
    /// so the caller can report them and still proceed.
    #[must_use]
    pub fn parse(input: &str, groups: &[DuplicateGroup]) -> (Self, Vec<SelectionError>) {
        let mut set = Self::default();
        let mut errors = Vec::new();

        for token in input.split(',') {
            let token = token.trim();
            if token.is_empty() {
                continue;
            }
            match parse_entry(token, groups) {
                Ok((group_idx, file_idx)) => {
                    set.excluded.insert((group_idx, file_idx));
                }
                Err(e) => errors.push(e),
            }
        }

        (set, errors)
    }

    /// Whether the given member (0-based group and file indices) is
    /// excluded.
    #[must_use]
    pub fn contains(&self, group_idx: usize, file_idx: usize) -> bool {
        self.excluded.contains(&(group_idx, file_idx))
    }

    /// Number of excluded members.
    #[must_use]
    pub fn len(&self) -> usize {
        self.excluded.len()
    }

    /// Whether no members are excluded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.excluded.is_empty()
    }
}

/// Parse one `group.member` token and validate it against the groups.
/// Returns 0-based (group index, file index).
fn parse_entry(token: &str, groups: &[DuplicateGroup]) -> Result<(usize, usize), SelectionError> {
    let (group_str, member_str) = token
        .split_once('.')
        .ok_or_else(|| SelectionError::Malformed(token.to_string()))?;

    let group: usize = group_str
        .trim()
        .parse()
        .map_err(|_| SelectionError::Malformed(token.to_string()))?;
    let member: usize = member_str
        .trim()
        .parse()
        .map_err(|_| SelectionError::Malformed(token.to_string()))?;

    if group == 0 || group > groups.len() {
        return Err(SelectionError::GroupOutOfRange {
            group,
            total: groups.len(),
        });
    }
    if member == 0 {
        return Err(SelectionError::KeepProtected { group });
    }

    let duplicates = groups[group - 1].duplicate_count();
    if member > duplicates {
        return Err(SelectionError::MemberOutOfRange {
            group,
            member,
            total: duplicates,
        });
    }

    // Member 1 is files[1], the first non-kept member.
    Ok((group - 1, member))
}

/// A group with keep/replace/excluded status assigned to every member.
#[derive(Debug, Clone)]
pub struct GroupPlan {
    /// 0-based index of the group this plan was built from.
    pub group_index: usize,
    /// The member retained as the canonical copy.
    pub keep: FileRecord,
    /// Members to be replaced with links, in discovery order.
    pub replace: Vec<FileRecord>,
    /// Members skipped because the user excluded them.
    pub excluded: Vec<FileRecord>,
}

/// Assign keep/replace/excluded status to every member of every group.
#[must_use]
pub fn build_plans(groups: &[DuplicateGroup], exclusions: &ExclusionSet) -> Vec<GroupPlan> {
    groups
        .iter()
        .enumerate()
        .map(|(group_idx, group)| {
            let mut replace = Vec::new();
            let mut excluded = Vec::new();

            for (file_idx, file) in group.files.iter().enumerate().skip(1) {
                if exclusions.contains(group_idx, file_idx) {
                    excluded.push(file.clone());
                } else {
                    replace.push(file.clone());
                }
            }

            GroupPlan {
                group_index: group_idx,
                keep: group.keep().clone(),
                replace,
                excluded,
            }
        })
        .collect()
}
