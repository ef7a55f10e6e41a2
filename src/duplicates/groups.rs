//! Duplicate group type and grouping statistics.

use std::path::PathBuf;

use crate::scanner::{hash_to_hex, Digest, FileRecord};

/// A confirmed set of files with identical content.
///
/// Members share one size and one digest, are ordered by discovery
/// (deterministic under the scanner's fixed walk order), and number at
/// least two; singletons are never materialized. The first member is
/// the keep candidate and is never replaced.
#[derive(Debug, Clone)]
pub struct DuplicateGroup {
    /// BLAKE3 digest shared by every member
    pub digest: Digest,
    /// Byte size shared by every member
    pub size: u64,
    /// Members in discovery order; `files[0]` is the keep candidate
    pub files: Vec<FileRecord>,
}

impl DuplicateGroup {
    /// Create a group from members already known to share size and
    /// digest.
    ///
    /// # Panics
    ///
    /// Debug assertion fails on fewer than two members.
    #[must_use]
    pub fn new(digest: Digest, size: u64, files: Vec<FileRecord>) -> Self {
        debug_assert!(files.len() >= 2, "duplicate group needs at least 2 members");
        Self {
            digest,
            size,
            files,
        }
    }

    /// The member retained as the canonical copy.
    #[must_use]
    pub fn keep(&self) -> &FileRecord {
        &self.files[0]
    }

    /// The non-kept members, in discovery order.
    #[must_use]
    pub fn duplicates(&self) -> &[FileRecord] {
        &self.files[1..]
    }

    /// Number of files in this group.
    #[must_use]
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// A group can never be empty; provided for API symmetry.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Number of duplicate copies (total minus the kept one).
    #[must_use]
    pub fn duplicate_count(&self) -> usize {
        self.files.len().saturating_sub(1)
    }

    /// Space reclaimed if every duplicate is replaced by a link.
    #[must_use]
    pub fn reclaimable_bytes(&self) -> u64 {
        self.size * self.duplicate_count() as u64
    }

    /// Digest as a hexadecimal string.
    #[must_use]
    pub fn digest_hex(&self) -> String {
        hash_to_hex(&self.digest)
    }

    /// Paths of all members.
    #[must_use]
    pub fn paths(&self) -> Vec<PathBuf> {
        self.files.iter().map(|f| f.path.clone()).collect()
    }
}

/// Statistics from the grouping phase.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupStats {
    /// Total candidate files that entered grouping
    pub total_files: usize,
    /// Files eliminated without hashing (unique size)
    pub eliminated_by_size: usize,
    /// Files actually hashed
    pub hashed_files: usize,
    /// Files dropped because hashing failed
    pub hash_failures: usize,
    /// Duplicate groups formed
    pub duplicate_groups: usize,
    /// Files that are members of some group
    pub duplicate_files: usize,
}

impl GroupStats {
    /// Percentage of candidates eliminated by the size pre-filter.
    #[must_use]
    pub fn size_elimination_rate(&self) -> f64 {
        if self.total_files == 0 {
            0.0
        } else {
            (self.eliminated_by_size as f64 / self.total_files as f64) * 100.0
        }
    }
}
