//! Grouping of scanned files into duplicate sets.
//!
//! Two-phase pipeline: files are first bucketed by size, which
//! eliminates most candidates without any I/O since equal content
//! requires equal size. Only files sharing a size with at least one
//! other file are hashed, each exactly once, and then bucketed by
//! (size, digest). Buckets with two or more members become
//! [`DuplicateGroup`]s, ordered by discovery so the keep candidate is
//! reproducible across runs.
//!
//! Hashing is spread across a bounded rayon pool; results are
//! collected in input order, so grouping stays deterministic no matter
//! how the work is scheduled.

use std::collections::HashMap;

use rayon::prelude::*;

use crate::scanner::{Digest, FileRecord, HashError, Hasher};

use super::{DuplicateGroup, GroupStats};

/// Configuration for the grouping phase.
#[derive(Debug, Clone)]
pub struct GrouperConfig {
    /// Number of I/O threads for parallel hashing.
    /// Default is 4 to prevent disk thrashing.
    pub io_threads: usize,
}

impl Default for GrouperConfig {
    fn default() -> Self {
        Self { io_threads: 4 }
    }
}

impl GrouperConfig {
    /// Set the I/O thread count (minimum 1).
    #[must_use]
    pub fn with_io_threads(mut self, threads: usize) -> Self {
        self.io_threads = threads.max(1);
        self
    }
}

/// Outcome of the grouping phase.
#[derive(Debug, Default)]
pub struct Grouping {
    /// Duplicate groups in discovery order of their keep candidates.
    pub groups: Vec<DuplicateGroup>,
    /// Phase statistics.
    pub stats: GroupStats,
    /// Per-file hash failures; each removed only that file from
    /// consideration.
    pub errors: Vec<HashError>,
}

/// Partition scanned files into duplicate groups.
///
/// Consumes the scanner's candidates in discovery order. A file whose
/// hashing fails is dropped from consideration and recorded; the rest
/// of the tree is still grouped.
#[must_use]
pub fn group_duplicates(
    files: Vec<FileRecord>,
    hasher: &Hasher,
    config: &GrouperConfig,
) -> Grouping {
    let mut stats = GroupStats {
        total_files: files.len(),
        ..Default::default()
    };

    // Phase 1: bucket by size, tagging each record with its discovery
    // index so group order can be restored after hashing.
    let mut size_buckets: HashMap<u64, Vec<(usize, FileRecord)>> = HashMap::new();
    for (index, file) in files.into_iter().enumerate() {
        size_buckets.entry(file.size).or_default().push((index, file));
    }

    let mut candidates: Vec<(usize, FileRecord)> = Vec::new();
    for (_, bucket) in size_buckets {
        if bucket.len() < 2 {
            stats.eliminated_by_size += bucket.len();
        } else {
            candidates.extend(bucket);
        }
    }

    if candidates.is_empty() {
        log::debug!("grouping: no size collisions, nothing to hash");
        return Grouping {
            groups: Vec::new(),
            stats,
            errors: Vec::new(),
        };
    }

    log::info!(
        "grouping: hashing {} of {} files ({:.1}% eliminated by size)",
        candidates.len(),
        stats.total_files,
        stats.size_elimination_rate()
    );

    // Phase 2: hash the remaining candidates, each exactly once.
    // Order-preserving collection keeps the digest buckets in
    // discovery order.
    let digests = hash_candidates(&candidates, hasher, config);

    let mut errors = Vec::new();
    let mut digest_buckets: HashMap<(u64, Digest), Vec<(usize, FileRecord)>> = HashMap::new();

    for ((index, mut file), result) in candidates.into_iter().zip(digests) {
        match result {
            Ok(digest) => {
                stats.hashed_files += 1;
                file.digest = Some(digest);
                digest_buckets
                    .entry((file.size, digest))
                    .or_default()
                    .push((index, file));
            }
            Err(e) => {
                log::warn!("hash failed, skipping file: {e}");
                stats.hash_failures += 1;
                errors.push(e);
            }
        }
    }

    let mut keyed_groups: Vec<(usize, DuplicateGroup)> = digest_buckets
        .into_iter()
        .filter(|(_, members)| members.len() >= 2)
        .map(|((size, digest), members)| {
            stats.duplicate_files += members.len();
            let first_seen = members[0].0;
            let files = members.into_iter().map(|(_, file)| file).collect();
            (first_seen, DuplicateGroup::new(digest, size, files))
        })
        .collect();

    // Discovery order across groups: first-seen keep candidate first.
    keyed_groups.sort_by_key(|(first_seen, _)| *first_seen);
    let groups: Vec<DuplicateGroup> =
        keyed_groups.into_iter().map(|(_, group)| group).collect();
    stats.duplicate_groups = groups.len();

    log::info!(
        "grouping: {} duplicate group(s), {} duplicate file(s)",
        stats.duplicate_groups,
        stats.duplicate_files
    );

    Grouping {
        groups,
        stats,
        errors,
    }
}

/// Hash all candidates on a bounded thread pool, preserving input
/// order. Falls back to sequential hashing if the pool cannot be
/// built.
fn hash_candidates(
    candidates: &[(usize, FileRecord)],
    hasher: &Hasher,
    config: &GrouperConfig,
) -> Vec<Result<Digest, HashError>> {
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(config.io_threads.max(1))
        .build();

    match pool {
        Ok(pool) => pool.install(|| {
            candidates
                .par_iter()
                .map(|(_, file)| hasher.hash_file(&file.path))
                .collect()
        }),
        Err(e) => {
            log::warn!("thread pool unavailable ({e}), hashing sequentially");
            candidates
                .iter()
                .map(|(_, file)| hasher.hash_file(&file.path))
                .collect()
        }
    }
}
