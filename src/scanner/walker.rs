//! Deterministic directory traversal.
//!
//! The scanner walks a root directory recursively with a lexicographic
//! per-directory order, so the first occurrence of any duplicate is
//! reproducible across runs on an unchanged tree. Symbolic links are
//! never followed or hashed: a tree deduplicated with symlinks scans
//! clean on the next run. On platforms that expose inode identity,
//! additional directory entries for an already-seen inode are skipped
//! as well, which keeps hard-link deduplication idempotent.
//!
//! Entries that cannot be statted or entered are yielded as
//! [`ScanError`] values rather than stopping iteration.

use std::collections::HashSet;
use std::fs::Metadata;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use super::{FileRecord, ScanConfig, ScanError, EXECUTABLE_EXTENSIONS};

/// Directory scanner producing duplicate-detection candidates.
#[derive(Debug)]
pub struct Scanner {
    root: PathBuf,
    config: ScanConfig,
}

impl Scanner {
    /// Create a scanner for the given root directory.
    #[must_use]
    pub fn new(root: &Path, config: ScanConfig) -> Self {
        Self {
            root: root.to_path_buf(),
            config,
        }
    }

    /// Walk the tree, yielding candidate files in lexicographic order.
    ///
    /// Directories that cannot be entered and files that cannot be
    /// statted are yielded as errors; the walk continues past them.
    pub fn scan(&self) -> impl Iterator<Item = Result<FileRecord, ScanError>> + '_ {
        let exclude_executables = self.config.executable_filter_active();
        let mut seen_inodes: HashSet<InodeKey> = HashSet::new();

        WalkDir::new(&self.root)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter()
            .filter_map(move |entry_result| {
                let entry = match entry_result {
                    Ok(entry) => entry,
                    Err(e) => return Some(Err(map_walk_error(&self.root, e))),
                };

                let file_type = entry.file_type();
                if file_type.is_dir() {
                    return None;
                }
                if file_type.is_symlink() {
                    log::trace!("skipping symlink: {}", entry.path().display());
                    return None;
                }

                if exclude_executables && is_executable_extension(entry.path()) {
                    log::debug!("skipping executable: {}", entry.path().display());
                    return None;
                }

                let metadata = match entry.metadata() {
                    Ok(m) => m,
                    Err(e) => return Some(Err(map_walk_error(entry.path(), e))),
                };

                if let Some(key) = InodeKey::from_metadata(&metadata) {
                    if !seen_inodes.insert(key) {
                        log::debug!(
                            "skipping hardlink to seen inode: {}",
                            entry.path().display()
                        );
                        return None;
                    }
                }

                Some(Ok(FileRecord::new(entry.into_path(), metadata.len())))
            })
    }
}

/// True when the file's extension is in the executable exclusion set
/// (case-insensitive).
fn is_executable_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            let lower = ext.to_ascii_lowercase();
            EXECUTABLE_EXTENSIONS.contains(&lower.as_str())
        })
}

fn map_walk_error(fallback_path: &Path, error: walkdir::Error) -> ScanError {
    let path = error
        .path()
        .map_or_else(|| fallback_path.to_path_buf(), Path::to_path_buf);

    match error.io_error().map(std::io::Error::kind) {
        Some(std::io::ErrorKind::PermissionDenied) => {
            log::warn!("permission denied: {}", path.display());
            ScanError::PermissionDenied(path)
        }
        Some(std::io::ErrorKind::NotFound) => {
            log::debug!("entry vanished during scan: {}", path.display());
            ScanError::NotFound(path)
        }
        _ => {
            log::warn!("scan error for {}: {}", path.display(), error);
            ScanError::Io {
                path,
                source: std::io::Error::other(error.to_string()),
            }
        }
    }
}

/// Identity of a file's underlying storage, where the platform exposes
/// one. Two paths with the same key are hard links to the same data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct InodeKey {
    device: u64,
    inode: u64,
}

impl InodeKey {
    #[cfg(unix)]
    fn from_metadata(metadata: &Metadata) -> Option<Self> {
        use std::os::unix::fs::MetadataExt;
        Some(Self {
            device: metadata.dev(),
            inode: metadata.ino(),
        })
    }

    #[cfg(not(unix))]
    fn from_metadata(_metadata: &Metadata) -> Option<Self> {
        None
    }
}
