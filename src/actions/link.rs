//! Link substitution for duplicate files.
//!
//! Each duplicate marked for replacement is swapped for a link to its
//! group's kept copy. The duplicate is never removed before a valid
//! link exists: the link is created under a temporary name in the same
//! directory and then renamed over the duplicate, so every file is
//! either fully original or fully a valid link, never half-removed.
//!
//! Failures are per-file. A cross-volume hard-link rejection or any
//! other link-creation error is recorded and processing continues with
//! the remaining members and groups.

use std::fmt::Write as _;
use std::io;
use std::path::{Component, Path, PathBuf};

use thiserror::Error;

use crate::duplicates::GroupPlan;
use crate::platform::LinkStrategy;

/// Error type for link substitution.
#[derive(Debug, Error)]
pub enum LinkError {
    /// Hard links require the duplicate and the kept copy to reside on
    /// the same volume.
    #[error("cannot hard link across volumes: {0}")]
    CrossVolume(PathBuf),

    /// The duplicate or the kept copy disappeared before linking.
    #[error("file not found: {0}")]
    NotFound(PathBuf),

    /// Permission denied while creating or renaming the link.
    #[error("permission denied: {0}")]
    PermissionDenied(PathBuf),

    /// General I/O error.
    #[error("I/O error for {path}: {source}")]
    Io {
        /// Path where the error occurred
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: io::Error,
    },
}

impl LinkError {
    fn from_io(path: &Path, error: io::Error) -> Self {
        match error.kind() {
            io::ErrorKind::CrossesDevices => Self::CrossVolume(path.to_path_buf()),
            io::ErrorKind::NotFound => Self::NotFound(path.to_path_buf()),
            io::ErrorKind::PermissionDenied => Self::PermissionDenied(path.to_path_buf()),
            _ => Self::Io {
                path: path.to_path_buf(),
                source: error,
            },
        }
    }
}

/// Configuration for link substitution.
#[derive(Debug, Clone, Copy)]
pub struct LinkConfig {
    /// Link variant selected for the target platform/filesystem.
    pub strategy: LinkStrategy,
    /// Perform every step except the filesystem mutation.
    pub dry_run: bool,
}

impl LinkConfig {
    /// Build a config.
    #[must_use]
    pub fn new(strategy: LinkStrategy, dry_run: bool) -> Self {
        Self { strategy, dry_run }
    }
}

/// Results of a batch link-substitution pass.
#[derive(Debug, Clone, Default)]
pub struct BatchLinkResult {
    /// Paths successfully replaced with links.
    pub linked: Vec<PathBuf>,
    /// Failed replacements with their error messages.
    pub failures: Vec<(PathBuf, String)>,
    /// Bytes reclaimed (sum of replaced members' recorded sizes).
    pub bytes_reclaimed: u64,
    /// Members skipped due to user exclusion.
    pub excluded: usize,
}

impl BatchLinkResult {
    /// Number of files replaced with links.
    #[must_use]
    pub fn linked_count(&self) -> usize {
        self.linked.len()
    }

    /// Number of failed replacements.
    #[must_use]
    pub fn failure_count(&self) -> usize {
        self.failures.len()
    }

    /// Check if every attempted replacement succeeded.
    #[must_use]
    pub fn all_succeeded(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Replaces duplicates with links to their group's kept copy.
#[derive(Debug)]
pub struct Linker {
    config: LinkConfig,
}

impl Linker {
    /// Create a linker with the given configuration.
    #[must_use]
    pub fn new(config: LinkConfig) -> Self {
        Self { config }
    }

    /// Process every group plan, accumulating per-file outcomes.
    ///
    /// Any single failure leaves that duplicate untouched and is
    /// recorded; remaining members and groups are still processed.
    /// In dry-run mode the counts are computed identically but the
    /// filesystem is never touched.
    #[must_use]
    pub fn process(&self, plans: &[GroupPlan]) -> BatchLinkResult {
        let mut result = BatchLinkResult::default();

        for plan in plans {
            result.excluded += plan.excluded.len();

            for duplicate in &plan.replace {
                if self.config.dry_run {
                    log::info!(
                        "would replace {} -> {}",
                        duplicate.path.display(),
                        plan.keep.path.display()
                    );
                    result.linked.push(duplicate.path.clone());
                    result.bytes_reclaimed += duplicate.size;
                    continue;
                }

                match self.replace_one(&plan.keep.path, &duplicate.path) {
                    Ok(()) => {
                        result.linked.push(duplicate.path.clone());
                        result.bytes_reclaimed += duplicate.size;
                    }
                    Err(e) => {
                        log::warn!("failed to link {}: {e}", duplicate.path.display());
                        result.failures.push((duplicate.path.clone(), e.to_string()));
                    }
                }
            }
        }

        result
    }

    /// Replace one duplicate with a link to the kept copy.
    ///
    /// The link is created under a temporary name next to the
    /// duplicate, then renamed over it. If any step fails the
    /// temporary entry is removed and the duplicate is left untouched.
    fn replace_one(&self, keep: &Path, duplicate: &Path) -> Result<(), LinkError> {
        let tmp = temp_link_path(duplicate);
        // Leftover from an interrupted earlier run; ours by convention.
        let _ = std::fs::remove_file(&tmp);

        match self.config.strategy {
            LinkStrategy::Hardlink => {
                std::fs::hard_link(keep, &tmp).map_err(|e| LinkError::from_io(duplicate, e))?;
            }
            LinkStrategy::Symlink => {
                let target = symlink_target(keep, duplicate)
                    .map_err(|e| LinkError::from_io(duplicate, e))?;
                create_symlink(&target, &tmp).map_err(|e| LinkError::from_io(duplicate, e))?;
            }
        }

        if let Err(e) = std::fs::rename(&tmp, duplicate) {
            let _ = std::fs::remove_file(&tmp);
            return Err(LinkError::from_io(duplicate, e));
        }

        log::info!(
            "created {}: {} -> {}",
            match self.config.strategy {
                LinkStrategy::Hardlink => "hard link",
                LinkStrategy::Symlink => "soft link",
            },
            duplicate.display(),
            keep.display()
        );
        Ok(())
    }
}

/// Temporary sibling name for the in-flight link.
fn temp_link_path(duplicate: &Path) -> PathBuf {
    let mut name = String::from(".");
    let file_name = duplicate
        .file_name()
        .map(|n| n.to_string_lossy())
        .unwrap_or_default();
    let _ = write!(name, "{file_name}.dupelink-tmp");
    duplicate.with_file_name(name)
}

/// Symlink target for the kept copy, relative to the duplicate's
/// parent directory so the link survives moving the whole tree.
fn symlink_target(keep: &Path, duplicate: &Path) -> io::Result<PathBuf> {
    let keep_abs = std::path::absolute(keep)?;
    let dup_abs = std::path::absolute(duplicate)?;
    let dup_dir = dup_abs.parent().unwrap_or(Path::new("/"));
    Ok(relative_path(&keep_abs, dup_dir))
}

/// Compute `target` relative to `base` (both absolute).
fn relative_path(target: &Path, base: &Path) -> PathBuf {
    let target_components: Vec<Component> = target.components().collect();
    let base_components: Vec<Component> = base.components().collect();

    let common = target_components
        .iter()
        .zip(&base_components)
        .take_while(|(a, b)| a == b)
        .count();

    let mut relative = PathBuf::new();
    for _ in common..base_components.len() {
        relative.push("..");
    }
    for component in &target_components[common..] {
        relative.push(component);
    }

    if relative.as_os_str().is_empty() {
        relative.push(".");
    }
    relative
}

#[cfg(unix)]
fn create_symlink(target: &Path, link: &Path) -> io::Result<()> {
    std::os::unix::fs::symlink(target, link)
}

#[cfg(windows)]
fn create_symlink(target: &Path, link: &Path) -> io::Result<()> {
    std::os::windows::fs::symlink_file(target, link)
}

#[cfg(not(any(unix, windows)))]
fn create_symlink(_target: &Path, _link: &Path) -> io::Result<()> {
    Err(io::Error::other("symlinks unsupported on this platform"))
}
