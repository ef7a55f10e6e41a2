//! Scanner module for directory traversal and file hashing.
//!
//! The scanner is divided into submodules:
//! - [`walker`]: deterministic directory traversal and file discovery
//! - [`hasher`]: BLAKE3 content hashing (streaming)

pub mod hasher;
pub mod walker;

use std::path::PathBuf;

use crate::platform::Platform;

pub use hasher::{hash_to_hex, Digest, Hasher};
pub use walker::Scanner;

/// Extensions excluded from deduplication when the executable-exclusion
/// policy is active (case-insensitive). Hard-linking these in place can
/// break installers and self-updating programs.
pub const EXECUTABLE_EXTENSIONS: [&str; 8] =
    ["exe", "dll", "sys", "com", "bat", "cmd", "msi", "scr"];

/// A candidate file discovered during the scan.
///
/// Immutable once created, except for the digest which is computed
/// exactly once during grouping.
#[derive(Debug, Clone)]
pub struct FileRecord {
    /// Absolute path to the file
    pub path: PathBuf,
    /// File size in bytes
    pub size: u64,
    /// BLAKE3 content digest; `None` until the grouper hashes the file
    pub digest: Option<Digest>,
}

impl FileRecord {
    /// Create a record for a discovered file, not yet hashed.
    #[must_use]
    pub fn new(path: PathBuf, size: u64) -> Self {
        Self {
            path,
            size,
            digest: None,
        }
    }
}

/// Configuration for directory scanning.
#[derive(Debug, Clone, Copy)]
pub struct ScanConfig {
    /// Platform the scan runs on; gates the executable exclusion.
    pub platform: Platform,
    /// Exclude executable file extensions from deduplication.
    /// Only effective where hard links are used.
    pub exclude_executables: bool,
}

impl ScanConfig {
    /// Build a config for the given platform.
    #[must_use]
    pub fn new(platform: Platform, exclude_executables: bool) -> Self {
        Self {
            platform,
            exclude_executables,
        }
    }

    /// Whether the executable filter is active for this run.
    #[must_use]
    pub fn executable_filter_active(&self) -> bool {
        self.exclude_executables && self.platform.supports_executable_exclusion()
    }
}

/// Errors that can occur during directory scanning.
///
/// All variants are per-entry and recoverable: the walk continues past
/// them and they are surfaced in the final summary.
#[derive(thiserror::Error, Debug)]
pub enum ScanError {
    /// Permission was denied when accessing a file or directory.
    #[error("permission denied: {0}")]
    PermissionDenied(PathBuf),

    /// The entry disappeared between discovery and stat.
    #[error("path not found: {0}")]
    NotFound(PathBuf),

    /// An I/O error occurred while accessing an entry.
    #[error("I/O error for {path}: {source}")]
    Io {
        /// Path where the error occurred
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },
}

/// Errors that can occur while hashing a file.
#[derive(thiserror::Error, Debug)]
pub enum HashError {
    /// The file disappeared before it could be read.
    #[error("file not found: {0}")]
    NotFound(PathBuf),

    /// Permission was denied when reading the file.
    #[error("permission denied: {0}")]
    PermissionDenied(PathBuf),

    /// An I/O error occurred while reading the file.
    #[error("I/O error for {path}: {source}")]
    Io {
        /// Path where the error occurred
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },
}

impl HashError {
    /// The path the error refers to.
    #[must_use]
    pub fn path(&self) -> &PathBuf {
        match self {
            Self::NotFound(p) | Self::PermissionDenied(p) => p,
            Self::Io { path, .. } => path,
        }
    }
}
