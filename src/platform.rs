//! Platform identification and link-strategy selection.
//!
//! The current platform is detected once at startup and threaded into
//! the scanner and linker as an explicit value, so the rest of the
//! code never consults ambient `cfg!` state to decide behavior.

use std::fmt;

/// The platform family the tool is running on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    /// POSIX-style systems (Linux, macOS, BSDs): symlinks are cheap
    /// and well supported.
    Posix,
    /// Windows: symlink creation requires elevated privileges, so
    /// hard links are used instead.
    Windows,
}

impl Platform {
    /// Detect the platform the current process is running on.
    #[must_use]
    pub fn current() -> Self {
        if cfg!(windows) {
            Self::Windows
        } else {
            Self::Posix
        }
    }

    /// The link strategy appropriate for this platform.
    #[must_use]
    pub fn link_strategy(self) -> LinkStrategy {
        match self {
            Self::Posix => LinkStrategy::Symlink,
            Self::Windows => LinkStrategy::Hardlink,
        }
    }

    /// Whether the executable-extension exclusion policy is meaningful
    /// on this platform. Hard-linking an executable in place can break
    /// installers and self-updating programs, so the filter only
    /// applies where hard links are used.
    #[must_use]
    pub fn supports_executable_exclusion(self) -> bool {
        self.link_strategy() == LinkStrategy::Hardlink
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Posix => write!(f, "POSIX"),
            Self::Windows => write!(f, "Windows"),
        }
    }
}

/// How a duplicate is replaced with a reference to the kept copy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkStrategy {
    /// Symbolic link pointing at the kept copy's path.
    Symlink,
    /// Hard link sharing the kept copy's inode; requires same-volume
    /// residency.
    Hardlink,
}

impl fmt::Display for LinkStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Symlink => write!(f, "soft links (symlinks)"),
            Self::Hardlink => write!(f, "hard links"),
        }
    }
}
