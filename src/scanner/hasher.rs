//! BLAKE3 file hasher with streaming support.
//!
//! Reads files in bounded chunks so memory use stays constant no
//! matter how large the file is. A hash failure is always per-file:
//! callers skip the file and keep going.

use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

use super::HashError;

/// A BLAKE3 content digest (32 bytes).
pub type Digest = [u8; 32];

/// Chunk size for streaming reads.
const CHUNK_SIZE: usize = 64 * 1024;

/// Streaming file hasher.
#[derive(Debug, Default)]
pub struct Hasher;

impl Hasher {
    /// Create a new hasher.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Compute the BLAKE3 digest of a file's full content.
    ///
    /// # Errors
    ///
    /// Returns a [`HashError`] if the file cannot be opened or becomes
    /// unreadable mid-read (permission revoked, removed concurrently).
    pub fn hash_file(&self, path: &Path) -> Result<Digest, HashError> {
        let mut file = File::open(path).map_err(|e| map_io_error(path, e))?;
        let mut hasher = blake3::Hasher::new();
        let mut buffer = vec![0u8; CHUNK_SIZE];

        loop {
            let read = file
                .read(&mut buffer)
                .map_err(|e| map_io_error(path, e))?;
            if read == 0 {
                break;
            }
            hasher.update(&buffer[..read]);
        }

        Ok(*hasher.finalize().as_bytes())
    }
}

fn map_io_error(path: &Path, error: io::Error) -> HashError {
    match error.kind() {
        io::ErrorKind::NotFound => HashError::NotFound(path.to_path_buf()),
        io::ErrorKind::PermissionDenied => HashError::PermissionDenied(path.to_path_buf()),
        _ => HashError::Io {
            path: path.to_path_buf(),
            source: error,
        },
    }
}

/// Render a digest as a lowercase hexadecimal string.
#[must_use]
pub fn hash_to_hex(digest: &Digest) -> String {
    let mut hex = String::with_capacity(64);
    for byte in digest {
        use std::fmt::Write;
        let _ = write!(hex, "{byte:02x}");
    }
    hex
}
