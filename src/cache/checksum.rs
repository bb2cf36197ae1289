//! Content hashing for tracked files
//!
//! Checksums are SHA256 over the file bytes only, rendered as lowercase hex.
//! Timestamps and permissions never contribute.

use crate::error::{ArtefactorError, ArtefactorResult};
use sha2::{Digest, Sha256};
use std::fs::File;
use std::io::{self, BufReader};
use std::path::Path;

/// Length of a hex-encoded SHA256 digest
pub const CHECKSUM_HEX_LEN: usize = 64;

/// Stream a file through SHA256 and return the full hex digest
pub fn calc_checksum(path: &Path) -> ArtefactorResult<String> {
    let file = File::open(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => ArtefactorError::FileNotFound(path.to_path_buf()),
        _ => ArtefactorError::io(format!("opening {}", path.display()), e),
    })?;

    let mut reader = BufReader::new(file);
    let mut hasher = Sha256::new();
    io::copy(&mut reader, &mut hasher)
        .map_err(|e| ArtefactorError::io(format!("reading {}", path.display()), e))?;

    Ok(hex::encode(hasher.finalize()))
}
