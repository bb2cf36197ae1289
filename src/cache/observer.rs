//! Cache event hook
//!
//! Cache hits, misses and malformed ledger lines are reported to a
//! [`CacheObserver`]. The default [`TracingObserver`] logs them; tests can
//! install a recording observer instead of scraping log output.

use std::fmt;
use std::path::Path;
use tracing::{debug, warn};

/// Why a lookup did not hit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissReason {
    /// The file is not on disk
    FileMissing,
    /// The file is on disk but has no ledger entry
    Untracked,
    /// The ledger entry holds a different checksum
    ChecksumMismatch,
}

impl fmt::Display for MissReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FileMissing => write!(f, "file doesn't exist"),
            Self::Untracked => write!(f, "not in checksum file"),
            Self::ChecksumMismatch => write!(f, "checksum mismatch"),
        }
    }
}

/// Receives cache events. All methods default to no-ops.
pub trait CacheObserver: Send + Sync {
    /// The ledger file was absent during a refresh
    fn ledger_missing(&self, _ledger: &Path) {}

    /// A ledger line was skipped (`line_number` is 1-based)
    fn malformed_line(&self, _ledger: &Path, _line_number: usize, _line: &str) {}

    /// A lookup found a valid entry
    fn cache_hit(&self, _path: &Path) {}

    /// A lookup did not find a valid entry
    fn cache_miss(&self, _path: &Path, _reason: MissReason) {}

    /// An entry was written to the ledger
    fn entry_updated(&self, _path: &Path, _checksum: &str) {}
}

/// Observer that forwards events to `tracing`
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl CacheObserver for TracingObserver {
    fn ledger_missing(&self, ledger: &Path) {
        debug!("No checksum file found at {}", ledger.display());
    }

    fn malformed_line(&self, ledger: &Path, line_number: usize, line: &str) {
        warn!(
            "Invalid cache entry at {}:{}: {:?}",
            ledger.display(),
            line_number,
            line
        );
    }

    fn cache_hit(&self, path: &Path) {
        debug!("Cache hit for {}", path.display());
    }

    fn cache_miss(&self, path: &Path, reason: MissReason) {
        debug!("Cache miss for {} ({})", path.display(), reason);
    }

    fn entry_updated(&self, path: &Path, checksum: &str) {
        debug!("Updated checksum for {} => {}", path.display(), checksum);
    }
}
