//! Persistent checksum cache for artefact directories
//!
//! Each directory carries one flat ledger file (`checksum.txt` by default)
//! mapping file names to SHA256 digests. Callers use it to decide whether an
//! artefact changed since it was last recorded.
//!
//! # Ledger Format
//!
//! ```text
//! <sha256 hex>  <file name>
//! ```
//!
//! One line per file, order not significant. Lines that don't have exactly
//! two fields are skipped on read. Updates rewrite the whole file.
//!
//! # Lookups
//!
//! | Status | File on disk | Ledger entry | Checksum |
//! |--------|--------------|--------------|----------|
//! | Hit | yes | yes | matches (if given) |
//! | FileMissing | no | any | any |
//! | Untracked | yes | no | - |
//! | Mismatch | yes | yes | differs |

pub mod checksum;
pub mod ledger;
pub mod observer;
pub mod path;
pub mod store;

pub use checksum::{calc_checksum, CHECKSUM_HEX_LEN};
pub use ledger::{LedgerLine, DEFAULT_LEDGER_FILE_NAME};
pub use observer::{CacheObserver, MissReason, TracingObserver};
pub use path::clean_path;
pub use store::{
    cached_checksum, list_tracked_files, update_cache, CacheEntry, CacheStatus, ChecksumCache,
};
