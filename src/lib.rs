//! Artefactor - checksum ledger for artefact directories
//!
//! Keeps a flat `checksum.txt` per directory recording the SHA256 of each
//! artefact, so unchanged artefacts need not be re-hashed or re-published.

pub mod cache;
pub mod cli;
pub mod config;
pub mod error;

pub use cache::{CacheEntry, CacheStatus, ChecksumCache};
pub use error::{ArtefactorError, ArtefactorResult};
