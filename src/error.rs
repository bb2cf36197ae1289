//! Error types for Artefactor
//!
//! All modules use `ArtefactorResult<T>` as their return type.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Result type alias for Artefactor operations
pub type ArtefactorResult<T> = Result<T, ArtefactorError>;

/// All errors that can occur in Artefactor
#[derive(Error, Debug)]
pub enum ArtefactorError {
    // Ledger errors
    #[error("No checksum file {0}")]
    LedgerNotFound(PathBuf),

    #[error("File {0} doesn't exist")]
    FileNotFound(PathBuf),

    #[error("No checksum exists for file entry {0}")]
    NotCached(PathBuf),

    #[error("Cache miss for {path}: {reason}")]
    CacheMiss { path: PathBuf, reason: String },

    // Configuration errors
    #[error("Invalid configuration at {path}: {reason}")]
    ConfigInvalid { path: PathBuf, reason: String },

    // IO errors
    #[error("IO error: {context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid path: {path}: {reason}")]
    PathInvalid { path: PathBuf, reason: String },

    // Serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
}

impl ArtefactorError {
    /// Create an IO error with context
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    /// Create an invalid path error
    pub fn path_invalid(path: &Path, reason: impl Into<String>) -> Self {
        Self::PathInvalid {
            path: path.to_path_buf(),
            reason: reason.into(),
        }
    }

    /// Whether a required ledger or tracked file was absent
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::LedgerNotFound(_) | Self::FileNotFound(_))
    }

    /// Get actionable hint for the error
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            Self::LedgerNotFound(_) => {
                Some("Run: artefactor update <file> to create the checksum file")
            }
            Self::NotCached(_) | Self::CacheMiss { .. } => {
                Some("Run: artefactor update <file> to record its checksum")
            }
            Self::ConfigInvalid { .. } => Some("Run: artefactor config path to locate the file"),
            _ => None,
        }
    }
}
