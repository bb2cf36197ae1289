//! Checksum ledger line format
//!
//! One entry per line: `<hex digest><whitespace><file name>`. The file name
//! is a base name; the directory is implied by the ledger's own location.

use std::fmt;

/// Default ledger file name inside a cached directory
pub const DEFAULT_LEDGER_FILE_NAME: &str = "checksum.txt";

/// A single parsed ledger line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerLine {
    /// Hex digest as written in the ledger
    pub checksum: String,
    /// Base file name, relative to the ledger's directory
    pub file_name: String,
}

impl LedgerLine {
    /// Create a ledger line
    pub fn new(checksum: impl Into<String>, file_name: impl Into<String>) -> Self {
        Self {
            checksum: checksum.into(),
            file_name: file_name.into(),
        }
    }

    /// Parse a ledger line. Returns `None` unless the line splits into
    /// exactly two whitespace-separated tokens and the second is a bare
    /// file name.
    pub fn parse(line: &str) -> Option<Self> {
        let mut fields = line.split_whitespace();
        let checksum = fields.next()?;
        let file_name = fields.next()?;
        if fields.next().is_some() || !is_base_name(file_name) {
            return None;
        }
        Some(Self::new(checksum, file_name))
    }
}

impl fmt::Display for LedgerLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}  {}", self.checksum, self.file_name)
    }
}

/// Whether a file name survives a write/parse cycle unchanged
pub fn is_representable(file_name: &str) -> bool {
    !file_name.is_empty()
        && !file_name.chars().any(char::is_whitespace)
        && is_base_name(file_name)
}

fn is_base_name(name: &str) -> bool {
    name != "." && name != ".." && !name.contains(['/', '\\'])
}
