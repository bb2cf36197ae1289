//! Configuration schema for Artefactor
//!
//! Configuration is stored at `~/.config/artefactor/config.toml`

use crate::cache::DEFAULT_LEDGER_FILE_NAME;
use serde::{Deserialize, Serialize};

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// General settings
    pub general: GeneralConfig,

    /// Checksum ledger settings
    pub ledger: LedgerConfig,
}

impl Config {
    /// Check values that serde alone can't, returning a reason on failure
    pub fn validate(&self) -> Result<(), String> {
        let name = &self.ledger.file_name;
        if name.trim().is_empty() {
            return Err("ledger.file_name must not be empty".to_string());
        }
        if name.contains(['/', '\\']) || name == "." || name == ".." {
            return Err(format!(
                "ledger.file_name must be a bare file name, got {:?}",
                name
            ));
        }
        Ok(())
    }
}

/// Log output format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable lines
    #[default]
    Text,
    /// One JSON object per event
    Json,
}

/// General application settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Log format: "text" or "json"
    pub log_format: LogFormat,
}

/// Checksum ledger configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LedgerConfig {
    /// Ledger file name inside each artefact directory
    pub file_name: String,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            file_name: DEFAULT_LEDGER_FILE_NAME.to_string(),
        }
    }
}
