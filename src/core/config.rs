//! File-driven logger configuration
//!
//! ```
//! use rust_journal_logger::core::config::LoggerConfig;
//! use rust_journal_logger::BackendChoice;
//!
//! let config = LoggerConfig::from_json_str(r#"{
//!     "backend": "plain",
//!     "deferred": true,
//!     "constant_fields": { "SERVICE": "billing" }
//! }"#).unwrap();
//!
//! assert_eq!(config.backend, BackendChoice::Plain);
//! assert!(config.deferred);
//! ```

use super::backend::{BackendChoice, BackendOptions, DEFAULT_JOURNAL_SOCKET};
use super::error::{LoggerError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggerConfig {
    pub backend: BackendChoice,
    pub deferred: bool,
    pub constant_fields: BTreeMap<String, String>,
    pub journal_socket: PathBuf,
    pub debug_mirror: bool,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            backend: BackendChoice::Auto,
            deferred: false,
            constant_fields: BTreeMap::new(),
            journal_socket: PathBuf::from(DEFAULT_JOURNAL_SOCKET),
            debug_mirror: false,
        }
    }
}

impl LoggerConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: LoggerConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| {
            LoggerError::io_operation(
                "reading logger configuration",
                path.display().to_string(),
                e,
            )
        })?;
        Self::from_json_str(&text)
    }

    /// Field names must be non-empty and must not contain `=`
    pub fn validate(&self) -> Result<()> {
        for name in self.constant_fields.keys() {
            if name.is_empty() || name.contains('=') {
                return Err(LoggerError::config(
                    "constant_fields",
                    format!("invalid field name '{}'", name),
                ));
            }
        }
        if self.journal_socket.as_os_str().is_empty() {
            return Err(LoggerError::config("journal_socket", "path is empty"));
        }
        Ok(())
    }

    pub fn backend_options(&self) -> BackendOptions {
        BackendOptions {
            journal_socket: self.journal_socket.clone(),
            debug_mirror: self.debug_mirror,
        }
    }
}
