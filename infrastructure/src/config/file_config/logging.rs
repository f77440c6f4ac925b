//! Logging configuration from TOML (`[logging]` section)

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Raw logging configuration from TOML
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileLoggingConfig {
    /// JSONL file receiving research step events
    pub research_log: Option<PathBuf>,
    /// Default tracing filter when no `-v` flag is given (e.g. `"info"`)
    pub level: Option<String>,
}
