//! Output format value object

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// How a finished research record is rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Plan, step results, article and metrics
    Full,
    /// Only the article (default)
    #[default]
    Article,
    /// Only the research notes
    Notes,
    /// The whole record as JSON
    Json,
}

impl OutputFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Full => "full",
            OutputFormat::Article => "article",
            OutputFormat::Notes => "notes",
            OutputFormat::Json => "json",
        }
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "full" => Ok(OutputFormat::Full),
            "article" => Ok(OutputFormat::Article),
            "notes" => Ok(OutputFormat::Notes),
            "json" => Ok(OutputFormat::Json),
            other => Err(format!("unknown output format: {}", other)),
        }
    }
}
