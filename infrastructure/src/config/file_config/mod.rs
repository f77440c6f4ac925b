//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and use domain types where appropriate.

mod adapters;
mod consensus;
mod logging;
mod output;
mod providers;
mod research;

pub use adapters::{FileAdapterConfig, FileAdaptersConfig};
pub use consensus::FileConsensusConfig;
pub use logging::FileLoggingConfig;
pub use output::FileOutputConfig;
pub use providers::{
    DEFAULT_TEMPERATURE, FileProviderConfig, FileProvidersConfig, ProviderSettings, WireFormat,
    provider_defaults,
};
pub use research::FileResearchConfig;

use serde::{Deserialize, Serialize};

/// How serious a configuration issue is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// The value was unusable and a default was substituted
    Error,
    /// The configuration works but may not behave as expected
    Warning,
}

/// A detected issue in the configuration
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigIssue {
    pub severity: Severity,
    /// Dotted path of the offending field
    pub field: String,
    pub message: String,
}

impl ConfigIssue {
    pub fn new(severity: Severity, field: impl Into<String>, message: String) -> Self {
        Self {
            severity,
            field: field.into(),
            message,
        }
    }
}

impl std::fmt::Display for ConfigIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Adapter overrides and additions
    pub adapters: FileAdaptersConfig,
    /// Consensus engine settings
    pub consensus: FileConsensusConfig,
    /// Research pipeline defaults
    pub research: FileResearchConfig,
    /// Provider endpoints and credentials
    pub providers: FileProvidersConfig,
    /// Output settings
    pub output: FileOutputConfig,
    pub logging: FileLoggingConfig,
}

impl FileConfig {
    /// Validate the entire configuration, returning all detected issues.
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();

        issues.extend(self.consensus.to_params().1);
        issues.extend(self.research.to_params().1);

        for id in self.adapters.incomplete_entries() {
            issues.push(ConfigIssue::new(
                Severity::Warning,
                format!("adapters.{}", id),
                "new adapters need both `provider` and `model`; entry ignored".to_string(),
            ));
        }
        for (id, coverage) in self.adapters.invalid_coverage() {
            issues.push(ConfigIssue::new(
                Severity::Warning,
                format!("adapters.{}.coverage", id),
                format!("unknown coverage tier '{}'; keeping the default", coverage),
            ));
        }

        let profiles = self.adapters.profiles();
        let known = |id: &str| profiles.iter().any(|p| p.id.as_str() == id);

        for id in &self.research.adapters {
            if !known(id.as_str()) {
                issues.push(ConfigIssue::new(
                    Severity::Error,
                    "research.adapters",
                    format!("unknown adapter '{}'", id),
                ));
            }
        }
        for (field, id) in [
            ("research.planning_adapter", &self.research.planning_adapter),
            ("consensus.merge_adapter", &self.consensus.merge_adapter),
        ] {
            if let Some(id) = id
                && !known(id.as_str())
            {
                issues.push(ConfigIssue::new(
                    Severity::Warning,
                    field,
                    format!("unknown adapter '{}'; falling back to automatic choice", id),
                ));
            }
        }

        for profile in &profiles {
            if self.providers.settings_for(&profile.provider).is_none() {
                issues.push(ConfigIssue::new(
                    Severity::Error,
                    format!("providers.{}", profile.provider),
                    format!(
                        "provider of adapter '{}' has no known endpoint; set `endpoint`",
                        profile.id
                    ),
                ));
            }
        }

        issues
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_full_config() {
        let toml_str = r#"
[consensus]
near_tie_threshold = 0.05
timeout_seconds = 60
merge_adapter = "claude"

[consensus.weights]
base = 0.2
consensus = 0.3
length = 0.1
relevance = 0.25
language_quality = 0.15

[research]
adapters = ["gpt4", "claude"]
depth = 3
language = "de"

[output]
format = "json"
color = false

[logging]
research_log = "research.jsonl"
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.consensus.near_tie_threshold, 0.05);
        assert_eq!(config.consensus.weights.consensus, 0.3);
        assert_eq!(config.research.adapters, vec!["gpt4", "claude"]);
        assert_eq!(config.research.depth, 3);
        assert!(!config.output.color);
        assert!(config.logging.research_log.is_some());
        assert!(config.validate().is_empty());
    }

    #[test]
    fn test_default_config() {
        let config = FileConfig::default();
        assert!(config.research.adapters.is_empty());
        assert_eq!(config.research.depth, 5);
        assert!(config.output.color);
        assert!(config.output.format.is_none());
    }

    #[test]
    fn test_validate_valid_config() {
        let config = FileConfig::default();
        assert!(config.validate().is_empty());
    }

    #[test]
    fn test_validate_reports_unknown_adapters() {
        let toml_str = r#"
[research]
adapters = ["gpt4", "hal9000"]
planning_adapter = "skynet"
"#;
        let config: FileConfig = toml::from_str(toml_str).unwrap();
        let issues = config.validate();
        assert_eq!(issues.len(), 2);
        assert!(issues.iter().any(|i| i.severity == Severity::Error
            && i.field == "research.adapters"
            && i.message.contains("hal9000")));
        assert!(issues.iter().any(|i| i.field == "research.planning_adapter"));
    }

    #[test]
    fn test_validate_reports_provider_without_endpoint() {
        let toml_str = r#"
[adapters.local]
provider = "acme"
model = "m"
"#;
        let config: FileConfig = toml::from_str(toml_str).unwrap();
        let issues = config.validate();
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].field, "providers.acme");
    }
}
