//! Research configuration from TOML (`[research]` section)

use super::{ConfigIssue, Severity};
use consensus_application::ResearchParams;
use consensus_domain::core::language;
use consensus_domain::{AdapterId, DEFAULT_DEPTH, DEFAULT_LANGUAGE};
use serde::{Deserialize, Serialize};

/// Raw research configuration from TOML
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileResearchConfig {
    /// Adapters queried when the command line names none
    pub adapters: Vec<String>,
    pub depth: usize,
    pub language: String,
    /// Adapter asked for the research plan (default: best fit for the language)
    pub planning_adapter: Option<String>,
    /// Translate step results when a target language is given
    pub translate_steps: bool,
}

impl Default for FileResearchConfig {
    fn default() -> Self {
        Self {
            adapters: Vec::new(),
            depth: DEFAULT_DEPTH,
            language: DEFAULT_LANGUAGE.to_string(),
            planning_adapter: None,
            translate_steps: true,
        }
    }
}

impl FileResearchConfig {
    pub fn to_params(&self) -> (ResearchParams, Vec<ConfigIssue>) {
        let mut issues = Vec::new();

        let depth = if self.depth == 0 {
            issues.push(ConfigIssue::new(
                Severity::Warning,
                "research.depth",
                format!("depth must be at least 1; using {}", DEFAULT_DEPTH),
            ));
            DEFAULT_DEPTH
        } else {
            self.depth
        };

        if !language::is_supported(&self.language) {
            issues.push(ConfigIssue::new(
                Severity::Warning,
                "research.language",
                format!(
                    "'{}' is not a registered language; English templates will be used",
                    self.language
                ),
            ));
        }

        let mut params = ResearchParams::default()
            .with_default_depth(depth)
            .with_default_language(self.language.clone());
        if let Some(adapter) = &self.planning_adapter {
            params = params.with_planning_adapter(adapter.as_str());
        }
        if !self.translate_steps {
            params = params.without_translation();
        }
        (params, issues)
    }

    /// Default adapter selection as ids
    pub fn adapter_ids(&self) -> Vec<AdapterId> {
        self.adapters.iter().map(|a| AdapterId::from(a.as_str())).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_depth_is_corrected() {
        let config = FileResearchConfig {
            depth: 0,
            ..Default::default()
        };
        let (params, issues) = config.to_params();
        assert_eq!(params.default_depth, DEFAULT_DEPTH);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].field, "research.depth");
    }

    #[test]
    fn test_planning_adapter_and_translation() {
        let config = FileResearchConfig {
            planning_adapter: Some("claude".to_string()),
            translate_steps: false,
            language: "tr".to_string(),
            ..Default::default()
        };
        let (params, issues) = config.to_params();
        assert!(issues.is_empty());
        assert_eq!(params.planning_adapter, Some(AdapterId::from("claude")));
        assert!(!params.translate_steps);
        assert_eq!(params.default_language, "tr");
    }
}
