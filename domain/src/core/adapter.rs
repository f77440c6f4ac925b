//! Adapter value objects
//!
//! An adapter is the integration point for one external LLM provider.
//! This module only carries the static metadata that scoring needs; the
//! transport lives in the infrastructure layer.

use crate::core::language;
use serde::{Deserialize, Serialize};

/// Identifier of a configured adapter (e.g. `"gpt4"`, `"claude"`)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AdapterId(String);

impl AdapterId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for AdapterId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for AdapterId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for AdapterId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Declared language coverage of an adapter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CoverageTier {
    /// Supports most languages
    All,
    /// Strong in European languages
    European,
    /// Supports the major world languages
    Major,
    /// No declared coverage
    #[default]
    None,
}

impl CoverageTier {
    /// Bonus this tier earns for `language`
    ///
    /// `all` always earns 0.5, `european` earns 0.4 for European families,
    /// `major` earns 0.3 for the major languages; anything else earns 0.
    pub fn bonus_for(&self, language: &str) -> f64 {
        match self {
            CoverageTier::All => 0.5,
            CoverageTier::European if language::family(language).is_european() => 0.4,
            CoverageTier::Major if language::is_major(language) => 0.3,
            _ => 0.0,
        }
    }
}

impl std::str::FromStr for CoverageTier {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "all" => Ok(CoverageTier::All),
            "european" => Ok(CoverageTier::European),
            "major" => Ok(CoverageTier::Major),
            "none" | "" => Ok(CoverageTier::None),
            other => Err(format!("unknown coverage tier '{}'", other)),
        }
    }
}

/// Static description of an adapter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdapterProfile {
    pub id: AdapterId,
    /// Human readable name
    pub name: String,
    /// Provider identifier (`openai`, `google`, `anthropic`, `mistral`, `meta`, ...)
    pub provider: String,
    /// Underlying model requested by default
    pub default_model: String,
    /// Declared strengths (`coding`, `creativity`, `multilingual`, ...)
    pub strengths: Vec<String>,
    /// Maximum output size in tokens
    pub max_tokens: u32,
    pub coverage: CoverageTier,
}

impl AdapterProfile {
    pub fn new(
        id: impl Into<AdapterId>,
        name: impl Into<String>,
        provider: impl Into<String>,
        default_model: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            provider: provider.into(),
            default_model: default_model.into(),
            strengths: Vec::new(),
            max_tokens: 4096,
            coverage: CoverageTier::None,
        }
    }

    pub fn with_strengths(mut self, strengths: &[&str]) -> Self {
        self.strengths = strengths.iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn with_coverage(mut self, coverage: CoverageTier) -> Self {
        self.coverage = coverage;
        self
    }

    pub fn has_strength(&self, strength: &str) -> bool {
        self.strengths.iter().any(|s| s == strength)
    }

    pub fn is_multilingual(&self) -> bool {
        self.has_strength("multilingual")
    }

    /// Built-in catalog of the five stock adapters
    pub fn default_catalog() -> Vec<AdapterProfile> {
        vec![
            AdapterProfile::new("gpt4", "GPT-4", "openai", "gpt-4-turbo-preview")
                .with_strengths(&["reasoning", "creativity", "formatting", "multilingual"])
                .with_max_tokens(4096)
                .with_coverage(CoverageTier::All),
            AdapterProfile::new("gemini", "Gemini Pro", "google", "gemini-pro")
                .with_strengths(&["technical", "factual", "multimodal", "multilingual"])
                .with_max_tokens(2048)
                .with_coverage(CoverageTier::Major),
            AdapterProfile::new("claude", "Claude 3", "anthropic", "claude-3-opus-20240229")
                .with_strengths(&["long-context", "analysis", "safety", "multilingual"])
                .with_max_tokens(4096)
                .with_coverage(CoverageTier::Major),
            AdapterProfile::new("mistral", "Mistral Large", "mistral", "mistral-large-latest")
                .with_strengths(&["efficiency", "multilingual", "coding", "european"])
                .with_max_tokens(32000)
                .with_coverage(CoverageTier::European),
            AdapterProfile::new(
                "llama3",
                "Llama 3",
                "meta",
                "meta-llama/Meta-Llama-3-70B-Instruct",
            )
            .with_strengths(&["open-source", "balanced", "customizable", "multilingual"])
            .with_max_tokens(8192)
            .with_coverage(CoverageTier::Major),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coverage_bonus() {
        assert_eq!(CoverageTier::All.bonus_for("xx"), 0.5);
        assert_eq!(CoverageTier::European.bonus_for("de"), 0.4);
        assert_eq!(CoverageTier::European.bonus_for("ja"), 0.0);
        assert_eq!(CoverageTier::Major.bonus_for("ja"), 0.3);
        assert_eq!(CoverageTier::Major.bonus_for("fi"), 0.0);
        assert_eq!(CoverageTier::None.bonus_for("en"), 0.0);
    }

    #[test]
    fn test_coverage_parse() {
        assert_eq!("ALL".parse::<CoverageTier>().unwrap(), CoverageTier::All);
        assert!("galactic".parse::<CoverageTier>().is_err());
    }

    #[test]
    fn test_default_catalog() {
        let catalog = AdapterProfile::default_catalog();
        assert_eq!(catalog.len(), 5);
        assert!(catalog.iter().all(|p| p.is_multilingual()));
        let mistral = catalog.iter().find(|p| p.id.as_str() == "mistral").unwrap();
        assert!(mistral.has_strength("coding"));
        assert_eq!(mistral.coverage, CoverageTier::European);
    }

    #[test]
    fn test_adapter_id_display() {
        let id = AdapterId::from("claude");
        assert_eq!(id.to_string(), "claude");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"claude\"");
    }
}
