//! Adapter configuration from TOML (`[adapters.<id>]` sections)
//!
//! Entries override the built-in catalog or declare new adapters.

use consensus_domain::{AdapterProfile, CoverageTier};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Raw adapter entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileAdapterConfig {
    /// Set to false to drop a catalog adapter
    pub enabled: bool,
    pub name: Option<String>,
    pub provider: Option<String>,
    pub model: Option<String>,
    pub max_tokens: Option<u32>,
    pub strengths: Option<Vec<String>>,
    /// `all`, `european`, `major` or `none`
    pub coverage: Option<String>,
}

impl Default for FileAdapterConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            name: None,
            provider: None,
            model: None,
            max_tokens: None,
            strengths: None,
            coverage: None,
        }
    }
}

impl FileAdapterConfig {
    /// Apply this entry on top of `profile`
    fn apply_to(&self, mut profile: AdapterProfile) -> AdapterProfile {
        if let Some(name) = &self.name {
            profile.name = name.clone();
        }
        if let Some(provider) = &self.provider {
            profile.provider = provider.clone();
        }
        if let Some(model) = &self.model {
            profile.default_model = model.clone();
        }
        if let Some(max_tokens) = self.max_tokens {
            profile.max_tokens = max_tokens;
        }
        if let Some(strengths) = &self.strengths {
            profile.strengths = strengths.clone();
        }
        if let Some(coverage) = self
            .coverage
            .as_deref()
            .and_then(|c| c.parse::<CoverageTier>().ok())
        {
            profile.coverage = coverage;
        }
        profile
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FileAdaptersConfig(pub BTreeMap<String, FileAdapterConfig>);

impl FileAdaptersConfig {
    /// The built-in catalog with this configuration applied.
    ///
    /// New ids need at least a provider and a model; incomplete new entries
    /// are skipped (they are reported by validation).
    pub fn profiles(&self) -> Vec<AdapterProfile> {
        let mut profiles: Vec<AdapterProfile> = AdapterProfile::default_catalog()
            .into_iter()
            .filter_map(|profile| match self.0.get(profile.id.as_str()) {
                Some(entry) if !entry.enabled => None,
                Some(entry) => Some(entry.apply_to(profile)),
                None => Some(profile),
            })
            .collect();

        for (id, entry) in &self.0 {
            if !entry.enabled || profiles.iter().any(|p| p.id.as_str() == id) {
                continue;
            }
            if let (Some(provider), Some(model)) = (&entry.provider, &entry.model) {
                let base = AdapterProfile::new(id.as_str(), id.as_str(), provider, model);
                profiles.push(entry.apply_to(base));
            }
        }
        profiles
    }

    /// Ids of new entries missing a provider or model
    pub(crate) fn incomplete_entries(&self) -> Vec<&str> {
        let catalog = AdapterProfile::default_catalog();
        self.0
            .iter()
            .filter(|(id, entry)| {
                entry.enabled
                    && !catalog.iter().any(|p| p.id.as_str() == id.as_str())
                    && (entry.provider.is_none() || entry.model.is_none())
            })
            .map(|(id, _)| id.as_str())
            .collect()
    }

    /// Entries whose coverage value does not parse
    pub(crate) fn invalid_coverage(&self) -> Vec<(&str, &str)> {
        self.0
            .iter()
            .filter_map(|(id, entry)| {
                let coverage = entry.coverage.as_deref()?;
                coverage
                    .parse::<CoverageTier>()
                    .is_err()
                    .then_some((id.as_str(), coverage))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_is_catalog() {
        let profiles = FileAdaptersConfig::default().profiles();
        assert_eq!(profiles, AdapterProfile::default_catalog());
    }

    #[test]
    fn test_override_disable_and_add() {
        let toml_str = r#"
[gpt4]
model = "gpt-4o"

[llama3]
enabled = false

[local]
provider = "openai"
model = "local-model"
coverage = "major"
strengths = ["multilingual"]
"#;
        let adapters: FileAdaptersConfig = toml::from_str(toml_str).unwrap();
        let profiles = adapters.profiles();

        let gpt4 = profiles.iter().find(|p| p.id.as_str() == "gpt4").unwrap();
        assert_eq!(gpt4.default_model, "gpt-4o");
        assert!(!profiles.iter().any(|p| p.id.as_str() == "llama3"));
        let local = profiles.iter().find(|p| p.id.as_str() == "local").unwrap();
        assert_eq!(local.coverage, CoverageTier::Major);
        assert!(local.is_multilingual());
        assert_eq!(profiles.len(), 5);
    }

    #[test]
    fn test_incomplete_new_entry_is_skipped() {
        let toml_str = r#"
[mystery]
model = "m"
coverage = "cosmic"
"#;
        let adapters: FileAdaptersConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(adapters.profiles().len(), 5);
        assert_eq!(adapters.incomplete_entries(), vec!["mystery"]);
        assert_eq!(adapters.invalid_coverage(), vec![("mystery", "cosmic")]);
    }
}
