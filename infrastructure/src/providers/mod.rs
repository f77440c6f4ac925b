//! LLM provider adapters
//!
//! One [`ModelAdapter`] implementation per wire format. [`build_registry`]
//! turns the configured adapter profiles into a ready [`AdapterRegistry`].

pub mod anthropic;
pub mod gemini;
mod http;
pub mod openai_compat;

pub use anthropic::AnthropicAdapter;
pub use gemini::GeminiAdapter;
pub use http::REQUEST_TIMEOUT;
pub use openai_compat::OpenAiCompatAdapter;

use crate::config::{FileProvidersConfig, WireFormat};
use consensus_application::{AdapterRegistry, ModelAdapter};
use consensus_domain::AdapterProfile;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// Build an adapter for every profile whose provider has a known endpoint.
///
/// Profiles without one are skipped with a warning. Missing API keys are
/// not checked here; such adapters fail at call time.
pub fn build_registry(
    profiles: Vec<AdapterProfile>,
    providers: &FileProvidersConfig,
    timeout: Duration,
) -> AdapterRegistry {
    let mut registry = AdapterRegistry::new();

    for profile in profiles {
        let Some(settings) = providers.settings_for(&profile.provider) else {
            warn!(
                adapter = %profile.id,
                provider = profile.provider.as_str(),
                "No endpoint known for provider, adapter skipped"
            );
            continue;
        };
        debug!(
            adapter = %profile.id,
            provider = profile.provider.as_str(),
            format = ?settings.wire_format,
            "Registering adapter"
        );

        let adapter: Arc<dyn ModelAdapter> = match settings.wire_format {
            WireFormat::OpenAiCompatible => {
                Arc::new(OpenAiCompatAdapter::new(profile, settings, timeout))
            }
            WireFormat::Anthropic => Arc::new(AnthropicAdapter::new(profile, settings, timeout)),
            WireFormat::Gemini => Arc::new(GeminiAdapter::new(profile, settings, timeout)),
        };
        registry.register(adapter);
    }

    registry
}

#[cfg(test)]
mod tests {
    use super::*;
    use consensus_domain::AdapterId;

    #[test]
    fn test_default_catalog_builds_every_adapter() {
        let registry = build_registry(
            AdapterProfile::default_catalog(),
            &FileProvidersConfig::default(),
            REQUEST_TIMEOUT,
        );
        assert_eq!(registry.len(), 5);
        let ids: Vec<String> = registry.ids().iter().map(|id| id.to_string()).collect();
        assert_eq!(ids, vec!["gpt4", "gemini", "claude", "mistral", "llama3"]);
        let claude = registry.get(&AdapterId::from("claude")).unwrap();
        assert_eq!(claude.profile().provider, "anthropic");
    }

    #[test]
    fn test_unknown_provider_is_skipped() {
        let profiles = vec![AdapterProfile::new("local", "Local", "acme", "m")];
        let registry = build_registry(profiles, &FileProvidersConfig::default(), REQUEST_TIMEOUT);
        assert!(registry.is_empty());
    }
}
