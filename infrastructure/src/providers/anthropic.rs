//! Anthropic Messages API adapter

use super::http::{build_client, extract_text, resolve_api_key, send_json};
use crate::config::ProviderSettings;
use async_trait::async_trait;
use consensus_application::{AdapterError, AdapterFailure, ModelAdapter};
use consensus_domain::{AdapterProfile, PromptTemplate};
use reqwest::Client;
use serde_json::{Value, json};
use std::time::Duration;
use tracing::debug;

/// Output cap of the Messages API regardless of the profile
const MAX_OUTPUT_TOKENS: u32 = 4096;

pub struct AnthropicAdapter {
    profile: AdapterProfile,
    settings: ProviderSettings,
    api_key: Option<String>,
    client: Client,
    timeout: Duration,
}

impl AnthropicAdapter {
    pub fn new(profile: AdapterProfile, settings: ProviderSettings, timeout: Duration) -> Self {
        let api_key = resolve_api_key(settings.api_key.as_deref(), &settings.api_key_env);
        Self {
            profile,
            settings,
            api_key,
            client: build_client(timeout),
            timeout,
        }
    }

    pub(crate) fn build_body(&self, prompt: &str, language: &str) -> Value {
        json!({
            "model": self.profile.default_model,
            "system": PromptTemplate::language_instruction(language),
            "messages": [{ "role": "user", "content": prompt }],
            "temperature": self.settings.temperature,
            "max_tokens": self.profile.max_tokens.min(MAX_OUTPUT_TOKENS),
        })
    }

    pub(crate) fn parse_reply(&self, reply: &Value) -> Result<String, AdapterError> {
        extract_text(&self.settings.provider, reply, "/content/0/text")
    }
}

#[async_trait]
impl ModelAdapter for AnthropicAdapter {
    fn profile(&self) -> &AdapterProfile {
        &self.profile
    }

    async fn invoke(&self, prompt: &str, language: &str) -> Result<String, AdapterError> {
        let provider = self.settings.provider.as_str();
        let Some(api_key) = &self.api_key else {
            return Err(AdapterError::new(
                provider,
                AdapterFailure::Configuration(format!("{} is not set", self.settings.api_key_env)),
            ));
        };

        debug!(
            adapter = %self.profile.id,
            model = self.profile.default_model.as_str(),
            "Sending Anthropic messages request"
        );
        let request = self
            .client
            .post(&self.settings.endpoint)
            .header("x-api-key", api_key)
            .header("anthropic-version", &self.settings.api_version);
        let reply = send_json(
            provider,
            request,
            &self.build_body(prompt, language),
            self.timeout,
        )
        .await?;
        self.parse_reply(&reply)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FileProvidersConfig;

    fn adapter() -> AnthropicAdapter {
        let profile = AdapterProfile::new("claude", "Claude", "anthropic", "claude-test")
            .with_max_tokens(100_000);
        let mut settings = FileProvidersConfig::default().settings_for("anthropic").unwrap();
        settings.api_key_env = "CONSENSUS_TEST_UNSET_KEY".to_string();
        AnthropicAdapter::new(profile, settings, Duration::from_secs(5))
    }

    #[test]
    fn test_body_uses_system_field_and_caps_tokens() {
        let body = adapter().build_body("Summarize", "de");
        assert_eq!(body["system"], PromptTemplate::language_instruction("de"));
        assert_eq!(body["messages"].as_array().unwrap().len(), 1);
        assert_eq!(body["messages"][0]["role"], "user");
        assert_eq!(body["max_tokens"], 4096);
    }

    #[test]
    fn test_parse_reply() {
        let reply = json!({ "content": [{ "type": "text", "text": "Zusammenfassung" }] });
        assert_eq!(adapter().parse_reply(&reply).unwrap(), "Zusammenfassung");
        assert!(adapter().parse_reply(&json!({})).is_err());
    }
}
