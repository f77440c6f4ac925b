//! Gemini generateContent adapter

use super::http::{build_client, extract_text, resolve_api_key, send_json};
use crate::config::ProviderSettings;
use async_trait::async_trait;
use consensus_application::{AdapterError, AdapterFailure, ModelAdapter};
use consensus_domain::{AdapterProfile, PromptTemplate};
use reqwest::Client;
use serde_json::{Value, json};
use std::time::Duration;
use tracing::debug;

pub struct GeminiAdapter {
    profile: AdapterProfile,
    settings: ProviderSettings,
    api_key: Option<String>,
    client: Client,
    timeout: Duration,
}

impl GeminiAdapter {
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

    /// Endpoint with the model substituted; the key goes in the query string
    pub(crate) fn endpoint(&self) -> String {
        self.settings
            .endpoint
            .replace("{model}", &self.profile.default_model)
    }

    /// Gemini has no system role here: the instruction is prepended to the prompt
    pub(crate) fn build_body(&self, prompt: &str, language: &str) -> Value {
        let text = format!("{}\n\n{}", PromptTemplate::language_instruction(language), prompt);
        json!({
            "contents": [{ "parts": [{ "text": text }] }],
            "generationConfig": {
                "temperature": self.settings.temperature,
                "maxOutputTokens": self.profile.max_tokens,
            },
        })
    }

    pub(crate) fn parse_reply(&self, reply: &Value) -> Result<String, AdapterError> {
        extract_text(
            &self.settings.provider,
            reply,
            "/candidates/0/content/parts/0/text",
        )
    }
}

#[async_trait]
impl ModelAdapter for GeminiAdapter {
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
            "Sending Gemini generateContent request"
        );
        let request = self
            .client
            .post(self.endpoint())
            .query(&[("key", api_key.as_str())]);
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

    fn adapter() -> GeminiAdapter {
        let profile = AdapterProfile::default_catalog()
            .into_iter()
            .find(|p| p.id.as_str() == "gemini")
            .unwrap();
        let mut settings = FileProvidersConfig::default().settings_for("google").unwrap();
        settings.api_key_env = "CONSENSUS_TEST_UNSET_KEY".to_string();
        GeminiAdapter::new(profile, settings, Duration::from_secs(5))
    }

    #[test]
    fn test_endpoint_substitutes_model() {
        assert!(adapter().endpoint().ends_with("/models/gemini-pro:generateContent"));
    }

    #[test]
    fn test_body_prepends_instruction() {
        let body = adapter().build_body("Was ist Solarenergie?", "de");
        let text = body["contents"][0]["parts"][0]["text"].as_str().unwrap();
        assert!(text.starts_with(&PromptTemplate::language_instruction("de")));
        assert!(text.ends_with("Was ist Solarenergie?"));
        assert_eq!(body["generationConfig"]["maxOutputTokens"], 2048);
    }

    #[test]
    fn test_parse_reply() {
        let reply = json!({
            "candidates": [{ "content": { "parts": [{ "text": "Antwort" }] } }]
        });
        assert_eq!(adapter().parse_reply(&reply).unwrap(), "Antwort");
        assert!(adapter().parse_reply(&json!({ "candidates": [] })).is_err());
    }
}
