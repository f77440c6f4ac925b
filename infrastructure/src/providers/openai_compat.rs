//! OpenAI-compatible chat completions adapter (OpenAI, Mistral, Meta/Anyscale)

use super::http::{build_client, extract_text, resolve_api_key, send_json};
use crate::config::ProviderSettings;
use async_trait::async_trait;
use consensus_application::{AdapterError, AdapterFailure, ModelAdapter};
use consensus_domain::{AdapterProfile, PromptTemplate};
use reqwest::Client;
use serde_json::{Value, json};
use std::time::Duration;
use tracing::debug;

pub struct OpenAiCompatAdapter {
    profile: AdapterProfile,
    settings: ProviderSettings,
    api_key: Option<String>,
    client: Client,
    timeout: Duration,
}

impl OpenAiCompatAdapter {
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

    /// Request body: language instruction as the system message
    pub(crate) fn build_body(&self, prompt: &str, language: &str) -> Value {
        json!({
            "model": self.profile.default_model,
            "messages": [
                { "role": "system", "content": PromptTemplate::language_instruction(language) },
                { "role": "user", "content": prompt },
            ],
            "temperature": self.settings.temperature,
            "max_tokens": self.profile.max_tokens,
        })
    }

    pub(crate) fn parse_reply(&self, reply: &Value) -> Result<String, AdapterError> {
        extract_text(&self.settings.provider, reply, "/choices/0/message/content")
    }
}

#[async_trait]
impl ModelAdapter for OpenAiCompatAdapter {
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
            url = self.settings.endpoint.as_str(),
            "Sending chat completion request"
        );
        let request = self
            .client
            .post(&self.settings.endpoint)
            .bearer_auth(api_key);
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
