//! Provider configuration from TOML (`[providers.<name>]` sections)

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Wire format spoken by a provider endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WireFormat {
    /// `/v1/chat/completions` with bearer auth
    OpenAiCompatible,
    /// Anthropic `/v1/messages`
    Anthropic,
    /// Gemini `generateContent` with the key in the query string
    Gemini,
}

/// Settings of one provider. Unset fields use the provider's defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileProviderConfig {
    /// Environment variable holding the API key (default: `<PROVIDER>_API_KEY`)
    pub api_key_env: Option<String>,
    /// Direct API key (prefer the env var).
    pub api_key: Option<String>,
    /// Full endpoint URL; `{model}` is replaced for Gemini
    pub endpoint: Option<String>,
    /// Anthropic API version header
    pub api_version: Option<String>,
    pub temperature: Option<f64>,
}

/// Fully resolved provider settings
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderSettings {
    pub provider: String,
    pub wire_format: WireFormat,
    pub api_key_env: String,
    pub api_key: Option<String>,
    pub endpoint: String,
    pub api_version: String,
    pub temperature: f64,
}

/// Default sampling temperature for every provider
pub const DEFAULT_TEMPERATURE: f64 = 0.7;
const ANTHROPIC_API_VERSION: &str = "2023-06-01";

/// Built-in endpoint and wire format of a known provider
pub fn provider_defaults(provider: &str) -> Option<(WireFormat, &'static str)> {
    match provider {
        "openai" => Some((
            WireFormat::OpenAiCompatible,
            "https://api.openai.com/v1/chat/completions",
        )),
        "mistral" => Some((
            WireFormat::OpenAiCompatible,
            "https://api.mistral.ai/v1/chat/completions",
        )),
        "meta" => Some((
            WireFormat::OpenAiCompatible,
            "https://api.endpoints.anyscale.com/v1/chat/completions",
        )),
        "anthropic" => Some((WireFormat::Anthropic, "https://api.anthropic.com/v1/messages")),
        "google" => Some((
            WireFormat::Gemini,
            "https://generativelanguage.googleapis.com/v1beta/models/{model}:generateContent",
        )),
        _ => None,
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FileProvidersConfig(pub BTreeMap<String, FileProviderConfig>);

impl FileProvidersConfig {
    /// Resolve settings for `provider`.
    ///
    /// Unknown providers are assumed to speak the OpenAI-compatible format and
    /// need an explicit endpoint; `None` means no endpoint is known.
    pub fn settings_for(&self, provider: &str) -> Option<ProviderSettings> {
        let file = self.0.get(provider).cloned().unwrap_or_default();
        let (wire_format, default_endpoint) = match provider_defaults(provider) {
            Some((format, endpoint)) => (format, Some(endpoint)),
            None => (WireFormat::OpenAiCompatible, None),
        };
        let endpoint = file
            .endpoint
            .clone()
            .or_else(|| default_endpoint.map(str::to_string))?;

        Some(ProviderSettings {
            provider: provider.to_string(),
            wire_format,
            api_key_env: file
                .api_key_env
                .unwrap_or_else(|| format!("{}_API_KEY", provider.to_uppercase())),
            api_key: file.api_key,
            endpoint,
            api_version: file
                .api_version
                .unwrap_or_else(|| ANTHROPIC_API_VERSION.to_string()),
            temperature: file.temperature.unwrap_or(DEFAULT_TEMPERATURE),
        })
    }
}
