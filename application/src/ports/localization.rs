//! Localization lookup port

/// Message keys the use cases look up
pub mod keys {
    pub const NO_VALID_RESPONSES: &str = "no_valid_responses";
    /// Reconciliation prompt with `{response1}` / `{response2}` placeholders
    pub const MERGE_RESPONSES_INSTRUCTION: &str = "merge_responses_instruction";
    /// Notice stored as article content, with an `{error}` placeholder
    pub const ARTICLE_GENERATION_FAILED: &str = "article_generation_failed";
    pub const RESEARCH_CANCELLED: &str = "research_cancelled";
}

/// Localized message lookup
///
/// Unregistered (key, language) pairs fall back to English, then to the key
/// itself. `{name}` placeholders are replaced from `params`.
pub trait Localizer: Send + Sync {
    fn translate(&self, key: &str, params: &[(&str, &str)], language: &str) -> String;
}

/// Localizer that knows no messages: always returns the key with params applied
pub struct KeyLocalizer;

impl Localizer for KeyLocalizer {
    fn translate(&self, key: &str, params: &[(&str, &str)], _language: &str) -> String {
        apply_params(key, params)
    }
}

/// Replace every `{name}` placeholder in `template`
pub fn apply_params(template: &str, params: &[(&str, &str)]) -> String {
    params
        .iter()
        .fold(template.to_string(), |text, (name, value)| {
            text.replace(&format!("{{{}}}", name), value)
        })
}
