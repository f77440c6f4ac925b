//! Static message catalog for the keys the use cases look up

use consensus_application::{Localizer, apply_params, keys};
use std::collections::HashMap;

const FALLBACK_LANGUAGE: &str = "en";

const ENGLISH: &[(&str, &str)] = &[
    (keys::NO_VALID_RESPONSES, "No valid responses from AI models"),
    (
        keys::MERGE_RESPONSES_INSTRUCTION,
        "Merge the following two responses into a single, coherent answer. \
Keep every accurate point from both, resolve contradictions in favor of the better supported claim, \
and do not mention that there were two responses.\n\nResponse 1:\n{response1}\n\nResponse 2:\n{response2}",
    ),
    (
        keys::ARTICLE_GENERATION_FAILED,
        "The article could not be generated: {error}",
    ),
    (keys::RESEARCH_CANCELLED, "Research was cancelled"),
];

const TURKISH: &[(&str, &str)] = &[
    (keys::NO_VALID_RESPONSES, "Yapay zeka modellerinden geçerli yanıt alınamadı"),
    (
        keys::MERGE_RESPONSES_INSTRUCTION,
        "Aşağıdaki iki yanıtı tek ve tutarlı bir cevapta birleştir. \
Her ikisindeki doğru noktaları koru, çelişkileri daha iyi desteklenen iddia lehine çöz \
ve iki yanıt olduğundan bahsetme.\n\nYanıt 1:\n{response1}\n\nYanıt 2:\n{response2}",
    ),
    (
        keys::ARTICLE_GENERATION_FAILED,
        "Makale oluşturulamadı: {error}",
    ),
    (keys::RESEARCH_CANCELLED, "Araştırma iptal edildi"),
];

const SPANISH: &[(&str, &str)] = &[
    (keys::NO_VALID_RESPONSES, "No hay respuestas válidas de los modelos de IA"),
    (
        keys::ARTICLE_GENERATION_FAILED,
        "No se pudo generar el artículo: {error}",
    ),
    (keys::RESEARCH_CANCELLED, "La investigación fue cancelada"),
];

const GERMAN: &[(&str, &str)] = &[
    (keys::NO_VALID_RESPONSES, "Keine gültigen Antworten von den KI-Modellen"),
    (
        keys::ARTICLE_GENERATION_FAILED,
        "Der Artikel konnte nicht erstellt werden: {error}",
    ),
    (keys::RESEARCH_CANCELLED, "Die Recherche wurde abgebrochen"),
];

const FRENCH: &[(&str, &str)] = &[
    (keys::NO_VALID_RESPONSES, "Aucune réponse valide des modèles d'IA"),
    (
        keys::ARTICLE_GENERATION_FAILED,
        "L'article n'a pas pu être généré : {error}",
    ),
    (keys::RESEARCH_CANCELLED, "La recherche a été annulée"),
];

/// Localizer backed by a compiled-in catalog
///
/// Lookup order is the requested language, then English, then the key.
pub struct StaticLocalizer {
    messages: HashMap<&'static str, HashMap<&'static str, String>>,
}

impl StaticLocalizer {
    pub fn new() -> Self {
        let mut localizer = Self {
            messages: HashMap::new(),
        };
        for (language, entries) in [
            ("en", ENGLISH),
            ("tr", TURKISH),
            ("es", SPANISH),
            ("de", GERMAN),
            ("fr", FRENCH),
        ] {
            for (key, text) in entries {
                localizer.insert(language, key, *text);
            }
        }
        localizer
    }

    /// Add or replace a message
    pub fn with_message(
        mut self,
        language: &'static str,
        key: &'static str,
        text: impl Into<String>,
    ) -> Self {
        self.insert(language, key, text);
        self
    }

    fn insert(&mut self, language: &'static str, key: &'static str, text: impl Into<String>) {
        self.messages
            .entry(language)
            .or_default()
            .insert(key, text.into());
    }

    fn lookup(&self, key: &str, language: &str) -> Option<&str> {
        self.messages
            .get(language)
            .and_then(|messages| messages.get(key))
            .map(String::as_str)
    }
}

impl Default for StaticLocalizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Localizer for StaticLocalizer {
    fn translate(&self, key: &str, params: &[(&str, &str)], language: &str) -> String {
        let template = self
            .lookup(key, language)
            .or_else(|| self.lookup(key, FALLBACK_LANGUAGE))
            .unwrap_or(key);
        apply_params(template, params)
    }
}
