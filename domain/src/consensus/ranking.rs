//! Language-aware adapter ranking
//!
//! Orders adapters by how well they are expected to handle a language. Used
//! to prioritize fan-out and to pick the adapter for translations.

use crate::core::adapter::{AdapterId, AdapterProfile};
use crate::core::language::{self, LanguageFamily};

const MULTILINGUAL_BONUS: f64 = 0.2;
const ROMANCE_EUROPEAN_BONUS: f64 = 0.3;
const SINO_TIBETAN_BONUS: f64 = 0.2;

/// Fitness of a single adapter for `language`
pub fn language_fitness(profile: &AdapterProfile, language: &str) -> f64 {
    let mut score = profile.coverage.bonus_for(language);
    if profile.is_multilingual() {
        score += MULTILINGUAL_BONUS;
    }

    match language::family(language) {
        LanguageFamily::Romance if profile.provider == "mistral" => {
            score += ROMANCE_EUROPEAN_BONUS;
        }
        LanguageFamily::SinoTibetan if matches!(profile.provider.as_str(), "openai" | "google") => {
            score += SINO_TIBETAN_BONUS;
        }
        _ => {}
    }

    score
}

/// Profiles ranked by fitness, best first (stable for equal scores)
pub fn best_adapters_for_language<'a>(
    profiles: &'a [AdapterProfile],
    language: &str,
) -> Vec<(&'a AdapterProfile, f64)> {
    let mut ranked: Vec<(&AdapterProfile, f64)> = profiles
        .iter()
        .map(|p| (p, language_fitness(p, language)))
        .collect();
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
    ranked
}

/// Reorder `ids` by the fitness of their profiles.
///
/// Ids without a known profile keep their relative order after the known ones.
pub fn order_by_language_fitness(
    ids: &[AdapterId],
    profiles: &[AdapterProfile],
    language: &str,
) -> Vec<AdapterId> {
    let fitness = |id: &AdapterId| {
        profiles
            .iter()
            .find(|p| &p.id == id)
            .map(|p| language_fitness(p, language))
            .unwrap_or(f64::NEG_INFINITY)
    };
    let mut ordered: Vec<(AdapterId, f64)> =
        ids.iter().map(|id| (id.clone(), fitness(id))).collect();
    ordered.sort_by(|a, b| b.1.total_cmp(&a.1));
    ordered.into_iter().map(|(id, _)| id).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(items: &[&str]) -> Vec<AdapterId> {
        items.iter().map(|s| AdapterId::from(*s)).collect()
    }

    #[test]
    fn test_gpt4_leads_for_english() {
        let catalog = AdapterProfile::default_catalog();
        let ranked = best_adapters_for_language(&catalog, "en");
        assert_eq!(ranked[0].0.id.as_str(), "gpt4");
        assert!((ranked[0].1 - 0.7).abs() < 1e-9);
    }

    #[test]
    fn test_mistral_leads_for_romance() {
        let catalog = AdapterProfile::default_catalog();
        let ranked = best_adapters_for_language(&catalog, "fr");
        // mistral: 0.4 + 0.2 + 0.3
        assert_eq!(ranked[0].0.id.as_str(), "mistral");
        assert!((ranked[0].1 - 0.9).abs() < 1e-9);
    }

    #[test]
    fn test_chinese_prefers_openai_and_google() {
        let catalog = AdapterProfile::default_catalog();
        let ranked = best_adapters_for_language(&catalog, "zh");
        let top_two: Vec<&str> = ranked.iter().take(2).map(|(p, _)| p.id.as_str()).collect();
        assert_eq!(top_two, vec!["gpt4", "gemini"]);
    }

    #[test]
    fn test_order_by_fitness_keeps_selection() {
        let catalog = AdapterProfile::default_catalog();
        let ordered = order_by_language_fitness(&ids(&["llama3", "mistral", "gpt4"]), &catalog, "es");
        assert_eq!(ordered, ids(&["mistral", "gpt4", "llama3"]));
    }

    #[test]
    fn test_unknown_ids_go_last() {
        let catalog = AdapterProfile::default_catalog();
        let ordered = order_by_language_fitness(&ids(&["custom", "gpt4"]), &catalog, "en");
        assert_eq!(ordered, ids(&["gpt4", "custom"]));
    }
}
