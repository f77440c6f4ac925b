//! Keyword-based categorization of prompts and research topics.
//!
//! Prompt categories key the learned per-user adapter weights; topic
//! categories are stored on research records.

use serde::{Deserialize, Serialize};

/// Category of a consensus prompt, used to look up feedback weights
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PromptCategory {
    Programming,
    Creative,
    Scientific,
    Business,
    Academic,
    Technical,
    Medical,
    Legal,
    General,
}

const PROMPT_KEYWORDS: &[(PromptCategory, &[&str])] = &[
    (
        PromptCategory::Programming,
        &["code", "program", "script", "function", "algorithm", "debug"],
    ),
    (
        PromptCategory::Creative,
        &["creative", "story", "poem", "art", "design", "imagination"],
    ),
    (
        PromptCategory::Scientific,
        &["scientific", "research", "study", "analysis", "experiment", "theory"],
    ),
    (
        PromptCategory::Business,
        &["business", "market", "finance", "strategy", "management", "economics"],
    ),
    (
        PromptCategory::Academic,
        &["academic", "education", "learning", "teaching", "university", "paper"],
    ),
    (
        PromptCategory::Technical,
        &["technical", "engineering", "system", "process", "technology", "development"],
    ),
    (
        PromptCategory::Medical,
        &["medical", "health", "medicine", "treatment", "diagnosis", "healthcare"],
    ),
    (
        PromptCategory::Legal,
        &["legal", "law", "court", "contract", "rights", "regulation"],
    ),
];

impl PromptCategory {
    /// First category (in declaration order) with a keyword contained in the prompt
    pub fn of(prompt: &str) -> Self {
        let lowered = prompt.to_lowercase();
        PROMPT_KEYWORDS
            .iter()
            .find(|(_, keywords)| keywords.iter().any(|k| lowered.contains(k)))
            .map(|(category, _)| *category)
            .unwrap_or(PromptCategory::General)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PromptCategory::Programming => "programming",
            PromptCategory::Creative => "creative",
            PromptCategory::Scientific => "scientific",
            PromptCategory::Business => "business",
            PromptCategory::Academic => "academic",
            PromptCategory::Technical => "technical",
            PromptCategory::Medical => "medical",
            PromptCategory::Legal => "legal",
            PromptCategory::General => "general",
        }
    }
}

impl std::fmt::Display for PromptCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for PromptCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "programming" => Ok(PromptCategory::Programming),
            "creative" => Ok(PromptCategory::Creative),
            "scientific" => Ok(PromptCategory::Scientific),
            "business" => Ok(PromptCategory::Business),
            "academic" => Ok(PromptCategory::Academic),
            "technical" => Ok(PromptCategory::Technical),
            "medical" => Ok(PromptCategory::Medical),
            "legal" => Ok(PromptCategory::Legal),
            "general" => Ok(PromptCategory::General),
            other => Err(format!("unknown prompt category '{}'", other)),
        }
    }
}

/// Subject area of a research topic (multilingual keywords)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TopicCategory {
    Technology,
    Science,
    Health,
    Business,
    Education,
    Culture,
    Environment,
    Politics,
    Sports,
    General,
}

const TOPIC_KEYWORDS: &[(TopicCategory, &[&str])] = &[
    (
        TopicCategory::Technology,
        &[
            "technology", "tech", "computer", "software", "teknoloji", "bilgisayar", "yazılım",
            "技术", "科技", "tecnología", "technologie", "технология",
        ],
    ),
    (
        TopicCategory::Science,
        &[
            "science", "research", "study", "bilim", "araştırma", "çalışma", "科学", "研究",
            "ciencia", "наука",
        ],
    ),
    (
        TopicCategory::Health,
        &[
            "health", "medical", "medicine", "sağlık", "tıp", "tıbbi", "健康", "医学", "salud",
            "médico", "здоровье",
        ],
    ),
    (
        TopicCategory::Business,
        &[
            "business", "economy", "finance", "iş", "ekonomi", "finans", "商业", "经济",
            "negocio", "économie", "бизнес",
        ],
    ),
    (
        TopicCategory::Education,
        &[
            "education", "learning", "school", "eğitim", "öğrenme", "okul", "教育", "学习",
            "educación", "éducation", "образование",
        ],
    ),
    (
        TopicCategory::Culture,
        &[
            "culture", "art", "history", "kültür", "sanat", "tarih", "文化", "艺术", "cultura",
            "культура",
        ],
    ),
    (
        TopicCategory::Environment,
        &[
            "environment", "climate", "nature", "çevre", "iklim", "doğa", "环境", "气候",
            "medio ambiente", "environnement", "окружающая среда",
        ],
    ),
    (
        TopicCategory::Politics,
        &[
            "politics", "government", "policy", "politika", "hükümet", "政治", "政府", "política",
            "politique", "политика",
        ],
    ),
    (
        TopicCategory::Sports,
        &[
            "sports", "game", "athletics", "spor", "oyun", "atletizm", "体育", "运动", "deportes",
            "sport", "спорт",
        ],
    ),
];

impl TopicCategory {
    pub fn of(topic: &str) -> Self {
        let lowered = topic.to_lowercase();
        TOPIC_KEYWORDS
            .iter()
            .find(|(_, keywords)| keywords.iter().any(|k| lowered.contains(k)))
            .map(|(category, _)| *category)
            .unwrap_or(TopicCategory::General)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TopicCategory::Technology => "technology",
            TopicCategory::Science => "science",
            TopicCategory::Health => "health",
            TopicCategory::Business => "business",
            TopicCategory::Education => "education",
            TopicCategory::Culture => "culture",
            TopicCategory::Environment => "environment",
            TopicCategory::Politics => "politics",
            TopicCategory::Sports => "sports",
            TopicCategory::General => "general",
        }
    }
}

impl std::fmt::Display for TopicCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_categories() {
        assert_eq!(PromptCategory::of("Debug this function"), PromptCategory::Programming);
        assert_eq!(PromptCategory::of("Write a poem"), PromptCategory::Creative);
        assert_eq!(PromptCategory::of("Contract LAW basics"), PromptCategory::Legal);
        assert_eq!(PromptCategory::of("Hello there"), PromptCategory::General);
    }

    #[test]
    fn test_prompt_category_order_wins() {
        // "research" (scientific) is checked before "market" (business)
        assert_eq!(
            PromptCategory::of("research the market"),
            PromptCategory::Scientific
        );
    }

    #[test]
    fn test_prompt_category_parse() {
        assert_eq!(
            "Medical".parse::<PromptCategory>().unwrap(),
            PromptCategory::Medical
        );
        assert!("astrology".parse::<PromptCategory>().is_err());
    }

    #[test]
    fn test_topic_categories_are_multilingual() {
        assert_eq!(TopicCategory::of("Climate change"), TopicCategory::Environment);
        assert_eq!(TopicCategory::of("yapay zeka ve yazılım"), TopicCategory::Technology);
        assert_eq!(TopicCategory::of("中国经济"), TopicCategory::Business);
        assert_eq!(TopicCategory::of("Здоровье детей"), TopicCategory::Health);
        assert_eq!(TopicCategory::of("renewable power"), TopicCategory::General);
    }
}
