//! Article synthesized from the step results, and its section structure.

use crate::consensus::value_objects::current_timestamp;
use crate::core::string::{char_count, word_count};
use serde::{Deserialize, Serialize};

/// Average reading speed used for reading-time estimates
pub const WORDS_PER_MINUTE: usize = 200;

/// Canonical nine-part outline requested from the article writer
pub fn outline(language: &str) -> &'static str {
    match language.to_ascii_lowercase().as_str() {
        "tr" => "1. Başlık\n2. Özet\n3. Giriş\n4. Literatür Taraması\n5. Yöntem\n6. Bulgular\n7. Tartışma\n8. Sonuç\n9. Kaynakça",
        "zh" => "1. 标题\n2. 摘要\n3. 引言\n4. 文献综述\n5. 方法\n6. 结果\n7. 讨论\n8. 结论\n9. 参考文献",
        "es" => "1. Título\n2. Resumen\n3. Introducción\n4. Revisión de Literatura\n5. Metodología\n6. Resultados\n7. Discusión\n8. Conclusión\n9. Referencias",
        "fr" => "1. Titre\n2. Résumé\n3. Introduction\n4. Revue de littérature\n5. Méthodologie\n6. Résultats\n7. Discussion\n8. Conclusion\n9. Références",
        "de" => "1. Titel\n2. Zusammenfassung\n3. Einleitung\n4. Literaturübersicht\n5. Methodik\n6. Ergebnisse\n7. Diskussion\n8. Fazit\n9. Literaturverzeichnis",
        "ru" => "1. Заголовок\n2. Аннотация\n3. Введение\n4. Обзор литературы\n5. Методология\n6. Результаты\n7. Обсуждение\n8. Заключение\n9. Список литературы",
        "ja" => "1. タイトル\n2. 概要\n3. 序論\n4. 文献レビュー\n5. 方法論\n6. 結果\n7. 考察\n8. 結論\n9. 参考文献",
        "ar" => "1. العنوان\n2. الملخص\n3. المقدمة\n4. مراجعة الأدبيات\n5. المنهجية\n6. النتائج\n7. المناقشة\n8. الخاتمة\n9. المراجع",
        _ => "1. Title\n2. Abstract\n3. Introduction\n4. Literature Review\n5. Methodology\n6. Results\n7. Discussion\n8. Conclusion\n9. References",
    }
}

/// Section headings detected by [`extract_structure`]
fn section_headings(language: &str) -> &'static [&'static str] {
    match language.to_ascii_lowercase().as_str() {
        "tr" => &["Özet", "Giriş", "Yöntem", "Bulgular", "Tartışma", "Sonuç", "Kaynakça"],
        "zh" => &["摘要", "引言", "方法", "结果", "讨论", "结论", "参考文献"],
        "es" => &[
            "Resumen",
            "Introducción",
            "Metodología",
            "Resultados",
            "Discusión",
            "Conclusión",
            "Referencias",
        ],
        "fr" => &[
            "Résumé",
            "Introduction",
            "Méthodologie",
            "Résultats",
            "Discussion",
            "Conclusion",
            "Références",
        ],
        "de" => &[
            "Zusammenfassung",
            "Einleitung",
            "Methodik",
            "Ergebnisse",
            "Diskussion",
            "Fazit",
            "Literaturverzeichnis",
        ],
        "ru" => &[
            "Аннотация",
            "Введение",
            "Методология",
            "Результаты",
            "Обсуждение",
            "Заключение",
            "Список литературы",
        ],
        "ja" => &["概要", "序論", "方法論", "結果", "考察", "結論", "参考文献"],
        "ar" => &["الملخص", "المقدمة", "المنهجية", "النتائج", "المناقشة", "الخاتمة", "المراجع"],
        _ => &[
            "Abstract",
            "Introduction",
            "Methodology",
            "Results",
            "Discussion",
            "Conclusion",
            "References",
        ],
    }
}

/// A detected section heading
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    pub title: String,
    /// Byte offset of the heading line in the article
    pub position: usize,
}

/// Strip heading markers and list numbering from the start of a line
fn heading_text(line: &str) -> &str {
    let rest = line.trim_start().trim_start_matches('#').trim_start();
    let digits = rest.trim_start_matches(|c: char| c.is_ascii_digit());
    if digits.len() < rest.len() {
        let after = digits.trim_start_matches(['.', ')']);
        if after.len() < digits.len() {
            return after.trim_start();
        }
    }
    rest
}

/// Find canonical section headings at the start of lines.
///
/// Matching is case-insensitive and tolerates leading `#`s and numbering
/// such as `2.` or `3)`.
pub fn extract_structure(content: &str, language: &str) -> Vec<Section> {
    let headings = section_headings(language);
    let mut sections = Vec::new();
    let mut offset = 0;

    for line in content.split_inclusive('\n') {
        let text = heading_text(line);
        let lowered = text.to_lowercase();
        if let Some(heading) = headings
            .iter()
            .find(|h| lowered.starts_with(&h.to_lowercase()))
        {
            let len = heading.chars().count();
            sections.push(Section {
                title: text.chars().take(len).collect(),
                position: offset,
            });
        }
        offset += line.len();
    }

    sections
}

/// Final article of a research run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Article {
    pub title: String,
    pub content: String,
    /// Language the article is written in
    pub language: String,
    /// Language the research was conducted in
    pub source_language: String,
    pub structure: Vec<Section>,
    /// False when synthesis failed and `content` is a failure notice
    pub generated: bool,
    pub created_at: u64,
}

impl Article {
    /// Article built from synthesized text; the structure is extracted here
    pub fn new(
        title: impl Into<String>,
        content: impl Into<String>,
        language: impl Into<String>,
        source_language: impl Into<String>,
    ) -> Self {
        let content = content.into();
        let language = language.into();
        Self {
            title: title.into(),
            structure: extract_structure(&content, &language),
            content,
            language,
            source_language: source_language.into(),
            generated: true,
            created_at: current_timestamp(),
        }
    }

    /// Placeholder article carrying a failure notice
    pub fn failed(
        title: impl Into<String>,
        notice: impl Into<String>,
        language: impl Into<String>,
        source_language: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            content: notice.into(),
            language: language.into(),
            source_language: source_language.into(),
            structure: Vec::new(),
            generated: false,
            created_at: current_timestamp(),
        }
    }

    pub fn word_count(&self) -> usize {
        word_count(&self.content)
    }

    pub fn char_count(&self) -> usize {
        char_count(&self.content)
    }

    /// Reading time in whole minutes, rounded up
    pub fn reading_time(&self) -> usize {
        reading_time(self.word_count())
    }
}

/// Minutes needed to read `words` words, rounded up
pub fn reading_time(words: usize) -> usize {
    words.div_ceil(WORDS_PER_MINUTE)
}

#[cfg(test)]
mod tests {
    use super::*;

    const ARTICLE: &str = "# Renewable Energy\n\n## Abstract\nShort summary.\n\n## 1. Introduction\nText.\n\nmethodology\nMore text.\nResults are discussed below.\n3) Discussion\nConclusion\n";

    #[test]
    fn test_extract_english_sections() {
        let sections = extract_structure(ARTICLE, "en");
        let titles: Vec<&str> = sections.iter().map(|s| s.title.as_str()).collect();
        assert_eq!(
            titles,
            vec!["Abstract", "Introduction", "methodology", "Results", "Discussion", "Conclusion"]
        );
        assert_eq!(&ARTICLE[sections[0].position..sections[0].position + 11], "## Abstract");
    }

    #[test]
    fn test_extract_ignores_mid_line_mentions() {
        let sections = extract_structure("See the Introduction below.\n", "en");
        assert!(sections.is_empty());
    }

    #[test]
    fn test_extract_localized() {
        let zh = "# 标题\n## 摘要\n内容\n## 引言\n内容\n## 结论\n";
        assert_eq!(extract_structure(zh, "zh").len(), 3);

        let de = "Zusammenfassung\nEinleitung\nFazit\n";
        assert_eq!(extract_structure(de, "de").len(), 3);
    }

    #[test]
    fn test_unknown_language_uses_english_headings() {
        assert_eq!(extract_structure("Abstract\n", "fi").len(), 1);
        assert!(outline("fi").starts_with("1. Title"));
    }

    #[test]
    fn test_reading_time_rounds_up() {
        assert_eq!(reading_time(0), 0);
        assert_eq!(reading_time(1), 1);
        assert_eq!(reading_time(200), 1);
        assert_eq!(reading_time(201), 2);
    }

    #[test]
    fn test_failed_article_has_no_structure() {
        let article = Article::failed("Topic", "Article generation failed", "en", "en");
        assert!(!article.generated);
        assert!(article.structure.is_empty());
        assert_eq!(article.word_count(), 3);
    }
}
