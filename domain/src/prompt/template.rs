//! Prompt templates for the research flow
//!
//! Prompts are localized for the languages the planner and article writer
//! have templates for; any other language gets the English wording, with
//! the language instruction telling the adapter which language to answer in.

use crate::core::language::{self, DEFAULT_LANGUAGE};
use crate::research::article;

/// Templates for generating prompts at each stage
pub struct PromptTemplate;

impl PromptTemplate {
    /// System instruction pinning the answer language
    pub fn language_instruction(language: &str) -> String {
        if language.eq_ignore_ascii_case(DEFAULT_LANGUAGE) || !language::is_supported(language) {
            return "Respond only in English. Do not use any other language.".to_string();
        }
        let native = language::native_name(language);
        format!(
            "Respond only in {native} ({code}). Do not use any other language. \
             Ensure proper grammar and natural flow in {native}.",
            native = native,
            code = language.to_ascii_lowercase()
        )
    }

    /// Ask for a `depth`-step research plan as a JSON array
    pub fn plan(topic: &str, description: &str, depth: usize, language: &str) -> String {
        match language.to_ascii_lowercase().as_str() {
            "tr" => format!(
                "{depth} aşamalı bir araştırma planı oluşturun:\nKonu: {topic}\nAçıklama: {description}\n\nJSON formatında 'step' ve 'description' anahtarlarıyla verin. Kapsamlı ve akademik olsun."
            ),
            "zh" => format!(
                "为以下主题创建{depth}步研究计划：{topic}\n描述：{description}\n\n请以JSON数组格式提供，包含'step'和'description'键。要全面和学术化。"
            ),
            "es" => format!(
                "Crea un plan de investigación de {depth} pasos sobre: {topic}\nDescripción: {description}\n\nProporciona como array JSON con claves 'step' y 'description'. Hazlo comprensivo y académico."
            ),
            "fr" => format!(
                "Créez un plan de recherche en {depth} étapes sur : {topic}\nDescription : {description}\n\nFournissez sous forme de tableau JSON avec les clés 'step' et 'description'. Rendez-le complet et académique."
            ),
            "de" => format!(
                "Erstellen Sie einen {depth}-Schritt-Forschungsplan über: {topic}\nBeschreibung: {description}\n\nBereitstellung als JSON-Array mit 'step' und 'description' Schlüsseln. Machen Sie es umfassend und akademisch."
            ),
            "ru" => format!(
                "Создайте {depth}-этапный план исследования по теме: {topic}\nОписание: {description}\n\nПредоставьте в виде JSON-массива с ключами 'step' и 'description'. Сделайте его всеобъемлющим и академическим."
            ),
            "ja" => format!(
                "{topic}について{depth}段階の研究計画を作成してください\n説明：{description}\n\n'step'と'description'キーを持つJSON配列として提供してください。包括的で学術的にしてください。"
            ),
            "ar" => format!(
                "أنشئ خطة بحثية من {depth} خطوات حول: {topic}\nالوصف: {description}\n\nقدمها كمصفوفة JSON بمفاتيح 'step' و 'description'. اجعلها شاملة وأكاديمية."
            ),
            _ => format!(
                "Create a {depth}-step research plan about: {topic}\nDescription: {description}\n\nProvide as JSON array with 'step' and 'description' keys. Make it comprehensive and academic."
            ),
        }
    }

    /// Ask for the final academic article over the combined step findings
    pub fn article(topic: &str, findings: &str, language: &str) -> String {
        let structure = article::outline(language);
        match language.to_ascii_lowercase().as_str() {
            "tr" => format!(
                "Aşağıdaki konu hakkında Türkçe kapsamlı bir akademik makale yazın: {topic}\n\nAraştırma Bulguları:\n{findings}\n\nŞu bölümleri içersin:\n{structure}\n\nUygun akademik formatlamayı ve alıntıları kullanın."
            ),
            "zh" => format!(
                "撰写一篇关于{topic}的综合性中文学术文章\n\n研究发现：\n{findings}\n\n包括以下部分：\n{structure}\n\n使用适当的学术格式和引用。"
            ),
            "es" => format!(
                "Escriba un artículo académico integral en español sobre: {topic}\n\nHallazgos de investigación:\n{findings}\n\nIncluya estas secciones:\n{structure}\n\nUse formato académico apropiado y citas."
            ),
            "fr" => format!(
                "Rédigez un article académique complet en français sur : {topic}\n\nRésultats de recherche :\n{findings}\n\nIncluez ces sections :\n{structure}\n\nUtilisez un formatage académique approprié et des citations."
            ),
            "de" => format!(
                "Schreiben Sie einen umfassenden akademischen Artikel auf Deutsch über: {topic}\n\nForschungsergebnisse:\n{findings}\n\nFügen Sie diese Abschnitte hinzu:\n{structure}\n\nVerwenden Sie angemessene akademische Formatierung und Zitate."
            ),
            "ru" => format!(
                "Напишите всеобъемлющую академическую статью на русском языке о: {topic}\n\nРезультаты исследования:\n{findings}\n\nВключите эти разделы:\n{structure}\n\nИспользуйте соответствующее академическое форматирование и цитаты."
            ),
            "ja" => format!(
                "{topic}について包括的な学術論文を日本語で書いてください\n\n研究結果：\n{findings}\n\n以下のセクションを含めてください：\n{structure}\n\n適切な学術的フォーマットと引用を使用してください。"
            ),
            "ar" => format!(
                "اكتب مقالاً أكاديمياً شاملاً باللغة العربية حول: {topic}\n\nنتائج البحث:\n{findings}\n\nاشمل هذه الأقسام:\n{structure}\n\nاستخدم التنسيق الأكاديمي المناسب والاستشهادات."
            ),
            _ => format!(
                "Write a comprehensive academic article in English about: {topic}\n\nResearch Findings:\n{findings}\n\nInclude these sections:\n{structure}\n\nUse proper academic formatting and citations."
            ),
        }
    }

    /// Ask to translate `content` between two languages
    pub fn translation(content: &str, source_language: &str, target_language: &str) -> String {
        format!(
            "Translate the following text from {} to {}. Maintain the original meaning, tone, and formatting:\n\n{}",
            language::native_name(source_language),
            language::native_name(target_language),
            content
        )
    }

    /// English wording of the reconciliation request, used when no
    /// localized `merge_responses_instruction` is registered
    pub fn merge_instruction() -> &'static str {
        "Merge the following two responses into a single, coherent answer. \
Keep every accurate point from both, resolve contradictions in favor of the better supported claim, \
and do not mention that there were two responses.\n\nResponse 1:\n{response1}\n\nResponse 2:\n{response2}"
    }

    /// Fill the `{response1}`/`{response2}` placeholders of a merge instruction
    pub fn merge(instruction: &str, first: &str, second: &str) -> String {
        instruction
            .replace("{response1}", first)
            .replace("{response2}", second)
    }
}
