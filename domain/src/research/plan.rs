//! Research plan parsing and the canonical fallback plans.
//!
//! The planning adapter is asked for a JSON array of `{step, description}`
//! objects. Its reply is accepted as raw JSON, as a fenced ` ```json ` block,
//! or as the first `[ ... ]` span of the text. Any reply that yields no
//! steps is replaced by the fallback template of the research language.

use crate::research::entities::Step;
use serde_json::Value;

/// (title, description with `{topic}` placeholder)
type StepTemplate = (&'static str, &'static str);

const EN: [StepTemplate; 5] = [
    ("Initial Research", "Gather general information about {topic}"),
    ("Key Concepts", "Research key concepts related to {topic}"),
    ("Statistical Analysis", "Find important statistics about {topic}"),
    ("Current Developments", "Examine recent developments about {topic}"),
    ("Conclusion Report", "Prepare a conclusion report about {topic}"),
];

const TR: [StepTemplate; 5] = [
    ("İlk Araştırma", "{topic} hakkında genel bilgi topla"),
    ("Temel Kavramlar", "{topic} ile ilgili temel kavramları araştır"),
    ("İstatistiksel Analiz", "{topic} için önemli istatistikleri bul"),
    ("Güncel Gelişmeler", "{topic} ile ilgili güncel gelişmeleri incele"),
    ("Sonuç Raporu", "{topic} hakkında bir sonuç raporu hazırla"),
];

const ZH: [StepTemplate; 5] = [
    ("初步研究", "收集关于{topic}的一般信息"),
    ("关键概念", "研究与{topic}相关的关键概念"),
    ("统计分析", "查找关于{topic}的重要统计数据"),
    ("最新发展", "检查关于{topic}的最新发展"),
    ("结论报告", "准备关于{topic}的结论报告"),
];

const ES: [StepTemplate; 5] = [
    ("Investigación Inicial", "Reunir información general sobre {topic}"),
    ("Conceptos Clave", "Investigar conceptos clave relacionados con {topic}"),
    ("Análisis Estadístico", "Encontrar estadísticas importantes sobre {topic}"),
    ("Desarrollos Actuales", "Examinar desarrollos recientes sobre {topic}"),
    ("Informe de Conclusión", "Preparar un informe de conclusión sobre {topic}"),
];

const FR: [StepTemplate; 5] = [
    ("Recherche Initiale", "Rassembler des informations générales sur {topic}"),
    ("Concepts Clés", "Rechercher les concepts clés liés à {topic}"),
    ("Analyse Statistique", "Trouver des statistiques importantes sur {topic}"),
    ("Développements Actuels", "Examiner les développements récents sur {topic}"),
    ("Rapport de Conclusion", "Préparer un rapport de conclusion sur {topic}"),
];

const DE: [StepTemplate; 5] = [
    ("Erste Forschung", "Allgemeine Informationen über {topic} sammeln"),
    ("Schlüsselkonzepte", "Schlüsselkonzepte im Zusammenhang mit {topic} erforschen"),
    ("Statistische Analyse", "Wichtige Statistiken über {topic} finden"),
    ("Aktuelle Entwicklungen", "Neueste Entwicklungen zu {topic} untersuchen"),
    ("Abschlussbericht", "Einen Abschlussbericht über {topic} erstellen"),
];

const RU: [StepTemplate; 5] = [
    ("Первоначальное исследование", "Собрать общую информацию о {topic}"),
    ("Ключевые концепции", "Исследовать ключевые концепции, связанные с {topic}"),
    ("Статистический анализ", "Найти важную статистику о {topic}"),
    ("Текущие разработки", "Изучить последние разработки по {topic}"),
    ("Заключительный отчет", "Подготовить заключительный отчет о {topic}"),
];

const JA: [StepTemplate; 5] = [
    ("初期研究", "{topic}に関する一般的な情報を収集する"),
    ("重要概念", "{topic}に関連する重要な概念を研究する"),
    ("統計分析", "{topic}に関する重要な統計を見つける"),
    ("現在の発展", "{topic}に関する最近の発展を調査する"),
    ("結論レポート", "{topic}について結論レポートを準備する"),
];

const AR: [StepTemplate; 5] = [
    ("البحث الأولي", "جمع معلومات عامة حول {topic}"),
    ("المفاهيم الأساسية", "بحث المفاهيم الأساسية المتعلقة بـ {topic}"),
    ("التحليل الإحصائي", "العثور على إحصائيات مهمة حول {topic}"),
    ("التطورات الحالية", "فحص التطورات الأخيرة حول {topic}"),
    ("تقرير الخاتمة", "إعداد تقرير خاتمة حول {topic}"),
];

const KO: [StepTemplate; 5] = [
    ("초기 연구", "{topic}에 대한 일반적인 정보 수집"),
    ("핵심 개념", "{topic}와 관련된 핵심 개념 연구"),
    ("통계 분석", "{topic}에 대한 중요한 통계 찾기"),
    ("현재 발전", "{topic}에 대한 최근 발전 사항 조사"),
    ("결론 보고서", "{topic}에 대한 결론 보고서 준비"),
];

/// Languages with a registered fallback template
pub const FALLBACK_LANGUAGES: &[&str] = &[
    "en", "tr", "zh", "es", "fr", "de", "ru", "ja", "ar", "ko",
];

fn template_for(language: &str) -> &'static [StepTemplate; 5] {
    match language.to_ascii_lowercase().as_str() {
        "tr" => &TR,
        "zh" => &ZH,
        "es" => &ES,
        "fr" => &FR,
        "de" => &DE,
        "ru" => &RU,
        "ja" => &JA,
        "ar" => &AR,
        "ko" => &KO,
        _ => &EN,
    }
}

/// Whether `language` has its own fallback template (others use English)
pub fn has_fallback_template(language: &str) -> bool {
    FALLBACK_LANGUAGES.contains(&language.to_ascii_lowercase().as_str())
}

/// The canonical five-step plan for `topic` in `language`
pub fn fallback_steps(topic: &str, language: &str) -> Vec<Step> {
    template_for(language)
        .iter()
        .enumerate()
        .map(|(i, (title, description))| {
            Step::new(i + 1, *title, description.replace("{topic}", topic))
        })
        .collect()
}

/// Make a plan exactly `depth` steps long.
///
/// Longer plans are truncated. Shorter plans are extended by cycling the
/// fallback template; repeated titles get the step number appended. Steps
/// are renumbered 1..=depth.
pub fn normalize_to_depth(
    mut steps: Vec<Step>,
    depth: usize,
    topic: &str,
    language: &str,
) -> Vec<Step> {
    steps.truncate(depth);
    let template = fallback_steps(topic, language);
    while steps.len() < depth {
        let number = steps.len() + 1;
        let base = &template[(number - 1) % template.len()];
        let title = if number > template.len() {
            format!("{} ({})", base.title, number)
        } else {
            base.title.clone()
        };
        steps.push(Step::new(number, title, base.description.clone()));
    }
    for (i, step) in steps.iter_mut().enumerate() {
        step.number = i + 1;
    }
    steps
}

/// Parse the steps out of a planning reply.
///
/// Returns `None` when no JSON array of usable steps can be found.
pub fn parse_plan_steps(response: &str) -> Option<Vec<Step>> {
    let trimmed = response.trim();

    if let Ok(value) = serde_json::from_str::<Value>(trimmed) {
        return parse_plan_json(&value);
    }

    if let Some(block) = fenced_json_block(trimmed)
        && let Ok(value) = serde_json::from_str::<Value>(&block)
    {
        return parse_plan_json(&value);
    }

    let start = trimmed.find('[')?;
    let end = trimmed.rfind(']')?;
    if end <= start {
        return None;
    }
    let value = serde_json::from_str::<Value>(&trimmed[start..=end]).ok()?;
    parse_plan_json(&value)
}

/// Contents of the first ` ```json ` (or bare ` ``` `) fenced block
fn fenced_json_block(response: &str) -> Option<String> {
    let mut in_block = false;
    let mut block = String::new();
    for line in response.lines() {
        let line_trimmed = line.trim();
        if !in_block && (line_trimmed == "```json" || line_trimmed == "```") {
            in_block = true;
            block.clear();
        } else if in_block && line_trimmed == "```" {
            return Some(block);
        } else if in_block {
            block.push_str(line);
            block.push('\n');
        }
    }
    None
}

/// Numbers and non-empty strings as text
fn json_value_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Parse a JSON array of steps.
///
/// Each element may be an object with `description` (required), `title`
/// and `step` keys, or a plain string used as the description. A
/// non-numeric `step` value doubles as the title.
pub fn parse_plan_json(value: &Value) -> Option<Vec<Step>> {
    let items = value.as_array()?;
    let steps: Vec<Step> = items
        .iter()
        .filter_map(|item| match item {
            Value::String(s) if !s.trim().is_empty() => Some((None, s.trim().to_string())),
            Value::Object(_) => {
                let description = item.get("description").and_then(json_value_to_string)?;
                let title = item.get("title").and_then(json_value_to_string).or_else(|| {
                    item.get("step")
                        .and_then(json_value_to_string)
                        .filter(|s| s.parse::<f64>().is_err())
                });
                Some((title, description))
            }
            _ => None,
        })
        .enumerate()
        .map(|(i, (title, description))| {
            let number = i + 1;
            Step::new(number, title.unwrap_or_else(|| format!("Step {}", number)), description)
        })
        .collect();

    if steps.is_empty() { None } else { Some(steps) }
}
