//! Language registry
//!
//! Static metadata for every language the engine knows about: display
//! names, writing direction, language family and the script a well-formed
//! answer is expected to be written in. Every function takes the language
//! code explicitly; there is no process-wide "current language".

use serde::{Deserialize, Serialize};

/// Fallback language used whenever a code is unregistered
pub const DEFAULT_LANGUAGE: &str = "en";

/// Language family, used for tokenization and adapter suitability
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LanguageFamily {
    Germanic,
    Romance,
    Slavic,
    SinoTibetan,
    IndoAryan,
    Semitic,
    Turkic,
    Uralic,
    Celtic,
    Dravidian,
    Austronesian,
    NigerCongo,
    Japonic,
    Koreanic,
    TaiKadai,
    Austroasiatic,
    Hellenic,
    Baltic,
    Kartvelian,
    Armenian,
    IndoIranian,
    Unknown,
}

impl LanguageFamily {
    /// Families whose members count as "European" for adapter coverage tiers
    pub fn is_european(&self) -> bool {
        matches!(
            self,
            LanguageFamily::Germanic
                | LanguageFamily::Romance
                | LanguageFamily::Slavic
                | LanguageFamily::Celtic
                | LanguageFamily::Uralic
        )
    }
}

/// Writing system a language is expected to use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Script {
    Latin,
    Arabic,
    Hebrew,
    Cyrillic,
    Greek,
    Han,
    HanKana,
    Hangul,
    Thai,
    Devanagari,
    Bengali,
    Tamil,
    Telugu,
    Kannada,
    Malayalam,
    Gujarati,
    Gurmukhi,
    Sinhala,
    Myanmar,
    Khmer,
    Lao,
    Georgian,
    ArmenianScript,
    Ethiopic,
}

impl Script {
    /// Whether `c` belongs to this script's Unicode block(s)
    pub fn contains(&self, c: char) -> bool {
        let cp = c as u32;
        match self {
            Script::Latin => {
                c.is_ascii_alphabetic() || ((0x00C0..=0x024F).contains(&cp) && c.is_alphabetic())
            }
            Script::Arabic => (0x0600..=0x06FF).contains(&cp),
            Script::Hebrew => (0x0590..=0x05FF).contains(&cp),
            Script::Cyrillic => (0x0400..=0x04FF).contains(&cp),
            Script::Greek => (0x0370..=0x03FF).contains(&cp),
            Script::Han => (0x4E00..=0x9FFF).contains(&cp),
            Script::HanKana => {
                (0x3040..=0x30FF).contains(&cp) || (0x4E00..=0x9FFF).contains(&cp)
            }
            Script::Hangul => (0xAC00..=0xD7AF).contains(&cp),
            Script::Thai => (0x0E00..=0x0E7F).contains(&cp),
            Script::Devanagari => (0x0900..=0x097F).contains(&cp),
            Script::Bengali => (0x0980..=0x09FF).contains(&cp),
            Script::Tamil => (0x0B80..=0x0BFF).contains(&cp),
            Script::Telugu => (0x0C00..=0x0C7F).contains(&cp),
            Script::Kannada => (0x0C80..=0x0CFF).contains(&cp),
            Script::Malayalam => (0x0D00..=0x0D7F).contains(&cp),
            Script::Gujarati => (0x0A80..=0x0AFF).contains(&cp),
            Script::Gurmukhi => (0x0A00..=0x0A7F).contains(&cp),
            Script::Sinhala => (0x0D80..=0x0DFF).contains(&cp),
            Script::Myanmar => (0x1000..=0x109F).contains(&cp),
            Script::Khmer => (0x1780..=0x17FF).contains(&cp),
            Script::Lao => (0x0E80..=0x0EFF).contains(&cp),
            Script::Georgian => (0x10A0..=0x10FF).contains(&cp),
            Script::ArmenianScript => (0x0530..=0x058F).contains(&cp),
            Script::Ethiopic => (0x1200..=0x137F).contains(&cp),
        }
    }
}

/// Static metadata for a supported language
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LanguageInfo {
    pub code: &'static str,
    pub name: &'static str,
    pub native: &'static str,
    pub rtl: bool,
    pub family: LanguageFamily,
}

const fn lang(
    code: &'static str,
    name: &'static str,
    native: &'static str,
    rtl: bool,
    family: LanguageFamily,
) -> LanguageInfo {
    LanguageInfo {
        code,
        name,
        native,
        rtl,
        family,
    }
}

use LanguageFamily as F;

/// Registered languages
pub const SUPPORTED_LANGUAGES: &[LanguageInfo] = &[
    lang("en", "English", "English", false, F::Germanic),
    lang("tr", "Turkish", "Türkçe", false, F::Turkic),
    lang("zh", "Chinese", "中文", false, F::SinoTibetan),
    lang("zh-cn", "Chinese (Simplified)", "简体中文", false, F::SinoTibetan),
    lang("zh-tw", "Chinese (Traditional)", "繁體中文", false, F::SinoTibetan),
    lang("es", "Spanish", "Español", false, F::Romance),
    lang("fr", "French", "Français", false, F::Romance),
    lang("de", "German", "Deutsch", false, F::Germanic),
    lang("it", "Italian", "Italiano", false, F::Romance),
    lang("pt", "Portuguese", "Português", false, F::Romance),
    lang("pt-br", "Portuguese (Brazil)", "Português Brasileiro", false, F::Romance),
    lang("ru", "Russian", "Русский", false, F::Slavic),
    lang("ja", "Japanese", "日本語", false, F::Japonic),
    lang("ko", "Korean", "한국어", false, F::Koreanic),
    lang("ar", "Arabic", "العربية", true, F::Semitic),
    lang("hi", "Hindi", "हिन्दी", false, F::IndoAryan),
    lang("bn", "Bengali", "বাংলা", false, F::IndoAryan),
    lang("ur", "Urdu", "اردو", true, F::IndoAryan),
    lang("fa", "Persian", "فارسی", true, F::IndoIranian),
    lang("he", "Hebrew", "עברית", true, F::Semitic),
    lang("th", "Thai", "ไทย", false, F::TaiKadai),
    lang("vi", "Vietnamese", "Tiếng Việt", false, F::Austroasiatic),
    lang("id", "Indonesian", "Bahasa Indonesia", false, F::Austronesian),
    lang("ms", "Malay", "Bahasa Melayu", false, F::Austronesian),
    lang("sw", "Swahili", "Kiswahili", false, F::NigerCongo),
    lang("nl", "Dutch", "Nederlands", false, F::Germanic),
    lang("sv", "Swedish", "Svenska", false, F::Germanic),
    lang("no", "Norwegian", "Norsk", false, F::Germanic),
    lang("da", "Danish", "Dansk", false, F::Germanic),
    lang("fi", "Finnish", "Suomi", false, F::Uralic),
    lang("pl", "Polish", "Polski", false, F::Slavic),
    lang("cs", "Czech", "Čeština", false, F::Slavic),
    lang("hu", "Hungarian", "Magyar", false, F::Uralic),
    lang("ro", "Romanian", "Română", false, F::Romance),
    lang("bg", "Bulgarian", "Български", false, F::Slavic),
    lang("sr", "Serbian", "Српски", false, F::Slavic),
    lang("uk", "Ukrainian", "Українська", false, F::Slavic),
    lang("el", "Greek", "Ελληνικά", false, F::Hellenic),
    lang("lt", "Lithuanian", "Lietuvių", false, F::Baltic),
    lang("ga", "Irish", "Gaeilge", false, F::Celtic),
    lang("cy", "Welsh", "Cymraeg", false, F::Celtic),
    lang("ca", "Catalan", "Català", false, F::Romance),
    lang("ta", "Tamil", "தமிழ்", false, F::Dravidian),
    lang("te", "Telugu", "తెలుగు", false, F::Dravidian),
    lang("my", "Myanmar", "မြန်မာ", false, F::SinoTibetan),
    lang("ka", "Georgian", "ქართული", false, F::Kartvelian),
    lang("hy", "Armenian", "Հայերեն", false, F::Armenian),
];

/// Languages treated as "major" by adapters with the `major` coverage tier
pub const MAJOR_LANGUAGES: &[&str] = &[
    "en", "es", "fr", "de", "it", "pt", "ru", "ja", "ko", "zh", "ar", "hi",
];

/// Look up the metadata of a language code (case-insensitive)
pub fn language_info(code: &str) -> Option<&'static LanguageInfo> {
    let code = code.to_ascii_lowercase();
    SUPPORTED_LANGUAGES.iter().find(|l| l.code == code)
}

/// Whether the code is registered
pub fn is_supported(code: &str) -> bool {
    language_info(code).is_some()
}

/// Language family of a code ([`LanguageFamily::Unknown`] when unregistered)
pub fn family(code: &str) -> LanguageFamily {
    language_info(code)
        .map(|l| l.family)
        .unwrap_or(LanguageFamily::Unknown)
}

/// Native display name, or the code itself when unregistered
pub fn native_name(code: &str) -> &str {
    language_info(code).map(|l| l.native).unwrap_or(code)
}

/// Whether text in this language is tokenized per character
///
/// Han-script (Sino-Tibetan) languages do not delimit words with spaces.
pub fn is_logographic(code: &str) -> bool {
    family(code) == LanguageFamily::SinoTibetan
}

/// Whether the code is one of the [`MAJOR_LANGUAGES`]
pub fn is_major(code: &str) -> bool {
    MAJOR_LANGUAGES.contains(&code.to_ascii_lowercase().as_str())
}

/// Script an answer in this language is expected to use
pub fn expected_script(code: &str) -> Script {
    match code.to_ascii_lowercase().as_str() {
        "ar" | "ur" | "fa" => Script::Arabic,
        "he" => Script::Hebrew,
        "ru" | "bg" | "mk" | "sr" | "uk" | "be" => Script::Cyrillic,
        "el" => Script::Greek,
        "zh" | "zh-cn" | "zh-tw" => Script::Han,
        "ja" => Script::HanKana,
        "ko" => Script::Hangul,
        "th" => Script::Thai,
        "hi" | "mr" | "ne" => Script::Devanagari,
        "bn" => Script::Bengali,
        "ta" => Script::Tamil,
        "te" => Script::Telugu,
        "kn" => Script::Kannada,
        "ml" => Script::Malayalam,
        "gu" => Script::Gujarati,
        "pa" => Script::Gurmukhi,
        "si" => Script::Sinhala,
        "my" => Script::Myanmar,
        "km" => Script::Khmer,
        "lo" => Script::Lao,
        "ka" => Script::Georgian,
        "hy" => Script::ArmenianScript,
        "am" => Script::Ethiopic,
        _ => Script::Latin,
    }
}

/// Guess the language of a text from the scripts it uses
///
/// Latin-script text is reported as English.
pub fn detect_language(text: &str) -> &'static str {
    let probes: [(Script, &'static str); 9] = [
        (Script::Han, "zh"),
        (Script::HanKana, "ja"),
        (Script::Hangul, "ko"),
        (Script::Arabic, "ar"),
        (Script::Hebrew, "he"),
        (Script::Cyrillic, "ru"),
        (Script::Greek, "el"),
        (Script::Devanagari, "hi"),
        (Script::Thai, "th"),
    ];

    probes
        .iter()
        .find(|(script, _)| text.chars().any(|c| script.contains(c)))
        .map(|(_, code)| *code)
        .unwrap_or(DEFAULT_LANGUAGE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_language_lookup_is_case_insensitive() {
        assert_eq!(language_info("EN").unwrap().name, "English");
        assert!(language_info("xx").is_none());
    }

    #[test]
    fn test_family_of_unknown_language() {
        assert_eq!(family("xx"), LanguageFamily::Unknown);
        assert_eq!(family("ru"), LanguageFamily::Slavic);
    }

    #[test]
    fn test_logographic_languages() {
        assert!(is_logographic("zh"));
        assert!(is_logographic("zh-tw"));
        assert!(!is_logographic("en"));
        assert!(!is_logographic("ja"));
    }

    #[test]
    fn test_expected_script() {
        assert_eq!(expected_script("ru"), Script::Cyrillic);
        assert_eq!(expected_script("zh"), Script::Han);
        assert_eq!(expected_script("fr"), Script::Latin);
        assert!(Script::Cyrillic.contains('Ж'));
        assert!(!Script::Cyrillic.contains('Z'));
    }

    #[test]
    fn test_detect_language() {
        assert_eq!(detect_language("可再生能源"), "zh");
        assert_eq!(detect_language("ひらがな"), "ja");
        assert_eq!(detect_language("Возобновляемая энергия"), "ru");
        assert_eq!(detect_language("renewable energy"), "en");
    }

    #[test]
    fn test_european_families() {
        assert!(family("de").is_european());
        assert!(family("fi").is_european());
        assert!(!family("tr").is_european());
    }

    #[test]
    fn test_native_name_falls_back_to_code() {
        assert_eq!(native_name("de"), "Deutsch");
        assert_eq!(native_name("xx"), "xx");
    }
}
