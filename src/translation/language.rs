//! Language identifiers and their resolution from codes or English names.

use anyhow::{Result, bail};
use locale_config::Locale;
use std::fmt;

/// Languages the translation provider understands.
///
/// `Unknown` means "not determined yet": a translation run with an unknown
/// source language detects it from the text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Language {
    Unknown,
    Afrikaans,
    Albanian,
    Amharic,
    Arabic,
    Armenian,
    Azerbaijani,
    Basque,
    Belarusian,
    Bengali,
    Bosnian,
    Bulgarian,
    Catalan,
    ChineseSimplified,
    ChineseTraditional,
    Croatian,
    Czech,
    Danish,
    Dutch,
    English,
    Esperanto,
    Estonian,
    Filipino,
    Finnish,
    French,
    Galician,
    Georgian,
    German,
    Greek,
    Gujarati,
    HaitianCreole,
    Hebrew,
    Hindi,
    Hungarian,
    Icelandic,
    Indonesian,
    Irish,
    Italian,
    Japanese,
    Javanese,
    Kannada,
    Kazakh,
    Khmer,
    Korean,
    Lao,
    Latin,
    Latvian,
    Lithuanian,
    Macedonian,
    Malay,
    Malayalam,
    Maltese,
    Marathi,
    Mongolian,
    Myanmar,
    Nepali,
    Norwegian,
    Pashto,
    Persian,
    Polish,
    Portuguese,
    Punjabi,
    Romanian,
    Russian,
    Serbian,
    Sinhala,
    Slovak,
    Slovenian,
    Spanish,
    Swahili,
    Swedish,
    Tamil,
    Telugu,
    Thai,
    Turkish,
    Ukrainian,
    Urdu,
    Uzbek,
    Vietnamese,
    Welsh,
    Yiddish,
}

/// Supported languages with their provider code and English name.
pub const SUPPORTED_LANGUAGES: &[(Language, &str, &str)] = &[
    (Language::Afrikaans, "af", "Afrikaans"),
    (Language::Albanian, "sq", "Albanian"),
    (Language::Amharic, "am", "Amharic"),
    (Language::Arabic, "ar", "Arabic"),
    (Language::Armenian, "hy", "Armenian"),
    (Language::Azerbaijani, "az", "Azerbaijani"),
    (Language::Basque, "eu", "Basque"),
    (Language::Belarusian, "be", "Belarusian"),
    (Language::Bengali, "bn", "Bengali"),
    (Language::Bosnian, "bs", "Bosnian"),
    (Language::Bulgarian, "bg", "Bulgarian"),
    (Language::Catalan, "ca", "Catalan"),
    (Language::ChineseSimplified, "zh-CN", "Chinese (Simplified)"),
    (Language::ChineseTraditional, "zh-TW", "Chinese (Traditional)"),
    (Language::Croatian, "hr", "Croatian"),
    (Language::Czech, "cs", "Czech"),
    (Language::Danish, "da", "Danish"),
    (Language::Dutch, "nl", "Dutch"),
    (Language::English, "en", "English"),
    (Language::Esperanto, "eo", "Esperanto"),
    (Language::Estonian, "et", "Estonian"),
    (Language::Filipino, "tl", "Filipino"),
    (Language::Finnish, "fi", "Finnish"),
    (Language::French, "fr", "French"),
    (Language::Galician, "gl", "Galician"),
    (Language::Georgian, "ka", "Georgian"),
    (Language::German, "de", "German"),
    (Language::Greek, "el", "Greek"),
    (Language::Gujarati, "gu", "Gujarati"),
    (Language::HaitianCreole, "ht", "Haitian Creole"),
    (Language::Hebrew, "he", "Hebrew"),
    (Language::Hindi, "hi", "Hindi"),
    (Language::Hungarian, "hu", "Hungarian"),
    (Language::Icelandic, "is", "Icelandic"),
    (Language::Indonesian, "id", "Indonesian"),
    (Language::Irish, "ga", "Irish"),
    (Language::Italian, "it", "Italian"),
    (Language::Japanese, "ja", "Japanese"),
    (Language::Javanese, "jv", "Javanese"),
    (Language::Kannada, "kn", "Kannada"),
    (Language::Kazakh, "kk", "Kazakh"),
    (Language::Khmer, "km", "Khmer"),
    (Language::Korean, "ko", "Korean"),
    (Language::Lao, "lo", "Lao"),
    (Language::Latin, "la", "Latin"),
    (Language::Latvian, "lv", "Latvian"),
    (Language::Lithuanian, "lt", "Lithuanian"),
    (Language::Macedonian, "mk", "Macedonian"),
    (Language::Malay, "ms", "Malay"),
    (Language::Malayalam, "ml", "Malayalam"),
    (Language::Maltese, "mt", "Maltese"),
    (Language::Marathi, "mr", "Marathi"),
    (Language::Mongolian, "mn", "Mongolian"),
    (Language::Myanmar, "my", "Myanmar (Burmese)"),
    (Language::Nepali, "ne", "Nepali"),
    (Language::Norwegian, "no", "Norwegian"),
    (Language::Pashto, "ps", "Pashto"),
    (Language::Persian, "fa", "Persian"),
    (Language::Polish, "pl", "Polish"),
    (Language::Portuguese, "pt", "Portuguese"),
    (Language::Punjabi, "pa", "Punjabi"),
    (Language::Romanian, "ro", "Romanian"),
    (Language::Russian, "ru", "Russian"),
    (Language::Serbian, "sr", "Serbian"),
    (Language::Sinhala, "si", "Sinhala"),
    (Language::Slovak, "sk", "Slovak"),
    (Language::Slovenian, "sl", "Slovenian"),
    (Language::Spanish, "es", "Spanish"),
    (Language::Swahili, "sw", "Swahili"),
    (Language::Swedish, "sv", "Swedish"),
    (Language::Tamil, "ta", "Tamil"),
    (Language::Telugu, "te", "Telugu"),
    (Language::Thai, "th", "Thai"),
    (Language::Turkish, "tr", "Turkish"),
    (Language::Ukrainian, "uk", "Ukrainian"),
    (Language::Urdu, "ur", "Urdu"),
    (Language::Uzbek, "uz", "Uzbek"),
    (Language::Vietnamese, "vi", "Vietnamese"),
    (Language::Welsh, "cy", "Welsh"),
    (Language::Yiddish, "yi", "Yiddish"),
];

/// Alternative primary subtags, including the legacy ones the provider still returns.
const CODE_ALIASES: &[(&str, Language)] = &[
    ("iw", Language::Hebrew),
    ("ji", Language::Yiddish),
    ("jw", Language::Javanese),
    ("fil", Language::Filipino),
    ("nb", Language::Norwegian),
    ("nn", Language::Norwegian),
    ("in", Language::Indonesian),
];

/// Alternative English names.
const NAME_ALIASES: &[(&str, Language)] = &[
    ("Chinese", Language::ChineseSimplified),
    ("Burmese", Language::Myanmar),
    ("Tagalog", Language::Filipino),
    ("Norwegian Bokmal", Language::Norwegian),
];

impl Language {
    /// Resolves a locale identifier (`ru`, `pt-BR`, `zh_TW`) or an English
    /// language name (`Russian`) to a language.
    ///
    /// Never returns [`Language::Unknown`].
    ///
    /// # Errors
    ///
    /// Returns an error if `text` is neither a known tag nor a known name.
    pub fn resolve(text: &str) -> Result<Self> {
        let text = text.trim();

        if let Some(language) = Self::from_tag(text).or_else(|| Self::from_name(text)) {
            return Ok(language);
        }

        bail!("unrecognized language '{text}'.")
    }

    /// Like [`Language::resolve`], but a missing or blank identifier means
    /// [`Language::Unknown`].
    pub fn parse_optional(text: Option<&str>) -> Result<Self> {
        match text {
            Some(text) if !text.trim().is_empty() => Self::resolve(text),
            _ => Ok(Self::Unknown),
        }
    }

    /// The code the translation provider expects, or `None` for `Unknown`.
    pub fn code(self) -> Option<&'static str> {
        Self::entry(self).map(|(_, code, _)| *code)
    }

    /// The English name, e.g. `Chinese (Traditional)`.
    pub fn english_name(self) -> &'static str {
        Self::entry(self).map_or("Unknown", |(_, _, name)| *name)
    }

    pub fn is_unknown(self) -> bool {
        self == Self::Unknown
    }

    fn entry(self) -> Option<&'static (Self, &'static str, &'static str)> {
        SUPPORTED_LANGUAGES
            .iter()
            .find(|(language, _, _)| *language == self)
    }

    fn from_tag(text: &str) -> Option<Self> {
        let subtags = split_tag(text)?;
        let primary = subtags[0].as_str();

        if primary == "zh" {
            let traditional = subtags[1..]
                .iter()
                .any(|s| matches!(s.as_str(), "tw" | "hk" | "mo" | "hant"));
            return Some(if traditional {
                Self::ChineseTraditional
            } else {
                Self::ChineseSimplified
            });
        }

        SUPPORTED_LANGUAGES
            .iter()
            .find(|(_, code, _)| code.eq_ignore_ascii_case(primary))
            .map(|(language, _, _)| *language)
            .or_else(|| {
                CODE_ALIASES
                    .iter()
                    .find(|(code, _)| *code == primary)
                    .map(|(_, language)| *language)
            })
    }

    fn from_name(text: &str) -> Option<Self> {
        SUPPORTED_LANGUAGES
            .iter()
            .map(|(language, _, name)| (*name, *language))
            .chain(NAME_ALIASES.iter().copied())
            .find(|(name, _)| name.eq_ignore_ascii_case(text))
            .map(|(_, language)| language)
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.english_name())
    }
}

/// Splits a BCP 47 / POSIX style tag into lowercase subtags.
///
/// Encoding and modifier suffixes (`.UTF-8`, `@euro`) are dropped. Returns
/// `None` unless the primary subtag is two or three ASCII letters and every
/// other subtag is one to eight ASCII alphanumerics.
fn split_tag(text: &str) -> Option<Vec<String>> {
    let tag = text.split(['.', '@']).next().unwrap_or_default();

    let subtags: Vec<String> = tag
        .split(['-', '_'])
        .map(str::to_ascii_lowercase)
        .collect();

    let primary = subtags.first()?;
    if !(2..=3).contains(&primary.len()) || !primary.chars().all(|c| c.is_ascii_alphabetic()) {
        return None;
    }

    let well_formed = subtags[1..]
        .iter()
        .all(|s| (1..=8).contains(&s.len()) && s.chars().all(|c| c.is_ascii_alphanumeric()));

    well_formed.then_some(subtags)
}

/// Returns the language tag of the current user's locale (e.g. `de-CH`).
pub fn current_locale_tag() -> Option<String> {
    let locale = Locale::user_default();
    locale
        .tags()
        .map(|(_category, tag)| tag.as_ref().to_string())
        .find(|tag| split_tag(tag).is_some())
}
