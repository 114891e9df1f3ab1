//! Lyric language value object.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::ConstructionError;

/// How well the generation service handles lyrics in a language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LanguageQuality {
    Low,
    Medium,
    High,
    Highest,
}

impl LanguageQuality {
    /// True for the two upper tiers.
    pub fn is_well_supported(&self) -> bool {
        matches!(self, LanguageQuality::High | LanguageQuality::Highest)
    }
}

struct LanguageEntry {
    code: &'static str,
    name: &'static str,
    quality: LanguageQuality,
    hints: &'static [&'static str],
}

const LANGUAGES: &[LanguageEntry] = &[
    LanguageEntry {
        code: "en",
        name: "English",
        quality: LanguageQuality::Highest,
        hints: &[
            "Use simple, singable vocabulary",
            "Mark sections with [Verse], [Chorus] and [Bridge]",
        ],
    },
    LanguageEntry {
        code: "ja",
        name: "Japanese",
        quality: LanguageQuality::High,
        hints: &[
            "Keep lines short; long kanji compounds blur in singing",
            "Romaji can help pronunciation of loanwords",
        ],
    },
    LanguageEntry {
        code: "ko",
        name: "Korean",
        quality: LanguageQuality::High,
        hints: &["Mixing short English hooks into Korean lyrics is well supported"],
    },
    LanguageEntry {
        code: "zh",
        name: "Chinese",
        quality: LanguageQuality::High,
        hints: &["Prefer one character per syllable of melody"],
    },
    LanguageEntry {
        code: "es",
        name: "Spanish",
        quality: LanguageQuality::High,
        hints: &["Watch vowel elisions between words when counting syllables"],
    },
    LanguageEntry {
        code: "fr",
        name: "French",
        quality: LanguageQuality::Medium,
        hints: &["Avoid dense liaisons in fast passages"],
    },
    LanguageEntry {
        code: "de",
        name: "German",
        quality: LanguageQuality::Medium,
        hints: &["Split long compound nouns across beats"],
    },
    LanguageEntry {
        code: "pt",
        name: "Portuguese",
        quality: LanguageQuality::Medium,
        hints: &["Nasal vowels land better on sustained notes"],
    },
    LanguageEntry {
        code: "it",
        name: "Italian",
        quality: LanguageQuality::Medium,
        hints: &["Open vowels suit long held notes"],
    },
    LanguageEntry {
        code: "ru",
        name: "Russian",
        quality: LanguageQuality::Medium,
        hints: &["Consonant clusters need slower phrasing"],
    },
    LanguageEntry {
        code: "hi",
        name: "Hindi",
        quality: LanguageQuality::Low,
        hints: &["Write lyrics in Devanagari rather than transliteration"],
    },
    LanguageEntry {
        code: "ar",
        name: "Arabic",
        quality: LanguageQuality::Low,
        hints: &["Keep verses short and repeat the hook"],
    },
];

/// A supported lyric language.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Language {
    index: usize,
}

impl Language {
    pub fn from_code(code: &str) -> Result<Self, ConstructionError> {
        let wanted = code.trim();
        LANGUAGES
            .iter()
            .position(|entry| entry.code.eq_ignore_ascii_case(wanted))
            .map(|index| Self { index })
            .ok_or_else(|| ConstructionError::UnknownLanguage(code.to_string()))
    }

    pub fn english() -> Self {
        Self { index: 0 }
    }

    fn entry(&self) -> &'static LanguageEntry {
        &LANGUAGES[self.index]
    }

    pub fn code(&self) -> &'static str {
        self.entry().code
    }

    pub fn name(&self) -> &'static str {
        self.entry().name
    }

    pub fn quality(&self) -> LanguageQuality {
        self.entry().quality
    }

    pub fn optimization_hints(&self) -> &'static [&'static str] {
        self.entry().hints
    }
}

impl Default for Language {
    fn default() -> Self {
        Self::english()
    }
}

impl fmt::Debug for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Language({})", self.code())
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl TryFrom<String> for Language {
    type Error = ConstructionError;

    fn try_from(code: String) -> Result<Self, Self::Error> {
        Self::from_code(&code)
    }
}

impl From<Language> for String {
    fn from(language: Language) -> Self {
        language.code().to_string()
    }
}
