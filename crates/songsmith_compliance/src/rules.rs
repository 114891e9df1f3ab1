//! Compliance rules and the built-in rule set
//!
//! A rule matches either a keyword list or a regular expression:
//!
//! - **Keywords:** one issue per distinct keyword found anywhere in the
//!   corpus (substring search, no word boundaries)
//! - **Pattern:** one issue per match across the whole corpus
//!
//! Both run over the lower-cased corpus. Patterns are compiled
//! case-insensitive so rule authors need not lower-case them.

use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::types::{ComplianceLevel, RuleCategory};

/// Characters of context kept on each side of a match.
const CONTEXT_CHARS: usize = 20;

// =============================================================================
// Matcher
// =============================================================================

/// How a rule finds matches.
#[derive(Debug, Clone)]
pub enum RuleMatcher {
    Keywords(Vec<String>),
    Pattern(Regex),
}

/// Serialized form of [`RuleMatcher`]: `{ keywords = [...] }` or `{ pattern = "..." }`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatcherSpec {
    Keywords(Vec<String>),
    Pattern(String),
}

impl RuleMatcher {
    pub fn keywords<S: AsRef<str>>(keywords: &[S]) -> Self {
        RuleMatcher::Keywords(keywords.iter().map(|k| k.as_ref().to_string()).collect())
    }

    /// Compile a case-insensitive pattern.
    pub fn pattern(pattern: &str) -> Result<Self, regex::Error> {
        RegexBuilder::new(pattern)
            .case_insensitive(true)
            .build()
            .map(RuleMatcher::Pattern)
    }

    /// Find matches in an already lower-cased corpus.
    pub fn find_matches(&self, corpus: &str) -> Vec<RuleMatch> {
        match self {
            RuleMatcher::Keywords(keywords) => {
                let mut seen = HashSet::new();
                keywords
                    .iter()
                    .map(|k| k.to_lowercase())
                    .filter(|k| !k.is_empty() && seen.insert(k.clone()))
                    .filter_map(|k| {
                        corpus.find(&k).map(|start| RuleMatch::new(corpus, start, start + k.len()))
                    })
                    .collect()
            }
            RuleMatcher::Pattern(regex) => regex
                .find_iter(corpus)
                .filter(|m| !m.as_str().is_empty())
                .map(|m| RuleMatch::new(corpus, m.start(), m.end()))
                .collect(),
        }
    }
}

impl TryFrom<MatcherSpec> for RuleMatcher {
    type Error = regex::Error;

    fn try_from(spec: MatcherSpec) -> Result<Self, Self::Error> {
        match spec {
            MatcherSpec::Keywords(keywords) => Ok(RuleMatcher::Keywords(keywords)),
            MatcherSpec::Pattern(pattern) => RuleMatcher::pattern(&pattern),
        }
    }
}

impl From<RuleMatcher> for MatcherSpec {
    fn from(matcher: RuleMatcher) -> Self {
        match matcher {
            RuleMatcher::Keywords(keywords) => MatcherSpec::Keywords(keywords),
            RuleMatcher::Pattern(regex) => MatcherSpec::Pattern(regex.as_str().to_string()),
        }
    }
}

impl Serialize for RuleMatcher {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        MatcherSpec::from(self.clone()).serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for RuleMatcher {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let spec = MatcherSpec::deserialize(deserializer)?;
        RuleMatcher::try_from(spec).map_err(serde::de::Error::custom)
    }
}

/// One match with its context excerpt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleMatch {
    pub matched: String,
    pub excerpt: String,
}

impl RuleMatch {
    fn new(corpus: &str, start: usize, end: usize) -> Self {
        Self {
            matched: corpus[start..end].to_string(),
            excerpt: excerpt(corpus, start, end),
        }
    }
}

/// Matched text plus up to [`CONTEXT_CHARS`] characters either side,
/// with `...` marking a cut at either end.
fn excerpt(corpus: &str, start: usize, end: usize) -> String {
    let context_start = corpus[..start]
        .char_indices()
        .rev()
        .nth(CONTEXT_CHARS - 1)
        .map(|(i, _)| i)
        .unwrap_or(0);
    let context_end = corpus[end..]
        .char_indices()
        .nth(CONTEXT_CHARS)
        .map(|(i, _)| end + i)
        .unwrap_or(corpus.len());

    let mut out = String::new();
    if context_start > 0 {
        out.push_str("...");
    }
    out.push_str(&corpus[context_start..context_end]);
    if context_end < corpus.len() {
        out.push_str("...");
    }
    out
}

// =============================================================================
// Rule
// =============================================================================

/// A single compliance rule.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComplianceRule {
    pub id: String,
    pub name: String,
    pub category: RuleCategory,
    pub matcher: RuleMatcher,
    pub severity: ComplianceLevel,
    #[serde(default)]
    pub description: String,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

fn default_enabled() -> bool {
    true
}

impl ComplianceRule {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        category: RuleCategory,
        matcher: RuleMatcher,
        severity: ComplianceLevel,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            category,
            matcher,
            severity,
            description: String::new(),
            enabled: true,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }
}

/// Category → remediation template.
pub fn suggestion_for(category: RuleCategory) -> &'static str {
    match category {
        RuleCategory::Copyright => {
            "Replace references to existing works or artists with original descriptions"
        }
        RuleCategory::Trademark => "Remove brand names or swap them for generic terms",
        RuleCategory::InappropriateContent => {
            "Rephrase or remove the flagged content to meet platform guidelines"
        }
        RuleCategory::CommercialUse => {
            "Check the licence terms before using this content commercially"
        }
        RuleCategory::Privacy => {
            "Remove personal information such as emails, phone numbers or addresses"
        }
        RuleCategory::CulturalSensitivity => {
            "Use respectful, specific language when referring to cultures and communities"
        }
    }
}

// =============================================================================
// Built-in rules
// =============================================================================

/// The rule set every engine starts with.
pub fn builtin_rules() -> Vec<ComplianceRule> {
    vec![
        ComplianceRule::new(
            "copyright-artist",
            "Artist imitation",
            RuleCategory::Copyright,
            RuleMatcher::keywords(&[
                "taylor swift",
                "beatles",
                "drake",
                "beyonce",
                "ed sheeran",
                "eminem",
                "adele",
                "michael jackson",
                "billie eilish",
            ]),
            ComplianceLevel::Unsafe,
        )
        .with_description("Names a real artist, which the service blocks"),
        ComplianceRule::new(
            "copyright-notice",
            "Copyright notice",
            RuleCategory::Copyright,
            RuleMatcher::keywords(&["copyright", "©", "all rights reserved", "cover version"]),
            ComplianceLevel::Warning,
        )
        .with_description("Refers to protected material"),
        ComplianceRule::new(
            "copyright-imitation",
            "Imitation phrasing",
            RuleCategory::Copyright,
            RuleMatcher::pattern(r"\b(?:in the style of|sounds like|cover of)\s+\w+")
                .expect("static pattern"),
            ComplianceLevel::Warning,
        )
        .with_description("Asks to imitate an existing work"),
        ComplianceRule::new(
            "trademark-brand",
            "Brand name",
            RuleCategory::Trademark,
            RuleMatcher::keywords(&[
                "coca-cola",
                "nike",
                "disney",
                "pokemon",
                "marvel",
                "mcdonald's",
                "spotify",
                "netflix",
            ]),
            ComplianceLevel::Warning,
        )
        .with_description("Mentions a trademarked brand"),
        ComplianceRule::new(
            "inappropriate-violence",
            "Graphic violence",
            RuleCategory::InappropriateContent,
            RuleMatcher::keywords(&["murder", "massacre", "suicide", "terrorist", "nazi"]),
            ComplianceLevel::Unsafe,
        )
        .with_description("Contains violent or hateful terms"),
        ComplianceRule::new(
            "inappropriate-explicit",
            "Explicit language",
            RuleCategory::InappropriateContent,
            RuleMatcher::keywords(&["explicit", "nsfw", "fuck", "shit"]),
            ComplianceLevel::Warning,
        )
        .with_description("Contains explicit language"),
        ComplianceRule::new(
            "inappropriate-drugs",
            "Drug references",
            RuleCategory::InappropriateContent,
            RuleMatcher::keywords(&["cocaine", "heroin", "meth"]),
            ComplianceLevel::Caution,
        )
        .with_description("References illegal drugs"),
        ComplianceRule::new(
            "commercial-promo",
            "Promotional wording",
            RuleCategory::CommercialUse,
            RuleMatcher::keywords(&["buy now", "for sale", "advertisement", "sponsored", "jingle"]),
            ComplianceLevel::Caution,
        )
        .with_description("Reads as advertising"),
        ComplianceRule::new(
            "privacy-email",
            "Email address",
            RuleCategory::Privacy,
            RuleMatcher::pattern(r"[a-z0-9._%+-]+@[a-z0-9.-]+\.[a-z]{2,}").expect("static pattern"),
            ComplianceLevel::Warning,
        )
        .with_description("Contains an email address"),
        ComplianceRule::new(
            "privacy-phone",
            "Phone number",
            RuleCategory::Privacy,
            RuleMatcher::pattern(r"\b\d{3}[-.\s]\d{3}[-.\s]\d{4}\b").expect("static pattern"),
            ComplianceLevel::Warning,
        )
        .with_description("Contains a phone number"),
        ComplianceRule::new(
            "privacy-personal",
            "Personal details",
            RuleCategory::Privacy,
            RuleMatcher::keywords(&["home address", "social security", "password"]),
            ComplianceLevel::Caution,
        )
        .with_description("Mentions personal details"),
        ComplianceRule::new(
            "cultural-stereotype",
            "Stereotyping terms",
            RuleCategory::CulturalSensitivity,
            RuleMatcher::keywords(&["exotic", "oriental", "tribal", "ghetto", "gypsy"]),
            ComplianceLevel::Caution,
        )
        .with_description("Uses terms that can stereotype a culture"),
    ]
}
