//! Core compliance types: categories, levels, issues and scan input.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

// =============================================================================
// Category and Level
// =============================================================================

/// Risk taxonomy. Declaration order is the reporting order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleCategory {
    Copyright,
    Trademark,
    InappropriateContent,
    CommercialUse,
    Privacy,
    CulturalSensitivity,
}

impl RuleCategory {
    pub const ALL: [RuleCategory; 6] = [
        RuleCategory::Copyright,
        RuleCategory::Trademark,
        RuleCategory::InappropriateContent,
        RuleCategory::CommercialUse,
        RuleCategory::Privacy,
        RuleCategory::CulturalSensitivity,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RuleCategory::Copyright => "copyright",
            RuleCategory::Trademark => "trademark",
            RuleCategory::InappropriateContent => "inappropriate_content",
            RuleCategory::CommercialUse => "commercial_use",
            RuleCategory::Privacy => "privacy",
            RuleCategory::CulturalSensitivity => "cultural_sensitivity",
        }
    }
}

impl fmt::Display for RuleCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Ordinal risk tier: safe < caution < warning < unsafe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComplianceLevel {
    Safe,
    Caution,
    Warning,
    Unsafe,
}

impl ComplianceLevel {
    /// Score deduction for one issue at this level.
    pub fn penalty(&self) -> u32 {
        match self {
            ComplianceLevel::Unsafe => 30,
            ComplianceLevel::Warning => 20,
            ComplianceLevel::Caution => 10,
            ComplianceLevel::Safe => 5,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ComplianceLevel::Safe => "safe",
            ComplianceLevel::Caution => "caution",
            ComplianceLevel::Warning => "warning",
            ComplianceLevel::Unsafe => "unsafe",
        }
    }
}

impl fmt::Display for ComplianceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// =============================================================================
// Issue
// =============================================================================

/// One detected risk instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComplianceIssue {
    pub id: Uuid,
    pub rule_id: String,
    pub category: RuleCategory,
    pub level: ComplianceLevel,
    pub title: String,
    pub description: String,
    pub suggestion: String,
    /// Matched text with surrounding context, taken from the lower-cased corpus.
    pub affected_text: String,
}

// =============================================================================
// Input
// =============================================================================

/// Text fields to scan. Missing fields count as empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComplianceInput {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub prompt: Option<String>,
    #[serde(default)]
    pub lyrics: Option<String>,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
}

impl ComplianceInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = Some(prompt.into());
        self
    }

    pub fn with_lyrics(mut self, lyrics: impl Into<String>) -> Self {
        self.lyrics = Some(lyrics.into());
        self
    }

    pub fn with_tags(mut self, tags: Vec<String>) -> Self {
        self.tags = Some(tags);
        self
    }

    /// All fields joined by single spaces, lower-cased once.
    pub fn corpus(&self) -> String {
        let tags = self.tags.as_deref().unwrap_or_default().join(" ");
        [
            self.title.as_deref().unwrap_or_default(),
            self.description.as_deref().unwrap_or_default(),
            self.prompt.as_deref().unwrap_or_default(),
            self.lyrics.as_deref().unwrap_or_default(),
            tags.as_str(),
        ]
        .join(" ")
        .to_lowercase()
    }
}
