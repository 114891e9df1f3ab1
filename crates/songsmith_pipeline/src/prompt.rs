//! The prompt entity handed to the generation service.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use songsmith_compliance::ComplianceInput;
use songsmith_core::{Genre, Language};

/// Unique identifier for a prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PromptId(pub Uuid);

impl PromptId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl Default for PromptId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for PromptId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for PromptId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// A music generation prompt.
///
/// `style` is raw text and may exceed the service budget until it has been
/// through the pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prompt {
    #[serde(default)]
    pub id: PromptId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub style: String,
    #[serde(default)]
    pub lyrics: Option<String>,
    #[serde(default)]
    pub genre: Option<Genre>,
    #[serde(default)]
    pub language: Language,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}

impl Prompt {
    pub fn new(title: impl Into<String>, style: impl Into<String>) -> Self {
        Self {
            id: PromptId::new(),
            title: title.into(),
            description: String::new(),
            style: style.into(),
            lyrics: None,
            genre: None,
            language: Language::default(),
            tags: Vec::new(),
            created_at: Utc::now(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_lyrics(mut self, lyrics: impl Into<String>) -> Self {
        self.lyrics = Some(lyrics.into());
        self
    }

    pub fn with_genre(mut self, genre: Genre) -> Self {
        self.genre = Some(genre);
        self
    }

    pub fn with_language(mut self, language: Language) -> Self {
        self.language = language;
        self
    }

    pub fn with_tags(mut self, tags: Vec<String>) -> Self {
        self.tags = tags;
        self
    }

    /// Genre names, empty when no genre is set.
    pub fn genre_names(&self) -> &[String] {
        self.genre.as_ref().map(Genre::names).unwrap_or_default()
    }

    /// A new prompt with the same content and a replaced style.
    pub fn derive_with_style(&self, style: impl Into<String>) -> Self {
        Self {
            id: PromptId::new(),
            style: style.into(),
            created_at: Utc::now(),
            ..self.clone()
        }
    }

    pub fn compliance_input(&self) -> ComplianceInput {
        let mut input = ComplianceInput::new()
            .with_title(&self.title)
            .with_description(&self.description)
            .with_prompt(&self.style)
            .with_tags(self.tags.clone());
        if let Some(lyrics) = &self.lyrics {
            input = input.with_lyrics(lyrics);
        }
        input
    }
}
