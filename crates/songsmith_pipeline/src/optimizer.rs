//! Built-in style shrinking
//!
//! Four passes, each run only while the style is still over the target:
//!
//! 1. Case-insensitive duplicate elements are merged (first spelling kept)
//! 2. Intensifiers and filler words are stripped as whole words
//! 3. Long terms are replaced with shorter synonyms until the text fits
//! 4. The text is hard-truncated to `target - 3` characters plus `...`
//!
//! Every pass that changes the text records one [`OptimizationAction`].

use async_trait::async_trait;
use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::OnceLock;
use tracing::debug;

use songsmith_core::char_len;
use songsmith_core::style::split_elements;

use crate::ports::StyleOptimizer;

const ELEMENT_SEPARATOR: &str = ", ";
const ELLIPSIS: &str = "...";
const SNIPPET_CHARS: usize = 40;

const FILLER_WORDS: &[&str] = &[
    "very",
    "really",
    "extremely",
    "super",
    "quite",
    "rather",
    "somewhat",
    "totally",
    "incredibly",
    "absolutely",
    "just",
    "kind of",
    "sort of",
];

/// Long term, short replacement. Applied in order.
const SYNONYMS: &[(&str, &str)] = &[
    ("rhythm and blues", "R&B"),
    ("synthesizers", "synths"),
    ("synthesizer", "synth"),
    ("instrumental", "instr."),
    ("orchestral", "orch."),
    ("atmospheric", "atmos"),
    ("psychedelic", "psych"),
    ("progressive", "prog"),
    ("electronic", "electro"),
    ("background", "bg"),
    ("percussion", "perc"),
    ("melancholic", "moody"),
    ("saxophone", "sax"),
    ("beautiful", "lush"),
    ("vocals", "vox"),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionType {
    Removed,
    Shortened,
    Reordered,
    Merged,
}

/// One effective change made to the style text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptimizationAction {
    pub action_type: ActionType,
    pub description: String,
    pub before: String,
    pub after: String,
}

impl OptimizationAction {
    pub fn new(
        action_type: ActionType,
        description: impl Into<String>,
        before: &str,
        after: &str,
    ) -> Self {
        Self {
            action_type,
            description: description.into(),
            before: snippet(before),
            after: snippet(after),
        }
    }
}

/// Result of shrinking a style text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StyleOptimization {
    pub style: String,
    pub actions: Vec<OptimizationAction>,
}

impl StyleOptimization {
    pub fn unchanged(style: &str) -> Self {
        Self {
            style: style.to_string(),
            actions: Vec::new(),
        }
    }
}

/// Default [`StyleOptimizer`] used when none is injected.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinStyleOptimizer;

impl BuiltinStyleOptimizer {
    pub fn new() -> Self {
        Self
    }

    /// Synchronous core of the trait method.
    pub fn shrink(&self, style: &str, target_length: usize) -> StyleOptimization {
        let mut current = style.to_string();
        let mut actions = Vec::new();

        if char_len(&current) <= target_length {
            return StyleOptimization::unchanged(style);
        }

        if let Some(merged) = merge_duplicates(&current) {
            debug!(
                before = char_len(&current),
                after = char_len(&merged),
                "Merged duplicate elements"
            );
            actions.push(OptimizationAction::new(
                ActionType::Merged,
                "Merged duplicate style elements",
                &current,
                &merged,
            ));
            current = merged;
        }

        if char_len(&current) > target_length {
            if let Some(stripped) = strip_filler(&current) {
                debug!(
                    before = char_len(&current),
                    after = char_len(&stripped),
                    "Stripped filler words"
                );
                actions.push(OptimizationAction::new(
                    ActionType::Removed,
                    "Removed intensifiers and filler words",
                    &current,
                    &stripped,
                ));
                current = stripped;
            }
        }

        if char_len(&current) > target_length {
            if let Some(shortened) = apply_synonyms(&current, target_length) {
                debug!(
                    before = char_len(&current),
                    after = char_len(&shortened),
                    "Applied synonyms"
                );
                actions.push(OptimizationAction::new(
                    ActionType::Shortened,
                    "Replaced long terms with shorter synonyms",
                    &current,
                    &shortened,
                ));
                current = shortened;
            }
        }

        if char_len(&current) > target_length {
            let truncated = truncate_with_ellipsis(&current, target_length);
            debug!(
                before = char_len(&current),
                after = char_len(&truncated),
                "Truncated style"
            );
            actions.push(OptimizationAction::new(
                ActionType::Shortened,
                format!("Truncated to {} characters", target_length),
                &current,
                &truncated,
            ));
            current = truncated;
        }

        StyleOptimization {
            style: current,
            actions,
        }
    }
}

#[async_trait]
impl StyleOptimizer for BuiltinStyleOptimizer {
    async fn optimize(&self, style: &str, target_length: usize) -> StyleOptimization {
        self.shrink(style, target_length)
    }
}

/// `None` when there was nothing to merge.
fn merge_duplicates(text: &str) -> Option<String> {
    let elements = split_elements(text);
    let mut seen = HashSet::new();
    let unique: Vec<&String> = elements
        .iter()
        .filter(|e| seen.insert(e.to_lowercase()))
        .collect();
    if unique.len() == elements.len() {
        return None;
    }
    Some(
        unique
            .iter()
            .map(|e| e.as_str())
            .collect::<Vec<_>>()
            .join(ELEMENT_SEPARATOR),
    )
}

fn filler_regex() -> &'static Regex {
    static FILLER: OnceLock<Regex> = OnceLock::new();
    FILLER.get_or_init(|| {
        let alternatives = FILLER_WORDS
            .iter()
            .map(|w| regex::escape(w))
            .collect::<Vec<_>>()
            .join("|");
        RegexBuilder::new(&format!(r"\b(?:{})\b", alternatives))
            .case_insensitive(true)
            .build()
            .expect("static pattern")
    })
}

fn synonym_regexes() -> &'static [(Regex, &'static str)] {
    static SYNONYM_PATTERNS: OnceLock<Vec<(Regex, &'static str)>> = OnceLock::new();
    SYNONYM_PATTERNS.get_or_init(|| {
        SYNONYMS
            .iter()
            .map(|(long, short)| {
                let regex = RegexBuilder::new(&format!(r"\b{}\b", regex::escape(long)))
                    .case_insensitive(true)
                    .build()
                    .expect("static pattern");
                (regex, *short)
            })
            .collect()
    })
}

/// Strip filler words; `None` when nothing changed or nothing would remain.
fn strip_filler(text: &str) -> Option<String> {
    let stripped = filler_regex().replace_all(text, "");
    let normalized = normalize_elements(&stripped);
    if normalized.is_empty() || normalized == text {
        return None;
    }
    Some(normalized)
}

/// Apply synonyms in table order, stopping once the text fits.
fn apply_synonyms(text: &str, target_length: usize) -> Option<String> {
    let mut current = text.to_string();
    for (regex, short) in synonym_regexes() {
        if char_len(&current) <= target_length {
            break;
        }
        let replaced = regex.replace_all(&current, *short);
        if char_len(&replaced) < char_len(&current) {
            current = replaced.into_owned();
        }
    }
    let current = normalize_elements(&current);
    if current.is_empty() || current == text {
        return None;
    }
    Some(current)
}

/// Collapse inner whitespace per element, drop empty elements, re-join.
fn normalize_elements(text: &str) -> String {
    text.split(',')
        .map(|e| e.split_whitespace().collect::<Vec<_>>().join(" "))
        .filter(|e| !e.is_empty())
        .collect::<Vec<_>>()
        .join(ELEMENT_SEPARATOR)
}

fn truncate_with_ellipsis(text: &str, target_length: usize) -> String {
    let keep = target_length.saturating_sub(char_len(ELLIPSIS));
    let cut: String = text.chars().take(keep).collect();
    let cut = cut.trim_end_matches(|c: char| c == ',' || c.is_whitespace());
    format!("{}{}", cut, ELLIPSIS)
}

fn snippet(text: &str) -> String {
    if char_len(text) <= SNIPPET_CHARS {
        return text.to_string();
    }
    let cut: String = text.chars().take(SNIPPET_CHARS).collect();
    format!("{}{}", cut, ELLIPSIS)
}
