//! Heuristic success-rate prediction.
//!
//! Four factors on a 0-100 scale, combined with fixed weights. Deterministic;
//! no history or learned model is involved.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use songsmith_core::style::split_elements;
use songsmith_core::{char_len, ConflictSeverity, GenreCompatibility, MAX_STYLE_LENGTH};

use crate::ports::SuccessPredictor;
use crate::prompt::Prompt;

// ============================================================================
// Weights and thresholds
// ============================================================================

const GENRE_WEIGHT: f64 = 0.3;
const COHESION_WEIGHT: f64 = 0.25;
const LENGTH_WEIGHT: f64 = 0.25;
const TECHNICAL_WEIGHT: f64 = 0.2;

/// Factors below this produce an improvement hint.
const HINT_THRESHOLD: u32 = 70;

const NO_GENRE_SCORE: u32 = 60;
const COHESIVE_ELEMENTS: std::ops::RangeInclusive<usize> = 2..=8;
const COHESION_FLOOR: u32 = 40;
const DEFECT_PENALTY: u32 = 20;
const MIN_TITLE_CHARS: usize = 2;

// ============================================================================
// Prediction
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuccessFactors {
    pub genre_compatibility: u32,
    pub style_cohesion: u32,
    pub length_optimality: u32,
    pub technical_correctness: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuccessPrediction {
    pub overall: u32,
    pub factors: SuccessFactors,
    pub hints: Vec<String>,
}

impl SuccessPrediction {
    pub fn from_factors(factors: SuccessFactors) -> Self {
        let weighted = factors.genre_compatibility as f64 * GENRE_WEIGHT
            + factors.style_cohesion as f64 * COHESION_WEIGHT
            + factors.length_optimality as f64 * LENGTH_WEIGHT
            + factors.technical_correctness as f64 * TECHNICAL_WEIGHT;

        let mut hints = Vec::new();
        if factors.genre_compatibility < HINT_THRESHOLD {
            hints.push("Choose genres that blend well, or name a single primary genre".to_string());
        }
        if factors.style_cohesion < HINT_THRESHOLD {
            hints.push("Use between 2 and 8 focused style elements".to_string());
        }
        if factors.length_optimality < HINT_THRESHOLD {
            hints.push(format!(
                "Shorten the style to {} characters or fewer",
                MAX_STYLE_LENGTH
            ));
        }
        if factors.technical_correctness < HINT_THRESHOLD {
            hints.push(
                "Fix formatting: title, repeated style elements, line breaks and section markers"
                    .to_string(),
            );
        }

        Self {
            overall: (weighted.round() as u32).min(100),
            factors,
            hints,
        }
    }
}

// ============================================================================
// Heuristic predictor
// ============================================================================

/// Default [`SuccessPredictor`] used when none is injected.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeuristicSuccessPredictor {
    compatibility: GenreCompatibility,
}

impl HeuristicSuccessPredictor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn evaluate(&self, prompt: &Prompt) -> SuccessPrediction {
        SuccessPrediction::from_factors(SuccessFactors {
            genre_compatibility: self.genre_compatibility(prompt),
            style_cohesion: style_cohesion(&prompt.style),
            length_optimality: length_optimality(&prompt.style),
            technical_correctness: technical_correctness(prompt),
        })
    }

    fn genre_compatibility(&self, prompt: &Prompt) -> u32 {
        let names = prompt.genre_names();
        if names.is_empty() {
            return NO_GENRE_SCORE;
        }
        let penalty: u32 = self
            .compatibility
            .find_conflicts(names)
            .iter()
            .map(|conflict| match conflict.severity {
                ConflictSeverity::High => 40,
                ConflictSeverity::Medium => 25,
                ConflictSeverity::Low => 10,
            })
            .sum();
        100u32.saturating_sub(penalty)
    }
}

#[async_trait]
impl SuccessPredictor for HeuristicSuccessPredictor {
    async fn predict(&self, prompt: &Prompt) -> SuccessPrediction {
        self.evaluate(prompt)
    }
}

fn style_cohesion(style: &str) -> u32 {
    let count = split_elements(style).len();
    match count {
        0 => 0,
        1 => 70,
        n if COHESIVE_ELEMENTS.contains(&n) => 100,
        n => {
            let over = (n - COHESIVE_ELEMENTS.end()) as u32;
            100u32.saturating_sub(over * 5).max(COHESION_FLOOR)
        }
    }
}

fn length_optimality(style: &str) -> u32 {
    let length = char_len(style.trim());
    let over = length.saturating_sub(MAX_STYLE_LENGTH);
    100u32.saturating_sub(over.min(100) as u32)
}

fn technical_correctness(prompt: &Prompt) -> u32 {
    let mut defects = 0u32;

    if char_len(prompt.title.trim()) < MIN_TITLE_CHARS {
        defects += 1;
    }

    let elements = split_elements(&prompt.style);
    let mut seen = HashSet::new();
    if !elements.iter().all(|e| seen.insert(e.to_lowercase())) {
        defects += 1;
    }

    if prompt.style.contains('\n') || prompt.style.contains('\r') {
        defects += 1;
    }

    if let Some(lyrics) = &prompt.lyrics {
        if !section_markers_balanced(lyrics) {
            defects += 1;
        }
    }

    100u32.saturating_sub(defects * DEFECT_PENALTY)
}

/// `[Verse]`-style markers must open before they close and never nest.
fn section_markers_balanced(lyrics: &str) -> bool {
    let mut open = false;
    for ch in lyrics.chars() {
        match ch {
            '[' if open => return false,
            '[' => open = true,
            ']' if !open => return false,
            ']' => open = false,
            _ => {}
        }
    }
    !open
}

#[cfg(test)]
mod tests {
    use super::*;
    use songsmith_core::Genre;

    fn prompt(style: &str) -> Prompt {
        Prompt::new("Night Drive", style)
    }

    #[test]
    fn test_clean_prompt_scores_full() {
        let p = prompt("Synthwave, neon, driving bass")
            .with_genre(Genre::new(&["Electronic"]).unwrap());
        let prediction = HeuristicSuccessPredictor::new().evaluate(&p);
        assert_eq!(prediction.overall, 100);
        assert!(prediction.hints.is_empty());
    }

    #[test]
    fn test_no_genre_factor() {
        let prediction = HeuristicSuccessPredictor::new().evaluate(&prompt("a, b"));
        assert_eq!(prediction.factors.genre_compatibility, 60);
        // 0.3 * 60 + 0.25 * 100 + 0.25 * 100 + 0.2 * 100
        assert_eq!(prediction.overall, 88);
        assert_eq!(prediction.hints.len(), 1);
    }

    #[test]
    fn test_conflicting_genres() {
        let genre = Genre::new(&["Classical", "Death Metal", "Ambient"]).unwrap();
        let p = prompt("a, b").with_genre(genre);
        // Classical/Death Metal high, Death Metal/Ambient high
        let prediction = HeuristicSuccessPredictor::new().evaluate(&p);
        assert_eq!(prediction.factors.genre_compatibility, 20);
    }

    #[test]
    fn test_style_cohesion_curve() {
        assert_eq!(style_cohesion(""), 0);
        assert_eq!(style_cohesion("solo"), 70);
        assert_eq!(style_cohesion("a, b, c, d, e, f, g, h"), 100);
        assert_eq!(style_cohesion("a, b, c, d, e, f, g, h, i, j"), 90);
        let many = vec!["x"; 30].join(", ");
        assert_eq!(style_cohesion(&many), 40);
    }

    #[test]
    fn test_length_optimality() {
        assert_eq!(length_optimality(&"a".repeat(120)), 100);
        assert_eq!(length_optimality(&"a".repeat(150)), 70);
        assert_eq!(length_optimality(&"a".repeat(400)), 0);
    }

    #[test]
    fn test_technical_defects() {
        let p = Prompt::new("X", "Rock, rock,\nPop").with_lyrics("[Verse\nhello");
        assert_eq!(technical_correctness(&p), 100 - 4 * 20);
    }

    #[test]
    fn test_section_markers() {
        assert!(section_markers_balanced("[Verse]\nla la\n[Chorus]\nhey"));
        assert!(!section_markers_balanced("]Verse["));
        assert!(!section_markers_balanced("[[Verse]]"));
        assert!(section_markers_balanced("no markers"));
    }
}
