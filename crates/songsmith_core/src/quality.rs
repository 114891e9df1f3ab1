//! Prompt quality scoring
//!
//! Four factors, each 0-100, combined with fixed weights:
//!
//! | Factor | Weight |
//! |--------|--------|
//! | genre clarity | 0.3 |
//! | style optimization | 0.4 |
//! | language optimization | 0.2 |
//! | completeness | 0.1 |

use serde::{Deserialize, Serialize};

use crate::char_len;
use crate::error::ConstructionError;
use crate::genre::Genre;
use crate::language::Language;
use crate::style::{split_elements, MAX_STYLE_LENGTH};

const GENRE_WEIGHT: f64 = 0.3;
const STYLE_WEIGHT: f64 = 0.4;
const LANGUAGE_WEIGHT: f64 = 0.2;
const COMPLETENESS_WEIGHT: f64 = 0.1;

const MIN_TITLE_LENGTH: usize = 5;

/// Weighted quality score of a prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QualityScore {
    genre_clarity: u32,
    style_optimization: u32,
    language_optimization: u32,
    completeness: u32,
    overall: u32,
}

impl QualityScore {
    /// Build from factor values; each must be within 0-100.
    pub fn new(
        genre_clarity: u32,
        style_optimization: u32,
        language_optimization: u32,
        completeness: u32,
    ) -> Result<Self, ConstructionError> {
        check_range("genre_clarity", genre_clarity)?;
        check_range("style_optimization", style_optimization)?;
        check_range("language_optimization", language_optimization)?;
        check_range("completeness", completeness)?;
        Ok(Self::from_factors(
            genre_clarity,
            style_optimization,
            language_optimization,
            completeness,
        ))
    }

    fn from_factors(
        genre_clarity: u32,
        style_optimization: u32,
        language_optimization: u32,
        completeness: u32,
    ) -> Self {
        let weighted = genre_clarity as f64 * GENRE_WEIGHT
            + style_optimization as f64 * STYLE_WEIGHT
            + language_optimization as f64 * LANGUAGE_WEIGHT
            + completeness as f64 * COMPLETENESS_WEIGHT;
        Self {
            genre_clarity,
            style_optimization,
            language_optimization,
            completeness,
            overall: weighted.round() as u32,
        }
    }

    pub fn genre_clarity(&self) -> u32 {
        self.genre_clarity
    }

    pub fn style_optimization(&self) -> u32 {
        self.style_optimization
    }

    pub fn language_optimization(&self) -> u32 {
        self.language_optimization
    }

    pub fn completeness(&self) -> u32 {
        self.completeness
    }

    pub fn overall(&self) -> u32 {
        self.overall
    }

    /// Letter band for display.
    pub fn grade(&self) -> char {
        match self.overall {
            90..=100 => 'A',
            75..=89 => 'B',
            60..=74 => 'C',
            _ => 'D',
        }
    }
}

fn check_range(field: &'static str, value: u32) -> Result<(), ConstructionError> {
    if value > 100 {
        return Err(ConstructionError::ScoreOutOfRange { field, value });
    }
    Ok(())
}

/// Computes [`QualityScore`]s from prompt fields.
#[derive(Debug, Clone, Copy, Default)]
pub struct QualityScorer;

impl QualityScorer {
    pub fn new() -> Self {
        Self
    }

    pub fn compute(
        &self,
        genre: Option<&Genre>,
        style: &str,
        language: &Language,
        title: &str,
        description: &str,
        tags: &[String],
    ) -> QualityScore {
        let genre_clarity = if genre.is_some() { 100 } else { 0 };

        let element_count = split_elements(style).len();
        let mut style_optimization = 50;
        if (2..=6).contains(&element_count) {
            style_optimization += 30;
        }
        if char_len(style.trim()) <= MAX_STYLE_LENGTH {
            style_optimization += 20;
        }
        let style_optimization = style_optimization.min(100);

        let language_optimization = if language.quality().is_well_supported() {
            100
        } else {
            60
        };

        let mut completeness = 40;
        if !description.trim().is_empty() {
            completeness += 20;
        }
        if !tags.is_empty() {
            completeness += 20;
        }
        if char_len(title.trim()) >= MIN_TITLE_LENGTH {
            completeness += 20;
        }

        // Every factor above is bounded by construction.
        QualityScore::from_factors(
            genre_clarity,
            style_optimization,
            language_optimization,
            completeness,
        )
    }
}
