//! Songsmith Core - value objects and scoring for generation prompts
//!
//! Everything in this crate is deterministic and synchronous. No keyword,
//! table or weight here is learned; the analysis is plain matching over
//! short strings.
//!
//! # Components
//!
//! - [`StyleDescriptor`]: a comma-delimited tag string bounded by
//!   [`MAX_STYLE_LENGTH`], with classification and budget fitting
//! - [`Genre`] / [`Language`]: validated vocabulary values
//! - [`GenreCompatibility`]: static table of genre pairs that clash
//! - [`QualityScorer`]: weighted composite of four 0-100 factors

pub mod compatibility;
pub mod error;
pub mod genre;
pub mod language;
pub mod quality;
pub mod style;

pub use compatibility::{ConflictSeverity, GenreCompatibility, GenreConflict};
pub use error::ConstructionError;
pub use genre::{Genre, GENRE_VOCABULARY, MAX_GENRES};
pub use language::{Language, LanguageQuality};
pub use quality::{QualityScore, QualityScorer};
pub use style::{
    StyleCategory, StyleClassification, StyleDescriptor, StyleIssue, StyleStats, MAX_STYLE_LENGTH,
};

/// Length of a string in characters, the unit every budget in Songsmith uses.
pub fn char_len(s: &str) -> usize {
    s.chars().count()
}
