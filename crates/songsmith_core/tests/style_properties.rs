//! Property tests for budget fitting and quality scoring.
//!
//! Styles are built from a mix of realistic elements, separators and
//! arbitrary text so every fitting step gets exercised.

use proptest::prelude::*;
use songsmith_core::{
    char_len, Genre, Language, QualityScorer, StyleDescriptor, GENRE_VOCABULARY, MAX_STYLE_LENGTH,
};

const WORDS: &[&str] = &[
    "Rock",
    "rock",
    "Jazz",
    "piano",
    "dreamy",
    "very",
    "Synthwave",
    "analog drift",
    "808",
    "",
    "  ",
    "Death Metal",
    "ünïcödé chant",
    concat!(
        "a-very-long-element-without-any-separators-that-keeps-going-",
        "and-going-well-past-the-budget-of-one-hundred-and-twenty-characters",
    ),
];

const SEPARATORS: &[&str] = &[",", ", ", " , "];

const LANGUAGE_CODES: &[&str] = &[
    "en", "ja", "ko", "zh", "es", "fr", "de", "pt", "it", "ru", "hi", "ar",
];

/// Comma-joined styles drawn from `WORDS`, free text, or both.
fn style_strategy() -> impl Strategy<Value = String> {
    let element = prop_oneof![
        3 => prop::sample::select(WORDS).prop_map(str::to_string),
        1 => "[a-zA-Z0-9 ]{0,40}",
    ];
    let joined = (
        prop::collection::vec(element, 1..30),
        prop::sample::select(SEPARATORS),
    )
        .prop_map(|(elements, separator)| elements.join(separator));
    prop_oneof![3 => joined, 1 => ".{0,300}"]
}

fn genre_strategy() -> impl Strategy<Value = Option<Genre>> {
    prop::option::of(
        prop::sample::subsequence(GENRE_VOCABULARY, 1..=3)
            .prop_map(|names| Genre::new(&names).expect("vocabulary subset is valid")),
    )
}

proptest! {
    #![proptest_config(ProptestConfig { cases: 512, max_global_rejects: 8192, ..ProptestConfig::default() })]

    /// Text already inside the budget comes back trimmed and otherwise untouched.
    #[test]
    fn test_short_inputs_are_unchanged(input in style_strategy()) {
        let trimmed = input.trim();
        prop_assume!(!trimmed.is_empty() && char_len(trimmed) <= MAX_STYLE_LENGTH);

        let out = StyleDescriptor::optimized(&input).unwrap();
        prop_assert_eq!(out.as_str(), trimmed);
    }

    #[test]
    fn test_output_always_fits_and_is_non_empty(input in style_strategy()) {
        match StyleDescriptor::optimized(&input) {
            Ok(out) => {
                prop_assert!(out.len() <= MAX_STYLE_LENGTH, "too long: {:?}", out.as_str());
                prop_assert!(!out.as_str().trim().is_empty());
            }
            Err(_) => prop_assert!(input.trim().is_empty()),
        }
    }

    #[test]
    fn test_optimization_is_idempotent(input in style_strategy()) {
        if let Ok(once) = StyleDescriptor::optimized(&input) {
            let twice = StyleDescriptor::optimized(once.as_str()).unwrap();
            prop_assert_eq!(once, twice);
        }
    }

    #[test]
    fn test_quality_overall_bounded(
        genre in genre_strategy(),
        style in style_strategy(),
        code in prop::sample::select(LANGUAGE_CODES),
        title in ".{0,60}",
        description in ".{0,200}",
        tags in prop::collection::vec("[a-z]{1,12}", 0..8),
    ) {
        let language = Language::from_code(code).unwrap();
        let score = QualityScorer::new().compute(
            genre.as_ref(),
            &style,
            &language,
            &title,
            &description,
            &tags,
        );

        prop_assert!(score.overall() <= 100, "overall {} out of range", score.overall());
        for part in [
            score.genre_clarity(),
            score.style_optimization(),
            score.language_optimization(),
            score.completeness(),
        ] {
            prop_assert!(part <= 100);
        }
    }
}

#[test]
fn test_deduplicate_example() {
    let d = StyleDescriptor::new("Rock, Rock, energetic").unwrap();
    assert_eq!(d.deduplicate().as_str(), "Rock, energetic");
}
