//! Engine-level behaviour over the public API.

use proptest::prelude::*;
use songsmith_compliance::{
    ComplianceConfig, ComplianceEngine, ComplianceInput, ComplianceLevel, RuleCategory,
};

const FILLER: &[&str] = &[
    "",
    "warm analog synths and a slow build",
    "Quiet Storm",
    "chorus repeats twice, bridge in a minor key",
];

#[test]
fn test_zero_matches_is_all_clear() {
    let engine = ComplianceEngine::new();
    for text in FILLER {
        let report = engine.check(&ComplianceInput::new().with_prompt(*text));
        assert_eq!(report.overall_level, ComplianceLevel::Safe);
        assert_eq!(report.score, 100);
        assert_eq!(report.recommendations.len(), 2);
    }
}

#[test]
fn test_unsafe_keyword_dominates() {
    let engine = ComplianceEngine::new();
    for text in FILLER {
        let input = ComplianceInput::new()
            .with_title("Anthem")
            .with_prompt(*text)
            .with_lyrics("a massacre in the night")
            .with_tags(vec!["nike".to_string(), "exotic".to_string()]);
        let report = engine.check(&input);
        assert_eq!(report.overall_level, ComplianceLevel::Unsafe);
        assert!(report.score < 100);
        assert!(report.recommendations[0].starts_with("Urgent"));
    }
}

#[test]
fn test_score_monotonic_in_warnings() {
    let engine = ComplianceEngine::new();
    let warnings = ["nike", "disney", "marvel", "netflix", "spotify", "pokemon"];
    let mut text = String::from("upbeat pop");
    let mut previous = engine.check(&ComplianceInput::new().with_prompt(&text)).score;
    for keyword in warnings {
        text.push(' ');
        text.push_str(keyword);
        let score = engine.check(&ComplianceInput::new().with_prompt(&text)).score;
        assert!(score <= previous);
        previous = score;
    }
    assert_eq!(previous, 0);
}

#[test]
fn test_repeated_keyword_counts_once() {
    let engine = ComplianceEngine::new();
    let report = engine.check(&ComplianceInput::new().with_prompt("nike nike NIKE"));
    assert_eq!(report.issues.len(), 1);
    assert_eq!(report.score, 80);
}

#[test]
fn test_every_pattern_match_reported() {
    let engine = ComplianceEngine::new();
    let report = engine.check(
        &ComplianceInput::new().with_lyrics("call 555-123-4567 or 555.987.6543 tonight"),
    );
    let phones: Vec<_> = report
        .issues
        .iter()
        .filter(|i| i.rule_id == "privacy-phone")
        .collect();
    assert_eq!(phones.len(), 2);
    assert_eq!(report.categories(), vec![RuleCategory::Privacy]);
}

#[test]
fn test_strict_mode_from_toml_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("compliance.toml");
    std::fs::write(
        &path,
        r#"
        strict_mode = true

        [[custom_rules]]
        id = "studio"
        name = "Studio name"
        category = "trademark"
        severity = "caution"
        matcher = { keywords = ["abbey road"] }
        "#,
    )
    .unwrap();

    let engine = ComplianceEngine::with_config(ComplianceConfig::load(&path).unwrap());
    let report = engine.check(&ComplianceInput::new().with_description("Recorded at Abbey Road"));
    assert_eq!(report.issues.len(), 1);
    assert!(report.strict_mode);
    assert_eq!(report.score, 100 - 10 - 5);
}

#[test]
fn test_resolving_every_issue_restores_full_score() {
    let engine = ComplianceEngine::new();
    let mut report = engine.check(
        &ComplianceInput::new()
            .with_prompt("sponsored jingle for netflix")
            .with_tags(vec!["tribal".to_string()]),
    );
    assert!(!report.issues.is_empty());
    while let Some(issue) = report.issues.first() {
        report = report.resolve_issue(issue.id);
    }
    assert_eq!(report.score, 100);
    assert!(report.is_safe());
}

const WARNING_KEYWORDS: &[&str] = &[
    "nike",
    "disney",
    "marvel",
    "netflix",
    "spotify",
    "pokemon",
    "coca-cola",
];

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    /// Appending warning keywords to any text never raises the score.
    #[test]
    fn test_score_never_rises_with_more_warnings(
        base in "[a-z ]{0,80}",
        keywords in prop::sample::subsequence(WARNING_KEYWORDS, 0..=WARNING_KEYWORDS.len())
            .prop_shuffle(),
    ) {
        let engine = ComplianceEngine::new();
        let mut text = base;
        let mut previous = engine.check(&ComplianceInput::new().with_prompt(&text)).score;
        prop_assert!(previous <= 100);

        for keyword in keywords {
            text.push(' ');
            text.push_str(keyword);
            let score = engine.check(&ComplianceInput::new().with_prompt(&text)).score;
            prop_assert!(score <= previous, "{} rose to {} after {:?}", previous, score, keyword);
            previous = score;
        }
    }

    #[test]
    fn test_strict_mode_never_scores_higher(text in "[a-z ]{0,40}( nike| marvel| explicit){0,4}") {
        let relaxed = ComplianceEngine::new();
        let strict = ComplianceEngine::with_config(ComplianceConfig {
            strict_mode: true,
            ..ComplianceConfig::default()
        });
        let input = ComplianceInput::new().with_prompt(&text);

        prop_assert!(strict.check(&input).score <= relaxed.check(&input).score);
    }
}
