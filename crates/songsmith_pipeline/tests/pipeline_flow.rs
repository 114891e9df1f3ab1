//! End-to-end pipeline runs against in-memory and failing stores.

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use songsmith_compliance::ComplianceLevel;
use songsmith_core::{ConflictSeverity, Genre, GenreConflict};
use songsmith_pipeline::{
    ActionType, ConflictDetector, InputValidationError, JsonFilePromptStore, MemoryPromptStore,
    OptimizationRequest, OptimizationPipeline, PipelineError, Prompt, PromptStore, StoreError,
    StyleOptimization, StyleOptimizer,
};

struct FailingStore {
    attempts: AtomicUsize,
}

#[async_trait]
impl PromptStore for FailingStore {
    async fn save(&self, prompt: &Prompt) -> Result<(), StoreError> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        Err(StoreError::Save {
            id: prompt.id,
            source: anyhow::anyhow!("disk full"),
        })
    }
}

struct UppercaseOptimizer;

#[async_trait]
impl StyleOptimizer for UppercaseOptimizer {
    async fn optimize(&self, style: &str, _target_length: usize) -> StyleOptimization {
        StyleOptimization {
            style: style.to_uppercase(),
            actions: Vec::new(),
        }
    }
}

struct AlwaysClash;

#[async_trait]
impl ConflictDetector for AlwaysClash {
    async fn detect(&self, _genres: &[String]) -> Vec<GenreConflict> {
        vec![GenreConflict {
            genres: ("A".to_string(), "B".to_string()),
            severity: ConflictSeverity::Low,
            reason: "test".to_string(),
            suggestion: "pick one".to_string(),
        }]
    }
}

fn memory_pipeline() -> (Arc<MemoryPromptStore>, OptimizationPipeline) {
    let store = Arc::new(MemoryPromptStore::new());
    let pipeline = OptimizationPipeline::new(store.clone());
    (store, pipeline)
}

#[tokio::test]
async fn test_end_to_end_shrink() {
    let (store, pipeline) = memory_pipeline();
    let prompt = Prompt::new("Power Up", "Rock, rock, very energetic, really powerful")
        .with_genre(Genre::new(&["Rock"]).unwrap());

    let outcome = pipeline
        .run(&OptimizationRequest::new(prompt).with_target_length(30))
        .await
        .unwrap();

    let style = &outcome.optimized_prompt.style;
    assert_eq!(style, "Rock, energetic, powerful");
    assert!(outcome.optimized_length <= 30);
    assert_eq!(outcome.original_length, 43);
    assert!(outcome.compression_ratio < 1.0);
    let kinds: Vec<_> = outcome.optimizations.iter().map(|a| a.action_type).collect();
    assert_eq!(kinds, vec![ActionType::Merged, ActionType::Removed]);
    assert!(outcome.warnings.is_empty());
    assert!(outcome.quality_score <= 100);

    let saved = store.get(&outcome.optimized_prompt.id).await.unwrap();
    assert_eq!(saved.style, *style);
}

#[tokio::test]
async fn test_style_within_target_is_untouched() {
    let (_store, pipeline) = memory_pipeline();
    let prompt = Prompt::new("Night Drive", "Synthwave, neon, driving bass");

    let outcome = pipeline.run(&OptimizationRequest::new(prompt.clone())).await.unwrap();

    assert_eq!(outcome.compression_ratio, 1.0);
    assert!(outcome.optimizations.is_empty());
    assert_eq!(outcome.optimized_prompt.style, prompt.style);
    assert_eq!(outcome.original_id, prompt.id);
}

#[tokio::test]
async fn test_target_length_bounds() {
    let (store, pipeline) = memory_pipeline();
    let prompt = Prompt::new("Night Drive", "Synthwave");

    let err = pipeline
        .run(&OptimizationRequest::new(prompt.clone()).with_target_length(10))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        PipelineError::Validation(InputValidationError::TargetLengthOutOfRange { value: 10, .. })
    ));
    assert!(store.is_empty().await);

    for target in [20, 500] {
        pipeline
            .run(&OptimizationRequest::new(prompt.clone()).with_target_length(target))
            .await
            .unwrap();
    }
    assert_eq!(store.len().await, 2);
}

#[tokio::test]
async fn test_synonyms_fit_without_truncation() {
    let (_store, pipeline) = memory_pipeline();
    let prompt = Prompt::new("Drift", "atmospheric synthesizer, progressive");

    let outcome = pipeline
        .run(&OptimizationRequest::new(prompt).with_target_length(30))
        .await
        .unwrap();

    assert_eq!(outcome.optimized_prompt.style, "atmospheric synth, progressive");
    assert_eq!(outcome.optimized_length, 30);
    let kinds: Vec<_> = outcome.optimizations.iter().map(|a| a.action_type).collect();
    assert_eq!(kinds, vec![ActionType::Shortened]);
    assert!(!outcome.optimized_prompt.style.ends_with("..."));
}

#[tokio::test]
async fn test_mode_does_not_change_warnings_or_score() {
    let (_store, pipeline) = memory_pipeline();
    let prompt = Prompt::new("Night Drive", "Synthwave, neon, driving bass");

    let suno = pipeline
        .run(&OptimizationRequest::new(prompt.clone()).with_target_length(500))
        .await
        .unwrap();
    let general = pipeline
        .run(
            &OptimizationRequest::new(prompt)
                .with_target_length(500)
                .with_mode("general"),
        )
        .await
        .unwrap();

    assert!(suno.warnings.is_empty());
    assert_eq!(suno.warnings, general.warnings);
    assert_eq!(suno.quality_score, general.quality_score);
    assert!(suno.suggestions.iter().any(|s| s.contains("120 characters")));
    assert!(!general.suggestions.iter().any(|s| s.contains("120 characters")));
}

#[tokio::test]
async fn test_missing_prompt_and_bad_mode() {
    let (_store, pipeline) = memory_pipeline();
    let request: OptimizationRequest = serde_json::from_str("{}").unwrap();
    assert!(matches!(
        pipeline.run(&request).await,
        Err(PipelineError::Validation(InputValidationError::MissingPrompt))
    ));

    let request = OptimizationRequest::new(Prompt::new("T", "S")).with_mode("jingle");
    assert!(matches!(
        pipeline.run(&request).await,
        Err(PipelineError::Validation(InputValidationError::UnknownMode(_)))
    ));

    let request = OptimizationRequest::new(Prompt::new("T", "S")).with_mode("General");
    assert!(pipeline.run(&request).await.is_ok());
}

#[tokio::test]
async fn test_store_failure_propagates_once() {
    let store = Arc::new(FailingStore {
        attempts: AtomicUsize::new(0),
    });
    let pipeline = OptimizationPipeline::new(store.clone());

    let err = pipeline
        .run(&OptimizationRequest::new(Prompt::new("T", "Rock")))
        .await
        .unwrap_err();
    assert!(matches!(err, PipelineError::Store(StoreError::Save { .. })));
    assert_eq!(store.attempts.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_conflicts_warn_and_suggest() {
    let (_store, pipeline) = memory_pipeline();
    let prompt = Prompt::new("Requiem", "strings, blast beats")
        .with_genre(Genre::new(&["Classical", "Death Metal"]).unwrap());

    let outcome = pipeline.run(&OptimizationRequest::new(prompt)).await.unwrap();

    assert_eq!(outcome.warnings.len(), 1);
    assert!(outcome.warnings[0].contains("high"));
    assert!(!outcome.suggestions.is_empty());
    assert_eq!(outcome.prediction.factors.genre_compatibility, 60);
}

#[tokio::test]
async fn test_injected_collaborators_are_used() {
    let store = Arc::new(MemoryPromptStore::new());
    let pipeline = OptimizationPipeline::new(store)
        .with_optimizer(Arc::new(UppercaseOptimizer))
        .with_conflict_detector(Arc::new(AlwaysClash));

    let outcome = pipeline
        .run(&OptimizationRequest::new(Prompt::new("Title", "soft piano")))
        .await
        .unwrap();

    assert_eq!(outcome.optimized_prompt.style, "SOFT PIANO");
    assert_eq!(outcome.warnings.len(), 1);
    assert_eq!(outcome.suggestions[0], "pick one");
}

#[tokio::test]
async fn test_compliance_diagnostics_attached() {
    let (_store, pipeline) = memory_pipeline();
    let prompt = Prompt::new("Tribute", "Pop like Taylor Swift, bright synths");

    let outcome = pipeline.run(&OptimizationRequest::new(prompt)).await.unwrap();

    assert_eq!(outcome.compliance.overall_level, ComplianceLevel::Unsafe);
    assert!(outcome.prompt_quality.overall() <= 100);
}

#[tokio::test]
async fn test_json_file_store_roundtrip() {
    let temp = tempfile::tempdir().unwrap();
    let store = Arc::new(JsonFilePromptStore::open(temp.path()).await.unwrap());
    let pipeline = OptimizationPipeline::new(store.clone());

    let outcome = pipeline
        .run(
            &OptimizationRequest::new(Prompt::new(
                "Slow Morning",
                "Lo-Fi, very dusty drums, really warm Rhodes, vinyl crackle, rain sounds",
            ))
            .with_target_length(40),
        )
        .await
        .unwrap();

    let loaded = store.load(&outcome.optimized_prompt.id).await.unwrap().unwrap();
    assert_eq!(loaded, outcome.optimized_prompt);
    assert!(outcome.optimized_length <= 40);
}
