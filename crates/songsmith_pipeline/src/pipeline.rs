//! Prompt optimization pipeline
//!
//! Runs strictly in sequence, each step feeding the next:
//!
//! 1. Validate the request (the only step that can reject input)
//! 2. Detect genre conflicts
//! 3. Shrink the style toward the target length
//! 4. Structural checks on genres and style
//! 5. Build the optimized prompt
//! 6. Predict success
//! 7. Score the optimization
//! 8. Persist the optimized prompt (failures propagate, no retry)
//!
//! Compliance and quality diagnostics for the optimized prompt ride along in
//! the outcome without affecting the optimization score.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use tracing::{debug, info, warn};

use songsmith_compliance::{ComplianceEngine, ComplianceReport};
use songsmith_core::style::split_elements;
use songsmith_core::{char_len, QualityScore, QualityScorer, MAX_STYLE_LENGTH};

use crate::error::{InputValidationError, PipelineError};
use crate::optimizer::{BuiltinStyleOptimizer, OptimizationAction};
use crate::ports::{
    ConflictDetector, PromptStore, StaticConflictDetector, StyleOptimizer, SuccessPredictor,
};
use crate::predictor::{HeuristicSuccessPredictor, SuccessPrediction};
use crate::prompt::{Prompt, PromptId};

pub const MIN_TARGET_LENGTH: usize = 20;
pub const MAX_TARGET_LENGTH: usize = 500;
pub const DEFAULT_TARGET_LENGTH: usize = MAX_STYLE_LENGTH;

const MAX_RECOMMENDED_GENRES: usize = 3;
const MAX_RECOMMENDED_ELEMENTS: usize = 15;

/// Style terms that hint at imitating protected material.
const RIGHTS_SENSITIVE_TERMS: &[&str] = &[
    "in the style of",
    "cover of",
    "remix of",
    "sample of",
    "soundtrack from",
    "featuring",
    "feat.",
    "copyright",
];

// Quality scoring
const BASE_QUALITY: f64 = 100.0;
const REDUCTION_BONUS: f64 = 20.0;
const DEEP_REDUCTION_BONUS: f64 = 10.0;
const ACTION_BONUS: f64 = 10.0;
const PREDICTION_WEIGHT: f64 = 30.0;
const WARNING_PENALTY: f64 = 5.0;
const MAX_WARNING_PENALTY: f64 = 30.0;

// ============================================================================
// Mode and request
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OptimizationMode {
    #[default]
    Suno,
    General,
    Creative,
}

impl OptimizationMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            OptimizationMode::Suno => "suno",
            OptimizationMode::General => "general",
            OptimizationMode::Creative => "creative",
        }
    }
}

impl fmt::Display for OptimizationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for OptimizationMode {
    type Err = InputValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "suno" => Ok(OptimizationMode::Suno),
            "general" => Ok(OptimizationMode::General),
            "creative" => Ok(OptimizationMode::Creative),
            _ => Err(InputValidationError::UnknownMode(s.to_string())),
        }
    }
}

/// One optimization run's input. `mode` stays text until validation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptimizationRequest {
    #[serde(default)]
    pub prompt: Option<Prompt>,
    #[serde(default = "default_target_length")]
    pub target_length: usize,
    #[serde(default = "default_mode")]
    pub mode: String,
}

fn default_target_length() -> usize {
    DEFAULT_TARGET_LENGTH
}

fn default_mode() -> String {
    OptimizationMode::default().as_str().to_string()
}

impl OptimizationRequest {
    pub fn new(prompt: Prompt) -> Self {
        Self {
            prompt: Some(prompt),
            target_length: DEFAULT_TARGET_LENGTH,
            mode: default_mode(),
        }
    }

    pub fn with_target_length(mut self, target_length: usize) -> Self {
        self.target_length = target_length;
        self
    }

    pub fn with_mode(mut self, mode: impl Into<String>) -> Self {
        self.mode = mode.into();
        self
    }

    /// Check the request, returning the prompt and parsed mode.
    pub fn validate(&self) -> Result<(&Prompt, OptimizationMode), InputValidationError> {
        let prompt = self
            .prompt
            .as_ref()
            .ok_or(InputValidationError::MissingPrompt)?;
        if !(MIN_TARGET_LENGTH..=MAX_TARGET_LENGTH).contains(&self.target_length) {
            return Err(InputValidationError::TargetLengthOutOfRange {
                value: self.target_length,
                min: MIN_TARGET_LENGTH,
                max: MAX_TARGET_LENGTH,
            });
        }
        let mode = self.mode.parse()?;
        Ok((prompt, mode))
    }
}

// ============================================================================
// Outcome
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptimizationOutcome {
    pub original_id: PromptId,
    pub mode: OptimizationMode,
    pub optimized_prompt: Prompt,
    pub original_length: usize,
    pub optimized_length: usize,
    pub compression_ratio: f64,
    pub optimizations: Vec<OptimizationAction>,
    pub warnings: Vec<String>,
    pub quality_score: u32,
    pub suggestions: Vec<String>,
    pub prediction: SuccessPrediction,
    pub prompt_quality: QualityScore,
    pub compliance: ComplianceReport,
}

// ============================================================================
// Pipeline
// ============================================================================

/// Orchestrates one optimization per call.
pub struct OptimizationPipeline {
    store: Arc<dyn PromptStore>,
    optimizer: Arc<dyn StyleOptimizer>,
    detector: Arc<dyn ConflictDetector>,
    predictor: Arc<dyn SuccessPredictor>,
    compliance: ComplianceEngine,
    scorer: QualityScorer,
}

impl OptimizationPipeline {
    /// Pipeline with built-in collaborators around the given store.
    pub fn new(store: Arc<dyn PromptStore>) -> Self {
        Self {
            store,
            optimizer: Arc::new(BuiltinStyleOptimizer::new()),
            detector: Arc::new(StaticConflictDetector::new()),
            predictor: Arc::new(HeuristicSuccessPredictor::new()),
            compliance: ComplianceEngine::new(),
            scorer: QualityScorer::new(),
        }
    }

    pub fn with_optimizer(mut self, optimizer: Arc<dyn StyleOptimizer>) -> Self {
        self.optimizer = optimizer;
        self
    }

    pub fn with_conflict_detector(mut self, detector: Arc<dyn ConflictDetector>) -> Self {
        self.detector = detector;
        self
    }

    pub fn with_predictor(mut self, predictor: Arc<dyn SuccessPredictor>) -> Self {
        self.predictor = predictor;
        self
    }

    pub fn with_compliance_engine(mut self, engine: ComplianceEngine) -> Self {
        self.compliance = engine;
        self
    }

    pub fn compliance_engine(&self) -> &ComplianceEngine {
        &self.compliance
    }

    pub async fn run(
        &self,
        request: &OptimizationRequest,
    ) -> Result<OptimizationOutcome, PipelineError> {
        let (prompt, mode) = request.validate()?;
        let target_length = request.target_length;
        info!(
            prompt = %prompt.id,
            target_length,
            mode = %mode,
            "Optimizing prompt"
        );

        let mut warnings = Vec::new();
        let mut suggestions = Vec::new();

        // Genre conflicts
        for conflict in self.detector.detect(prompt.genre_names()).await {
            warnings.push(format!(
                "Genre conflict ({}): {} + {}: {}",
                conflict.severity, conflict.genres.0, conflict.genres.1, conflict.reason
            ));
            suggestions.push(conflict.suggestion);
        }

        // Style shrinking
        let shrunk = self.optimizer.optimize(&prompt.style, target_length).await;
        debug!(
            actions = shrunk.actions.len(),
            length = char_len(&shrunk.style),
            "Style shrink finished"
        );

        // Structural checks
        warnings.extend(structural_warnings(prompt, &shrunk.style));
        if mode == OptimizationMode::Suno && target_length > MAX_STYLE_LENGTH {
            suggestions.push(format!(
                "Keep the style within {} characters; longer text is cut by the service",
                MAX_STYLE_LENGTH
            ));
        }
        for warning in &warnings {
            warn!(prompt = %prompt.id, "{}", warning);
        }

        let optimized = prompt.derive_with_style(shrunk.style);

        let prediction = self.predictor.predict(&optimized).await;
        suggestions.extend(prediction.hints.iter().cloned());
        if !optimized.language.quality().is_well_supported() {
            suggestions.extend(
                optimized
                    .language
                    .optimization_hints()
                    .iter()
                    .map(|hint| hint.to_string()),
            );
        }

        let original_length = char_len(&prompt.style);
        let optimized_length = char_len(&optimized.style);
        let quality_score = optimization_quality(
            original_length,
            optimized_length,
            !shrunk.actions.is_empty(),
            prediction.overall,
            warnings.len(),
        );

        let prompt_quality = self.scorer.compute(
            optimized.genre.as_ref(),
            &optimized.style,
            &optimized.language,
            &optimized.title,
            &optimized.description,
            &optimized.tags,
        );
        let compliance = self.compliance.check(&optimized.compliance_input());

        self.store.save(&optimized).await?;

        info!(
            prompt = %prompt.id,
            optimized = %optimized.id,
            original_length,
            optimized_length,
            quality_score,
            "Prompt optimized"
        );

        Ok(OptimizationOutcome {
            original_id: prompt.id,
            mode,
            optimized_prompt: optimized,
            original_length,
            optimized_length,
            compression_ratio: compression_ratio(original_length, optimized_length),
            optimizations: shrunk.actions,
            warnings,
            quality_score,
            suggestions,
            prediction,
            prompt_quality,
            compliance,
        })
    }
}

fn structural_warnings(prompt: &Prompt, style: &str) -> Vec<String> {
    let mut warnings = Vec::new();

    let genre_count = prompt.genre_names().len();
    if genre_count > MAX_RECOMMENDED_GENRES {
        warnings.push(format!(
            "{} genres selected; more than {} tends to blur the result",
            genre_count, MAX_RECOMMENDED_GENRES
        ));
    }

    let element_count = split_elements(style).len();
    if element_count > MAX_RECOMMENDED_ELEMENTS {
        warnings.push(format!(
            "Style has {} elements; keep it to {} or fewer",
            element_count, MAX_RECOMMENDED_ELEMENTS
        ));
    }

    let lowered = style.to_lowercase();
    for term in RIGHTS_SENSITIVE_TERMS {
        if lowered.contains(term) {
            warnings.push(format!("Style contains rights-sensitive term \"{}\"", term));
        }
    }

    warnings
}

/// Optimized over original length; 1 when the original was empty.
pub fn compression_ratio(original_length: usize, optimized_length: usize) -> f64 {
    if original_length == 0 {
        1.0
    } else {
        optimized_length as f64 / original_length as f64
    }
}

/// Optimization quality, 0-100.
pub fn optimization_quality(
    original_length: usize,
    optimized_length: usize,
    any_actions: bool,
    predicted_success: u32,
    warning_count: usize,
) -> u32 {
    let mut score = BASE_QUALITY;

    if original_length > 0 {
        let reduction =
            original_length.saturating_sub(optimized_length) as f64 / original_length as f64;
        if reduction >= 0.1 {
            score += REDUCTION_BONUS;
        }
        if reduction >= 0.2 {
            score += DEEP_REDUCTION_BONUS;
        }
    }
    if any_actions {
        score += ACTION_BONUS;
    }
    score += PREDICTION_WEIGHT * predicted_success as f64 / 100.0;
    score -= (WARNING_PENALTY * warning_count as f64).min(MAX_WARNING_PENALTY);

    score.max(0.0).round().min(100.0) as u32
}
