//! Collaborator traits for the pipeline
//!
//! Every collaborator except the store has a built-in implementation; the
//! pipeline uses it unless another is injected. Only the store can fail.

use async_trait::async_trait;

use songsmith_core::{GenreCompatibility, GenreConflict};

use crate::error::StoreError;
use crate::optimizer::StyleOptimization;
use crate::predictor::SuccessPrediction;
use crate::prompt::Prompt;

/// Persistence for optimized prompts.
#[async_trait]
pub trait PromptStore: Send + Sync {
    async fn save(&self, prompt: &Prompt) -> Result<(), StoreError>;
}

/// Shrinks a style text toward a target length.
#[async_trait]
pub trait StyleOptimizer: Send + Sync {
    async fn optimize(&self, style: &str, target_length: usize) -> StyleOptimization;
}

/// Finds clashing genre pairs.
#[async_trait]
pub trait ConflictDetector: Send + Sync {
    async fn detect(&self, genres: &[String]) -> Vec<GenreConflict>;
}

/// Estimates how likely a prompt is to generate well.
#[async_trait]
pub trait SuccessPredictor: Send + Sync {
    async fn predict(&self, prompt: &Prompt) -> SuccessPrediction;
}

/// [`ConflictDetector`] backed by the static compatibility table.
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticConflictDetector {
    table: GenreCompatibility,
}

impl StaticConflictDetector {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ConflictDetector for StaticConflictDetector {
    async fn detect(&self, genres: &[String]) -> Vec<GenreConflict> {
        self.table.find_conflicts(genres)
    }
}
