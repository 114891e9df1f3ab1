//! Songsmith prompt optimization
//!
//! Shrinks a prompt's style toward a target length, checks genres and
//! structure, predicts success and persists the result through a
//! [`PromptStore`].
//!
//! ```ignore
//! let store = Arc::new(MemoryPromptStore::new());
//! let pipeline = OptimizationPipeline::new(store);
//! let outcome = pipeline
//!     .run(&OptimizationRequest::new(prompt).with_target_length(60))
//!     .await?;
//! ```

pub mod error;
pub mod optimizer;
pub mod pipeline;
pub mod ports;
pub mod predictor;
pub mod prompt;
pub mod store;

pub use error::{InputValidationError, PipelineError, StoreError};
pub use optimizer::{ActionType, BuiltinStyleOptimizer, OptimizationAction, StyleOptimization};
pub use pipeline::{
    OptimizationMode, OptimizationOutcome, OptimizationPipeline, OptimizationRequest,
    DEFAULT_TARGET_LENGTH, MAX_TARGET_LENGTH, MIN_TARGET_LENGTH,
};
pub use ports::{
    ConflictDetector, PromptStore, StaticConflictDetector, StyleOptimizer, SuccessPredictor,
};
pub use predictor::{HeuristicSuccessPredictor, SuccessFactors, SuccessPrediction};
pub use prompt::{Prompt, PromptId};
pub use store::{JsonFilePromptStore, MemoryPromptStore};
