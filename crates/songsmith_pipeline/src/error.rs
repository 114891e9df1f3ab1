use thiserror::Error;

use crate::prompt::PromptId;

/// Request rejected before any work is done.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InputValidationError {
    #[error("no prompt supplied")]
    MissingPrompt,
    #[error("target length {value} is outside {min}..={max}")]
    TargetLengthOutOfRange { value: usize, min: usize, max: usize },
    #[error("unknown optimization mode '{0}' (expected suno, general or creative)")]
    UnknownMode(String),
}

/// Persistence failure reported by a [`crate::PromptStore`].
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("failed to save prompt {id}")]
    Save {
        id: PromptId,
        #[source]
        source: anyhow::Error,
    },
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("invalid optimization request: {0}")]
    Validation(#[from] InputValidationError),
    #[error("prompt persistence failed: {0}")]
    Store(#[from] StoreError),
}
