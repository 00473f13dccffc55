//! Generation errors.

use thiserror::Error;

/// Anything that stops the model from returning a note.
///
/// Callers treat every variant the same way: show the message, no retry.
#[derive(Error, Debug)]
pub enum GenerationFailure {
    #[error("Model file not found: {0}")]
    ModelNotFound(String),

    #[error("Failed to load model: {0}")]
    ModelLoad(String),

    #[error("LLM inference error: {0}")]
    Inference(String),

    #[error("Completion server returned {status}: {message}")]
    Server { status: u16, message: String },

    #[error("Completion server unreachable: {0}")]
    Transport(String),

    #[error("Invalid completion response: {0}")]
    InvalidResponse(String),

    #[error(
        "Local inference is not available because the `llm` feature is disabled (model: {0})"
    )]
    FeatureDisabled(String),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

pub type GenerationResult<T> = Result<T, GenerationFailure>;
