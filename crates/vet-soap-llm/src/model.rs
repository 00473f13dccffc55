//! Completion interface.

use crate::error::GenerationResult;

/// A loaded model that can continue a text prompt.
///
/// Implementations are loaded once and then only read; `complete` blocks until
/// the model finishes or fails.
pub trait CompletionModel {
    /// Identifier of the loaded model.
    fn model_name(&self) -> &str;

    /// Generate at most `max_tokens` tokens continuing `prompt`.
    fn complete(&self, prompt: &str, max_tokens: u32) -> GenerationResult<String>;
}
