//! Scripted model for tests and the offline `mock` backend.

use std::cell::{Cell, RefCell};

use crate::error::{GenerationFailure, GenerationResult};
use crate::model::CompletionModel;

/// Reply of the `mock` backend.
pub const DEMO_NOTE: &str = "S (Subjective):
N/A

O (Objective):
N/A

A (Assessment):
N/A

P (Plan):
N/A
";

/// Returns a fixed reply (or failure) and records every call.
pub struct ScriptedModel {
    reply: Result<String, String>,
    calls: Cell<usize>,
    last_prompt: RefCell<Option<String>>,
    last_max_tokens: Cell<Option<u32>>,
}

impl ScriptedModel {
    /// Model that always answers with `text`.
    pub fn replying(text: impl Into<String>) -> Self {
        Self::with_reply(Ok(text.into()))
    }

    /// Model answering every prompt with [`DEMO_NOTE`].
    pub fn demo() -> Self {
        Self::replying(DEMO_NOTE)
    }

    /// Model whose every call fails with an inference error.
    pub fn failing(reason: impl Into<String>) -> Self {
        Self::with_reply(Err(reason.into()))
    }

    fn with_reply(reply: Result<String, String>) -> Self {
        Self {
            reply,
            calls: Cell::new(0),
            last_prompt: RefCell::new(None),
            last_max_tokens: Cell::new(None),
        }
    }

    /// Number of `complete` calls so far.
    pub fn calls(&self) -> usize {
        self.calls.get()
    }

    pub fn last_prompt(&self) -> Option<String> {
        self.last_prompt.borrow().clone()
    }

    pub fn last_max_tokens(&self) -> Option<u32> {
        self.last_max_tokens.get()
    }
}

impl CompletionModel for ScriptedModel {
    fn model_name(&self) -> &str {
        "scripted"
    }

    fn complete(&self, prompt: &str, max_tokens: u32) -> GenerationResult<String> {
        self.calls.set(self.calls.get() + 1);
        *self.last_prompt.borrow_mut() = Some(prompt.to_string());
        self.last_max_tokens.set(Some(max_tokens));

        self.reply
            .clone()
            .map_err(GenerationFailure::Inference)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_replying_records_call() {
        let model = ScriptedModel::replying("note");
        assert_eq!(model.calls(), 0);
        assert_eq!(model.complete("p", 7).unwrap(), "note");
        assert_eq!(model.calls(), 1);
        assert_eq!(model.last_prompt().as_deref(), Some("p"));
        assert_eq!(model.last_max_tokens(), Some(7));
    }

    #[test]
    fn test_demo_reply_has_all_sections() {
        let model = ScriptedModel::demo();
        let text = model.complete("anything", 300).unwrap();
        for header in ["S (Subjective):", "O (Objective):", "A (Assessment):", "P (Plan):"] {
            assert!(text.contains(header));
        }
    }

    #[test]
    fn test_failing() {
        let model = ScriptedModel::failing("boom");
        let err = model.complete("p", 1).unwrap_err();
        assert_eq!(err.to_string(), "LLM inference error: boom");
        assert_eq!(model.calls(), 1);
    }
}
