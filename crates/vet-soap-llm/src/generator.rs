//! Generation invoker.

use std::time::Instant;

use vet_soap_core::{GeneratedNote, SoapPrompt};

use crate::config::GenerationConfig;
use crate::error::GenerationResult;
use crate::model::CompletionModel;

/// Sends a SOAP prompt to an injected model with a fixed token budget.
///
/// The model handle is owned by the caller (normally `main`) and only borrowed
/// here, so one load serves every submission.
pub struct NoteGenerator<'m> {
    model: &'m dyn CompletionModel,
    max_tokens: u32,
}

impl<'m> NoteGenerator<'m> {
    pub fn new(model: &'m dyn CompletionModel, max_tokens: u32) -> Self {
        Self { model, max_tokens }
    }

    /// Use the token budget from `config`.
    pub fn from_config(model: &'m dyn CompletionModel, config: &GenerationConfig) -> Self {
        Self::new(model, config.max_tokens)
    }

    pub fn max_tokens(&self) -> u32 {
        self.max_tokens
    }

    pub fn model_name(&self) -> &str {
        self.model.model_name()
    }

    /// Call the model exactly once. No retry, no partial results.
    pub fn generate(&self, prompt: &SoapPrompt) -> GenerationResult<GeneratedNote> {
        let fingerprint = prompt.fingerprint();
        let started = Instant::now();

        tracing::info!(
            model = %self.model.model_name(),
            prompt = %fingerprint,
            max_tokens = self.max_tokens,
            "Generating SOAP note"
        );

        match self.model.complete(prompt.as_str(), self.max_tokens) {
            Ok(text) => {
                tracing::info!(
                    prompt = %fingerprint,
                    chars = text.len(),
                    elapsed_ms = started.elapsed().as_millis() as u64,
                    "SOAP note generated"
                );
                Ok(GeneratedNote::new(text, self.model.model_name().to_string(), fingerprint))
            }
            Err(e) => {
                tracing::warn!(
                    prompt = %fingerprint,
                    elapsed_ms = started.elapsed().as_millis() as u64,
                    error = %e,
                    "SOAP note generation failed"
                );
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GenerationFailure;
    use crate::mock::ScriptedModel;
    use vet_soap_core::{build_soap_prompt, ClinicalInput};

    #[test]
    fn test_generate_passes_prompt_and_budget() {
        let model = ScriptedModel::replying("S (Subjective):\nVomiting");
        let generator = NoteGenerator::new(&model, 300);
        let prompt = build_soap_prompt(&ClinicalInput::form_defaults());

        let note = generator.generate(&prompt).unwrap();

        assert_eq!(note.text, "S (Subjective):\nVomiting");
        assert_eq!(note.model, "scripted");
        assert_eq!(note.prompt_fingerprint, prompt.fingerprint());
        assert_eq!(model.calls(), 1);
        assert_eq!(model.last_prompt().as_deref(), Some(prompt.as_str()));
        assert_eq!(model.last_max_tokens(), Some(300));
    }

    #[test]
    fn test_generate_returns_failure_unchanged() {
        let model = ScriptedModel::failing("context overflow");
        let generator = NoteGenerator::new(&model, 300);
        let prompt = build_soap_prompt(&ClinicalInput::default());

        let err = generator.generate(&prompt).unwrap_err();

        assert!(matches!(err, GenerationFailure::Inference(ref m) if m == "context overflow"));
        assert_eq!(model.calls(), 1);
    }

    #[test]
    fn test_from_config_uses_budget() {
        let model = ScriptedModel::replying("ok");
        let config = GenerationConfig { max_tokens: 128, ..Default::default() };
        let generator = NoteGenerator::from_config(&model, &config);
        assert_eq!(generator.max_tokens(), 128);
        assert_eq!(generator.model_name(), "scripted");

        generator.generate(&build_soap_prompt(&ClinicalInput::default())).unwrap();
        assert_eq!(model.last_max_tokens(), Some(128));
    }
}
