//! Model loading.

use crate::config::{Backend, GenerationConfig};
use crate::error::GenerationResult;
use crate::llama::LlamaEngine;
use crate::mock::ScriptedModel;
use crate::model::CompletionModel;
use crate::server::ServerModel;

/// Load the configured model once.
///
/// The returned handle is meant to live for the whole process and be lent to
/// a [`crate::NoteGenerator`] for each submission.
pub fn load_model(config: &GenerationConfig) -> GenerationResult<Box<dyn CompletionModel>> {
    config.validate()?;

    match config.backend {
        Backend::Llama => {
            let path = config.resolve_model_path();
            Ok(Box::new(LlamaEngine::load(&path, config)?))
        }
        Backend::Server => {
            let model = ServerModel::new(config)?;
            tracing::info!(endpoint = %model.endpoint(), model = %config.model_name, "Using completion server");
            Ok(Box::new(model))
        }
        Backend::Mock => {
            tracing::info!("Using canned mock model");
            Ok(Box::new(ScriptedModel::demo()))
        }
    }
}
