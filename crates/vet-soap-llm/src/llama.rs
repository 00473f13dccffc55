//! In-process llama.cpp engine.
//!
//! The GGUF file is loaded once; each completion gets a fresh context so no
//! state leaks between submissions.

use crate::config::GenerationConfig;
use crate::error::{GenerationFailure, GenerationResult};
use crate::model::CompletionModel;
use std::path::Path;

fn file_name(path: &Path) -> String {
    path.file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("unknown")
        .to_string()
}

/// Raw bytes of generated tokens.
///
/// Byte-fallback tokens can carry half of a UTF-8 sequence, so text is only
/// decoded once generation is finished.
#[derive(Debug, Default)]
#[cfg_attr(not(feature = "llm"), allow(dead_code))]
struct TokenBytes(Vec<u8>);

#[cfg_attr(not(feature = "llm"), allow(dead_code))]
impl TokenBytes {
    fn push(&mut self, piece: &[u8]) {
        self.0.extend_from_slice(piece);
    }

    fn into_text(self) -> String {
        String::from_utf8_lossy(&self.0).into_owned()
    }
}

#[cfg(feature = "llm")]
mod engine {
    use super::*;
    use llama_cpp_2::context::params::LlamaContextParams;
    use llama_cpp_2::llama_backend::LlamaBackend;
    use llama_cpp_2::llama_batch::LlamaBatch;
    use llama_cpp_2::model::params::LlamaModelParams;
    use llama_cpp_2::model::{AddBos, LlamaModel, Special};
    use llama_cpp_2::sampling::LlamaSampler;
    use std::num::NonZeroU32;

    fn inference<E: std::fmt::Display>(e: E) -> GenerationFailure {
        GenerationFailure::Inference(e.to_string())
    }

    /// A loaded GGUF model.
    pub struct LlamaEngine {
        // Dropped before the backend.
        model: LlamaModel,
        backend: LlamaBackend,
        model_name: String,
        context_size: u32,
    }

    impl LlamaEngine {
        pub fn load(path: &Path, config: &GenerationConfig) -> GenerationResult<Self> {
            if !path.is_file() {
                return Err(GenerationFailure::ModelNotFound(path.display().to_string()));
            }

            tracing::info!(path = %path.display(), "Loading model");

            let backend =
                LlamaBackend::init().map_err(|e| GenerationFailure::ModelLoad(e.to_string()))?;
            let params = LlamaModelParams::default().with_n_gpu_layers(config.gpu_layers);
            let model = LlamaModel::load_from_file(&backend, path, &params)
                .map_err(|e| GenerationFailure::ModelLoad(e.to_string()))?;

            let model_name = file_name(path);
            tracing::info!(model = %model_name, "Model loaded");

            Ok(Self {
                model,
                backend,
                model_name,
                context_size: config.context_size,
            })
        }
    }

    impl CompletionModel for LlamaEngine {
        fn model_name(&self) -> &str {
            &self.model_name
        }

        fn complete(&self, prompt: &str, max_tokens: u32) -> GenerationResult<String> {
            let tokens = self
                .model
                .str_to_token(prompt, AddBos::Always)
                .map_err(inference)?;
            let n_prompt = tokens.len();
            if n_prompt == 0 {
                return Err(GenerationFailure::Inference("prompt produced no tokens".into()));
            }
            if n_prompt + max_tokens as usize > self.context_size as usize {
                return Err(GenerationFailure::Inference(format!(
                    "prompt ({} tokens) plus budget ({}) exceeds context size {}",
                    n_prompt, max_tokens, self.context_size
                )));
            }

            let ctx_params =
                LlamaContextParams::default().with_n_ctx(NonZeroU32::new(self.context_size));
            let mut ctx = self
                .model
                .new_context(&self.backend, ctx_params)
                .map_err(inference)?;

            let mut batch = LlamaBatch::new(n_prompt.max(512), 1);
            let last_index = n_prompt as i32 - 1;
            for (i, token) in (0_i32..).zip(tokens) {
                batch
                    .add(token, i, &[0], i == last_index)
                    .map_err(inference)?;
            }
            ctx.decode(&mut batch).map_err(inference)?;

            let mut sampler = LlamaSampler::greedy();
            let mut output = TokenBytes::default();
            let mut n_cur = batch.n_tokens();
            let limit = n_cur + max_tokens as i32;

            while n_cur < limit {
                let token = sampler.sample(&ctx, batch.n_tokens() - 1);
                sampler.accept(token);

                if self.model.is_eog_token(token) {
                    break;
                }

                let piece = self
                    .model
                    .token_to_bytes(token, Special::Tokenize)
                    .map_err(inference)?;
                output.push(&piece);

                batch.clear();
                batch.add(token, n_cur, &[0], true).map_err(inference)?;
                n_cur += 1;
                ctx.decode(&mut batch).map_err(inference)?;
            }

            Ok(output.into_text())
        }
    }
}

#[cfg(not(feature = "llm"))]
mod engine {
    use super::*;

    /// Placeholder engine when the `llm` feature is disabled.
    pub struct LlamaEngine {
        model_name: String,
    }

    impl LlamaEngine {
        pub fn load(path: &Path, _config: &GenerationConfig) -> GenerationResult<Self> {
            // Just verify the model file exists
            if !path.is_file() {
                return Err(GenerationFailure::ModelNotFound(path.display().to_string()));
            }

            tracing::warn!(
                path = %path.display(),
                "LLM feature not enabled; model path validated but inference is unavailable"
            );

            Ok(Self { model_name: file_name(path) })
        }
    }

    impl CompletionModel for LlamaEngine {
        fn model_name(&self) -> &str {
            &self.model_name
        }

        fn complete(&self, _prompt: &str, _max_tokens: u32) -> GenerationResult<String> {
            Err(GenerationFailure::FeatureDisabled(self.model_name.clone()))
        }
    }
}

pub use engine::LlamaEngine;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_model_file() {
        let config = GenerationConfig::default();
        let result = LlamaEngine::load(Path::new("/nonexistent/model.gguf"), &config);
        match result {
            Err(GenerationFailure::ModelNotFound(path)) => {
                assert!(path.contains("model.gguf"));
            }
            Err(other) => panic!("unexpected error: {}", other),
            Ok(_) => panic!("expected missing model error"),
        }
    }

    #[test]
    fn test_token_bytes_join_split_characters() {
        // "°C" where the degree sign arrives as two byte-fallback tokens
        let mut bytes = TokenBytes::default();
        bytes.push(b"T = 38.6");
        bytes.push(&[0xC2]);
        bytes.push(&[0xB0]);
        bytes.push(b"C");
        assert_eq!(bytes.into_text(), "T = 38.6°C");
    }

    #[test]
    fn test_token_bytes_truncated_sequence_is_replaced() {
        let mut bytes = TokenBytes::default();
        bytes.push(b"N/A");
        bytes.push(&[0xE2, 0x82]);
        assert_eq!(bytes.into_text(), "N/A\u{FFFD}");
    }

    #[test]
    fn test_directory_is_not_a_model() {
        let dir = tempfile::tempdir().unwrap();
        let config = GenerationConfig::default();
        assert!(matches!(
            LlamaEngine::load(dir.path(), &config),
            Err(GenerationFailure::ModelNotFound(_))
        ));
    }

    #[cfg(not(feature = "llm"))]
    #[test]
    fn test_disabled_feature_reports_failure() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tiny.gguf");
        std::fs::write(&path, b"GGUF").unwrap();

        let engine = LlamaEngine::load(&path, &GenerationConfig::default()).unwrap();
        assert_eq!(engine.model_name(), "tiny.gguf");
        let err = engine.complete("prompt", 10).unwrap_err();
        assert!(matches!(err, GenerationFailure::FeatureDisabled(ref m) if m == "tiny.gguf"));
    }
}
