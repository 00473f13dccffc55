//! Generation configuration.

use crate::error::{GenerationFailure, GenerationResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Default GGUF model.
pub const DEFAULT_MODEL_NAME: &str = "mistral-7b-instruct-v0.1.Q4_0.gguf";

/// Default generation budget in tokens.
pub const DEFAULT_MAX_TOKENS: u32 = 300;

/// Default context window for the in-process engine.
pub const DEFAULT_CONTEXT_SIZE: u32 = 2048;

/// GPT4All's local OpenAI-compatible API server.
pub const DEFAULT_SERVER_URL: &str = "http://localhost:4891/v1";

/// Default request timeout for the server backend.
pub const DEFAULT_TIMEOUT_SECS: u64 = 600;

/// Where completions come from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    /// In-process llama.cpp
    #[default]
    Llama,
    /// Local HTTP completion server
    Server,
    /// Canned note, no model (offline demos)
    Mock,
}

impl Backend {
    pub fn as_str(&self) -> &'static str {
        match self {
            Backend::Llama => "llama",
            Backend::Server => "server",
            Backend::Mock => "mock",
        }
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Backend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "llama" => Ok(Backend::Llama),
            "server" => Ok(Backend::Server),
            "mock" => Ok(Backend::Mock),
            other => Err(format!(
                "unknown backend '{}' (expected llama, server or mock)",
                other
            )),
        }
    }
}

/// Model selection and generation settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    pub backend: Backend,
    /// Model identifier (GGUF file name)
    pub model_name: String,
    /// Explicit model file, or a directory holding `model_name`
    pub model_path: Option<PathBuf>,
    /// Maximum number of generated tokens
    pub max_tokens: u32,
    pub context_size: u32,
    pub gpu_layers: u32,
    pub server_url: String,
    pub timeout_secs: u64,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            backend: Backend::default(),
            model_name: DEFAULT_MODEL_NAME.to_string(),
            model_path: None,
            max_tokens: DEFAULT_MAX_TOKENS,
            context_size: DEFAULT_CONTEXT_SIZE,
            gpu_layers: 0,
            server_url: DEFAULT_SERVER_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl GenerationConfig {
    /// Parse a TOML document. Missing keys keep their defaults.
    pub fn from_toml_str(text: &str) -> GenerationResult<Self> {
        let config: Self =
            toml::from_str(text).map_err(|e| GenerationFailure::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load a TOML config file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> GenerationResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| {
            GenerationFailure::Config(format!("cannot read {}: {}", path.display(), e))
        })?;
        Self::from_toml_str(&text)
    }

    pub fn validate(&self) -> GenerationResult<()> {
        if self.model_name.trim().is_empty() {
            return Err(GenerationFailure::Config("model_name must not be empty".into()));
        }
        if self.max_tokens == 0 {
            return Err(GenerationFailure::Config("max_tokens must be at least 1".into()));
        }
        // Only the in-process engine owns a context window.
        if self.backend == Backend::Llama && self.context_size <= self.max_tokens {
            return Err(GenerationFailure::Config(format!(
                "context_size ({}) must exceed max_tokens ({})",
                self.context_size, self.max_tokens
            )));
        }
        Ok(())
    }

    /// Location of the GGUF file for the in-process engine.
    ///
    /// A `model_path` naming a file wins; a directory is joined with
    /// `model_name`; otherwise the GPT4All download directory is used.
    pub fn resolve_model_path(&self) -> PathBuf {
        match &self.model_path {
            Some(path) if path.is_dir() => path.join(&self.model_name),
            Some(path) => path.clone(),
            None => default_models_dir().join(&self.model_name),
        }
    }
}

/// GPT4All keeps downloaded models under `~/.cache/gpt4all`.
pub fn default_models_dir() -> PathBuf {
    directories::BaseDirs::new()
        .map(|d| d.home_dir().join(".cache").join("gpt4all"))
        .unwrap_or_else(|| PathBuf::from("."))
}
