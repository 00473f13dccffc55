//! Local LLM completion for SOAP note generation.
//!
//! This crate owns the single model call: loading a completion-capable model
//! once, invoking it with the SOAP prompt and a fixed token budget, and turning
//! the outcome into something the display layer can show.
//!
//! # Features
//!
//! - `llm` - Enable in-process inference with llama.cpp (`llama-cpp-2`)
//!
//! Without `llm` the local HTTP server backend is still available.

pub mod config;
pub mod error;
pub mod generator;
pub mod llama;
pub mod loader;
pub mod mock;
pub mod model;
pub mod server;
pub mod submission;

pub use config::{Backend, GenerationConfig};
pub use error::{GenerationFailure, GenerationResult};
pub use generator::NoteGenerator;
pub use loader::load_model;
pub use model::CompletionModel;
pub use submission::Submission;
