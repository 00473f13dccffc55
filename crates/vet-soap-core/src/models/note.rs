//! Generated note model.

use serde::{Deserialize, Serialize};

/// Raw text returned by the model for one submission.
///
/// Held only long enough to display it; never written anywhere.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GeneratedNote {
    /// Model output, unmodified
    pub text: String,
    /// Model that produced the text
    pub model: String,
    /// SHA-256 of the prompt that was sent
    pub prompt_fingerprint: String,
    /// Generation timestamp
    pub generated_at: String,
}

impl GeneratedNote {
    pub fn new(text: String, model: String, prompt_fingerprint: String) -> Self {
        Self {
            text,
            model,
            prompt_fingerprint,
            generated_at: chrono::Utc::now().to_rfc3339(),
        }
    }

    /// True when the model returned nothing but whitespace.
    pub fn is_empty(&self) -> bool {
        self.text.trim().is_empty()
    }
}
