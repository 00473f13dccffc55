//! Submission boundary between the form and the display.
//!
//! Every failure stops here and becomes a message; nothing propagates past it.

use serde::Serialize;
use vet_soap_core::{build_soap_prompt, ClinicalInput, GeneratedNote};

use crate::generator::NoteGenerator;

/// Prefix of every user-visible failure message.
pub const ERROR_PREFIX: &str = "Error generating SOAP note";

/// What the result area shows after one submit.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum Submission {
    Generated(GeneratedNote),
    Failed { message: String },
}

impl Submission {
    pub fn is_generated(&self) -> bool {
        matches!(self, Submission::Generated(_))
    }

    pub fn note(&self) -> Option<&GeneratedNote> {
        match self {
            Submission::Generated(note) => Some(note),
            Submission::Failed { .. } => None,
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            Submission::Generated(_) => None,
            Submission::Failed { message } => Some(message),
        }
    }
}

impl<'m> NoteGenerator<'m> {
    /// Build the prompt for `input` and generate once.
    pub fn submit(&self, input: &ClinicalInput) -> Submission {
        let prompt = build_soap_prompt(input);
        match self.generate(&prompt) {
            Ok(note) => Submission::Generated(note),
            Err(e) => Submission::Failed { message: format!("{}: {}", ERROR_PREFIX, e) },
        }
    }
}
