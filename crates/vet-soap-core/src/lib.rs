//! Vet-SOAP Core Library
//!
//! Turns a veterinary intake form into a SOAP note prompt for a local language model.
//!
//! # Architecture
//!
//! ```text
//! Intake form → ClinicalInput → Prompt Builder → SoapPrompt
//!                                                    │
//!                                      [vet-soap-llm: completion call]
//!                                                    │
//!                                              GeneratedNote → Display
//! ```
//!
//! # Core Principle
//!
//! **The model may only use what the vet typed.** The prompt forbids invented
//! findings and asks for "N/A" wherever a section has nothing to go on.
//!
//! # Modules
//!
//! - [`models`]: Domain types (ClinicalInput, GeneratedNote, Species, Sex)
//! - [`form`]: The eight labeled intake controls and their defaults
//! - [`prompts`]: SOAP prompt template and builder

pub mod form;
pub mod models;
pub mod prompts;

// Re-export commonly used types
pub use form::{FormField, WidgetKind, FORM_FIELDS};
pub use models::{ClinicalInput, GeneratedNote, Sex, Species};
pub use prompts::{build_soap_prompt, SoapPrompt};
