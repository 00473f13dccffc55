//! SOAP note prompt for instruction-tuned local models.
//!
//! The wording is tuned for Mistral-7B-Instruct. It pins the output to the four
//! SOAP sections and forbids anything not present in the patient input.

use crate::form::FORM_FIELDS;
use crate::models::ClinicalInput;
use sha2::{Digest, Sha256};
use std::fmt;

/// Opening instructions.
pub const PREAMBLE: &str = r#"You are a veterinary assistant tasked with generating a SOAP note using ONLY the following patient input. Do not invent or add any data that is not provided. If a section has no details, output "N/A" for that section.

Output MUST be in the exact format below with four sections (only):"#;

/// Section headers and the placeholder line printed under each.
pub const SOAP_SECTIONS: [(&str, &str); 4] = [
    ("S (Subjective):", "[Your Subjective Findings]"),
    ("O (Objective):", "[Your Objective Findings]"),
    ("A (Assessment):", "[Your Assessment]"),
    ("P (Plan):", "[Your Plan]"),
];

/// Heading of the labeled field block.
pub const PATIENT_INPUT_HEADING: &str = "Patient Input:";

/// Final directive.
pub const CLOSING: &str = "Do not include anything else.";

/// A fully assembled prompt. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SoapPrompt(String);

impl SoapPrompt {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    /// Hex SHA-256 of the prompt text.
    ///
    /// Lets logs tell prompts apart without printing patient data.
    pub fn fingerprint(&self) -> String {
        hex::encode(Sha256::digest(self.0.as_bytes()))
    }
}

impl AsRef<str> for SoapPrompt {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SoapPrompt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Build the SOAP prompt for one intake record.
///
/// Field values are inserted verbatim; empty values leave an empty label line.
pub fn build_soap_prompt(input: &ClinicalInput) -> SoapPrompt {
    let mut prompt = String::new();

    prompt.push('\n');
    prompt.push_str(PREAMBLE);
    prompt.push_str("\n\n");

    for (header, placeholder) in SOAP_SECTIONS {
        prompt.push_str(header);
        prompt.push('\n');
        prompt.push_str(placeholder);
        prompt.push_str("\n\n");
    }

    prompt.push_str(PATIENT_INPUT_HEADING);
    prompt.push('\n');
    for field in FORM_FIELDS.iter() {
        prompt.push_str(&format!("- {}: {}\n", field.label, field.value(input)));
    }

    prompt.push('\n');
    prompt.push_str(CLOSING);
    prompt.push('\n');

    SoapPrompt(prompt)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXPECTED_DEFAULT_PROMPT: &str = "
You are a veterinary assistant tasked with generating a SOAP note using ONLY the following patient input. Do not invent or add any data that is not provided. If a section has no details, output \"N/A\" for that section.

Output MUST be in the exact format below with four sections (only):

S (Subjective):
[Your Subjective Findings]

O (Objective):
[Your Objective Findings]

A (Assessment):
[Your Assessment]

P (Plan):
[Your Plan]

Patient Input:
- Species: Dog
- Breed: Chihuahua
- Age: 7 years
- Sex: Male
- Weight: 3.5 kg
- Chief Complaint: Vomiting for 24 hours
- History: No known toxin exposure. Normal urination.
- Physical Exam Findings: T = 38.6°C, HR = 110 bpm, mild cranial abdominal pain

Do not include anything else.
";

    #[test]
    fn test_default_prompt_exact() {
        let prompt = build_soap_prompt(&ClinicalInput::form_defaults());
        assert_eq!(prompt.as_str(), EXPECTED_DEFAULT_PROMPT);
    }

    #[test]
    fn test_chief_complaint_line() {
        let prompt = build_soap_prompt(&ClinicalInput::form_defaults());
        assert!(prompt
            .as_str()
            .lines()
            .any(|line| line == "- Chief Complaint: Vomiting for 24 hours"));
    }

    #[test]
    fn test_headers_in_order() {
        let prompt = build_soap_prompt(&ClinicalInput::form_defaults());
        let text = prompt.as_str();
        let positions: Vec<usize> = SOAP_SECTIONS
            .iter()
            .map(|(header, _)| text.find(header).unwrap())
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
        assert!(text.find(PATIENT_INPUT_HEADING).unwrap() > positions[3]);
    }

    #[test]
    fn test_empty_input_still_well_formed() {
        let prompt = build_soap_prompt(&ClinicalInput::default());
        let text = prompt.as_str();
        for (header, placeholder) in SOAP_SECTIONS {
            assert!(text.contains(header));
            assert!(text.contains(placeholder));
        }
        for field in FORM_FIELDS.iter() {
            let line = format!("- {}: ", field.label);
            assert!(text.lines().any(|l| l == line), "missing line {:?}", line);
        }
        assert!(text.ends_with("Do not include anything else.\n"));
    }

    #[test]
    fn test_fingerprint_stable_and_distinct() {
        let a = build_soap_prompt(&ClinicalInput::form_defaults());
        let b = build_soap_prompt(&ClinicalInput::form_defaults());
        let c = build_soap_prompt(&ClinicalInput::default());
        assert_eq!(a.fingerprint(), b.fingerprint());
        assert_ne!(a.fingerprint(), c.fingerprint());
        assert_eq!(a.fingerprint().len(), 64);
    }

    #[test]
    fn test_multiline_values_kept_verbatim() {
        let input = ClinicalInput {
            history: "Line one.\nLine two.".into(),
            ..Default::default()
        };
        let prompt = build_soap_prompt(&input);
        assert!(prompt.as_str().contains("- History: Line one.\nLine two.\n"));
    }
}
