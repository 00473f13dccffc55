//! Clinical intake models.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One submission's worth of patient information.
///
/// Every field is free text and may be empty. Nothing here is validated or
/// normalized; the values reach the prompt exactly as typed.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ClinicalInput {
    pub species: String,
    pub breed: String,
    pub age: String,
    pub sex: String,
    pub weight: String,
    pub chief_complaint: String,
    pub history: String,
    /// Physical exam findings (vitals, palpation, etc.)
    pub physical_exam: String,
}

impl ClinicalInput {
    /// The values the intake form is pre-filled with.
    pub fn form_defaults() -> Self {
        Self {
            species: Species::Dog.as_str().to_string(),
            breed: "Chihuahua".to_string(),
            age: "7 years".to_string(),
            sex: Sex::Male.as_str().to_string(),
            weight: "3.5 kg".to_string(),
            chief_complaint: "Vomiting for 24 hours".to_string(),
            history: "No known toxin exposure. Normal urination.".to_string(),
            physical_exam: "T = 38.6°C, HR = 110 bpm, mild cranial abdominal pain".to_string(),
        }
    }

    /// True when every field is empty.
    pub fn is_blank(&self) -> bool {
        [
            &self.species,
            &self.breed,
            &self.age,
            &self.sex,
            &self.weight,
            &self.chief_complaint,
            &self.history,
            &self.physical_exam,
        ]
        .iter()
        .all(|v| v.is_empty())
    }
}

/// Species choices offered by the intake form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Species {
    Dog,
    Cat,
    Other,
}

impl Species {
    pub const ALL: [Species; 3] = [Species::Dog, Species::Cat, Species::Other];

    pub fn as_str(&self) -> &'static str {
        match self {
            Species::Dog => "Dog",
            Species::Cat => "Cat",
            Species::Other => "Other",
        }
    }
}

impl fmt::Display for Species {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sex choices offered by the intake form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sex {
    Male,
    Female,
    NeuteredMale,
    SpayedFemale,
}

impl Sex {
    pub const ALL: [Sex; 4] = [Sex::Male, Sex::Female, Sex::NeuteredMale, Sex::SpayedFemale];

    pub fn as_str(&self) -> &'static str {
        match self {
            Sex::Male => "Male",
            Sex::Female => "Female",
            Sex::NeuteredMale => "Neutered Male",
            Sex::SpayedFemale => "Spayed Female",
        }
    }
}

impl fmt::Display for Sex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_blank() {
        assert!(ClinicalInput::default().is_blank());
        assert!(!ClinicalInput::form_defaults().is_blank());
    }

    #[test]
    fn test_form_defaults() {
        let input = ClinicalInput::form_defaults();
        assert_eq!(input.species, "Dog");
        assert_eq!(input.sex, "Male");
        assert_eq!(input.weight, "3.5 kg");
        assert_eq!(input.chief_complaint, "Vomiting for 24 hours");
    }

    #[test]
    fn test_partial_json_fills_blanks() {
        let input: ClinicalInput =
            serde_json::from_str(r#"{"species":"Cat","history":"Indoor only"}"#).unwrap();
        assert_eq!(input.species, "Cat");
        assert_eq!(input.history, "Indoor only");
        assert_eq!(input.breed, "");
        assert_eq!(input.physical_exam, "");
    }

    #[test]
    fn test_option_labels() {
        let species: Vec<&str> = Species::ALL.iter().map(|s| s.as_str()).collect();
        assert_eq!(species, vec!["Dog", "Cat", "Other"]);
        assert_eq!(Sex::SpayedFemale.to_string(), "Spayed Female");
    }
}
