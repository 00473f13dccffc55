//! Intake form layout.
//!
//! The eight labeled controls, in display order. The same labels are used for
//! the `Patient Input:` block of the prompt.

use crate::models::{ClinicalInput, Sex, Species};

/// Which record field a control edits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKey {
    Species,
    Breed,
    Age,
    Sex,
    Weight,
    ChiefComplaint,
    History,
    PhysicalExam,
}

/// Kind of input control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WidgetKind {
    /// Pick one of a fixed list
    Select,
    /// Single-line text
    Text,
    /// Multi-line text
    TextArea,
}

/// A labeled intake control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormField {
    pub key: FieldKey,
    pub label: &'static str,
    pub widget: WidgetKind,
}

/// All intake controls in display order.
pub const FORM_FIELDS: [FormField; 8] = [
    FormField { key: FieldKey::Species, label: "Species", widget: WidgetKind::Select },
    FormField { key: FieldKey::Breed, label: "Breed", widget: WidgetKind::Text },
    FormField { key: FieldKey::Age, label: "Age", widget: WidgetKind::Text },
    FormField { key: FieldKey::Sex, label: "Sex", widget: WidgetKind::Select },
    FormField { key: FieldKey::Weight, label: "Weight", widget: WidgetKind::Text },
    FormField {
        key: FieldKey::ChiefComplaint,
        label: "Chief Complaint",
        widget: WidgetKind::TextArea,
    },
    FormField { key: FieldKey::History, label: "History", widget: WidgetKind::TextArea },
    FormField {
        key: FieldKey::PhysicalExam,
        label: "Physical Exam Findings",
        widget: WidgetKind::TextArea,
    },
];

impl FormField {
    /// Current value of this control's field.
    pub fn value<'a>(&self, input: &'a ClinicalInput) -> &'a str {
        match self.key {
            FieldKey::Species => &input.species,
            FieldKey::Breed => &input.breed,
            FieldKey::Age => &input.age,
            FieldKey::Sex => &input.sex,
            FieldKey::Weight => &input.weight,
            FieldKey::ChiefComplaint => &input.chief_complaint,
            FieldKey::History => &input.history,
            FieldKey::PhysicalExam => &input.physical_exam,
        }
    }

    /// Overwrite this control's field.
    pub fn set(&self, input: &mut ClinicalInput, value: String) {
        let slot = match self.key {
            FieldKey::Species => &mut input.species,
            FieldKey::Breed => &mut input.breed,
            FieldKey::Age => &mut input.age,
            FieldKey::Sex => &mut input.sex,
            FieldKey::Weight => &mut input.weight,
            FieldKey::ChiefComplaint => &mut input.chief_complaint,
            FieldKey::History => &mut input.history,
            FieldKey::PhysicalExam => &mut input.physical_exam,
        };
        *slot = value;
    }

    /// Pre-filled value shown by the form.
    pub fn default_value(&self) -> String {
        self.value(&ClinicalInput::form_defaults()).to_string()
    }

    /// Choices for select controls; empty for text controls.
    pub fn options(&self) -> Vec<&'static str> {
        match self.key {
            FieldKey::Species => Species::ALL.iter().map(|s| s.as_str()).collect(),
            FieldKey::Sex => Sex::ALL.iter().map(|s| s.as_str()).collect(),
            _ => Vec::new(),
        }
    }
}
