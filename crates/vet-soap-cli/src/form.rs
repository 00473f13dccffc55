//! Interactive intake form.

use anyhow::{Context, Result};
use dialoguer::{Input, Select};
use vet_soap_core::{ClinicalInput, FormField, WidgetKind, FORM_FIELDS};

/// Walk the eight controls, pre-filled with `input`'s current values.
pub fn fill_interactively(input: &mut ClinicalInput) -> Result<()> {
    for field in FORM_FIELDS.iter() {
        let value = match field.widget {
            WidgetKind::Select => select_value(field, field.value(input))?,
            WidgetKind::Text | WidgetKind::TextArea => text_value(field, field.value(input))?,
        };
        field.set(input, value);
    }
    Ok(())
}

fn select_value(field: &FormField, current: &str) -> Result<String> {
    let options = field.options();
    let default = options.iter().position(|o| *o == current).unwrap_or(0);
    let index = Select::new()
        .with_prompt(field.label)
        .items(&options)
        .default(default)
        .interact()
        .with_context(|| format!("Failed to read {}", field.label))?;
    Ok(options[index].to_string())
}

fn text_value(field: &FormField, current: &str) -> Result<String> {
    Input::<String>::new()
        .with_prompt(field.label)
        .with_initial_text(current)
        .allow_empty(true)
        .interact_text()
        .with_context(|| format!("Failed to read {}", field.label))
}
