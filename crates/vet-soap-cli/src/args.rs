//! Command-line arguments.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser};
use vet_soap_core::ClinicalInput;
use vet_soap_llm::{Backend, GenerationConfig};

#[derive(Parser, Debug)]
#[command(name = "vet-soap")]
#[command(version)]
#[command(
    about = "Generate a veterinary SOAP note from patient input with a local language model",
    long_about = "Generate a veterinary SOAP note from patient input with a local language model.\n\n\
The note uses ONLY the provided input and will not invent any details. \
Fields not given on the command line keep the form defaults."
)]
pub struct Cli {
    #[command(flatten)]
    pub fields: FieldArgs,

    /// Read the patient record from a JSON file (flags still override fields)
    #[arg(long, value_name = "FILE")]
    pub input: Option<PathBuf>,

    /// Fill in the form interactively
    #[arg(short, long)]
    pub interactive: bool,

    /// Start from an empty form instead of the defaults
    #[arg(long)]
    pub blank: bool,

    /// TOML file with generation settings
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Completion backend: llama, server or mock
    #[arg(long)]
    pub backend: Option<Backend>,

    /// Model identifier (GGUF file name)
    #[arg(long)]
    pub model: Option<String>,

    /// Model file, or directory containing the model
    #[arg(long, value_name = "PATH")]
    pub model_path: Option<PathBuf>,

    /// Maximum number of tokens to generate
    #[arg(long, visible_alias = "n-predict")]
    pub max_tokens: Option<u32>,

    /// Base URL of a local OpenAI-compatible completion server
    #[arg(long, value_name = "URL")]
    pub server_url: Option<String>,

    /// Print the prompt and exit without loading a model
    #[arg(long)]
    pub print_prompt: bool,

    /// Print the result as JSON
    #[arg(long)]
    pub json: bool,
}

/// One flag per intake field.
#[derive(Args, Debug, Default)]
pub struct FieldArgs {
    #[arg(long)]
    pub species: Option<String>,
    #[arg(long)]
    pub breed: Option<String>,
    #[arg(long)]
    pub age: Option<String>,
    #[arg(long)]
    pub sex: Option<String>,
    #[arg(long)]
    pub weight: Option<String>,
    #[arg(long)]
    pub chief_complaint: Option<String>,
    #[arg(long)]
    pub history: Option<String>,
    #[arg(long)]
    pub physical_exam: Option<String>,
}

impl FieldArgs {
    /// Overwrite every field that was given on the command line.
    pub fn apply(&self, input: &mut ClinicalInput) {
        let pairs = [
            (&self.species, &mut input.species),
            (&self.breed, &mut input.breed),
            (&self.age, &mut input.age),
            (&self.sex, &mut input.sex),
            (&self.weight, &mut input.weight),
            (&self.chief_complaint, &mut input.chief_complaint),
            (&self.history, &mut input.history),
            (&self.physical_exam, &mut input.physical_exam),
        ];
        for (flag, slot) in pairs {
            if let Some(value) = flag {
                *slot = value.clone();
            }
        }
    }
}

impl Cli {
    /// Record before any interactive editing.
    pub fn clinical_input(&self) -> Result<ClinicalInput> {
        let mut input = match &self.input {
            Some(path) => {
                let text = std::fs::read_to_string(path)
                    .with_context(|| format!("Failed to read {}", path.display()))?;
                serde_json::from_str(&text)
                    .with_context(|| format!("Failed to parse patient record {}", path.display()))?
            }
            None if self.blank => ClinicalInput::default(),
            None => ClinicalInput::form_defaults(),
        };
        self.fields.apply(&mut input);
        Ok(input)
    }

    /// Config file (or defaults) with flag overrides.
    pub fn generation_config(&self) -> Result<GenerationConfig> {
        let mut config = match &self.config {
            Some(path) => GenerationConfig::from_file(path)?,
            None => GenerationConfig::default(),
        };

        if let Some(backend) = self.backend {
            config.backend = backend;
        }
        if let Some(model) = &self.model {
            config.model_name = model.clone();
        }
        if let Some(path) = &self.model_path {
            config.model_path = Some(path.clone());
        }
        if let Some(max_tokens) = self.max_tokens {
            config.max_tokens = max_tokens;
        }
        if let Some(url) = &self.server_url {
            config.server_url = url.clone();
        }

        config.validate()?;
        Ok(config)
    }
}
