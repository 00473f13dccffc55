mod args;
mod display;
mod form;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use vet_soap_core::build_soap_prompt;
use vet_soap_llm::{load_model, NoteGenerator, Submission};

use crate::args::Cli;
use crate::display::{render, Rendered, Spinner};

/// Prefix for setup failures that happen before a submission exists.
const SETUP_ERROR_PREFIX: &str = vet_soap_llm::submission::ERROR_PREFIX;

fn main() {
    let cli = Cli::parse();

    if let Err(e) = init_tracing() {
        eprintln!("Failed to initialize logging: {}", e);
    }

    match run(&cli) {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            eprintln!("{}: {:#}", SETUP_ERROR_PREFIX, e);
            std::process::exit(1);
        }
    }
}

fn init_tracing() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "vet_soap=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init()?;
    Ok(())
}

/// Returns whether a note was generated.
fn run(cli: &Cli) -> Result<bool> {
    let mut input = cli.clinical_input()?;
    if cli.interactive {
        form::fill_interactively(&mut input)?;
    }

    if cli.print_prompt {
        print!("{}", build_soap_prompt(&input));
        return Ok(true);
    }

    let config = cli.generation_config()?;

    // One load per process; every submission borrows it.
    let submission = match load_model(&config) {
        Ok(model) => {
            let generator = NoteGenerator::from_config(&*model, &config);
            let spinner = Spinner::new("Generating SOAP note...");
            let submission = generator.submit(&input);
            spinner.finish_and_clear();
            submission
        }
        Err(e) => {
            tracing::warn!(error = %e, "Model could not be loaded");
            Submission::Failed { message: format!("{}: {}", SETUP_ERROR_PREFIX, e) }
        }
    };

    match render(&submission, cli.json)? {
        Rendered::Stdout(text) => {
            println!("{}", text);
            Ok(true)
        }
        Rendered::Failure(text) => {
            eprintln!("{}", text);
            Ok(false)
        }
    }
}
