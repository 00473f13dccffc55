//! Result area and loading indicator.

use std::time::Duration;

use anyhow::Result;
use indicatif::{ProgressBar, ProgressStyle};
use vet_soap_llm::Submission;

/// Heading printed above a generated note.
pub const NOTE_HEADING: &str = "Generated SOAP Note:";

/// Spinner shown while the model runs. Draws to stderr and hides itself when
/// stderr is not a terminal.
pub struct Spinner {
    pb: ProgressBar,
}

impl Spinner {
    pub fn new(message: &str) -> Self {
        let pb = ProgressBar::new_spinner();
        let style = ProgressStyle::with_template("{spinner:.green} {msg}")
            .map(|s| s.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏ "))
            .unwrap_or_else(|_| ProgressStyle::default_spinner());
        pb.set_style(style);
        pb.set_message(message.to_string());
        pb.enable_steady_tick(Duration::from_millis(100));
        Self { pb }
    }

    pub fn finish_and_clear(&self) {
        self.pb.finish_and_clear();
    }
}

/// Text for stdout on success, or the error line for stderr.
pub fn render(submission: &Submission, json: bool) -> Result<Rendered> {
    if json {
        let body = serde_json::to_string_pretty(submission)?;
        return Ok(match submission {
            Submission::Generated(_) => Rendered::Stdout(body),
            Submission::Failed { .. } => Rendered::Failure(body),
        });
    }

    Ok(match submission {
        Submission::Generated(note) => {
            Rendered::Stdout(format!("{}\n\n{}", NOTE_HEADING, note.text.trim_end()))
        }
        Submission::Failed { message } => Rendered::Failure(message.clone()),
    })
}

/// Where a rendered result goes.
#[derive(Debug, PartialEq, Eq)]
pub enum Rendered {
    Stdout(String),
    Failure(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use vet_soap_core::GeneratedNote;

    #[test]
    fn test_render_note() {
        let note = GeneratedNote::new("S (Subjective):\nN/A\n\n".into(), "m".into(), "f".into());
        let rendered = render(&Submission::Generated(note), false).unwrap();
        assert_eq!(
            rendered,
            Rendered::Stdout("Generated SOAP Note:\n\nS (Subjective):\nN/A".into())
        );
    }

    #[test]
    fn test_render_failure() {
        let failed = Submission::Failed { message: "Error generating SOAP note: boom".into() };
        assert_eq!(
            render(&failed, false).unwrap(),
            Rendered::Failure("Error generating SOAP note: boom".into())
        );
    }

    #[test]
    fn test_render_json() {
        let failed = Submission::Failed { message: "Error generating SOAP note: boom".into() };
        match render(&failed, true).unwrap() {
            Rendered::Failure(body) => {
                let value: serde_json::Value = serde_json::from_str(&body).unwrap();
                assert_eq!(value["status"], "failed");
            }
            other => panic!("unexpected render: {:?}", other),
        }
    }
}
