//! Completion client for a local OpenAI-compatible server (GPT4All API server,
//! llama.cpp `llama-server`, etc.).

use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::CONTENT_TYPE;
use serde::{Deserialize, Serialize};

use crate::config::GenerationConfig;
use crate::error::{GenerationFailure, GenerationResult};
use crate::model::CompletionModel;

/// HTTP transport for `/completions`.
///
/// One request per call; failures are returned as-is.
#[derive(Debug, Clone)]
pub struct ServerModel {
    endpoint: String,
    model_name: String,
    client: Client,
}

impl ServerModel {
    pub fn new(config: &GenerationConfig) -> GenerationResult<Self> {
        let base = config.server_url.trim_end_matches('/');
        if base.is_empty() {
            return Err(GenerationFailure::Config("server_url must not be empty".into()));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| GenerationFailure::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            endpoint: format!("{}/completions", base),
            model_name: config.model_name.clone(),
            client,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[derive(Debug, Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    max_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    #[serde(default)]
    choices: Vec<CompletionChoice>,
}

#[derive(Debug, Deserialize)]
struct CompletionChoice {
    #[serde(default)]
    text: String,
}

fn extract_error_message(body: &str) -> Option<String> {
    if body.trim().is_empty() {
        return None;
    }

    let parsed = serde_json::from_str::<serde_json::Value>(body).ok()?;

    if let Some(msg) = parsed
        .get("error")
        .and_then(|error| error.get("message"))
        .and_then(|message| message.as_str())
    {
        return Some(msg.to_string());
    }

    parsed
        .get("error")
        .or_else(|| parsed.get("message"))
        .and_then(|message| message.as_str())
        .map(ToOwned::to_owned)
}

impl CompletionModel for ServerModel {
    fn model_name(&self) -> &str {
        &self.model_name
    }

    fn complete(&self, prompt: &str, max_tokens: u32) -> GenerationResult<String> {
        let request = CompletionRequest { model: &self.model_name, prompt, max_tokens };

        let response = self
            .client
            .post(&self.endpoint)
            .header(CONTENT_TYPE, "application/json")
            .json(&request)
            .send()
            .map_err(|e| GenerationFailure::Transport(e.to_string()))?;

        let status = response.status();
        let body_text = response
            .text()
            .map_err(|e| GenerationFailure::Transport(format!("Failed to read response body: {}", e)))?;

        if !status.is_success() {
            let message = extract_error_message(&body_text).unwrap_or_else(|| {
                if body_text.trim().is_empty() {
                    status.canonical_reason().unwrap_or("request failed").to_string()
                } else {
                    body_text.clone()
                }
            });
            return Err(GenerationFailure::Server { status: status.as_u16(), message });
        }

        let parsed: CompletionResponse = serde_json::from_str(&body_text)
            .map_err(|e| GenerationFailure::InvalidResponse(e.to_string()))?;

        parsed
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.text)
            .ok_or_else(|| GenerationFailure::InvalidResponse("no choices in response".into()))
    }
}
