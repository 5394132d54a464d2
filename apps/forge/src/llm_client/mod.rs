//! LLM Client — the single point of entry for chat-completion calls in the Forge.
//!
//! ARCHITECTURAL RULE: No other module may call the OpenAI API directly.
//! Handlers hold a `CapabilityProvider`, which turns a session's key into a
//! `CompletionProvider` (or reports that no client can be built).
//!
//! There is no retry loop here: a failed call is surfaced to the user as-is.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

#[cfg(test)]
pub mod testing;

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("LLM returned empty content")]
    EmptyContent,

    #[error("{0}")]
    Unavailable(String),
}

/// A single chat-completion round trip: one system message, one user message.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub model: String,
    pub system: String,
    pub user: String,
    pub temperature: f32,
    pub max_tokens: u32,
}

/// Something that can answer a `CompletionRequest` with text.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, LlmError>;
}

/// Builds a `CompletionProvider` bound to one user-supplied key.
///
/// `connect` returns `LlmError::Unavailable` when no client can be
/// constructed, so callers branch on a value instead of a missing library.
pub trait CapabilityProvider: Send + Sync {
    fn connect(&self, api_key: &SecretString) -> Result<Arc<dyn CompletionProvider>, LlmError>;
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
    usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Usage {
    prompt_tokens: u32,
    completion_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct OpenAiError {
    error: OpenAiErrorBody,
}

#[derive(Debug, Deserialize)]
struct OpenAiErrorBody {
    message: String,
}

/// Produces `OpenAiClient`s for the OpenAI Chat Completions API
/// (or any gateway speaking the same protocol at `base_url`).
#[derive(Debug, Clone)]
pub struct OpenAiCapability {
    base_url: String,
    timeout: Duration,
}

impl OpenAiCapability {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            timeout,
        }
    }
}

impl CapabilityProvider for OpenAiCapability {
    fn connect(&self, api_key: &SecretString) -> Result<Arc<dyn CompletionProvider>, LlmError> {
        let client = Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(|e| LlmError::Unavailable(format!("Could not construct the OpenAI client: {e}")))?;

        Ok(Arc::new(OpenAiClient {
            client,
            api_key: SecretString::from(api_key.expose_secret().to_owned()),
            endpoint: format!("{}/chat/completions", self.base_url),
        }))
    }
}

/// Chat-completion client bound to one key.
///
/// The key is only exposed while building the `Authorization` header.
pub struct OpenAiClient {
    client: Client,
    api_key: SecretString,
    endpoint: String,
}

#[async_trait]
impl CompletionProvider for OpenAiClient {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, LlmError> {
        let body = ChatRequest {
            model: &request.model,
            messages: [
                ChatMessage {
                    role: "system",
                    content: &request.system,
                },
                ChatMessage {
                    role: "user",
                    content: &request.user,
                },
            ],
            temperature: request.temperature,
            max_tokens: request.max_tokens,
        };

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(self.api_key.expose_secret())
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            return Err(LlmError::Api {
                status: status.as_u16(),
                message: api_error_message(&text),
            });
        }

        parse_completion(&text)
    }
}

/// Pulls the trimmed text of the first choice out of a completion body.
fn parse_completion(body: &str) -> Result<String, LlmError> {
    let response: ChatResponse = serde_json::from_str(body)?;

    if let Some(usage) = &response.usage {
        debug!(
            "LLM call succeeded: prompt_tokens={}, completion_tokens={}",
            usage.prompt_tokens, usage.completion_tokens
        );
    }

    response
        .choices
        .into_iter()
        .next()
        .and_then(|c| c.message.content)
        .map(|content| content.trim().to_string())
        .filter(|content| !content.is_empty())
        .ok_or(LlmError::EmptyContent)
}

/// Prefers the provider's own error message; falls back to the raw body.
fn api_error_message(body: &str) -> String {
    serde_json::from_str::<OpenAiError>(body)
        .map(|e| e.error.message)
        .unwrap_or_else(|_| body.trim().to_string())
}
