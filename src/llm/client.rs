//! Completion backend: OpenAI-compatible chat completions over HTTP.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{CompletionError, ConfigError};
use crate::llm::prompt::PromptRequest;

/// Longest slice of an error body kept in [`CompletionError::BadStatus`].
const MAX_ERROR_BODY: usize = 500;

/// Trait for sending one prompt to a language model.
///
/// This abstraction allows mocking the backend in tests.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// Send the prompt to `model` and return the raw message content.
    async fn complete(&self, model: &str, prompt: &PromptRequest)
    -> Result<String, CompletionError>;
}

/// Client for `POST {api_base}/chat/completions`.
///
/// A missing API key is only reported when a request is attempted.
pub struct OpenAiClient {
    client: Client,
    api_base: String,
    api_key: Option<String>,
}

impl OpenAiClient {
    pub fn new(
        api_base: impl Into<String>,
        api_key: Option<String>,
        timeout: Duration,
    ) -> Result<Self, CompletionError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(CompletionError::ClientBuild)?;

        Ok(Self {
            client,
            api_base: api_base.into().trim_end_matches('/').to_string(),
            api_key,
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.api_base)
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: Option<ChatResponseMessage>,
}

#[derive(Debug, Deserialize)]
struct ChatResponseMessage {
    content: Option<String>,
}

#[async_trait]
impl CompletionClient for OpenAiClient {
    async fn complete(
        &self,
        model: &str,
        prompt: &PromptRequest,
    ) -> Result<String, CompletionError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(ConfigError::MissingApiKey)?;

        let request = ChatRequest {
            model,
            messages: [
                ChatMessage {
                    role: "system",
                    content: &prompt.system,
                },
                ChatMessage {
                    role: "user",
                    content: &prompt.user,
                },
            ],
        };

        debug!("Requesting completion from {} with model {}", self.endpoint(), model);

        let response = self
            .client
            .post(self.endpoint())
            .bearer_auth(api_key)
            .json(&request)
            .send()
            .await
            .map_err(CompletionError::RequestFailed)?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(CompletionError::RequestFailed)?;

        if !status.is_success() {
            return Err(CompletionError::BadStatus {
                status: status.as_u16(),
                body: body.chars().take(MAX_ERROR_BODY).collect(),
            });
        }

        extract_content(&body)
    }
}

/// Pull `choices[0].message.content` out of a chat completion body.
fn extract_content(body: &str) -> Result<String, CompletionError> {
    let parsed: ChatResponse =
        serde_json::from_str(body).map_err(|e| CompletionError::InvalidBody(e.to_string()))?;

    parsed
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message)
        .and_then(|message| message.content)
        .ok_or(CompletionError::MissingContent)
}
