//! LLM Client — the single point of entry for all Claude API calls.
//!
//! ARCHITECTURAL RULE: no other module may talk to the Anthropic API
//! directly. The default collaborators in [`crate::collaborators`] all go
//! through this client.

use anyhow::Result;
use reqwest::Client;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

const API_URL: &str = "https://api.anthropic.com/v1/messages";
const API_VERSION: &str = "2023-06-01";
/// Default model for all engine LLM calls. Pinned so parser/matcher output
/// schemas stay stable across deployments.
pub const DEFAULT_MODEL: &str = "claude-sonnet-4-5";
const MAX_TOKENS: u32 = 4096;
/// Backoff schedule for transient failures, in milliseconds.
const RETRY_BACKOFF_MS: [u64; 3] = [500, 1500, 4000];

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Response parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Exhausted {attempts} attempts against the API")]
    Exhausted { attempts: u32 },

    #[error("LLM returned no text content")]
    EmptyContent,
}

impl LlmError {
    /// Transient failures are worth retrying at the application layer;
    /// schema mismatches and empty responses are not.
    pub fn is_transient(&self) -> bool {
        match self {
            LlmError::Http(e) => e.is_timeout() || e.is_connect(),
            LlmError::Api { status, .. } => *status == 429 || *status >= 500,
            LlmError::Exhausted { .. } => true,
            LlmError::Parse(_) | LlmError::EmptyContent => false,
        }
    }
}

#[derive(Debug, Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    system: &'a str,
    messages: [Message<'a>; 1],
}

#[derive(Debug, Serialize)]
struct Message<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    content: Vec<ContentBlock>,
    usage: Usage,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    block_type: String,
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Usage {
    input_tokens: u32,
    output_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

/// Shared Anthropic Messages API client with retry on 429/5xx and a
/// structured-output helper.
#[derive(Clone)]
pub struct LlmClient {
    client: Client,
    api_key: String,
    model: String,
}

impl LlmClient {
    pub fn new(api_key: String) -> Self {
        Self::with_model(api_key, DEFAULT_MODEL.to_string())
    }

    pub fn with_model(api_key: String, model: String) -> Self {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(120))
            .build()
            .unwrap_or_default();
        Self {
            client,
            api_key,
            model,
        }
    }

    /// Sends one prompt and returns the concatenated text content.
    /// Retries transient failures per [`RETRY_BACKOFF_MS`].
    pub async fn call(&self, prompt: &str, system: &str) -> Result<String, LlmError> {
        let body = MessagesRequest {
            model: &self.model,
            max_tokens: MAX_TOKENS,
            system,
            messages: [Message {
                role: "user",
                content: prompt,
            }],
        };

        let mut last_error: Option<LlmError> = None;
        let attempts = RETRY_BACKOFF_MS.len() as u32 + 1;

        for attempt in 0..attempts {
            if attempt > 0 {
                let delay = RETRY_BACKOFF_MS[(attempt - 1) as usize];
                warn!(attempt, delay_ms = delay, "retrying LLM call");
                tokio::time::sleep(std::time::Duration::from_millis(delay)).await;
            }

            let response = match self
                .client
                .post(API_URL)
                .header("x-api-key", &self.api_key)
                .header("anthropic-version", API_VERSION)
                .header("content-type", "application/json")
                .json(&body)
                .send()
                .await
            {
                Ok(r) => r,
                Err(e) => {
                    last_error = Some(LlmError::Http(e));
                    continue;
                }
            };

            let status = response.status();
            if status.as_u16() == 429 || status.is_server_error() {
                let text = response.text().await.unwrap_or_default();
                warn!(%status, "LLM API transient failure: {text}");
                last_error = Some(LlmError::Api {
                    status: status.as_u16(),
                    message: text,
                });
                continue;
            }

            if !status.is_success() {
                let text = response.text().await.unwrap_or_default();
                let message = serde_json::from_str::<ApiError>(&text)
                    .map(|e| e.error.message)
                    .unwrap_or(text);
                return Err(LlmError::Api {
                    status: status.as_u16(),
                    message,
                });
            }

            let parsed: MessagesResponse = response.json().await?;
            debug!(
                input_tokens = parsed.usage.input_tokens,
                output_tokens = parsed.usage.output_tokens,
                "LLM call succeeded"
            );

            let text: String = parsed
                .content
                .iter()
                .filter(|b| b.block_type == "text")
                .filter_map(|b| b.text.as_deref())
                .collect();
            if text.is_empty() {
                return Err(LlmError::EmptyContent);
            }
            return Ok(text);
        }

        Err(last_error.unwrap_or(LlmError::Exhausted { attempts }))
    }

    /// Calls the LLM and deserializes the response text as JSON.
    /// The prompt must instruct the model to return JSON only.
    pub async fn call_json<T: DeserializeOwned>(
        &self,
        prompt: &str,
        system: &str,
    ) -> Result<T, LlmError> {
        let text = self.call(prompt, system).await?;
        let stripped = strip_code_fences(&text);
        serde_json::from_str(stripped).map_err(LlmError::Parse)
    }
}

/// Strips a ```json ... ``` or ``` ... ``` fence the model may wrap around
/// its output despite instructions.
fn strip_code_fences(text: &str) -> &str {
    let trimmed = text.trim();
    let inner = trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .map(str::trim_start);
    match inner {
        Some(rest) => rest.strip_suffix("```").map(str::trim).unwrap_or(rest),
        None => trimmed,
    }
}
