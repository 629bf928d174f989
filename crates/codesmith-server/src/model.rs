//! Hosted code-generation model client.
//!
//! [`CodeModel`] is the boundary trait the generate handler depends on; the
//! production implementation is [`ChatModel`], an OpenAI-compatible
//! chat-completions client. Tests substitute a mock. The client instance is
//! constructed once at startup and injected into the application state --
//! no lazily initialized globals.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;

use crate::error::ApiError;

/// Boundary trait for the hosted generative model.
#[async_trait]
pub trait CodeModel: Send + Sync {
    /// Sends `prompt` to the model and returns the raw response text.
    async fn generate(&self, prompt: &str) -> Result<String, ApiError>;
}

/// Builds the full model prompt for a generation request.
///
/// The model is asked to return bare code; fence stripping still runs on the
/// response since models do not reliably comply.
pub fn code_prompt(language: &str, prompt: &str) -> String {
    format!(
        "Generate {} code for the following prompt. Return only the code without \
         any markdown formatting, explanations, or comments unless specifically \
         requested:\n\n{}",
        language, prompt
    )
}

/// Connection settings for the chat-completions provider.
#[derive(Debug, Clone)]
pub struct ModelConfig {
    /// Base URL of the OpenAI-compatible API.
    pub api_base_url: String,
    /// Bearer token.
    pub api_key: String,
    /// Model slug to request.
    pub model: String,
}

impl ModelConfig {
    /// Reads provider settings from the environment.
    ///
    /// `CODESMITH_API_KEY` is required; `CODESMITH_API_BASE_URL` and
    /// `CODESMITH_MODEL` have defaults.
    pub fn from_env() -> Result<Self, String> {
        let api_key = std::env::var("CODESMITH_API_KEY")
            .map_err(|_| "CODESMITH_API_KEY environment variable is required".to_string())?;
        let api_base_url = std::env::var("CODESMITH_API_BASE_URL")
            .unwrap_or_else(|_| "https://openrouter.ai/api/v1".to_string());
        let model = std::env::var("CODESMITH_MODEL")
            .unwrap_or_else(|_| "google/gemini-2.5-flash".to_string());

        Ok(ModelConfig {
            api_base_url,
            api_key,
            model,
        })
    }
}

/// OpenAI-compatible chat-completions client.
pub struct ChatModel {
    config: ModelConfig,
    client: reqwest::Client,
}

impl ChatModel {
    /// Creates a client from the given provider settings.
    pub fn new(config: ModelConfig) -> Self {
        ChatModel {
            config,
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl CodeModel for ChatModel {
    async fn generate(&self, prompt: &str) -> Result<String, ApiError> {
        let endpoint = format!(
            "{}/chat/completions",
            self.config.api_base_url.trim_end_matches('/')
        );

        let body = json!({
            "model": self.config.model,
            "messages": [{
                "role": "user",
                "content": prompt
            }]
        });

        let response = self
            .client
            .post(endpoint)
            .header("Authorization", format!("Bearer {}", self.config.api_key))
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|err| {
                ApiError::GenerationFailed(format!("model request failed: {}", err))
            })?;

        let status = response.status();
        let body_text = response.text().await.map_err(|err| {
            ApiError::GenerationFailed(format!("model response read failed: {}", err))
        })?;

        if !status.is_success() {
            return Err(ApiError::GenerationFailed(format!(
                "model request failed ({}): {}",
                status, body_text
            )));
        }

        extract_content(&body_text)
    }
}

/// Pulls the assistant message text out of a chat-completions response body.
fn extract_content(body_text: &str) -> Result<String, ApiError> {
    let parsed: ChatCompletionsResponse = serde_json::from_str(body_text).map_err(|err| {
        ApiError::GenerationFailed(format!("model response parse failed: {}", err))
    })?;

    parsed
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .filter(|s| !s.trim().is_empty())
        .ok_or_else(|| {
            ApiError::GenerationFailed("model response missing assistant content".to_string())
        })
}

#[derive(Debug, Deserialize)]
struct ChatCompletionsResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    content: Option<String>,
}
