use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use super::GenerationError;
use crate::config::GenerationConfig;

/// A single instruction pair sent to the completion service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionRequest {
    pub system_prompt: String,
    pub user_prompt: String,
}

/// A completion service that answers with a JSON object.
///
/// Each call is independent; no conversation state is kept between calls.
#[async_trait]
pub trait CompletionBackend: Send + Sync {
    async fn complete_json(&self, request: CompletionRequest) -> Result<Value, GenerationError>;
}

/// OpenAI-compatible Chat Completions backend in JSON mode.
pub struct OpenAiBackend {
    http: Client,
    api_key: Option<String>,
    base_url: String,
    model: String,
}

impl OpenAiBackend {
    pub fn from_config(config: &GenerationConfig) -> Result<Self, GenerationError> {
        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(GenerationError::Network)?;

        Ok(Self {
            http,
            api_key: config.api_key.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
        })
    }

    fn build_request_body(&self, request: &CompletionRequest) -> Value {
        serde_json::json!({
            "model": self.model,
            "messages": [
                { "role": "system", "content": request.system_prompt },
                { "role": "user", "content": request.user_prompt },
            ],
            "response_format": { "type": "json_object" },
        })
    }
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
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

/// Parses the first choice's content as JSON; an empty reply counts as `{}`.
fn decode_reply(response: ChatResponse) -> Result<Value, GenerationError> {
    let content = response
        .choices
        .into_iter()
        .next()
        .and_then(|c| c.message.content)
        .filter(|c| !c.trim().is_empty())
        .unwrap_or_else(|| "{}".to_string());

    serde_json::from_str(&content).map_err(|e| GenerationError::InvalidReply(e.to_string()))
}

#[async_trait]
impl CompletionBackend for OpenAiBackend {
    async fn complete_json(&self, request: CompletionRequest) -> Result<Value, GenerationError> {
        let api_key = self.api_key.as_ref().ok_or(GenerationError::NotConfigured)?;
        let url = format!("{}/v1/chat/completions", self.base_url);
        debug!(%self.model, %url, "complete_json: sending request");

        let response = self
            .http
            .post(&url)
            .bearer_auth(api_key)
            .json(&self.build_request_body(&request))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            debug!(status = status.as_u16(), "complete_json: API error");
            return Err(GenerationError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body: ChatResponse = response.json().await?;
        decode_reply(body)
    }
}
