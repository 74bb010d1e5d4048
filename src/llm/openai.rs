use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::config::{Settings, OPENAI_KEY_VARS};
use crate::llm::client::{GenerationRequest, LlmProvider};
use crate::llm::error::LlmError;

const PROVIDER: &str = "OpenAI";
const DEFAULT_OPENAI_ENDPOINT: &str = "https://api.openai.com/v1";

/// Chat Completions client. Also works with OpenAI-compatible servers via `llm.endpoint`.
pub struct OpenAiClient {
    http: Client,
    api_key: String,
    model: String,
    endpoint: String,
}

impl OpenAiClient {
    pub fn from_settings(settings: &Settings, model: &str) -> Result<Self> {
        Self::with_key(settings, model, settings.llm.resolved_api_key())
    }

    pub fn with_key(settings: &Settings, model: &str, api_key: Option<String>) -> Result<Self> {
        let api_key = api_key
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty())
            .ok_or(LlmError::MissingApiKey {
                provider: PROVIDER,
                env: OPENAI_KEY_VARS[1],
            })?;

        let endpoint = match settings.llm.endpoint.trim() {
            "" => DEFAULT_OPENAI_ENDPOINT.to_string(),
            custom => custom.trim_end_matches('/').to_string(),
        };

        Ok(Self {
            http: Client::builder()
                .timeout(Duration::from_secs(settings.llm.timeout_secs))
                .build()
                .context("Failed to build OpenAI HTTP client")?,
            api_key,
            model: model.trim().to_string(),
            endpoint,
        })
    }

    fn request_url(&self) -> String {
        format!("{}/chat/completions", self.endpoint)
    }

    fn build_body(&self, request: &GenerationRequest<'_>) -> ChatCompletionRequest {
        let mut messages = Vec::with_capacity(2);
        if let Some(system) = request.system_prompt {
            messages.push(ChatMessage {
                role: "system".to_string(),
                content: system.to_string(),
            });
        }
        messages.push(ChatMessage {
            role: "user".to_string(),
            content: request.prompt.to_string(),
        });

        ChatCompletionRequest {
            model: self.model.clone(),
            messages,
            temperature: request.temperature,
            max_tokens: request.max_tokens,
            response_format: request.json_output.then(|| ResponseFormat {
                kind: "json_object".to_string(),
            }),
        }
    }
}

#[async_trait]
impl LlmProvider for OpenAiClient {
    async fn generate(&self, request: GenerationRequest<'_>) -> Result<String> {
        let body = self.build_body(&request);

        tracing::debug!(model = %self.model, "Sending OpenAI request");

        let response = self
            .http
            .post(self.request_url())
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| LlmError::Transport {
                provider: PROVIDER,
                message: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(LlmError::status(PROVIDER, status.as_u16(), &body).into());
        }

        let payload: ChatCompletionResponse = response
            .json()
            .await
            .context("Failed to parse OpenAI response")?;

        let text = payload
            .choices
            .iter()
            .filter_map(|c| c.message.content.as_deref())
            .map(str::trim)
            .find(|t| !t.is_empty())
            .map(str::to_string)
            .ok_or(LlmError::EmptyResponse { provider: PROVIDER })?;

        Ok(text)
    }

    fn label(&self) -> String {
        format!("openai/{}", self.model)
    }
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f32,
    max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<ResponseFormat>,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Debug, Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    kind: String,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessageResponse,
}

#[derive(Debug, Deserialize)]
struct ChatMessageResponse {
    content: Option<String>,
}
