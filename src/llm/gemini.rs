use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::config::{Settings, GEMINI_KEY_VARS};
use crate::llm::client::{GenerationRequest, LlmProvider};
use crate::llm::error::LlmError;

const PROVIDER: &str = "Gemini";
const DEFAULT_GEMINI_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta";

pub struct GeminiClient {
    http: Client,
    api_key: String,
    model: String,
    endpoint: String,
}

impl GeminiClient {
    pub fn from_settings(settings: &Settings, model: &str) -> Result<Self> {
        Self::with_key(settings, model, settings.llm.resolved_api_key())
    }

    pub fn with_key(settings: &Settings, model: &str, api_key: Option<String>) -> Result<Self> {
        let api_key = match api_key {
            Some(key) if !key.trim().is_empty() => key.trim().to_string(),
            _ => {
                return Err(LlmError::MissingApiKey {
                    provider: PROVIDER,
                    env: GEMINI_KEY_VARS[1],
                }
                .into())
            }
        };

        let endpoint = if settings.llm.endpoint.trim().is_empty() {
            DEFAULT_GEMINI_ENDPOINT.to_string()
        } else {
            settings
                .llm
                .endpoint
                .trim()
                .trim_end_matches('/')
                .to_string()
        };

        Ok(Self {
            http: Client::builder()
                .timeout(Duration::from_secs(settings.llm.timeout_secs))
                .build()
                .context("Failed to build Gemini HTTP client")?,
            api_key,
            model: model.trim().to_string(),
            endpoint,
        })
    }

    fn request_url(&self) -> String {
        format!(
            "{}/models/{}:generateContent?key={}",
            self.endpoint, self.model, self.api_key
        )
    }
}

fn build_body(request: &GenerationRequest<'_>) -> GeminiGenerateContentRequest {
    GeminiGenerateContentRequest {
        contents: vec![GeminiContent {
            role: Some("user".to_string()),
            parts: vec![GeminiPart {
                text: request.prompt.to_string(),
            }],
        }],
        system_instruction: request.system_prompt.map(|system| GeminiContent {
            role: None,
            parts: vec![GeminiPart {
                text: system.to_string(),
            }],
        }),
        generation_config: GeminiGenerationConfig {
            temperature: request.temperature,
            max_output_tokens: request.max_tokens,
            response_mime_type: request
                .json_output
                .then(|| "application/json".to_string()),
        },
    }
}

fn extract_text(payload: &GeminiGenerateContentResponse) -> Option<String> {
    payload
        .candidates
        .iter()
        .filter_map(|c| c.content.as_ref())
        .map(|content| {
            content
                .parts
                .iter()
                .filter_map(|p| p.text.as_deref())
                .collect::<String>()
        })
        .map(|text| text.trim().to_string())
        .find(|text| !text.is_empty())
}

#[async_trait]
impl LlmProvider for GeminiClient {
    async fn generate(&self, request: GenerationRequest<'_>) -> Result<String> {
        let body = build_body(&request);

        tracing::debug!(model = %self.model, "Sending Gemini request");

        let response = self
            .http
            .post(self.request_url())
            .json(&body)
            .send()
            .await
            .map_err(|e| LlmError::Transport {
                provider: PROVIDER,
                message: e.without_url().to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(LlmError::status(PROVIDER, status.as_u16(), &body).into());
        }

        let payload: GeminiGenerateContentResponse = response
            .json()
            .await
            .context("Failed to parse Gemini response")?;

        let text = extract_text(&payload).ok_or(LlmError::EmptyResponse { provider: PROVIDER })?;

        Ok(text)
    }

    fn label(&self) -> String {
        format!("gemini/{}", self.model)
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiGenerateContentRequest {
    contents: Vec<GeminiContent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<GeminiContent>,
    generation_config: GeminiGenerationConfig,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiGenerationConfig {
    temperature: f32,
    max_output_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_mime_type: Option<String>,
}

#[derive(Debug, Serialize)]
struct GeminiContent {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    parts: Vec<GeminiPart>,
}

#[derive(Debug, Serialize)]
struct GeminiPart {
    text: String,
}

#[derive(Debug, Deserialize)]
struct GeminiGenerateContentResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
}

#[derive(Debug, Deserialize)]
struct GeminiCandidate {
    content: Option<GeminiContentResponse>,
}

#[derive(Debug, Deserialize)]
struct GeminiContentResponse {
    #[serde(default)]
    parts: Vec<GeminiPartResponse>,
}

#[derive(Debug, Deserialize)]
struct GeminiPartResponse {
    text: Option<String>,
}
