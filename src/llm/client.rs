use anyhow::Result;
use async_trait::async_trait;
use std::time::Duration;

use crate::config::Settings;
use crate::llm::gemini::GeminiClient;
use crate::llm::mock::MockProvider;
use crate::llm::openai::OpenAiClient;
use crate::llm::retry::RetryingProvider;
use crate::SlidecraftError;

/// Provider names accepted in `llm.provider` and `--provider`
pub const SUPPORTED_PROVIDERS: &[&str] = &["gemini", "openai", "mock"];

/// A single text generation request.
#[derive(Debug, Clone, Copy)]
pub struct GenerationRequest<'a> {
    pub system_prompt: Option<&'a str>,
    pub prompt: &'a str,
    pub temperature: f32,
    pub max_tokens: u32,
    /// Ask the provider for a bare JSON object
    pub json_output: bool,
}

impl<'a> GenerationRequest<'a> {
    pub fn new(prompt: &'a str) -> Self {
        Self {
            system_prompt: None,
            prompt,
            temperature: 0.7,
            max_tokens: 1000,
            json_output: false,
        }
    }

    pub fn system(mut self, system_prompt: &'a str) -> Self {
        self.system_prompt = Some(system_prompt);
        self
    }

    pub fn temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn json(mut self) -> Self {
        self.json_output = true;
        self
    }
}

#[async_trait]
pub trait LlmProvider: Send + Sync {
    async fn generate(&self, request: GenerationRequest<'_>) -> Result<String>;

    /// Human-readable `provider/model` label for logs
    fn label(&self) -> String;
}

/// Build an LLM provider from runtime settings.
///
/// Remote providers get one client per model in the fallback chain, wrapped
/// in a [`RetryingProvider`].
pub fn build_provider(settings: &Settings) -> Result<Box<dyn LlmProvider>> {
    let provider = settings.llm.provider_name();

    let chain: Vec<Box<dyn LlmProvider>> = match provider.as_str() {
        "mock" => return Ok(Box::new(MockProvider::new())),
        "gemini" => settings
            .llm
            .model_chain()
            .iter()
            .map(|model| {
                GeminiClient::from_settings(settings, model)
                    .map(|c| Box::new(c) as Box<dyn LlmProvider>)
            })
            .collect::<Result<_>>()?,
        "openai" => settings
            .llm
            .model_chain()
            .iter()
            .map(|model| {
                OpenAiClient::from_settings(settings, model)
                    .map(|c| Box::new(c) as Box<dyn LlmProvider>)
            })
            .collect::<Result<_>>()?,
        other => {
            return Err(SlidecraftError::Config(format!(
                "Unsupported llm.provider '{}'. Supported providers: {}",
                other,
                SUPPORTED_PROVIDERS.join(", ")
            ))
            .into())
        }
    };

    Ok(Box::new(RetryingProvider::new(
        chain,
        settings.llm.max_retries,
        Duration::from_millis(settings.llm.retry_backoff_ms),
    )))
}
