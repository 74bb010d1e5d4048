//! LLM module for slidecraft
//!
//! Provider clients for Gemini and OpenAI, an offline mock provider, and the
//! retry/model-fallback chain the pipeline talks to.

mod client;
mod error;
mod gemini;
mod mock;
mod openai;
pub mod prompts;
mod retry;
mod structured;

pub use client::{build_provider, GenerationRequest, LlmProvider, SUPPORTED_PROVIDERS};
pub use error::LlmError;
pub use gemini::GeminiClient;
pub use mock::MockProvider;
pub use openai::OpenAiClient;
pub use retry::RetryingProvider;
pub use structured::{generate_json, strip_code_fences, with_schema};
