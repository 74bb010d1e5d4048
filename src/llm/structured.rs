//! JSON responses from text models

use anyhow::Result;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::llm::client::{GenerationRequest, LlmProvider};
use crate::llm::error::LlmError;

/// Remove a Markdown code fence wrapped around the whole response.
pub fn strip_code_fences(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let Some(body) = rest.strip_suffix("```") else {
        return trimmed;
    };

    // Drop the info string (`json`, `JSON`, ...) on the opening fence line.
    let body = match body.find('\n') {
        Some(newline)
            if body[..newline]
                .trim()
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_') =>
        {
            &body[newline + 1..]
        }
        _ => body,
    };
    body.trim()
}

/// Prefix `prompt` with instructions to answer with JSON matching `schema`.
pub fn with_schema(prompt: &str, schema: &Value) -> String {
    let schema = serde_json::to_string_pretty(schema).unwrap_or_else(|_| schema.to_string());
    format!(
        "You must respond with a JSON object that conforms to this schema:\n\
{schema}\n\
\n\
Respond with valid JSON only, without commentary.\n\
\n\
{prompt}"
    )
}

/// Request JSON output and deserialize it.
pub async fn generate_json<T: DeserializeOwned>(
    provider: &dyn LlmProvider,
    request: GenerationRequest<'_>,
    schema: &Value,
) -> Result<T> {
    let prompt = with_schema(request.prompt, schema);
    let request = GenerationRequest {
        prompt: &prompt,
        json_output: true,
        ..request
    };

    let raw = provider.generate(request).await?;
    let value = serde_json::from_str(strip_code_fences(&raw))
        .map_err(|e| LlmError::invalid_json(e, &raw))?;

    Ok(value)
}
