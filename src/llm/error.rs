use thiserror::Error;

/// Longest response body kept in error messages
const MAX_BODY_CHARS: usize = 500;

/// Error type for LLM provider calls
#[derive(Debug, Error)]
pub enum LlmError {
    #[error("{provider} API key is missing. Set llm.api_key in config or {env}.")]
    MissingApiKey {
        provider: &'static str,
        env: &'static str,
    },

    #[error("{provider} returned HTTP {status}: {body}")]
    Status {
        provider: &'static str,
        status: u16,
        body: String,
    },

    #[error("{provider} request failed: {message}")]
    Transport {
        provider: &'static str,
        message: String,
    },

    #[error("{provider} response did not contain any text")]
    EmptyResponse { provider: &'static str },

    #[error("Model response was not valid JSON ({message}). Raw response: {raw}")]
    InvalidJson { message: String, raw: String },
}

impl LlmError {
    pub fn status(provider: &'static str, status: u16, body: &str) -> Self {
        Self::Status {
            provider,
            status,
            body: truncate(body.trim(), MAX_BODY_CHARS),
        }
    }

    pub fn invalid_json(message: impl ToString, raw: &str) -> Self {
        Self::InvalidJson {
            message: message.to_string(),
            raw: truncate(raw.trim(), MAX_BODY_CHARS),
        }
    }

    /// Whether repeating the same request may succeed.
    ///
    /// Rate limits, server errors and connection problems are transient. A bad
    /// request or an unknown model will fail the same way again, but may still
    /// succeed with a different model.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Status { status, .. } => *status == 429 || *status >= 500,
            Self::Transport { .. } | Self::EmptyResponse { .. } => true,
            Self::MissingApiKey { .. } | Self::InvalidJson { .. } => false,
        }
    }

    /// Whether trying the next model in the chain is pointless.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Self::MissingApiKey { .. } | Self::Status { status: 401 | 403, .. }
        )
    }
}

fn truncate(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text.to_string(),
    }
}
