//! Retry and model fallback

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use std::time::Duration;

use crate::llm::client::{GenerationRequest, LlmProvider};
use crate::llm::error::LlmError;

/// Tries each provider in order, retrying transient failures with exponential backoff.
pub struct RetryingProvider {
    chain: Vec<Box<dyn LlmProvider>>,
    max_retries: u32,
    backoff: Duration,
}

impl RetryingProvider {
    pub fn new(chain: Vec<Box<dyn LlmProvider>>, max_retries: u32, backoff: Duration) -> Self {
        Self {
            chain,
            max_retries,
            backoff,
        }
    }

    fn delay(&self, attempt: u32) -> Duration {
        self.backoff.saturating_mul(1u32 << attempt.min(16))
    }
}

fn llm_error(err: &anyhow::Error) -> Option<&LlmError> {
    err.downcast_ref::<LlmError>()
}

#[async_trait]
impl LlmProvider for RetryingProvider {
    async fn generate(&self, request: GenerationRequest<'_>) -> Result<String> {
        let mut last_error = None;

        for (index, provider) in self.chain.iter().enumerate() {
            if index > 0 {
                tracing::warn!("Falling back to {}", provider.label());
            }

            let mut attempt = 0;
            let error = loop {
                match provider.generate(request).await {
                    Ok(text) => return Ok(text),
                    Err(e) => {
                        let retryable = llm_error(&e).is_some_and(LlmError::is_retryable);
                        if !retryable || attempt >= self.max_retries {
                            break e;
                        }

                        let delay = self.delay(attempt);
                        attempt += 1;
                        tracing::warn!(
                            "{} failed ({}), retrying in {:?} (attempt {}/{})",
                            provider.label(),
                            e,
                            delay,
                            attempt,
                            self.max_retries
                        );
                        tokio::time::sleep(delay).await;
                    }
                }
            };

            tracing::warn!("{} failed: {}", provider.label(), error);

            if llm_error(&error).is_some_and(LlmError::is_fatal) {
                return Err(error);
            }
            last_error = Some(error);
        }

        let error = last_error.unwrap_or_else(|| anyhow!("No LLM provider configured"));
        Err(error.context(format!("All models failed: {}", self.label())))
    }

    fn label(&self) -> String {
        self.chain
            .iter()
            .map(|p| p.label())
            .collect::<Vec<_>>()
            .join(" -> ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;
    use std::sync::{Arc, Mutex};

    /// Replays scripted results and counts calls.
    struct Scripted {
        name: &'static str,
        results: Mutex<VecDeque<Result<String>>>,
        calls: Arc<Mutex<Vec<&'static str>>>,
    }

    impl Scripted {
        fn boxed(
            name: &'static str,
            results: Vec<Result<String>>,
            calls: &Arc<Mutex<Vec<&'static str>>>,
        ) -> Box<dyn LlmProvider> {
            Box::new(Self {
                name,
                results: Mutex::new(results.into()),
                calls: Arc::clone(calls),
            })
        }
    }

    #[async_trait]
    impl LlmProvider for Scripted {
        async fn generate(&self, _request: GenerationRequest<'_>) -> Result<String> {
            self.calls.lock().unwrap().push(self.name);
            self.results
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Err(anyhow!("script exhausted")))
        }

        fn label(&self) -> String {
            self.name.to_string()
        }
    }

    fn status(code: u16) -> Result<String> {
        Err(LlmError::status("Gemini", code, "boom").into())
    }

    fn ok(text: &str) -> Result<String> {
        Ok(text.to_string())
    }

    #[tokio::test]
    async fn retries_transient_errors_on_same_model() {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let provider = RetryingProvider::new(
            vec![Scripted::boxed("a", vec![status(503), status(429), ok("done")], &calls)],
            2,
            Duration::ZERO,
        );

        let text = provider.generate(GenerationRequest::new("p")).await.unwrap();

        assert_eq!(text, "done");
        assert_eq!(*calls.lock().unwrap(), vec!["a", "a", "a"]);
    }

    #[tokio::test]
    async fn falls_back_after_retries_are_exhausted() {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let provider = RetryingProvider::new(
            vec![
                Scripted::boxed("a", vec![status(500), status(500)], &calls),
                Scripted::boxed("b", vec![ok("from b")], &calls),
            ],
            1,
            Duration::ZERO,
        );

        let text = provider.generate(GenerationRequest::new("p")).await.unwrap();

        assert_eq!(text, "from b");
        assert_eq!(*calls.lock().unwrap(), vec!["a", "a", "b"]);
    }

    #[tokio::test]
    async fn unknown_model_skips_straight_to_fallback() {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let provider = RetryingProvider::new(
            vec![
                Scripted::boxed("a", vec![status(404)], &calls),
                Scripted::boxed("b", vec![ok("from b")], &calls),
            ],
            3,
            Duration::ZERO,
        );

        assert_eq!(
            provider.generate(GenerationRequest::new("p")).await.unwrap(),
            "from b"
        );
        assert_eq!(*calls.lock().unwrap(), vec!["a", "b"]);
    }

    #[tokio::test]
    async fn unauthorized_stops_the_chain() {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let provider = RetryingProvider::new(
            vec![
                Scripted::boxed("a", vec![status(401)], &calls),
                Scripted::boxed("b", vec![ok("unreachable")], &calls),
            ],
            3,
            Duration::ZERO,
        );

        let err = provider.generate(GenerationRequest::new("p")).await.unwrap_err();

        assert!(err.to_string().contains("HTTP 401"));
        assert_eq!(*calls.lock().unwrap(), vec!["a"]);
    }

    #[tokio::test]
    async fn exhausted_chain_names_every_model() {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let provider = RetryingProvider::new(
            vec![
                Scripted::boxed("a", vec![status(400)], &calls),
                Scripted::boxed("b", vec![status(400)], &calls),
            ],
            0,
            Duration::ZERO,
        );

        let err = provider.generate(GenerationRequest::new("p")).await.unwrap_err();

        assert_eq!(err.to_string(), "All models failed: a -> b");
        assert!(format!("{:#}", err).contains("HTTP 400"));
    }

    #[test]
    fn backoff_doubles_per_attempt() {
        let provider = RetryingProvider::new(Vec::new(), 3, Duration::from_millis(500));
        assert_eq!(provider.delay(0), Duration::from_millis(500));
        assert_eq!(provider.delay(2), Duration::from_millis(2000));
    }
}
