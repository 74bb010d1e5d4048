//! Deterministic offline provider.
//!
//! Useful for trying the tool without an API key and for end-to-end tests.

use anyhow::Result;
use async_trait::async_trait;
use serde_json::json;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::llm::client::{GenerationRequest, LlmProvider};
use crate::llm::prompts::{IMAGE_QUERY_HEADING, KEY_POINTS_HEADING};

#[derive(Debug, Default)]
pub struct MockProvider {
    calls: AtomicUsize,
}

impl MockProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of requests served so far
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::Relaxed)
    }

    fn outline() -> String {
        json!({
            "title": "Artificial Intelligence: Past, Present, and Future",
            "slides": [
                {
                    "title": "Introduction to AI",
                    "key_points": [
                        "Definition of Artificial Intelligence",
                        "Brief history since the 1950s",
                        "Evolution from rule-based systems to machine learning"
                    ]
                },
                {
                    "title": "Current AI Landscape",
                    "key_points": [
                        "Deep learning breakthroughs",
                        "Computer vision and NLP advances",
                        "Recent milestones (AlexNet, AlphaGo, GPT-3)"
                    ]
                },
                {
                    "title": "Future of AI",
                    "key_points": [
                        "Opportunities in healthcare, climate and science",
                        "Ethical challenges and concerns",
                        "Prospects for Artificial General Intelligence"
                    ]
                },
                {
                    "title": "Conclusion",
                    "key_points": [
                        "Summary of AI's transformative potential",
                        "Importance of responsible development",
                        "Call for collaboration across disciplines"
                    ]
                }
            ]
        })
        .to_string()
    }

    fn slide_content(prompt: &str) -> String {
        let points: Vec<&str> = prompt
            .lines()
            .skip_while(|line| !line.starts_with(KEY_POINTS_HEADING))
            .skip(1)
            .take_while(|line| !line.trim().is_empty())
            .filter_map(|line| line.strip_prefix("- "))
            .collect();

        if points.is_empty() {
            return "- Point 1\n- Point 2\n- Point 3".to_string();
        }

        points
            .iter()
            .map(|p| format!("- **{p}**"))
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn analysis(prompt: &str) -> String {
        let words = prompt.split_whitespace().count();
        format!(
            "1. Main topic: the provided material\n\
             2. Key concepts: drawn from {words} words of input\n\
             3. Audience: general\n\
             4. Tone: informative"
        )
    }
}

#[async_trait]
impl LlmProvider for MockProvider {
    async fn generate(&self, request: GenerationRequest<'_>) -> Result<String> {
        self.calls.fetch_add(1, Ordering::Relaxed);

        let prompt = request.prompt;
        let text = if request.json_output {
            Self::outline()
        } else if prompt.starts_with(IMAGE_QUERY_HEADING) {
            "presentation illustration".to_string()
        } else if prompt.contains(KEY_POINTS_HEADING) {
            Self::slide_content(prompt)
        } else {
            Self::analysis(prompt)
        };

        Ok(text)
    }

    fn label(&self) -> String {
        "mock".to_string()
    }
}
