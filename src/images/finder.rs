//! Per-slide illustration lookup

use anyhow::{Context, Result};
use reqwest::Client;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::config::ImageSettings;
use crate::images::download::download_image;
use crate::images::query::{build_search_query, sanitize_model_query};
use crate::images::search::ImageSearch;
use crate::llm::prompts::{build_image_query_prompt, IMAGE_QUERY_SYSTEM_PROMPT};
use crate::llm::{GenerationRequest, LlmProvider};
use crate::presentation::Slide;

pub struct ImageFinder {
    search: ImageSearch,
    http: Client,
    /// Where images are saved
    dir: PathBuf,
    /// Directory the deck is written to; embedded paths are relative to it
    deck_dir: PathBuf,
    per_page: usize,
}

impl ImageFinder {
    pub fn new(
        search: ImageSearch,
        http: Client,
        dir: PathBuf,
        deck_dir: PathBuf,
        per_page: usize,
    ) -> Self {
        Self {
            search,
            http,
            dir,
            deck_dir,
            per_page: per_page.max(1),
        }
    }

    /// Build a finder for a deck written to `output`.
    pub fn from_settings(settings: &ImageSettings, output: &Path) -> Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .context("Failed to build image HTTP client")?;

        let deck_dir = output
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));

        Ok(Self::new(
            ImageSearch::from_settings(settings, http.clone()),
            http,
            settings.dir_for_output(output),
            deck_dir,
            settings.per_page,
        ))
    }

    pub fn has_sources(&self) -> bool {
        !self.search.is_empty()
    }

    /// Ask the model for a search query, falling back to one built from the slide.
    async fn search_query(&self, provider: &dyn LlmProvider, slide: &Slide) -> String {
        let prompt = build_image_query_prompt(&slide.title, &slide.content);
        let request = GenerationRequest::new(&prompt)
            .system(IMAGE_QUERY_SYSTEM_PROMPT)
            .temperature(0.7)
            .max_tokens(100);

        match provider.generate(request).await {
            Ok(answer) => sanitize_model_query(&answer)
                .unwrap_or_else(|| build_search_query(&slide.title, &slide.content)),
            Err(e) => {
                tracing::warn!("Image query generation failed: {:#}", e);
                build_search_query(&slide.title, &slide.content)
            }
        }
    }

    /// Path written into the slide Markdown for an image saved at `path`.
    fn embed_path(&self, path: &Path) -> String {
        let relative = path.strip_prefix(&self.deck_dir).unwrap_or(path);
        relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/")
    }

    /// Embed an illustration in each slide. Slides keep their content when no image is found.
    pub async fn attach(&self, provider: &dyn LlmProvider, slides: Vec<Slide>) -> Vec<Slide> {
        let mut result = Vec::with_capacity(slides.len());

        for mut slide in slides {
            let query = self.search_query(provider, &slide).await;
            tracing::info!("Searching images for '{}': {}", slide.title, query);

            let urls = self.search.search(&query, self.per_page).await;
            let Some(url) = urls.first() else {
                tracing::info!("No images found for slide: {}", slide.title);
                result.push(slide);
                continue;
            };

            match download_image(&self.http, url, &self.dir).await {
                Ok(path) => {
                    let embed = self.embed_path(&path);
                    slide.content = embed_image(&slide.content, &embed, &slide.title);
                    slide.image_path = Some(embed);
                    tracing::info!("Added image to slide: {}", slide.title);
                }
                Err(e) => tracing::warn!("Failed to download image for {}: {:#}", slide.title, e),
            }

            result.push(slide);
        }

        result
    }
}

/// Prepend a Markdown image to slide content.
pub fn embed_image(content: &str, image_path: &str, slide_title: &str) -> String {
    format!("\n\n![Illustration for {slide_title}]({image_path})\n\n{content}")
}
