//! Presentation pipeline orchestration
//!
//! Material is analyzed, turned into an outline, and each outline entry is
//! expanded into slide text with its own model call. Images and rendering
//! happen last.

use anyhow::{Context, Result};
use chrono::Utc;

use crate::images::ImageFinder;
use crate::llm::prompts::{
    build_analysis_prompt, build_outline_prompt, build_slide_prompt, ANALYSIS_SYSTEM_PROMPT,
    OUTLINE_SYSTEM_PROMPT, SLIDE_SYSTEM_PROMPT,
};
use crate::llm::{generate_json, GenerationRequest, LlmProvider};
use crate::presentation::{Deck, Outline, Slide};
use crate::render::{self, PresentationFormat, Theme};
use crate::SlidecraftError;

/// Progress callback: `(slide number, total slides)`, slide numbers start at 1
pub type ProgressCallback = Box<dyn Fn(usize, usize) + Send + Sync>;

/// Pipeline knobs
#[derive(Default)]
pub struct PipelineOptions {
    pub format: PresentationFormat,
    pub theme: Theme,
    /// Run the analysis call before the outline call
    pub analyze_material: bool,
    pub image_finder: Option<ImageFinder>,
}

/// Result of a full pipeline run
#[derive(Debug)]
pub struct PipelineOutput {
    pub outline: Outline,
    pub deck: Deck,
}

pub struct PresentationPipeline {
    provider: Box<dyn LlmProvider>,
    options: PipelineOptions,
    progress: Option<ProgressCallback>,
}

impl PresentationPipeline {
    pub fn new(provider: Box<dyn LlmProvider>, options: PipelineOptions) -> Self {
        Self {
            provider,
            options,
            progress: None,
        }
    }

    /// Report slide progress through `callback`.
    pub fn with_progress(mut self, callback: ProgressCallback) -> Self {
        self.progress = Some(callback);
        self
    }

    /// Extract the key information from raw material.
    ///
    /// With analysis disabled the trimmed material is returned as-is.
    pub async fn analyze_material(&self, material: &str) -> Result<String> {
        let material = material.trim();
        if material.is_empty() {
            return Err(SlidecraftError::EmptyMaterial.into());
        }

        if !self.options.analyze_material {
            tracing::debug!("Material analysis disabled, using raw material");
            return Ok(material.to_string());
        }

        tracing::info!("Analyzing material ({} chars)", material.len());
        let prompt = build_analysis_prompt(material);
        let analysis = self
            .provider
            .generate(
                GenerationRequest::new(&prompt)
                    .system(ANALYSIS_SYSTEM_PROMPT)
                    .temperature(0.3)
                    .max_tokens(2000),
            )
            .await
            .context("Material analysis failed")?;

        if analysis.trim().is_empty() {
            tracing::warn!("Model returned an empty analysis, using raw material");
            return Ok(material.to_string());
        }

        Ok(analysis)
    }

    /// Ask the model for a structured outline.
    pub async fn generate_outline(&self, analysis: &str) -> Result<Outline> {
        tracing::info!("Generating outline");
        let prompt = build_outline_prompt(analysis);
        let outline: Outline = generate_json(
            self.provider.as_ref(),
            GenerationRequest::new(&prompt)
                .system(OUTLINE_SYSTEM_PROMPT)
                .temperature(0.4)
                .max_tokens(1500),
            &Outline::schema(),
        )
        .await
        .context("Outline generation failed")?;

        let outline = outline.normalize()?;
        tracing::info!(
            "Outline '{}' with {} slides",
            outline.title,
            outline.slides.len()
        );
        Ok(outline)
    }

    /// Expand every outline entry into a slide, in outline order.
    pub async fn create_slides(&self, outline: &Outline, analysis: &str) -> Result<Vec<Slide>> {
        let total = outline.slides.len();
        let mut slides = Vec::with_capacity(total);

        for (i, entry) in outline.slides.iter().enumerate() {
            if let Some(progress) = &self.progress {
                progress(i + 1, total);
            }
            tracing::debug!("Creating slide {}/{}: {}", i + 1, total, entry.title);

            let prompt = build_slide_prompt(&entry.title, &entry.key_points, analysis);
            let content = self
                .provider
                .generate(
                    GenerationRequest::new(&prompt)
                        .system(SLIDE_SYSTEM_PROMPT)
                        .temperature(0.5)
                        .max_tokens(1000),
                )
                .await
                .with_context(|| format!("Failed to create slide '{}'", entry.title))?;

            let content = match content.trim() {
                "" => {
                    tracing::warn!("Empty content for slide '{}', using key points", entry.title);
                    entry.bullets()
                }
                text => text.to_string(),
            };

            slides.push(Slide::new(entry.title.clone(), content));
        }

        Ok(slides)
    }

    /// Embed illustrations when an image finder is configured.
    pub async fn attach_images(&self, slides: Vec<Slide>) -> Vec<Slide> {
        match &self.options.image_finder {
            Some(finder) if finder.has_sources() => {
                finder.attach(self.provider.as_ref(), slides).await
            }
            Some(_) => {
                tracing::warn!("Images enabled but no image source has an API key");
                slides
            }
            None => slides,
        }
    }

    /// Render slides into a deck.
    pub fn build_deck(&self, title: &str, slides: Vec<Slide>) -> Deck {
        let generated_at = Utc::now();
        let content = render::render(
            self.options.format,
            title,
            &slides,
            self.options.theme,
            generated_at,
        );
        Deck {
            title: title.to_string(),
            slides,
            format: self.options.format,
            theme: self.options.theme,
            content,
            generated_at,
        }
    }

    /// Analysis and outline only.
    pub async fn outline(&self, material: &str) -> Result<Outline> {
        let analysis = self.analyze_material(material).await?;
        self.generate_outline(&analysis).await
    }

    pub async fn run(&self, material: &str) -> Result<PipelineOutput> {
        let analysis = self.analyze_material(material).await?;
        let outline = self.generate_outline(&analysis).await?;
        self.finish(outline, &analysis).await
    }

    /// Build a deck from a saved outline. Material is optional context for the slide prompts.
    pub async fn run_from_outline(
        &self,
        outline: Outline,
        material: Option<&str>,
    ) -> Result<PipelineOutput> {
        let outline = outline.normalize()?;
        let analysis = match material.map(str::trim) {
            Some(m) if !m.is_empty() => self.analyze_material(m).await?,
            _ => String::new(),
        };
        self.finish(outline, &analysis).await
    }

    async fn finish(&self, outline: Outline, analysis: &str) -> Result<PipelineOutput> {
        let slides = self.create_slides(&outline, analysis).await?;
        let slides = self.attach_images(slides).await;
        let deck = self.build_deck(&outline.title, slides);
        Ok(PipelineOutput { outline, deck })
    }
}
