//! CLI command implementations

use anyhow::{bail, Context, Result};
use serde::Serialize;
use std::io::Read;
use std::path::{Path, PathBuf};

use crate::cli::args::{ConfigCommand, GenerationArgs};
use crate::config::{mask_secret, Settings, GEMINI_KEY_VARS, OPENAI_KEY_VARS};
use crate::images::{ImageFinder, ImageSearch};
use crate::llm::{build_provider, SUPPORTED_PROVIDERS};
use crate::pipeline::{PipelineOptions, PresentationPipeline};
use crate::presentation::Outline;
use crate::render::{output_path, save_presentation, PresentationFormat, Theme};

/// Options of `slidecraft create` beyond the shared generation flags
#[derive(Debug, Clone, Default)]
pub struct CreateOptions {
    pub output: PathBuf,
    pub format: Option<PresentationFormat>,
    pub theme: Option<Theme>,
    pub images: bool,
    pub from_outline: Option<PathBuf>,
    pub save_outline: Option<PathBuf>,
}

/// Create a presentation and save it
pub async fn create_presentation(
    settings: &Settings,
    generation: GenerationArgs,
    options: CreateOptions,
) -> Result<()> {
    let settings = apply_overrides(settings, &generation);

    let format = options
        .format
        .or_else(|| PresentationFormat::from_path(&options.output))
        .unwrap_or(settings.presentation.format);
    let theme = options.theme.unwrap_or(settings.presentation.theme);
    let target = output_path(&options.output, format);

    let saved_outline = match &options.from_outline {
        Some(path) => Some(
            Outline::load(path)
                .with_context(|| format!("Failed to load outline: {}", path.display()))?,
        ),
        None => None,
    };

    // A saved outline makes the material optional.
    let material = if saved_outline.is_some() {
        read_optional_material(&generation)?
    } else {
        Some(read_material(&generation)?)
    };

    let image_finder = if options.images || settings.images.enabled {
        Some(ImageFinder::from_settings(&settings.images, &target)?)
    } else {
        None
    };

    let provider = build_provider(&settings)?;
    tracing::info!("Using {}", provider.label());

    let pipeline = PresentationPipeline::new(
        provider,
        PipelineOptions {
            format,
            theme,
            analyze_material: settings.presentation.analyze_material,
            image_finder,
        },
    )
    .with_progress(Box::new(|current, total| {
        tracing::info!("Creating slide {}/{}", current, total);
    }));

    let output = match saved_outline {
        Some(outline) => {
            pipeline
                .run_from_outline(outline, material.as_deref())
                .await?
        }
        None => {
            let material = material.unwrap_or_default();
            pipeline.run(&material).await?
        }
    };

    if let Some(path) = &options.save_outline {
        output.outline.save(path)?;
        println!("Outline saved to: {}", path.display());
    }

    let deck = output.deck;
    let saved = save_presentation(&deck.content, &target, deck.format)?;

    println!("Presentation created: {}", deck.title);
    println!("Saved to: {}", saved.display());
    println!("Format: {}", deck.format.as_str());
    println!("Slides: {}", deck.slides.len());
    let images = deck.image_paths().count();
    if images > 0 {
        println!("Images: {images}");
    }
    tracing::debug!("Deck generated at {}", deck.generated_at.to_rfc3339());

    Ok(())
}

/// Generate and print only the outline
pub async fn show_outline(
    settings: &Settings,
    generation: GenerationArgs,
    json: bool,
    output: Option<PathBuf>,
) -> Result<()> {
    let settings = apply_overrides(settings, &generation);
    let material = read_material(&generation)?;

    let pipeline = PresentationPipeline::new(
        build_provider(&settings)?,
        PipelineOptions {
            analyze_material: settings.presentation.analyze_material,
            ..Default::default()
        },
    );
    let outline = pipeline.outline(&material).await?;

    if let Some(path) = &output {
        outline.save(path)?;
        tracing::info!("Outline saved to: {}", path.display());
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&outline)?);
    } else {
        print!("{}", format_outline(&outline));
    }

    Ok(())
}

/// Handle config subcommands
pub fn config_command(settings: &Settings, cmd: ConfigCommand) -> Result<()> {
    match cmd {
        ConfigCommand::Show => {
            let toml = toml::to_string_pretty(&settings.redacted())?;
            println!("{}", toml);
        }
        ConfigCommand::Path => {
            let path = Settings::config_path()?;
            println!("{}", path.display());
        }
        ConfigCommand::Init { force } => {
            let path = Settings::config_path()?;
            if path.exists() && !force {
                bail!(
                    "Config file already exists at {}. Use --force to overwrite.",
                    path.display()
                );
            }
            Settings::write_default(&path)?;
            println!("Configuration initialized at: {}", path.display());
        }
    }

    Ok(())
}

#[derive(Serialize)]
struct DoctorKey {
    provider: &'static str,
    status: &'static str,
    /// Masked key, when one is set
    value: Option<String>,
    env: String,
}

#[derive(Serialize)]
struct DoctorReport {
    provider: String,
    supported: bool,
    models: Vec<String>,
    keys: Vec<DoctorKey>,
    image_sources: Vec<&'static str>,
    config_path: Option<String>,
    config_exists: bool,
    notes: Vec<String>,
}

/// Run diagnostic checks to help troubleshoot provider setup.
pub async fn run_doctor(settings: &Settings, json: bool) -> Result<()> {
    let report = collect_doctor_report(settings);

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("slidecraft doctor");
    println!("provider: {}", report.provider);
    println!("models: {}", report.models.join(" -> "));
    println!();

    for key in &report.keys {
        println!(
            "{:<8} {:<8} {}",
            key.provider,
            key.status,
            key.value.as_deref().unwrap_or(key.env.as_str())
        );
    }

    println!();
    if report.image_sources.is_empty() {
        println!("images: no sources configured");
    } else {
        println!("images: {}", report.image_sources.join(", "));
    }

    match &report.config_path {
        Some(path) if report.config_exists => println!("config: {}", path),
        Some(path) => println!("config: {} (not created, using defaults)", path),
        None => println!("config: unavailable"),
    }

    if !report.notes.is_empty() {
        println!();
        for note in &report.notes {
            println!("{}", note);
        }
    }

    Ok(())
}

fn collect_doctor_report(settings: &Settings) -> DoctorReport {
    let provider = settings.llm.provider_name();
    let supported = SUPPORTED_PROVIDERS.contains(&provider.as_str());

    let mut keys = Vec::new();
    let mut notes = Vec::new();

    for (name, vars) in [("gemini", GEMINI_KEY_VARS), ("openai", OPENAI_KEY_VARS)] {
        let mut llm = settings.llm.clone();
        llm.provider = name.to_string();
        if name != provider {
            llm.api_key.clear();
        }

        let key = llm.resolved_api_key();
        if key.is_none() && name == provider {
            notes.push(format!(
                "error: no {} API key. Set llm.api_key or {}.",
                name,
                vars.join(" / ")
            ));
        }

        keys.push(DoctorKey {
            provider: name,
            status: if key.is_some() { "ok" } else { "missing" },
            value: key.as_deref().map(mask_secret),
            env: vars.join(" / "),
        });
    }

    if !supported {
        notes.push(format!(
            "error: unsupported provider '{}'. Supported providers: {}",
            provider,
            SUPPORTED_PROVIDERS.join(", ")
        ));
    }
    if provider == "mock" {
        notes.push(
            "info: mock provider returns canned content and makes no API calls.".to_string(),
        );
    }

    let image_sources = ImageSearch::from_settings(&settings.images, reqwest::Client::new())
        .source_names();
    if settings.images.enabled && image_sources.is_empty() {
        notes.push(
            "warning: images are enabled but neither PEXELS_API_KEY nor PIXABAY_API_KEY is set."
                .to_string(),
        );
    }

    let config_path = Settings::config_path().ok();

    DoctorReport {
        provider,
        supported,
        models: settings.llm.model_chain(),
        keys,
        image_sources,
        config_exists: config_path.as_ref().is_some_and(|p| p.exists()),
        config_path: config_path.map(|p| p.display().to_string()),
        notes,
    }
}

// Helper functions

/// Settings with CLI flags applied on top of config and environment.
fn apply_overrides(settings: &Settings, generation: &GenerationArgs) -> Settings {
    let mut settings = settings.clone();

    if let Some(provider) = &generation.provider {
        if provider.trim().to_lowercase() != settings.llm.provider_name() {
            // A model or key configured for another provider does not carry over.
            settings.llm.model.clear();
            settings.llm.fallback_models.clear();
            settings.llm.api_key.clear();
            settings.llm.endpoint.clear();
        }
        settings.llm.provider = provider.clone();
    }
    if let Some(model) = &generation.model {
        settings.llm.model = model.clone();
    }
    if let Some(api_key) = &generation.api_key {
        settings.llm.api_key = api_key.clone();
    }

    settings
}

fn read_material(generation: &GenerationArgs) -> Result<String> {
    match read_optional_material(generation)? {
        Some(material) => Ok(material),
        None => bail!("No input material provided. Use --input or --material"),
    }
}

fn read_optional_material(generation: &GenerationArgs) -> Result<Option<String>> {
    if let Some(material) = &generation.material {
        return Ok(Some(material.clone()));
    }

    match &generation.input {
        Some(path) if path == Path::new("-") => {
            let mut material = String::new();
            std::io::stdin()
                .read_to_string(&mut material)
                .context("Failed to read material from stdin")?;
            Ok(Some(material))
        }
        Some(path) => {
            if !path.exists() {
                bail!("Input file not found: {}", path.display());
            }
            let material = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read input file: {}", path.display()))?;
            Ok(Some(material))
        }
        None => Ok(None),
    }
}

fn format_outline(outline: &Outline) -> String {
    let mut text = format!("Title: {}\n", outline.title);
    for (i, slide) in outline.slides.iter().enumerate() {
        text.push_str(&format!("\nSlide {}: {}\n", i + 1, slide.title));
        for point in &slide.key_points {
            text.push_str(&format!("  - {}\n", point));
        }
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presentation::OutlineSlide;

    #[test]
    fn outline_is_printed_with_numbered_slides() {
        let outline = Outline {
            title: "AI".to_string(),
            slides: vec![
                OutlineSlide {
                    title: "Intro".to_string(),
                    key_points: vec!["What".to_string(), "Why".to_string()],
                },
                OutlineSlide {
                    title: "End".to_string(),
                    key_points: vec![],
                },
            ],
        };

        assert_eq!(
            format_outline(&outline),
            "Title: AI\n\nSlide 1: Intro\n  - What\n  - Why\n\nSlide 2: End\n"
        );
    }

    #[test]
    fn provider_override_resets_provider_specific_settings() {
        let mut settings = Settings::default();
        settings.llm.model = "gemini-1.5-pro".to_string();
        settings.llm.api_key = "gemini-key".to_string();

        let overridden = apply_overrides(
            &settings,
            &GenerationArgs {
                provider: Some("openai".to_string()),
                ..Default::default()
            },
        );

        assert_eq!(overridden.llm.provider, "openai");
        assert!(overridden.llm.model.is_empty());
        assert!(overridden.llm.api_key.is_empty());
        assert_eq!(overridden.llm.model_chain(), vec!["gpt-4o-mini"]);
    }

    #[test]
    fn flag_values_win_over_config() {
        let settings = Settings::default();
        let overridden = apply_overrides(
            &settings,
            &GenerationArgs {
                model: Some("gemini-2.5-pro".to_string()),
                api_key: Some("cli-key".to_string()),
                ..Default::default()
            },
        );

        assert_eq!(overridden.llm.model, "gemini-2.5-pro");
        assert_eq!(overridden.llm.resolved_api_key().as_deref(), Some("cli-key"));
    }

    #[test]
    fn missing_material_is_an_error() {
        let err = read_material(&GenerationArgs::default()).unwrap_err();
        assert_eq!(
            err.to_string(),
            "No input material provided. Use --input or --material"
        );
    }

    #[test]
    fn material_is_read_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        std::fs::write(&path, "Proteins fold.").unwrap();

        let material = read_material(&GenerationArgs {
            input: Some(path),
            ..Default::default()
        })
        .unwrap();

        assert_eq!(material, "Proteins fold.");
    }
}
