//! Application settings management

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::render::{PresentationFormat, Theme};

/// Environment variables consulted for the Gemini API key, in order.
pub const GEMINI_KEY_VARS: &[&str] = &["SLIDECRAFT_GEMINI_API_KEY", "GEMINI_API_KEY"];

/// Environment variables consulted for the OpenAI API key, in order.
pub const OPENAI_KEY_VARS: &[&str] = &["SLIDECRAFT_OPENAI_API_KEY", "OPENAI_API_KEY"];

const PEXELS_KEY_VAR: &str = "PEXELS_API_KEY";
const PIXABAY_KEY_VAR: &str = "PIXABAY_API_KEY";

/// Main application settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    /// General settings
    #[serde(default)]
    pub general: GeneralSettings,

    /// LLM provider settings
    #[serde(default)]
    pub llm: LlmSettings,

    /// Output format settings
    #[serde(default)]
    pub presentation: PresentationSettings,

    /// Slide illustration settings
    #[serde(default)]
    pub images: ImageSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralSettings {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmSettings {
    /// LLM provider (gemini, openai, mock)
    #[serde(default = "default_llm_provider")]
    pub provider: String,

    /// API key (falls back to the provider's environment variables)
    #[serde(default)]
    pub api_key: String,

    /// Model name (empty = provider default)
    #[serde(default)]
    pub model: String,

    /// Models tried in order after the primary model fails (empty = provider default)
    #[serde(default)]
    pub fallback_models: Vec<String>,

    /// API endpoint override (empty = provider default)
    #[serde(default)]
    pub endpoint: String,

    /// Retries per model for retryable failures
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Initial delay between retries, doubled per attempt
    #[serde(default = "default_retry_backoff_ms")]
    pub retry_backoff_ms: u64,

    /// HTTP request timeout
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PresentationSettings {
    /// Output format (markdown, html)
    #[serde(default)]
    pub format: PresentationFormat,

    /// HTML colour theme (default, dark, light, gradient)
    #[serde(default)]
    pub theme: Theme,

    /// Run a material analysis call before generating the outline
    #[serde(default = "default_true")]
    pub analyze_material: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageSettings {
    /// Search and embed an illustration for every slide
    #[serde(default)]
    pub enabled: bool,

    /// Download directory, relative to the output file's directory
    #[serde(default = "default_images_dir")]
    pub dir: PathBuf,

    /// Number of search results requested per slide
    #[serde(default = "default_per_page")]
    pub per_page: usize,

    /// Pexels API key (falls back to PEXELS_API_KEY)
    #[serde(default)]
    pub pexels_api_key: String,

    /// Pixabay API key (falls back to PIXABAY_API_KEY)
    #[serde(default)]
    pub pixabay_api_key: String,
}

// Default value functions

fn default_log_level() -> String {
    "info".to_string()
}

fn default_llm_provider() -> String {
    "gemini".to_string()
}

fn default_max_retries() -> u32 {
    2
}

fn default_retry_backoff_ms() -> u64 {
    500
}

fn default_timeout_secs() -> u64 {
    60
}

fn default_true() -> bool {
    true
}

fn default_images_dir() -> PathBuf {
    PathBuf::from("images")
}

fn default_per_page() -> usize {
    3
}

impl Default for GeneralSettings {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

impl Default for LlmSettings {
    fn default() -> Self {
        Self {
            provider: default_llm_provider(),
            api_key: String::new(),
            model: String::new(),
            fallback_models: Vec::new(),
            endpoint: String::new(),
            max_retries: default_max_retries(),
            retry_backoff_ms: default_retry_backoff_ms(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for PresentationSettings {
    fn default() -> Self {
        Self {
            format: PresentationFormat::default(),
            theme: Theme::default(),
            analyze_material: true,
        }
    }
}

impl Default for ImageSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            dir: default_images_dir(),
            per_page: default_per_page(),
            pexels_api_key: String::new(),
            pixabay_api_key: String::new(),
        }
    }
}

impl LlmSettings {
    /// Normalized provider name
    pub fn provider_name(&self) -> String {
        self.provider.trim().to_lowercase()
    }

    /// API key from config, or from the provider's environment variables.
    pub fn resolved_api_key(&self) -> Option<String> {
        let configured = self.api_key.trim();
        if !configured.is_empty() {
            return Some(configured.to_string());
        }

        let vars = match self.provider_name().as_str() {
            "gemini" => GEMINI_KEY_VARS,
            "openai" => OPENAI_KEY_VARS,
            _ => return None,
        };
        first_env(vars)
    }

    /// Primary model followed by de-duplicated fallbacks.
    pub fn model_chain(&self) -> Vec<String> {
        let provider = self.provider_name();

        let primary = match self.model.trim() {
            "" => default_model_for(&provider).to_string(),
            model => model.to_string(),
        };

        let fallbacks: Vec<String> = if self.fallback_models.is_empty() {
            default_fallbacks_for(&provider)
                .iter()
                .map(|m| m.to_string())
                .collect()
        } else {
            self.fallback_models
                .iter()
                .map(|m| m.trim().to_string())
                .filter(|m| !m.is_empty())
                .collect()
        };

        let mut chain = vec![primary];
        for model in fallbacks {
            if !chain.contains(&model) {
                chain.push(model);
            }
        }
        chain
    }
}

impl ImageSettings {
    pub fn resolved_pexels_key(&self) -> Option<String> {
        non_empty(&self.pexels_api_key).or_else(|| first_env(&[PEXELS_KEY_VAR]))
    }

    pub fn resolved_pixabay_key(&self) -> Option<String> {
        non_empty(&self.pixabay_api_key).or_else(|| first_env(&[PIXABAY_KEY_VAR]))
    }

    /// Directory images are downloaded into for a deck written to `output`.
    pub fn dir_for_output(&self, output: &Path) -> PathBuf {
        if self.dir.is_absolute() {
            return self.dir.clone();
        }
        match output.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.join(&self.dir),
            _ => self.dir.clone(),
        }
    }
}

/// Default model for a provider
pub fn default_model_for(provider: &str) -> &'static str {
    match provider {
        "openai" => "gpt-4o-mini",
        "mock" => "mock",
        _ => "gemini-2.0-flash",
    }
}

fn default_fallbacks_for(provider: &str) -> &'static [&'static str] {
    match provider {
        "gemini" => &["gemini-1.5-flash"],
        _ => &[],
    }
}

fn non_empty(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

fn first_env(vars: &[&str]) -> Option<String> {
    vars.iter()
        .filter_map(|var| std::env::var(var).ok())
        .find_map(|value| non_empty(&value))
}

/// Mask a secret for display, keeping the first and last four characters.
pub fn mask_secret(secret: &str) -> String {
    let chars: Vec<char> = secret.chars().collect();
    if chars.len() <= 8 {
        return "*".repeat(chars.len());
    }
    let head: String = chars[..4].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{}...{}", head, tail)
}

impl Settings {
    /// Load settings from the configuration file
    ///
    /// Returns `None` when no config file exists, so callers can fall back to
    /// defaults once logging is up.
    pub fn load() -> Result<Option<Self>> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            return Ok(None);
        }

        Self::load_from(&config_path).map(Some)
    }

    /// Load settings from an explicit path
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Get the path to the configuration file
    pub fn config_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("com", "slidecraft", "slidecraft")
            .context("Could not determine config directory")?;

        let config_dir = dirs.config_dir();
        Ok(config_dir.join("config.toml"))
    }

    /// Write default configuration to a file
    pub fn write_default(path: &Path) -> Result<()> {
        let settings = Self::default();
        let content = toml::to_string_pretty(&settings)?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(path, content)?;
        Ok(())
    }

    /// Copy of the settings with secrets masked, for display.
    pub fn redacted(&self) -> Self {
        let mut settings = self.clone();
        for secret in [
            &mut settings.llm.api_key,
            &mut settings.images.pexels_api_key,
            &mut settings.images.pixabay_api_key,
        ] {
            if !secret.is_empty() {
                *secret = mask_secret(secret);
            }
        }
        settings
    }
}
