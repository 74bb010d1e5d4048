//! Stock photo search

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::config::ImageSettings;

const PEXELS_ENDPOINT: &str = "https://api.pexels.com/v1/search";
const PIXABAY_ENDPOINT: &str = "https://pixabay.com/api/";

#[async_trait]
pub trait ImageSource: Send + Sync {
    /// Image URLs matching `query`, best first.
    async fn search(&self, query: &str, per_page: usize) -> Result<Vec<String>>;

    fn name(&self) -> &'static str;
}

pub struct PexelsSource {
    http: Client,
    api_key: String,
}

impl PexelsSource {
    pub fn new(http: Client, api_key: String) -> Self {
        Self { http, api_key }
    }
}

#[derive(Debug, Deserialize)]
struct PexelsResponse {
    #[serde(default)]
    photos: Vec<PexelsPhoto>,
}

#[derive(Debug, Deserialize)]
struct PexelsPhoto {
    src: PexelsPhotoSources,
}

#[derive(Debug, Deserialize)]
struct PexelsPhotoSources {
    large: String,
}

#[async_trait]
impl ImageSource for PexelsSource {
    async fn search(&self, query: &str, per_page: usize) -> Result<Vec<String>> {
        let per_page = per_page.to_string();

        let payload: PexelsResponse = self
            .http
            .get(PEXELS_ENDPOINT)
            .header("Authorization", &self.api_key)
            .query(&[("query", query), ("per_page", per_page.as_str())])
            .send()
            .await
            .context("Pexels request failed")?
            .error_for_status()
            .context("Pexels returned an error status")?
            .json()
            .await
            .context("Failed to parse Pexels response")?;

        Ok(payload.photos.into_iter().map(|p| p.src.large).collect())
    }

    fn name(&self) -> &'static str {
        "pexels"
    }
}

pub struct PixabaySource {
    http: Client,
    api_key: String,
}

impl PixabaySource {
    pub fn new(http: Client, api_key: String) -> Self {
        Self { http, api_key }
    }
}

#[derive(Debug, Deserialize)]
struct PixabayResponse {
    #[serde(default)]
    hits: Vec<PixabayHit>,
}

#[derive(Debug, Deserialize)]
struct PixabayHit {
    #[serde(rename = "largeImageURL")]
    large_image_url: String,
}

#[async_trait]
impl ImageSource for PixabaySource {
    async fn search(&self, query: &str, per_page: usize) -> Result<Vec<String>> {
        // Pixabay rejects per_page values below 3.
        let per_page = per_page.clamp(3, 200).to_string();

        let payload: PixabayResponse = self
            .http
            .get(PIXABAY_ENDPOINT)
            .query(&[
                ("key", self.api_key.as_str()),
                ("q", query),
                ("image_type", "photo"),
                ("per_page", per_page.as_str()),
            ])
            .send()
            .await
            .map_err(|e| e.without_url())
            .context("Pixabay request failed")?
            .error_for_status()
            .map_err(|e| e.without_url())
            .context("Pixabay returned an error status")?
            .json()
            .await
            .context("Failed to parse Pixabay response")?;

        Ok(payload
            .hits
            .into_iter()
            .map(|h| h.large_image_url)
            .collect())
    }

    fn name(&self) -> &'static str {
        "pixabay"
    }
}

/// Queries image sources in order until enough results are collected.
pub struct ImageSearch {
    sources: Vec<Box<dyn ImageSource>>,
}

impl ImageSearch {
    pub fn new(sources: Vec<Box<dyn ImageSource>>) -> Self {
        Self { sources }
    }

    /// Build from settings, enabling each source that has an API key.
    pub fn from_settings(settings: &ImageSettings, http: Client) -> Self {
        let mut sources: Vec<Box<dyn ImageSource>> = Vec::new();
        if let Some(key) = settings.resolved_pexels_key() {
            sources.push(Box::new(PexelsSource::new(http.clone(), key)));
        }
        if let Some(key) = settings.resolved_pixabay_key() {
            sources.push(Box::new(PixabaySource::new(http, key)));
        }
        Self::new(sources)
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    pub fn source_names(&self) -> Vec<&'static str> {
        self.sources.iter().map(|s| s.name()).collect()
    }

    /// Up to `per_page` unique URLs, in source order. Source failures are logged and skipped.
    pub async fn search(&self, query: &str, per_page: usize) -> Vec<String> {
        let mut urls: Vec<String> = Vec::new();

        for source in &self.sources {
            if urls.len() >= per_page {
                break;
            }

            match source.search(query, per_page).await {
                Ok(found) => {
                    tracing::debug!("{} returned {} images", source.name(), found.len());
                    for url in found {
                        if urls.len() >= per_page {
                            break;
                        }
                        if !urls.contains(&url) {
                            urls.push(url);
                        }
                    }
                }
                Err(e) => tracing::warn!("{} search failed: {:#}", source.name(), e),
            }
        }

        urls
    }
}
