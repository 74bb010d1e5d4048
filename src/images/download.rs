//! Image download

use anyhow::{bail, Context, Result};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use reqwest::Client;
use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;
use url::Url;
use uuid::Uuid;

/// Save an image into `dir` and return its path.
///
/// Accepts `data:image/...;base64,` URLs as well as HTTP(S) URLs.
pub async fn download_image(http: &Client, image_url: &str, dir: &Path) -> Result<PathBuf> {
    tokio::fs::create_dir_all(dir)
        .await
        .with_context(|| format!("Failed to create image directory: {}", dir.display()))?;

    if image_url.starts_with("data:image") {
        let bytes = decode_data_url(image_url)?;
        let path = dir.join(format!("{}.png", Uuid::new_v4()));
        tokio::fs::write(&path, bytes)
            .await
            .with_context(|| format!("Failed to write image: {}", path.display()))?;
        return Ok(path);
    }

    let url = Url::parse(image_url).with_context(|| format!("Invalid image URL: {image_url}"))?;
    let path = unique_path(dir, &file_name_for(&url));

    let response = http
        .get(url)
        .send()
        .await
        .context("Image request failed")?
        .error_for_status()
        .context("Image download returned an error status")?;

    if let Err(e) = stream_to_file(response, &path).await {
        // Never leave a truncated image behind.
        let _ = tokio::fs::remove_file(&path).await;
        return Err(e);
    }

    Ok(path)
}

async fn stream_to_file(mut response: reqwest::Response, path: &Path) -> Result<()> {
    let mut file = tokio::fs::File::create(path)
        .await
        .with_context(|| format!("Failed to create image file: {}", path.display()))?;

    while let Some(chunk) = response.chunk().await.context("Image download interrupted")? {
        file.write_all(&chunk)
            .await
            .with_context(|| format!("Failed to write image: {}", path.display()))?;
    }
    file.flush().await?;
    Ok(())
}

fn decode_data_url(data_url: &str) -> Result<Vec<u8>> {
    let Some((header, data)) = data_url.split_once(',') else {
        bail!("Malformed data URL");
    };
    if !header.ends_with(";base64") {
        bail!("Only base64 data URLs are supported");
    }
    STANDARD
        .decode(data.trim())
        .context("Invalid base64 image data")
}

/// File name taken from the URL path, or a random `.jpg` name when it has no extension.
fn file_name_for(url: &Url) -> String {
    let name = url
        .path_segments()
        .and_then(|mut segments| segments.next_back())
        .unwrap_or_default()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_'))
        .collect::<String>();

    let has_extension = name
        .rsplit_once('.')
        .is_some_and(|(stem, ext)| !stem.is_empty() && !ext.is_empty());

    if has_extension {
        name
    } else {
        format!("{}.jpg", Uuid::new_v4())
    }
}

fn unique_path(dir: &Path, name: &str) -> PathBuf {
    let path = dir.join(name);
    if path.exists() {
        let short_id = Uuid::new_v4().simple().to_string();
        dir.join(format!("{}-{}", &short_id[..8], name))
    } else {
        path
    }
}
