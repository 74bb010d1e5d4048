//! Presentation rendering
//!
//! Assembles generated slides into a Markdown deck or a standalone HTML page.

mod html;
mod markdown;

pub use html::{render_html, slide_html};
pub use markdown::{render_markdown, slide_markdown};

use chrono::{DateTime, Utc};
use std::path::{Path, PathBuf};

use crate::presentation::Slide;

/// Output format of a presentation
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    serde::Deserialize,
    serde::Serialize,
    clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum PresentationFormat {
    #[default]
    Markdown,
    Html,
}

impl PresentationFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Markdown => "markdown",
            Self::Html => "html",
        }
    }

    /// File extension without the leading dot
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Markdown => "md",
            Self::Html => "html",
        }
    }

    /// Infer the format from a file extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()?.to_lowercase().as_str() {
            "md" | "markdown" => Some(Self::Markdown),
            "html" | "htm" => Some(Self::Html),
            _ => None,
        }
    }
}

/// Colour scheme of the HTML deck
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    serde::Deserialize,
    serde::Serialize,
    clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Default,
    Dark,
    Light,
    Gradient,
}

/// CSS colours for a theme
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThemeColors {
    pub background: &'static str,
    pub text: &'static str,
    pub accent: &'static str,
    pub secondary: &'static str,
}

impl Theme {
    pub const ALL: [Theme; 4] = [Theme::Default, Theme::Dark, Theme::Light, Theme::Gradient];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Dark => "dark",
            Self::Light => "light",
            Self::Gradient => "gradient",
        }
    }

    pub fn colors(&self) -> ThemeColors {
        match self {
            Self::Default => ThemeColors {
                background: "linear-gradient(135deg, #f5f7fa 0%, #c3cfe2 100%)",
                text: "#333333",
                accent: "#3498db",
                secondary: "#2c3e50",
            },
            Self::Dark => ThemeColors {
                background: "linear-gradient(135deg, #2c3e50 0%, #1a1a2e 100%)",
                text: "#ffffff",
                accent: "#e74c3c",
                secondary: "#ecf0f1",
            },
            Self::Light => ThemeColors {
                background: "linear-gradient(135deg, #ffffff 0%, #f5f5f5 100%)",
                text: "#2c3e50",
                accent: "#27ae60",
                secondary: "#7f8c8d",
            },
            Self::Gradient => ThemeColors {
                background: "linear-gradient(135deg, #6a11cb 0%, #2575fc 100%)",
                text: "#ffffff",
                accent: "#ffd166",
                secondary: "#f8f9fa",
            },
        }
    }
}

/// Render a full deck in the requested format.
///
/// `created` is stamped into the HTML page metadata.
pub fn render(
    format: PresentationFormat,
    title: &str,
    slides: &[Slide],
    theme: Theme,
    created: DateTime<Utc>,
) -> String {
    match format {
        PresentationFormat::Markdown => render_markdown(title, slides),
        PresentationFormat::Html => render_html(title, slides, theme, created),
    }
}

/// Path the deck is written to: the format's extension is appended unless present.
pub fn output_path(path: &Path, format: PresentationFormat) -> PathBuf {
    let has_extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(format.extension()));

    if has_extension {
        path.to_path_buf()
    } else {
        let mut name = path.as_os_str().to_os_string();
        name.push(".");
        name.push(format.extension());
        PathBuf::from(name)
    }
}

/// Write a rendered deck, creating parent directories. Returns the final path.
pub fn save_presentation(
    content: &str,
    path: &Path,
    format: PresentationFormat,
) -> crate::Result<PathBuf> {
    let path = output_path(path, format);

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    std::fs::write(&path, content)?;
    tracing::debug!("Wrote {} bytes to {}", content.len(), path.display());
    Ok(path)
}

/// Escape text for inclusion in HTML element content or attribute values.
pub(crate) fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_path_appends_missing_extension() {
        assert_eq!(
            output_path(Path::new("presentation"), PresentationFormat::Markdown),
            PathBuf::from("presentation.md")
        );
        assert_eq!(
            output_path(Path::new("deck.md"), PresentationFormat::Html),
            PathBuf::from("deck.md.html")
        );
        assert_eq!(
            output_path(Path::new("out/deck.HTML"), PresentationFormat::Html),
            PathBuf::from("out/deck.HTML")
        );
    }

    #[test]
    fn format_is_inferred_from_extension() {
        assert_eq!(
            PresentationFormat::from_path(Path::new("a/b.htm")),
            Some(PresentationFormat::Html)
        );
        assert_eq!(
            PresentationFormat::from_path(Path::new("notes.markdown")),
            Some(PresentationFormat::Markdown)
        );
        assert_eq!(PresentationFormat::from_path(Path::new("deck")), None);
    }

    #[test]
    fn save_presentation_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("nested/deck");

        let saved = save_presentation("# Deck", &target, PresentationFormat::Markdown).unwrap();

        assert_eq!(saved, dir.path().join("nested/deck.md"));
        assert_eq!(std::fs::read_to_string(saved).unwrap(), "# Deck");
    }

    #[test]
    fn escape_html_handles_markup() {
        assert_eq!(
            escape_html(r#"<b>"R&D"</b>"#),
            "&lt;b&gt;&quot;R&amp;D&quot;&lt;/b&gt;"
        );
    }
}
