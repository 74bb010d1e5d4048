//! Outline, slide and deck types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::path::Path;

use crate::render::{PresentationFormat, Theme};
use crate::SlidecraftError;

/// Title used when the model leaves the presentation title blank
pub const DEFAULT_TITLE: &str = "Presentation";

/// A structured presentation outline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Outline {
    /// Presentation title
    #[serde(default)]
    pub title: String,

    /// Slides in presentation order
    #[serde(default)]
    pub slides: Vec<OutlineSlide>,
}

/// One outline entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutlineSlide {
    pub title: String,

    #[serde(default)]
    pub key_points: Vec<String>,
}

impl Outline {
    /// JSON schema the model is asked to follow
    pub fn schema() -> Value {
        json!({
            "type": "object",
            "properties": {
                "title": { "type": "string" },
                "slides": {
                    "type": "array",
                    "items": {
                        "type": "object",
                        "properties": {
                            "title": { "type": "string" },
                            "key_points": {
                                "type": "array",
                                "items": { "type": "string" }
                            }
                        },
                        "required": ["title", "key_points"]
                    }
                }
            },
            "required": ["title", "slides"]
        })
    }

    /// Trim whitespace, drop blank entries and fill in a missing title.
    ///
    /// Fails with [`SlidecraftError::EmptyOutline`] when no slide survives.
    pub fn normalize(self) -> crate::Result<Self> {
        let title = match self.title.trim() {
            "" => DEFAULT_TITLE.to_string(),
            title => title.to_string(),
        };

        let slides: Vec<OutlineSlide> = self
            .slides
            .into_iter()
            .filter_map(|slide| {
                let title = slide.title.trim().to_string();
                if title.is_empty() {
                    return None;
                }
                let key_points = slide
                    .key_points
                    .into_iter()
                    .map(|p| p.trim().to_string())
                    .filter(|p| !p.is_empty())
                    .collect();
                Some(OutlineSlide { title, key_points })
            })
            .collect();

        if slides.is_empty() {
            return Err(SlidecraftError::EmptyOutline);
        }

        Ok(Self { title, slides })
    }

    /// Read a previously saved outline.
    pub fn load(path: &Path) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let outline: Outline = serde_json::from_str(&content).map_err(|e| {
            SlidecraftError::InvalidOutline(format!("{}: {}", path.display(), e))
        })?;
        outline.normalize()
    }

    /// Write the outline as pretty-printed JSON.
    pub fn save(&self, path: &Path) -> crate::Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| SlidecraftError::InvalidOutline(e.to_string()))?;
        std::fs::write(path, json)?;
        Ok(())
    }
}

impl OutlineSlide {
    /// Key points as a Markdown bullet list
    pub fn bullets(&self) -> String {
        self.key_points
            .iter()
            .map(|p| format!("- {p}"))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// A generated slide
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Slide {
    pub title: String,

    /// Markdown body, without the slide title
    pub content: String,

    /// Illustration embedded at the top of the content, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_path: Option<String>,
}

impl Slide {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            image_path: None,
        }
    }
}

/// A rendered presentation artifact
#[derive(Debug, Clone, Serialize)]
pub struct Deck {
    pub title: String,
    pub slides: Vec<Slide>,
    pub format: PresentationFormat,
    pub theme: Theme,
    /// Rendered Markdown or HTML
    pub content: String,
    pub generated_at: DateTime<Utc>,
}

impl Deck {
    /// Local image files downloaded for the slides, in slide order.
    pub fn image_paths(&self) -> impl Iterator<Item = &str> {
        self.slides.iter().filter_map(|s| s.image_path.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outline_slide(title: &str, points: &[&str]) -> OutlineSlide {
        OutlineSlide {
            title: title.to_string(),
            key_points: points.iter().map(|p| p.to_string()).collect(),
        }
    }

    #[test]
    fn normalize_trims_and_drops_blank_slides() {
        let outline = Outline {
            title: "  ".to_string(),
            slides: vec![
                outline_slide(" Intro ", &[" a ", "", "b"]),
                outline_slide("   ", &["orphan"]),
            ],
        };

        let outline = outline.normalize().unwrap();

        assert_eq!(outline.title, DEFAULT_TITLE);
        assert_eq!(outline.slides, vec![outline_slide("Intro", &["a", "b"])]);
    }

    #[test]
    fn normalize_rejects_outline_without_slides() {
        let outline = Outline {
            title: "Nothing".to_string(),
            slides: vec![],
        };
        assert!(matches!(
            outline.normalize(),
            Err(SlidecraftError::EmptyOutline)
        ));
    }

    #[test]
    fn outline_parses_with_missing_key_points() {
        let outline: Outline =
            serde_json::from_str(r#"{"title": "T", "slides": [{"title": "S"}]}"#).unwrap();
        assert!(outline.slides[0].key_points.is_empty());
    }

    #[test]
    fn save_then_load_keeps_outline() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("outline.json");
        let outline = Outline {
            title: "AI".to_string(),
            slides: vec![outline_slide("History", &["1950s", "AI winter"])],
        };

        outline.save(&path).unwrap();

        assert_eq!(Outline::load(&path).unwrap(), outline);
    }

    #[test]
    fn load_reports_invalid_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        std::fs::write(&path, "not json").unwrap();

        let err = Outline::load(&path).unwrap_err();
        assert!(matches!(err, SlidecraftError::InvalidOutline(_)));
        assert!(err.to_string().contains("broken.json"));
    }

    #[test]
    fn bullets_render_as_markdown_list() {
        let slide = outline_slide("S", &["one", "two"]);
        assert_eq!(slide.bullets(), "- one\n- two");
    }

    #[test]
    fn deck_lists_image_paths_in_slide_order() {
        let mut with_image = Slide::new("Cats", "- purr");
        with_image.image_path = Some("images/cat.jpg".to_string());
        let deck = Deck {
            title: "Pets".to_string(),
            slides: vec![Slide::new("Intro", "hi"), with_image],
            format: PresentationFormat::Markdown,
            theme: Theme::Default,
            content: String::new(),
            generated_at: Utc::now(),
        };

        assert_eq!(deck.image_paths().collect::<Vec<_>>(), ["images/cat.jpg"]);
    }
}
