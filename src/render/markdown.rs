//! Markdown deck assembly
//!
//! Slides are separated by horizontal rules so the output can be fed to
//! Marp, reveal-md and similar tools without further processing.

use crate::presentation::Slide;

/// Format one slide as a Markdown section.
pub fn slide_markdown(title: &str, content: &str) -> String {
    format!("\n# {title}\n\n{content}\n\n---\n")
}

/// Render the title section followed by every slide.
pub fn render_markdown(title: &str, slides: &[Slide]) -> String {
    let mut deck = format!("# {title}\n\n---\n\n");
    for slide in slides {
        deck.push_str(&slide_markdown(&slide.title, &slide.content));
    }
    deck
}
