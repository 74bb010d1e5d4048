//! Search query heuristics

use regex::Regex;
use std::sync::OnceLock;

fn markdown_markers() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[*_#>~`]").expect("valid regex"))
}

fn bullet_item() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?m)^\s*[*+-]\s+(.*?)\s*$").expect("valid regex"))
}

fn sentence_break() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[.!?]\s+").expect("valid regex"))
}

fn image_markdown() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"!\[[^\]]*\]\([^)]*\)").expect("valid regex"))
}

/// Pull up to `max` key concepts out of slide Markdown.
///
/// Bullet items are preferred; prose falls back to its first sentences.
pub fn extract_key_concepts(content: &str, max: usize) -> Vec<String> {
    let without_images = image_markdown().replace_all(content, "");

    // Bullets are matched before markers are stripped, since `*` and `-` are both.
    let bullets: Vec<String> = bullet_item()
        .captures_iter(&without_images)
        .filter_map(|c| c.get(1))
        .map(|m| markdown_markers().replace_all(m.as_str(), "").trim().to_string())
        .filter(|s| !s.is_empty())
        .take(max)
        .collect();

    if !bullets.is_empty() {
        return bullets;
    }

    let clean = markdown_markers().replace_all(&without_images, "");
    sentence_break()
        .split(&clean)
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .take(max)
        .collect()
}

/// Search query derived from the slide itself, used when the model's query is unusable.
pub fn build_search_query(title: &str, content: &str) -> String {
    let concepts = extract_key_concepts(content, 3);
    if concepts.is_empty() {
        format!("{title} professional presentation image")
    } else {
        format!(
            "{} {} professional presentation image",
            title,
            concepts.join(" ")
        )
    }
}

/// Clean up a model-written query; `None` when it is too long or too short to use.
pub fn sanitize_model_query(query: &str) -> Option<String> {
    let cleaned: String = query
        .trim()
        .chars()
        .filter(|c| *c != '"' && *c != '\'')
        .collect();
    let cleaned = cleaned.trim();

    let words = cleaned.split_whitespace().count();
    if words > 10 || cleaned.chars().count() < 3 {
        None
    } else {
        Some(cleaned.to_string())
    }
}
