//! Prompt templates for each pipeline stage.

pub const ANALYSIS_SYSTEM_PROMPT: &str = "You are an expert at analyzing and extracting key \
information from text. Your task is to process the provided material and identify the most \
important concepts, facts, and ideas that should be included in a presentation.";

pub const OUTLINE_SYSTEM_PROMPT: &str = "You are an expert presentation designer who creates \
clear, engaging, and well-structured presentation outlines. Your outlines are comprehensive yet \
concise and cover all important information in a logical flow.";

pub const SLIDE_SYSTEM_PROMPT: &str = "You are an expert presentation designer who creates \
engaging and informative slides. Each slide is concise yet comprehensive, with clear formatting \
and a good balance of text and visual cues.";

pub const IMAGE_QUERY_SYSTEM_PROMPT: &str = "You write concise, specific search queries that \
return high-quality, professional images suitable for presentation slides.";

/// Heading that introduces the key point list in slide prompts
pub const KEY_POINTS_HEADING: &str = "The slide must cover these key points:";

/// Opening line of the image query prompt
pub const IMAGE_QUERY_HEADING: &str = "Create an image search query for a slide titled";

/// Build the material analysis prompt.
pub fn build_analysis_prompt(material: &str) -> String {
    format!(
        "Analyze the following material and extract the key information that should be \
included in a presentation. Focus on the main ideas, important facts, and concepts.\n\
\n\
MATERIAL:\n\
{material}\n\
\n\
Provide a structured analysis with:\n\
1. Main topic and purpose\n\
2. Key concepts and ideas\n\
3. Important facts and data\n\
4. Likely audience for this material\n\
5. Suggested tone and style for the presentation"
    )
}

/// Build the outline prompt from analyzed (or raw) material.
pub fn build_outline_prompt(analysis: &str) -> String {
    format!(
        "Based on the following processed material, create a detailed outline for a presentation. \
The outline needs a compelling title and a series of slides with clear titles and the key \
points each slide covers.\n\
\n\
PROCESSED MATERIAL:\n\
{analysis}\n\
\n\
Create an outline that:\n\
1. Has a clear and engaging title\n\
2. Starts with an introduction slide\n\
3. Presents information in a logical sequence\n\
4. Covers all key points from the material\n\
5. Ends with a conclusion or summary slide\n\
\n\
For each slide, provide a clear, concise title and 3-5 key points."
    )
}

/// Build the prompt that expands one outline entry into slide content.
pub fn build_slide_prompt(title: &str, key_points: &[String], analysis: &str) -> String {
    let points = key_points
        .iter()
        .map(|p| format!("- {p}"))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "Create the content for a presentation slide titled \"{title}\".\n\
\n\
{KEY_POINTS_HEADING}\n\
{points}\n\
\n\
Use this information from the processed material:\n\
{analysis}\n\
\n\
The content must:\n\
1. Be concise but informative\n\
2. Use bullet points where appropriate\n\
3. Include relevant examples or data points\n\
4. Be formatted as Markdown for easy reading\n\
5. Suggest visuals where they help\n\
\n\
Respond with the Markdown that appears on the slide only. Do not repeat the slide title."
    )
}

/// Build the prompt asking for an image search query.
pub fn build_image_query_prompt(title: &str, content: &str) -> String {
    format!(
        "{IMAGE_QUERY_HEADING} \"{title}\".\n\
\n\
The slide content is:\n\
{content}\n\
\n\
Write a concise query that finds a professional image representing the key concepts of this \
slide. Return ONLY the search query, nothing else."
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slide_prompt_lists_key_points() {
        let prompt = build_slide_prompt(
            "History",
            &["1950s origins".to_string(), "AI winter".to_string()],
            "analysis text",
        );

        assert!(prompt.contains("titled \"History\""));
        assert!(prompt.contains(&format!(
            "{KEY_POINTS_HEADING}\n- 1950s origins\n- AI winter\n"
        )));
        assert!(prompt.contains("analysis text"));
    }

    #[test]
    fn analysis_prompt_contains_material() {
        assert!(build_analysis_prompt("Proteins fold.").contains("MATERIAL:\nProteins fold.\n"));
    }
}
