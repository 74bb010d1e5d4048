//! Standalone HTML deck
//!
//! Slide content is Markdown produced by the model; it is rendered with
//! pulldown-cmark. Titles are escaped. Navigation, progress and theme
//! switching run in a small inline script with no build step.

use chrono::{DateTime, Utc};
use pulldown_cmark::{html, Options, Parser};
use serde_json::{json, Map, Value};

use super::{escape_html, Theme};
use crate::presentation::Slide;

const STYLESHEET: &str = r#"
        * { margin: 0; padding: 0; box-sizing: border-box; }

        body {
            font-family: 'Poppins', 'Helvetica Neue', Arial, sans-serif;
            background: var(--background);
            color: var(--text-color);
            overflow: hidden;
            transition: background 0.5s ease;
        }

        .presentation-container { position: relative; width: 100vw; height: 100vh; overflow: hidden; }

        .slide {
            position: absolute;
            inset: 0;
            padding: 4rem 6rem;
            opacity: 0;
            visibility: hidden;
            transform: translateY(50px);
            transition: all 0.8s cubic-bezier(0.77, 0, 0.175, 1);
            display: flex;
            flex-direction: column;
            justify-content: center;
            overflow-y: auto;
        }

        .slide.active { opacity: 1; visibility: visible; transform: translateY(0); }

        .slide-header { position: absolute; top: 2rem; right: 2rem; }
        .slide-number { font-size: 1rem; opacity: 0.5; font-weight: 300; }

        .slide-title {
            font-family: 'Playfair Display', Georgia, serif;
            font-size: 3.5rem;
            font-weight: 700;
            margin-bottom: 1.5rem;
            color: var(--accent-color);
        }

        .title-slide .slide-title { font-size: 4.5rem; }

        .content { font-size: 1.25rem; line-height: 1.6; max-width: 900px; }
        .content h1, .content h2, .content h3, .content h4 {
            margin: 1.5rem 0 1rem;
            color: var(--secondary-color);
        }
        .content p { margin-bottom: 1rem; }
        .content a { color: var(--accent-color); }
        .content strong { font-weight: 600; color: var(--accent-color); }
        .content ul, .content ol { margin: 0 0 1.5rem 2rem; }
        .content li { margin-bottom: 0.5rem; }
        .content img { max-width: 100%; max-height: 40vh; border-radius: 8px; margin: 1rem 0; }
        .content blockquote {
            padding: 1rem 1.5rem;
            border-left: 4px solid var(--accent-color);
            margin: 1.5rem 0;
            font-style: italic;
        }
        .content pre { background: rgba(0, 0, 0, 0.1); padding: 1rem; border-radius: 8px; overflow-x: auto; }
        .content code { font-family: 'Courier New', monospace; font-size: 0.9em; }
        .content table { width: 100%; border-collapse: collapse; margin: 1.5rem 0; }
        .content th, .content td { padding: 0.75rem; border: 1px solid rgba(127, 127, 127, 0.3); text-align: left; }

        .slide-footer { position: absolute; bottom: 2rem; left: 0; width: 100%; padding: 0 6rem; }
        .progress-indicator { width: 100%; height: 4px; background: rgba(127, 127, 127, 0.2); border-radius: 2px; overflow: hidden; }
        .progress-bar { height: 100%; background: var(--accent-color); transition: width 0.3s ease; }

        .controls { position: fixed; bottom: 2rem; right: 2rem; z-index: 100; display: flex; gap: 0.5rem; }
        .control-button, .theme-button {
            background: rgba(127, 127, 127, 0.2);
            color: var(--text-color);
            border: none;
            cursor: pointer;
        }
        .control-button { width: 40px; height: 40px; border-radius: 50%; font-size: 1rem; }
        .control-button:hover, .theme-button:hover { background: var(--accent-color); }
        .theme-switcher { position: fixed; top: 2rem; left: 2rem; z-index: 100; }
        .theme-button { padding: 8px 16px; border-radius: 20px; font-size: 0.8rem; }

        @media (max-width: 768px) {
            .slide { padding: 2rem; }
            .slide-title { font-size: 2.5rem; }
            .content { font-size: 1rem; }
            .slide-footer { padding: 0 2rem; }
        }
"#;

const SCRIPT: &str = r#"
        const container = document.querySelector('.presentation-container');
        const slides = document.querySelectorAll('.slide');
        const totalSlides = slides.length;
        const themes = JSON.parse(container.dataset.themes);
        const themeNames = Object.keys(themes);
        let currentSlide = 0;
        let currentTheme = themeNames.indexOf(container.dataset.theme);

        function showSlide(index) {
            slides.forEach(slide => slide.classList.remove('active'));
            slides[index].classList.add('active');
        }

        function nextSlide() {
            if (currentSlide < totalSlides - 1) { currentSlide++; showSlide(currentSlide); }
        }

        function prevSlide() {
            if (currentSlide > 0) { currentSlide--; showSlide(currentSlide); }
        }

        function applyTheme(name) {
            const colors = themes[name];
            const root = document.documentElement.style;
            root.setProperty('--background', colors.background);
            root.setProperty('--text-color', colors.text);
            root.setProperty('--accent-color', colors.accent);
            root.setProperty('--secondary-color', colors.secondary);
            document.getElementById('theme-toggle').textContent =
                'Theme: ' + name.charAt(0).toUpperCase() + name.slice(1);
        }

        function switchTheme() {
            currentTheme = (currentTheme + 1) % themeNames.length;
            applyTheme(themeNames[currentTheme]);
        }

        function toggleFullscreen() {
            if (!document.fullscreenElement) {
                document.documentElement.requestFullscreen().catch(() => {});
            } else if (document.exitFullscreen) {
                document.exitFullscreen();
            }
        }

        document.getElementById('next-button').addEventListener('click', nextSlide);
        document.getElementById('prev-button').addEventListener('click', prevSlide);
        document.getElementById('fullscreen-button').addEventListener('click', toggleFullscreen);
        document.getElementById('theme-toggle').addEventListener('click', switchTheme);
        document.addEventListener('keydown', e => {
            if (e.key === 'ArrowRight' || e.key === ' ' || e.key === 'n') nextSlide();
            else if (e.key === 'ArrowLeft' || e.key === 'p') prevSlide();
            else if (e.key === 'f') toggleFullscreen();
            else if (e.key === 't') switchTheme();
        });

        applyTheme(themeNames[currentTheme]);
        showSlide(0);
"#;

fn markdown_to_html(markdown: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TASKLISTS);

    let parser = Parser::new_ext(markdown, options);
    let mut output = String::new();
    html::push_html(&mut output, parser);
    output
}

/// Render one slide. `number` is 1-based; the title slide is number 0.
pub fn slide_html(title: &str, content: &str, number: usize, total: usize) -> String {
    let progress = if total == 0 {
        100.0
    } else {
        number as f64 / total as f64 * 100.0
    };
    let class = if number == 0 { "slide title-slide" } else { "slide" };
    let label = if number == 0 {
        String::new()
    } else {
        format!("{number} / {total}")
    };

    format!(
        r#"
        <div class="{class}" id="slide-{number}" data-slide-number="{number}">
            <div class="slide-header"><span class="slide-number">{label}</span></div>
            <h1 class="slide-title">{title}</h1>
            <div class="content">
{content}
            </div>
            <div class="slide-footer">
                <div class="progress-indicator"><div class="progress-bar" style="width: {progress:.1}%"></div></div>
            </div>
        </div>
"#,
        title = escape_html(title),
        content = markdown_to_html(content),
    )
}

fn themes_json() -> String {
    let mut themes = Map::new();
    for theme in Theme::ALL {
        let colors = theme.colors();
        themes.insert(
            theme.as_str().to_string(),
            json!({
                "background": colors.background,
                "text": colors.text,
                "accent": colors.accent,
                "secondary": colors.secondary,
            }),
        );
    }
    Value::Object(themes).to_string()
}

/// Render a complete standalone HTML page.
pub fn render_html(title: &str, slides: &[Slide], theme: Theme, created: DateTime<Utc>) -> String {
    let colors = theme.colors();
    let total = slides.len();
    let escaped_title = escape_html(title);

    let mut page = format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <meta name="generator" content="{app} {version}">
    <meta name="created" content="{created}">
    <title>{escaped_title}</title>
    <style>
        :root {{
            --background: {background};
            --text-color: {text};
            --accent-color: {accent};
            --secondary-color: {secondary};
        }}
{STYLESHEET}
    </style>
</head>
<body>
    <div class="presentation-container" data-theme="{theme}" data-themes="{themes}">
"#,
        app = crate::APP_NAME,
        version = crate::VERSION,
        created = created.to_rfc3339(),
        background = colors.background,
        text = colors.text,
        accent = colors.accent,
        secondary = colors.secondary,
        theme = theme.as_str(),
        themes = escape_html(&themes_json()),
    );

    page.push_str(&slide_html(title, "", 0, total));
    for (i, slide) in slides.iter().enumerate() {
        page.push_str(&slide_html(&slide.title, &slide.content, i + 1, total));
    }

    page.push_str(
        r#"    </div>
    <div class="controls">
        <button class="control-button" id="prev-button" title="Previous slide">&#8249;</button>
        <button class="control-button" id="next-button" title="Next slide">&#8250;</button>
        <button class="control-button" id="fullscreen-button" title="Toggle fullscreen">&#x26F6;</button>
    </div>
    <div class="theme-switcher">
        <button class="theme-button" id="theme-toggle">Change Theme</button>
    </div>
    <script>"#,
    );
    page.push_str(SCRIPT);
    page.push_str("    </script>\n</body>\n</html>\n");
    page
}
