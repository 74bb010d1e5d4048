//! slidecraft - Turn raw material into slide decks with LLM-generated outlines
//!
//! The pipeline analyzes the material, asks the model for an outline, expands
//! every outline entry into slide text and renders the result as Markdown or HTML.

pub mod cli;
pub mod config;
pub mod images;
pub mod llm;
pub mod pipeline;
pub mod presentation;
pub mod render;

#[cfg(test)]
mod test_support;

use thiserror::Error;

/// Main error type for slidecraft
#[derive(Error, Debug)]
pub enum SlidecraftError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("No material provided")]
    EmptyMaterial,

    #[error("Outline contains no usable slides")]
    EmptyOutline,

    #[error("Invalid outline: {0}")]
    InvalidOutline(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, SlidecraftError>;

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name
pub const APP_NAME: &str = "slidecraft";
