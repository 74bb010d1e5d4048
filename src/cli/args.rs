//! CLI argument definitions using clap

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

use crate::render::{PresentationFormat, Theme};

/// slidecraft - Turn raw material into slide decks with LLM-generated outlines
#[derive(Parser, Debug)]
#[command(name = "slidecraft")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Where the material comes from and which model handles it
#[derive(Args, Debug, Clone, Default)]
pub struct GenerationArgs {
    /// File containing the input material (`-` reads stdin)
    #[arg(short, long, conflicts_with = "material")]
    pub input: Option<PathBuf>,

    /// Input material as text
    #[arg(long)]
    pub material: Option<String>,

    /// LLM provider (gemini, openai, mock)
    #[arg(short, long)]
    pub provider: Option<String>,

    /// Model to use instead of the provider default
    #[arg(short, long)]
    pub model: Option<String>,

    /// API key for the provider
    #[arg(long)]
    pub api_key: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create a presentation from input material
    Create {
        #[command(flatten)]
        generation: GenerationArgs,

        /// Output file (the format's extension is appended when missing)
        #[arg(short, long, default_value = "presentation")]
        output: PathBuf,

        /// Output format (defaults to the output extension, then config)
        #[arg(short, long, value_enum)]
        format: Option<PresentationFormat>,

        /// Colour theme for HTML output
        #[arg(long, value_enum)]
        theme: Option<Theme>,

        /// Search and embed an illustration for every slide
        #[arg(long)]
        images: bool,

        /// Build slides from a saved outline instead of generating one
        #[arg(long, value_name = "FILE")]
        from_outline: Option<PathBuf>,

        /// Also save the outline as JSON
        #[arg(long, value_name = "FILE")]
        save_outline: Option<PathBuf>,
    },

    /// Generate only the outline
    Outline {
        #[command(flatten)]
        generation: GenerationArgs,

        /// Print the outline as JSON
        #[arg(long)]
        json: bool,

        /// Save the outline as JSON to this file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Check provider, model and API key setup
    Doctor {
        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Configuration management
    #[command(subcommand)]
    Config(ConfigCommand),

    /// Print shell completions
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Show current configuration (API keys redacted)
    Show,

    /// Show configuration file path
    Path,

    /// Initialize default configuration
    Init {
        /// Force overwrite existing config
        #[arg(short, long)]
        force: bool,
    },
}
