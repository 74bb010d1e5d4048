//! slidecraft - Turn raw material into slide decks with LLM-generated outlines
//!
//! Entry point for the slidecraft CLI application.

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use slidecraft::cli::commands::CreateOptions;
use slidecraft::cli::{Cli, Commands};
use slidecraft::config::Settings;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Load configuration only for runtime commands.
    let (settings, config_found) = match cli.command {
        Commands::Completions { .. } => (None, true),
        _ => match Settings::load()? {
            Some(settings) => (Some(settings), true),
            None => (Some(Settings::default()), false),
        },
    };

    // Initialize logging; RUST_LOG wins over --verbose, which wins over the config
    let default_level = match &settings {
        _ if cli.verbose => "debug".to_string(),
        Some(settings) => settings.general.log_level.clone(),
        None => "info".to_string(),
    };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    if !config_found {
        tracing::info!("No config file found, using defaults");
    }

    let Some(settings) = settings else {
        if let Commands::Completions { shell } = cli.command {
            slidecraft::cli::completions::print(shell);
        }
        return Ok(());
    };

    match cli.command {
        Commands::Create {
            generation,
            output,
            format,
            theme,
            images,
            from_outline,
            save_outline,
        } => {
            let options = CreateOptions {
                output,
                format,
                theme,
                images,
                from_outline,
                save_outline,
            };
            slidecraft::cli::commands::create_presentation(&settings, generation, options).await?;
        }
        Commands::Outline {
            generation,
            json,
            output,
        } => {
            slidecraft::cli::commands::show_outline(&settings, generation, json, output).await?;
        }
        Commands::Doctor { json } => {
            slidecraft::cli::commands::run_doctor(&settings, json).await?;
        }
        Commands::Config(config_cmd) => {
            slidecraft::cli::commands::config_command(&settings, config_cmd)?;
        }
        Commands::Completions { shell } => {
            slidecraft::cli::completions::print(shell);
        }
    }

    Ok(())
}
