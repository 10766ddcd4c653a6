//! careplan - Clinic care plan drafting
//!
//! Entry point for the careplan CLI and HTTP server.

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use careplan::cli::{Cli, Commands};
use careplan::config::Settings;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Load configuration only for runtime commands.
    let settings = match cli.command {
        Commands::Completions { .. } => None,
        _ => Some(Settings::load()?),
    };

    // Initialize logging
    let directive = match &settings {
        Some(settings) => settings.log_directive(cli.verbose),
        None if cli.verbose => "debug",
        None => "info",
    };
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(directive))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    let Some(settings) = settings else {
        if let Commands::Completions { shell } = cli.command {
            careplan::cli::completions::print(shell);
        }
        return Ok(());
    };

    match cli.command {
        Commands::Serve { bind, port } => {
            careplan::cli::commands::serve(settings, bind, port).await?;
        }
        Commands::CheckAccess { secret } => {
            careplan::cli::commands::check_access(&settings, &secret)?;
        }
        Commands::Prompt { input } => {
            careplan::cli::commands::print_prompt(&input)?;
        }
        Commands::Generate { input, output } => {
            careplan::cli::commands::generate_plan(&settings, &input, output).await?;
        }
        Commands::Render {
            patient,
            plan,
            format,
            output,
        } => {
            careplan::cli::commands::render_plan(&settings, &patient, &plan, format, output)?;
        }
        Commands::Doctor { json } => {
            careplan::cli::commands::run_doctor(&settings, json).await?;
        }
        Commands::Config(config_cmd) => {
            careplan::cli::commands::config_command(&settings, config_cmd)?;
        }
        Commands::Completions { .. } => unreachable!(),
    }

    Ok(())
}
